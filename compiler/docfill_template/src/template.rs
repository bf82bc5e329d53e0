//! Compiled templates.
//!
//! A [`Template`] is an ordered list of [`Element`]s: text fragments with
//! embedded placeholders, repeat anchors that expand their body once per
//! list item, and conditional anchors that include their body or not.
//! Templates are immutable once built and can be merged any number of
//! times, from any number of threads.

use std::sync::Arc;

use tracing::debug;

use docfill_diagnostic::errors::syntax_error;
use docfill_diagnostic::Result;
use docfill_eval::Formats;
use docfill_ir::{Name, Span};
use docfill_parse::Expression;

use crate::cache::ExpressionCache;
use crate::extractor::Extractor;
use crate::options::TemplateOptions;

/// Settings shared by a template and all of its nested bodies.
#[derive(Debug)]
pub(crate) struct Settings {
    pub(crate) extractor: Extractor,
    pub(crate) formats: Formats,
    pub(crate) vertical: bool,
    pub(crate) index_name: Name,
    pub(crate) cache: ExpressionCache,
}

impl Settings {
    pub(crate) fn new(options: &TemplateOptions) -> Result<Self> {
        options.delimiters.validate()?;
        Ok(Settings {
            extractor: Extractor::new(options.delimiters.clone()),
            formats: options.formats()?,
            vertical: options.vertical,
            index_name: Name::from(options.index_name.as_str()),
            cache: ExpressionCache::new(options.parse.clone()),
        })
    }
}

/// A compiled, reusable template.
#[derive(Clone, Debug)]
pub struct Template {
    pub(crate) elements: Arc<[Element]>,
    pub(crate) settings: Arc<Settings>,
}

impl Template {
    pub fn builder(options: &TemplateOptions) -> Result<TemplateBuilder> {
        TemplateBuilder::new(options)
    }

    /// A template with a single text element.
    pub fn compile(source: &str, options: &TemplateOptions) -> Result<Template> {
        let mut builder = Template::builder(options)?;
        builder.text(source)?;
        Ok(builder.build())
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Every placeholder in the template, nested bodies included, in source
    /// order.
    pub fn placeholders(&self) -> Vec<&Placeholder> {
        let mut out = Vec::new();
        collect_placeholders(&self.elements, &mut out);
        out
    }
}

fn collect_placeholders<'t>(elements: &'t [Element], out: &mut Vec<&'t Placeholder>) {
    for element in elements {
        match element {
            Element::Text(fragment) => out.extend(fragment.placeholders()),
            Element::Repeat(anchor) => collect_placeholders(&anchor.body.elements, out),
            Element::Conditional(anchor) => collect_placeholders(&anchor.body.elements, out),
        }
    }
}

/// One template element.
#[derive(Clone, Debug)]
pub enum Element {
    Text(Fragment),
    Repeat(RepeatAnchor),
    Conditional(ConditionalAnchor),
}

/// Text with placeholders, split into literal and placeholder pieces.
#[derive(Clone, Debug)]
pub struct Fragment {
    pub(crate) pieces: Vec<Piece>,
}

#[derive(Clone, Debug)]
pub(crate) enum Piece {
    Literal(String),
    Placeholder(Placeholder),
}

impl Fragment {
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.pieces.iter().filter_map(|piece| match piece {
            Piece::Placeholder(p) => Some(p),
            Piece::Literal(_) => None,
        })
    }
}

/// A compiled placeholder and where it sat in its fragment.
#[derive(Clone, Debug)]
pub struct Placeholder {
    pub expression: Arc<Expression>,
    /// Span of the placeholder, delimiters included, in the fragment text.
    pub span: Span,
}

/// Expands `body` once per item of `collection`.
#[derive(Clone, Debug)]
pub struct RepeatAnchor {
    pub collection: Arc<Expression>,
    pub item: Name,
    pub index: Name,
    pub body: Template,
}

/// Includes `body` when `condition` is truthy.
#[derive(Clone, Debug)]
pub struct ConditionalAnchor {
    pub condition: Arc<Expression>,
    pub body: Template,
}

/// Builds a [`Template`] element by element.
///
/// Bodies of anchors are built with [`TemplateBuilder::nested`] so they share
/// the parent's options and expression cache.
#[derive(Debug)]
pub struct TemplateBuilder {
    elements: Vec<Element>,
    settings: Arc<Settings>,
}

impl TemplateBuilder {
    pub fn new(options: &TemplateOptions) -> Result<Self> {
        Ok(TemplateBuilder {
            elements: Vec::new(),
            settings: Arc::new(Settings::new(options)?),
        })
    }

    /// An empty builder sharing this builder's settings.
    pub fn nested(&self) -> TemplateBuilder {
        TemplateBuilder {
            elements: Vec::new(),
            settings: Arc::clone(&self.settings),
        }
    }

    /// Append text, compiling every placeholder in it.
    pub fn text(&mut self, source: &str) -> Result<&mut Self> {
        if source.is_empty() {
            return Ok(self);
        }
        let fragment = self.compile_fragment(source)?;
        self.elements.push(Element::Text(fragment));
        Ok(self)
    }

    /// Append a repeat anchor whose counter uses the default index name.
    pub fn repeat(&mut self, collection: &str, item: &str, body: Template) -> Result<&mut Self> {
        let index = Arc::clone(&self.settings.index_name);
        self.push_repeat(collection, item, index, body)
    }

    /// Append a repeat anchor with an explicit counter name.
    pub fn repeat_indexed(
        &mut self,
        collection: &str,
        item: &str,
        index: &str,
        body: Template,
    ) -> Result<&mut Self> {
        self.push_repeat(collection, item, Name::from(index), body)
    }

    pub fn conditional(&mut self, condition: &str, body: Template) -> Result<&mut Self> {
        let condition = self.settings.cache.get_or_compile(condition)?;
        self.elements
            .push(Element::Conditional(ConditionalAnchor { condition, body }));
        Ok(self)
    }

    pub fn build(self) -> Template {
        debug!(elements = self.elements.len(), "template compiled");
        Template {
            elements: self.elements.into(),
            settings: self.settings,
        }
    }

    /// Shared cache, for callers that compile loose expressions alongside
    /// the template.
    pub fn cache(&self) -> &ExpressionCache {
        &self.settings.cache
    }

    fn push_repeat(&mut self, collection: &str, item: &str, index: Name, body: Template) -> Result<&mut Self> {
        check_binding_name(item)?;
        check_binding_name(&index)?;
        let collection = self.settings.cache.get_or_compile(collection)?;
        self.elements.push(Element::Repeat(RepeatAnchor {
            collection,
            item: Name::from(item),
            index,
            body,
        }));
        Ok(self)
    }

    fn compile_fragment(&self, source: &str) -> Result<Fragment> {
        let mut pieces = Vec::new();
        let mut cursor = 0;
        for found in self.settings.extractor.matches_in(source) {
            let found = found?;
            let range = found.span.to_range();
            if range.start > cursor {
                pieces.push(Piece::Literal(source[cursor..range.start].to_string()));
            }
            let expression = self.settings.cache.get_or_compile(&found.expression)?;
            pieces.push(Piece::Placeholder(Placeholder {
                expression,
                span: found.span,
            }));
            cursor = range.end;
        }
        if cursor < source.len() {
            pieces.push(Piece::Literal(source[cursor..].to_string()));
        }
        Ok(Fragment { pieces })
    }
}

/// Item and index names must be plain identifiers.
pub(crate) fn check_binding_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$');
    if valid {
        Ok(())
    } else {
        Err(syntax_error(
            format!("`{name}` is not a valid binding name"),
            Span::from_range(0..name.len()),
        )
        .with_expression(name))
    }
}
