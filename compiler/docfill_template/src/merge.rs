//! The merge engine.
//!
//! Merging walks a compiled template against a scope. Text fragments are
//! rendered with every placeholder replaced by its formatted value, and in
//! vertical mode the whole rendered fragment has its digits converted; repeat
//! anchors require a list and merge their body once per item in a fresh
//! child scope; conditional anchors merge their body at most once.
//!
//! A merge either succeeds completely or returns the first error. No state
//! survives between merges, so the same template and context always produce
//! the same output.

use tracing::{debug, instrument};

use docfill_diagnostic::errors::{repeat_requires_list, type_mismatch};
use docfill_diagnostic::Result;
use docfill_eval::{verticalize, VariableContext};
use docfill_ir::{Decimal, Value};
use docfill_parse::Expression;

use crate::extractor::splice_runs;
use crate::template::{Element, Fragment, Piece, Settings, Template};

impl Template {
    /// Merge into an ordered list of rendered pieces: one entry per text
    /// element, with repeat and conditional bodies expanded in place.
    #[instrument(level = "debug", skip_all)]
    pub fn merge(&self, scope: &VariableContext<'_>) -> Result<Vec<String>> {
        let mut out = Vec::new();
        self.merge_into(scope, &mut out)?;
        Ok(out)
    }

    /// Merge and concatenate.
    pub fn merge_to_string(&self, scope: &VariableContext<'_>) -> Result<String> {
        Ok(self.merge(scope)?.concat())
    }

    fn merge_into(&self, scope: &VariableContext<'_>, out: &mut Vec<String>) -> Result<()> {
        for element in self.elements.iter() {
            match element {
                Element::Text(fragment) => out.push(render_fragment(fragment, scope, &self.settings)?),
                Element::Repeat(anchor) => {
                    let collection = evaluate_optional(&anchor.collection, scope)?;
                    let items = match collection {
                        Value::List(items) => items,
                        Value::Null if anchor.collection.is_optional() => continue,
                        other => {
                            return Err(repeat_requires_list(other.type_name())
                                .at(anchor.collection.root().span)
                                .with_expression(anchor.collection.source()));
                        }
                    };
                    debug!(
                        collection = anchor.collection.source(),
                        count = items.len(),
                        "expanding repeat anchor"
                    );
                    for (i, item) in items.iter().enumerate() {
                        let mut child = scope.child();
                        child.bind(anchor.item.clone(), item.clone());
                        child.bind(anchor.index.clone(), Value::Number(Decimal::from(i)));
                        anchor.body.merge_into(&child, out)?;
                    }
                }
                Element::Conditional(anchor) => {
                    let condition = evaluate_optional(&anchor.condition, scope)?;
                    let include = truthy(&condition).map_err(|e| {
                        e.at(anchor.condition.root().span)
                            .with_expression(anchor.condition.source())
                    })?;
                    if include {
                        anchor.body.merge_into(scope, out)?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Evaluate, turning an unresolved reference into `null` for expressions
/// written with the `?` marker.
fn evaluate_optional(expression: &Expression, scope: &VariableContext<'_>) -> Result<Value> {
    match expression.evaluate(scope) {
        Err(err) if expression.is_optional() && err.is_unresolved_reference() => Ok(Value::Null),
        result => result,
    }
}

/// Condition truthiness: booleans as they are, `null` false, strings when
/// not blank, numbers when non-zero, lists when non-empty, dates and times
/// always.
pub fn truthy(value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Null => Ok(false),
        Value::Str(s) => Ok(!s.trim().is_empty()),
        Value::Number(n) => Ok(!n.is_zero()),
        Value::List(items) => Ok(!items.is_empty()),
        Value::Temporal(_) => Ok(true),
        Value::Period(_) | Value::Object(_) => Err(type_mismatch("condition", value.type_name())
            .with_message(format!("a {} cannot be used as a condition", value.type_name()))),
    }
}

pub(crate) fn render_fragment(fragment: &Fragment, scope: &VariableContext<'_>, settings: &Settings) -> Result<String> {
    let mut out = String::new();
    for piece in &fragment.pieces {
        match piece {
            Piece::Literal(text) => out.push_str(text),
            Piece::Placeholder(placeholder) => {
                let expression = &placeholder.expression;
                let value = evaluate_optional(expression, scope)?;
                out.push_str(&render_value(&value, expression, settings)?);
            }
        }
    }
    Ok(if settings.vertical { verticalize(&out) } else { out })
}

fn render_value(value: &Value, expression: &Expression, settings: &Settings) -> Result<String> {
    settings
        .formats
        .text(value)
        .map_err(|e| e.at(expression.root().span).with_expression(expression.source()))
}

/// Fill the placeholders of a run-based document in place.
///
/// Each placeholder is evaluated in `scope` and its text written into the
/// run where the placeholder starts; see [`splice_runs`]. In vertical mode
/// every run is converted afterwards, literal text included. Repeat and
/// conditional anchors belong to the document model and are not handled
/// here.
pub fn fill_runs<S: AsRef<str>>(
    runs: &[S],
    scope: &VariableContext<'_>,
    options: &crate::TemplateOptions,
) -> Result<Vec<String>> {
    let settings = Settings::new(options)?;
    let mut replacements = Vec::new();
    for found in settings.extractor.matches(runs) {
        let found = found?;
        let expression = settings.cache.get_or_compile(&found.expression)?;
        let value = evaluate_optional(&expression, scope)?;
        let text = render_value(&value, &expression, &settings)?;
        replacements.push((found, text));
    }
    let filled = splice_runs(runs, &replacements);
    if settings.vertical {
        return Ok(filled.iter().map(|run| verticalize(run)).collect());
    }
    Ok(filled)
}
