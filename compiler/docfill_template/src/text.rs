//! Plain-text documents with block directives.
//!
//! Placeholders use the configured delimiters. Blocks are written with the
//! same delimiters and a leading `#` or `/`:
//!
//! ```text
//! {#each items as item, i}
//! {i}. {item.name}
//! {/each}
//! {#if notes}Notes: {notes}{/if}
//! ```
//!
//! A directive alone on its line takes the whole line with it, so block
//! markers do not leave blank lines in the output.

use docfill_diagnostic::errors::syntax_error;
use docfill_diagnostic::Result;
use docfill_ir::Span;

use crate::extractor::{Extractor, Match};
use crate::options::TemplateOptions;
use crate::template::{Template, TemplateBuilder};

enum Directive<'a> {
    Each {
        collection: &'a str,
        item: &'a str,
        index: Option<&'a str>,
    },
    If {
        condition: &'a str,
    },
    End(BlockKind),
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum BlockKind {
    Each,
    If,
}

/// An open block waiting for its end directive.
struct Frame {
    builder: TemplateBuilder,
    opener: Opener,
    /// The opening directive, for diagnostics.
    raw: String,
}

enum Opener {
    Each {
        collection: String,
        item: String,
        index: Option<String>,
    },
    If {
        condition: String,
    },
}

impl Opener {
    fn kind(&self) -> BlockKind {
        match self {
            Opener::Each { .. } => BlockKind::Each,
            Opener::If { .. } => BlockKind::If,
        }
    }
}

/// Compile a plain-text document.
pub fn compile_text(source: &str, options: &TemplateOptions) -> Result<Template> {
    let mut root = TemplateBuilder::new(options)?;
    let extractor = Extractor::new(options.delimiters.clone());
    let mut open: Vec<Frame> = Vec::new();
    // Start of text not yet handed to a builder.
    let mut cursor = 0;

    for found in extractor.matches_in(source) {
        let found = found?;
        let Some(directive) = parse_directive(&found)? else {
            continue;
        };
        let (text_end, resume) = directive_bounds(source, &found);
        current(&mut root, &mut open).text(&source[cursor..text_end])?;
        cursor = resume;

        let opener = match directive {
            Directive::Each {
                collection,
                item,
                index,
            } => Opener::Each {
                collection: collection.to_string(),
                item: item.to_string(),
                index: index.map(str::to_string),
            },
            Directive::If { condition } => Opener::If {
                condition: condition.to_string(),
            },
            Directive::End(kind) => {
                let frame = match open.pop() {
                    Some(frame) if frame.opener.kind() == kind => frame,
                    _ => {
                        return Err(directive_error(
                            &found.expression,
                            "end directive does not match an open block",
                        ))
                    }
                };
                close_block(current(&mut root, &mut open), frame)?;
                continue;
            }
        };
        let builder = current(&mut root, &mut open).nested();
        open.push(Frame {
            builder,
            opener,
            raw: found.expression.clone(),
        });
    }

    if let Some(unclosed) = open.pop() {
        return Err(directive_error(&unclosed.raw, "block is never closed"));
    }
    root.text(&source[cursor..])?;
    Ok(root.build())
}

/// The builder receiving text: the innermost open block, or the root.
fn current<'b>(root: &'b mut TemplateBuilder, open: &'b mut [Frame]) -> &'b mut TemplateBuilder {
    match open.last_mut() {
        Some(frame) => &mut frame.builder,
        None => root,
    }
}

fn close_block(parent: &mut TemplateBuilder, frame: Frame) -> Result<()> {
    let body = frame.builder.build();
    match frame.opener {
        Opener::Each {
            collection,
            item,
            index: Some(index),
        } => parent.repeat_indexed(&collection, &item, &index, body)?,
        Opener::Each {
            collection,
            item,
            index: None,
        } => parent.repeat(&collection, &item, body)?,
        Opener::If { condition } => parent.conditional(&condition, body)?,
    };
    Ok(())
}

/// Classify a placeholder. `Ok(None)` for ordinary expressions.
fn parse_directive(found: &Match) -> Result<Option<Directive<'_>>> {
    let raw = found.expression.trim();
    if let Some(rest) = keyword(raw, "#each") {
        let Some((collection, names)) = rest.rsplit_once(" as ") else {
            return Err(directive_error(&found.expression, "expected `#each <list> as <item>`"));
        };
        let mut names = names.split(',').map(str::trim);
        let item = names.next().unwrap_or_default();
        let index = names.next();
        if names.next().is_some() || item.is_empty() || collection.trim().is_empty() {
            return Err(directive_error(&found.expression, "expected `#each <list> as <item>[, <index>]`"));
        }
        return Ok(Some(Directive::Each {
            collection: collection.trim(),
            item,
            index,
        }));
    }
    if let Some(condition) = keyword(raw, "#if") {
        if condition.trim().is_empty() {
            return Err(directive_error(&found.expression, "expected `#if <condition>`"));
        }
        return Ok(Some(Directive::If {
            condition: condition.trim(),
        }));
    }
    Ok(match raw {
        "/each" => Some(Directive::End(BlockKind::Each)),
        "/if" => Some(Directive::End(BlockKind::If)),
        _ if raw.starts_with('#') || raw.starts_with('/') => {
            return Err(directive_error(&found.expression, "unknown directive"));
        }
        _ => None,
    })
}

/// The text after `word` when `raw` starts with it as a whole word.
fn keyword<'a>(raw: &'a str, word: &str) -> Option<&'a str> {
    let rest = raw.strip_prefix(word)?;
    (rest.is_empty() || rest.starts_with(char::is_whitespace)).then_some(rest)
}

/// Where the text before a directive ends and where text resumes after it.
///
/// When the directive is the only thing on its line, the line's leading
/// whitespace and trailing newline go with it.
fn directive_bounds(source: &str, found: &Match) -> (usize, usize) {
    let range = found.span.to_range();
    let line_start = source[..range.start].rfind('\n').map_or(0, |i| i + 1);
    let before = &source[line_start..range.start];
    let after = &source[range.end..];
    let line_rest = after.find('\n').map_or(after.len(), |i| i + 1);
    let standalone = before.trim().is_empty() && after[..line_rest].trim().is_empty();
    if standalone {
        (line_start, range.end + line_rest)
    } else {
        (range.start, range.end)
    }
}

fn directive_error(raw: &str, reason: &str) -> docfill_diagnostic::ExpressionError {
    syntax_error(reason, Span::from_range(0..raw.len())).with_expression(raw)
}
