//! The `check` command: compile a template without merging it.

use std::fmt;

use docfill_diagnostic::ExpressionError;
use docfill_template::{compile_text, Element};

use super::{finish, read_file, CliOptions};

/// What a successful compile found.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CheckSummary {
    pub placeholders: usize,
    /// Repeat and conditional blocks, nested ones included.
    pub blocks: usize,
}

impl fmt::Display for CheckSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ok: {} placeholders, {} blocks", self.placeholders, self.blocks)
    }
}

pub fn check_source(source: &str, options: &CliOptions) -> Result<CheckSummary, ExpressionError> {
    let template = compile_text(source, &options.template_options())?;
    Ok(CheckSummary {
        placeholders: template.placeholders().len(),
        blocks: count_blocks(template.elements()),
    })
}

fn count_blocks(elements: &[Element]) -> usize {
    elements
        .iter()
        .map(|element| match element {
            Element::Text(_) => 0,
            Element::Repeat(anchor) => 1 + count_blocks(anchor.body.elements()),
            Element::Conditional(anchor) => 1 + count_blocks(anchor.body.elements()),
        })
        .sum()
}

/// Compile the template at `path` and report the outcome.
pub fn check_file(path: &str, options: &CliOptions) {
    let source = read_file(path);
    let result = check_source(&source, options);
    if options.json {
        finish(result.map(|summary| summary.to_string()), options);
        return;
    }
    match result {
        Ok(summary) => println!("{path}: {summary}"),
        Err(err) => {
            eprintln!("{path}:");
            eprintln!("{}", err.render());
            eprintln!("  = note: {}", err.code().description());
            std::process::exit(1);
        }
    }
}
