//! Templates for docfill.
//!
//! This crate turns text containing placeholders into compiled
//! [`Template`]s and merges them against a [`VariableContext`]:
//!
//! - [`Extractor`] finds delimited placeholders, across text runs when a
//!   document splits its text into formatting runs.
//! - [`TemplateBuilder`] compiles text, repeat anchors and conditional
//!   anchors; [`compile_text`] does the same from plain text with
//!   `{#each}`/`{#if}` block directives.
//! - [`Template::merge`] renders a template. Merges share nothing mutable,
//!   so one template can serve many threads at once.
//!
//! [`VariableContext`]: docfill_eval::VariableContext

mod cache;
mod extractor;
mod merge;
mod options;
mod template;
pub mod text;

pub use cache::ExpressionCache;
pub use extractor::{splice_runs, Extractor, Match, Matches, RunPosition};
pub use merge::{fill_runs, truthy};
pub use options::{Delimiters, TemplateOptions};
pub use template::{ConditionalAnchor, Element, Fragment, Placeholder, RepeatAnchor, Template, TemplateBuilder};
pub use text::compile_text;

#[cfg(test)]
mod tests;
