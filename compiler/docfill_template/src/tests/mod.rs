#![allow(clippy::unwrap_used, clippy::expect_used)]

mod merge_tests;
mod text_tests;

use docfill_eval::{Environment, VariableContext};
use docfill_ir::{Record, Value};

use crate::{Template, TemplateOptions};

/// Merge `source` with `bindings` in a standard environment.
pub(crate) fn render(source: &str, bindings: &[(&str, Value)]) -> String {
    render_with(source, &TemplateOptions::default(), bindings)
}

pub(crate) fn render_with(source: &str, options: &TemplateOptions, bindings: &[(&str, Value)]) -> String {
    let template = Template::compile(source, options).unwrap();
    let env = Environment::standard();
    let scope = bind_all(VariableContext::root(&env), bindings);
    template.merge_to_string(&scope).unwrap()
}

pub(crate) fn bind_all<'a>(mut scope: VariableContext<'a>, bindings: &[(&str, Value)]) -> VariableContext<'a> {
    for (name, value) in bindings {
        scope.bind(*name, value.clone());
    }
    scope
}

pub(crate) fn person(name: &str, age: i64) -> Value {
    Record::new().with("name", name).with("age", age).into_value()
}
