use pretty_assertions::assert_eq;

use docfill_diagnostic::ErrorCode;
use docfill_eval::{Environment, VariableContext};
use docfill_ir::Value;

use super::{bind_all, person};
use crate::text::compile_text;
use crate::TemplateOptions;

fn render_text(source: &str, bindings: &[(&str, Value)]) -> String {
    let template = compile_text(source, &TemplateOptions::default()).unwrap();
    let env = Environment::standard();
    let scope = bind_all(VariableContext::root(&env), bindings);
    template.merge_to_string(&scope).unwrap()
}

fn people() -> Value {
    Value::list(vec![person("Ann", 30), person("Bob", 41)])
}

#[test]
fn test_each_block_lines() {
    let source = "Guests:\n{#each people as p, i}\n{i + 1}. {p.name}\n{/each}\nThanks";
    assert_eq!(
        render_text(source, &[("people", people())]),
        "Guests:\n1. Ann\n2. Bob\nThanks"
    );
}

#[test]
fn test_each_default_counter() {
    let source = "{#each xs as x}{index}{x} {/each}";
    let xs = Value::list(vec!["a".into(), "b".into()]);
    assert_eq!(render_text(source, &[("xs", xs)]), "0a 1b ");
}

#[test]
fn test_inline_if() {
    let source = "Hi{#if vip} VIP{/if}!";
    assert_eq!(render_text(source, &[("vip", true.into())]), "Hi VIP!");
    assert_eq!(render_text(source, &[("vip", false.into())]), "Hi!");
}

#[test]
fn test_if_inside_each() {
    let source = "{#each people as p}{p.name}{#if p.age > 40}*{/if};{/each}";
    assert_eq!(render_text(source, &[("people", people())]), "Ann;Bob*;");
}

#[test]
fn test_text_without_directives() {
    assert_eq!(render_text("{a} + {b}", &[("a", 1.into()), ("b", 2.into())]), "1 + 2");
}

fn compile_error(source: &str) -> docfill_diagnostic::ExpressionError {
    compile_text(source, &TemplateOptions::default()).unwrap_err()
}

#[test]
fn test_unclosed_block() {
    let err = compile_error("{#each xs as x} {x}");
    assert_eq!(err.code(), ErrorCode::E1001);
    assert_eq!(err.expression, "#each xs as x");
}

#[test]
fn test_end_without_open_block() {
    assert_eq!(compile_error("text {/if}").code(), ErrorCode::E1001);
}

#[test]
fn test_mismatched_end() {
    let err = compile_error("{#each xs as x}{x}{/if}");
    assert_eq!(err.code(), ErrorCode::E1001);
    assert_eq!(err.expression, "/if");
}

#[test]
fn test_malformed_directives() {
    for source in ["{#each xs}{/each}", "{#if}{/if}", "{#unless x}", "{#each xs as a, b, c}{/each}"] {
        assert_eq!(compile_error(source).code(), ErrorCode::E1001, "{source}");
    }
}

#[test]
fn test_invalid_item_name() {
    assert_eq!(compile_error("{#each xs as 1x}{/each}").code(), ErrorCode::E1001);
}
