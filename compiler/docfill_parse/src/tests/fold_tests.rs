use pretty_assertions::assert_eq;
use proptest::prelude::*;

use docfill_diagnostic::ErrorCode;
use docfill_eval::{Environment, FnResolver, VariableContext};
use docfill_ir::{ExprKind, Value};

use crate::{parse, ParseOptions};

#[test]
fn test_literal_arithmetic_folds() {
    let expr = parse("1+2*3").unwrap();
    assert!(expr.is_constant());
    assert_eq!(expr.to_string(), "const 7");
}

#[test]
fn test_folded_value_ignores_context() {
    let expr = parse("1+2*3").unwrap();
    let empty_env = Environment::default();
    let empty = VariableContext::root(&empty_env);
    assert_eq!(expr.evaluate(&empty).unwrap(), Value::from(7));

    let env = Environment::standard();
    let busy = VariableContext::root(&env).with("x", 100).with("1", "one");
    assert_eq!(expr.evaluate(&busy).unwrap(), Value::from(7));
}

#[test]
fn test_partial_folding() {
    let expr = parse("price * (2 + 3)").unwrap();
    assert!(!expr.is_constant());
    assert_eq!(expr.to_string(), "(price * const 5)");
}

#[test]
fn test_failing_fold_is_deferred() {
    let expr = parse("1 / 0").unwrap();
    assert!(!expr.is_constant());
    assert!(matches!(expr.root().kind, ExprKind::Binary { .. }));

    let env = Environment::default();
    let err = expr.evaluate(&VariableContext::root(&env)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E2004);
    assert_eq!(err.expression, "1 / 0");
}

#[test]
fn test_short_circuit_folds() {
    assert_eq!(parse("false && missing").unwrap().to_string(), "const false");
    assert_eq!(parse("true or missing").unwrap().to_string(), "const true");
    assert!(!parse("true && missing").unwrap().is_constant());
}

#[test]
fn test_string_and_field_folds() {
    assert_eq!(parse("\"No.\" + 1").unwrap().to_string(), "const \"No.1\"");
    assert_eq!(parse("'abc'.length").unwrap().to_string(), "const 3");
}

#[test]
fn test_identifiers_do_not_fold_without_constant_resolver() {
    let expr = parse("TAX * 2").unwrap();
    assert!(!expr.is_constant());
}

#[test]
fn test_constant_resolver_folds_identifiers_and_calls() {
    let constants = FnResolver::new("constants")
        .constant("TAX", 8)
        .function("double", |args| {
            Ok(args.first().and_then(Value::as_number).map(|n| Value::Number(n * docfill_ir::Decimal::TWO)))
        });
    let options = ParseOptions::new().with_constants(constants);

    let expr = options.parse("TAX * 2").unwrap();
    assert_eq!(expr.to_string(), "const 16");

    let expr = options.parse("double(TAX) + 1").unwrap();
    assert_eq!(expr.to_string(), "const 17");

    // Unknown names stay runtime lookups.
    let expr = options.parse("qty * TAX").unwrap();
    assert_eq!(expr.to_string(), "(qty * const 8)");
}

#[test]
fn test_calls_stay_runtime_without_constant_resolver() {
    let expr = parse("round(1.5)").unwrap();
    assert!(!expr.is_constant());
}

#[test]
fn test_repeated_evaluation_is_deterministic() {
    let expr = parse("a * 2 + 1").unwrap();
    let env = Environment::default();
    let scope = VariableContext::root(&env).with("a", 4);
    let first = expr.evaluate(&scope).unwrap();
    for _ in 0..10 {
        assert_eq!(expr.evaluate(&scope).unwrap(), first);
    }
}

fn arithmetic() -> impl Strategy<Value = String> {
    let leaf = (0i64..1000).prop_map(|n| n.to_string());
    leaf.prop_recursive(4, 32, 2, |inner| {
        (inner.clone(), prop::sample::select(vec!["+", "-", "*", "/", "%"]), inner)
            .prop_map(|(l, op, r)| format!("({l} {op} {r})"))
    })
}

proptest! {
    #[test]
    fn folding_preserves_meaning(source in arithmetic()) {
        let env = Environment::default();
        let scope = VariableContext::root(&env).with("unused", 1);
        let folded = parse(&source).unwrap().evaluate(&scope);
        let plain = ParseOptions::new().without_folding().parse(&source).unwrap().evaluate(&scope);
        match (folded, plain) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => prop_assert_eq!(a.code(), b.code()),
            (a, b) => prop_assert!(false, "folded {:?} vs plain {:?}", a, b),
        }
    }
}
