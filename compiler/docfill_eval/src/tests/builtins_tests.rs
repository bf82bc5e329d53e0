use pretty_assertions::assert_eq;

use docfill_diagnostic::{ErrorCode, ErrorKind};
use docfill_ir::chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use docfill_ir::{BinaryOp, Decimal, Period, Temporal, TemporalUnit, Value};

use super::{binary, call, ident, lit};
use crate::{evaluate, Environment, NumberResolver, TemporalResolver, VariableContext};

fn noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn env() -> Environment {
    Environment::builder()
        .resolver(NumberResolver)
        .resolver(TemporalResolver::fixed(noon()))
        .build()
}

fn run(env: &Environment, name: &str, args: Vec<Value>) -> Result<Value, docfill_diagnostic::ExpressionError> {
    let scope = VariableContext::root(env);
    evaluate(&call(name, args.into_iter().map(lit).collect()), &scope)
}

fn date(y: i32, m: u32, d: u32) -> Value {
    Value::Temporal(Temporal::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap()))
}

#[test]
fn test_format_number() {
    let env = env();
    let n = Value::Number(Decimal::new(12345, 1));
    assert_eq!(
        run(&env, "formatNumber", vec![n.clone(), Value::from("#,##0.00")]).unwrap(),
        Value::from("1,234.50")
    );
    assert_eq!(run(&env, "grouped", vec![Value::from(1_234_567)]).unwrap(), Value::from("1,234,567"));
    assert_eq!(run(&env, "currency", vec![n.clone()]).unwrap(), Value::from("$1,234.50"));
    assert_eq!(
        run(&env, "currency", vec![n, Value::from("¥"), Value::from(0)]).unwrap(),
        Value::from("¥1,235")
    );
}

#[test]
fn test_invalid_number_pattern() {
    let err = run(&env(), "formatNumber", vec![Value::from(1), Value::from("abc")]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E2005);
    assert!(matches!(err.kind, ErrorKind::FormatError { ref pattern, .. } if pattern == "abc"));
}

#[test]
fn test_rounding_functions() {
    let env = env();
    let n = Value::Number(Decimal::new(25, 1));
    assert_eq!(run(&env, "round", vec![n.clone()]).unwrap(), Value::from(3));
    assert_eq!(run(&env, "floor", vec![n.clone()]).unwrap(), Value::from(2));
    assert_eq!(run(&env, "ceil", vec![n]).unwrap(), Value::from(3));
    assert_eq!(
        run(&env, "round", vec![Value::Number(Decimal::new(-1235, 3)), Value::from(2)]).unwrap(),
        Value::Number(Decimal::new(-124, 2))
    );
    assert_eq!(run(&env, "fixed", vec![Value::from(2), Value::from(2)]).unwrap(), Value::from("2.00"));
}

#[test]
fn test_parse_number() {
    let env = env();
    assert_eq!(
        run(&env, "parseNumber", vec![Value::from(" 1,234.5 ")]).unwrap(),
        Value::Number(Decimal::new(12345, 1))
    );
    assert!(run(&env, "parseNumber", vec![Value::from("twelve")]).is_err());
}

#[test]
fn test_null_argument_propagates() {
    let env = env();
    assert_eq!(run(&env, "formatNumber", vec![Value::Null, Value::from("#")]).unwrap(), Value::Null);
    assert_eq!(run(&env, "formatDate", vec![Value::Null, Value::from("%Y")]).unwrap(), Value::Null);
}

#[test]
fn test_wrong_arity_and_type() {
    let env = env();
    let err = run(&env, "round", vec![]).unwrap_err();
    assert!(err.message.contains("round"));
    let err = run(&env, "abs", vec![Value::from("x")]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

#[test]
fn test_fixed_clock_identifiers() {
    let env = env();
    let scope = VariableContext::root(&env);
    assert_eq!(evaluate(&ident("today"), &scope).unwrap(), date(2024, 3, 15));
    assert_eq!(evaluate(&ident("$today"), &scope).unwrap(), date(2024, 3, 15));
    let earlier = binary(
        BinaryOp::Sub,
        ident("now"),
        lit(Value::Period(Period::new(10, TemporalUnit::Minute))),
    );
    assert_eq!(
        evaluate(&earlier, &scope).unwrap(),
        Value::Temporal(Temporal::DateTime(
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(11, 50, 0).unwrap()
        ))
    );
}

#[test]
fn test_format_and_parse_dates() {
    let env = env();
    assert_eq!(
        run(&env, "formatDate", vec![date(2024, 3, 5), Value::from("%Y年%m月%d日")]).unwrap(),
        Value::from("2024年03月05日")
    );
    assert_eq!(
        run(&env, "parseDate", vec![Value::from("05/03/2024"), Value::from("%d/%m/%Y")]).unwrap(),
        date(2024, 3, 5)
    );
    let err = run(&env, "parseDate", vec![Value::from("yesterday"), Value::from("%Y-%m-%d")]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E2005);
}

#[test]
fn test_parse_time_and_datetime() {
    let env = env();
    assert_eq!(
        run(&env, "parseTime", vec![Value::from("09:30"), Value::from("%H:%M")]).unwrap(),
        Value::Temporal(Temporal::Time(NaiveTime::from_hms_opt(9, 30, 0).unwrap()))
    );
    assert_eq!(
        run(&env, "parseDateTime", vec![Value::from("2024-03-15 12:00"), Value::from("%Y-%m-%d %H:%M")]).unwrap(),
        Value::Temporal(Temporal::DateTime(noon()))
    );
    let err = run(&env, "parseTime", vec![Value::from("noon"), Value::from("%H:%M")]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E2005);
}

#[test]
fn test_format_date_with_missing_fields() {
    let err = run(&env(), "formatDate", vec![date(2024, 1, 1), Value::from("%H:%M")]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E2005);
}

#[test]
fn test_plus_minus_between() {
    let env = env();
    assert_eq!(
        run(&env, "plus", vec![date(2024, 1, 31), Value::from(1), Value::from("month")]).unwrap(),
        date(2024, 2, 29)
    );
    assert_eq!(
        run(&env, "minus", vec![date(2024, 3, 1), Value::from(1), Value::from("日")]).unwrap(),
        date(2024, 2, 29)
    );
    assert_eq!(
        run(&env, "between", vec![date(2024, 1, 15), date(2024, 3, 14), Value::from("days")]).unwrap(),
        Value::from(59)
    );
    let err = run(&env, "plus", vec![date(2024, 1, 1), Value::from(1), Value::from("fortnight")]).unwrap_err();
    assert!(err.message.contains("fortnight"));
}

#[test]
fn test_date_constructor() {
    let env = env();
    assert_eq!(
        run(&env, "date", vec![Value::from(2024), Value::from(2), Value::from(29)]).unwrap(),
        date(2024, 2, 29)
    );
    assert!(run(&env, "date", vec![Value::from(2023), Value::from(2), Value::from(29)]).is_err());
}
