use pretty_assertions::assert_eq;

use docfill_diagnostic::ErrorCode;
use docfill_eval::{Environment, VariableContext};
use docfill_ir::{Decimal, Period, TemporalUnit, Value};

use super::{bind_all, person, render, render_with};
use crate::{fill_runs, truthy, Template, TemplateOptions};

fn people() -> Value {
    Value::list(vec![person("Ann", 30), person("Bob", 41)])
}

#[test]
fn test_plain_text_is_unchanged() {
    assert_eq!(render("no placeholders here", &[]), "no placeholders here");
}

#[test]
fn test_substitution() {
    assert_eq!(render("Hello {name}!", &[("name", "Ann".into())]), "Hello Ann!");
}

#[test]
fn test_arithmetic_is_exact() {
    let price = Value::Number(Decimal::new(125, 2));
    assert_eq!(render("{price * 2}", &[("price", price)]), "2.5");
}

#[test]
fn test_record_fields() {
    assert_eq!(
        render("{person.name} is {person.age}", &[("person", person("Ann", 30))]),
        "Ann is 30"
    );
}

#[test]
fn test_number_format_option() {
    let options = TemplateOptions::default().number_format("#,##0.00");
    let total = Value::Number(Decimal::new(12345, 1));
    assert_eq!(render_with("{total}", &options, &[("total", total)]), "1,234.50");
}

#[test]
fn test_vertical_digits() {
    let options = TemplateOptions::default().vertical(true);
    assert_eq!(render_with("{year}年", &options, &[("year", 2024.into())]), "二〇二四年");
}

#[test]
fn test_vertical_converts_literal_digits() {
    let options = TemplateOptions::default().vertical(true);
    assert_eq!(
        render_with("{year}年 第1号", &options, &[("year", 2024.into())]),
        "二〇二四年 第一号"
    );
}

#[test]
fn test_optional_marker_renders_missing_as_empty() {
    assert_eq!(render("[{nickname?}]", &[]), "[]");
}

#[test]
fn test_missing_reference_is_an_error() {
    let template = Template::compile("x {nickname}", &TemplateOptions::default()).unwrap();
    let env = Environment::standard();
    let err = template.merge(&VariableContext::root(&env)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E2001);
    assert_eq!(err.expression, "nickname");
}

#[test]
fn test_list_in_text_slot() {
    let template = Template::compile("{items}", &TemplateOptions::default()).unwrap();
    let env = Environment::standard();
    let scope = VariableContext::root(&env).with("items", Value::list(vec![Value::from(1)]));
    assert_eq!(template.merge(&scope).unwrap_err().code(), ErrorCode::E2003);
}

fn repeat_template(collection: &str) -> Template {
    let options = TemplateOptions::default();
    let mut builder = Template::builder(&options).unwrap();
    let body = {
        let mut body = builder.nested();
        body.text("{index}:{item.name};").unwrap();
        body.build()
    };
    builder
        .text("[")
        .unwrap()
        .repeat(collection, "item", body)
        .unwrap()
        .text("]{item?}")
        .unwrap();
    builder.build()
}

#[test]
fn test_repeat_expands_once_per_item() {
    let template = repeat_template("people");
    let env = Environment::standard();
    let scope = VariableContext::root(&env).with("people", people());
    assert_eq!(
        template.merge(&scope).unwrap(),
        vec!["[", "0:Ann;", "1:Bob;", "]"]
    );
}

#[test]
fn test_positional_field() {
    assert_eq!(render("{people.2.name}, {people.3.name?}", &[("people", people())]), "Bob, ");
}

#[test]
fn test_repeat_over_empty_list() {
    let template = repeat_template("people");
    let env = Environment::standard();
    let scope = VariableContext::root(&env).with("people", Value::list(Vec::new()));
    assert_eq!(template.merge_to_string(&scope).unwrap(), "[]");
}

#[test]
fn test_repeat_requires_list() {
    let template = repeat_template("people");
    let env = Environment::standard();
    let scope = VariableContext::root(&env).with("people", "Ann");
    let err = template.merge(&scope).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E2002);
    assert_eq!(err.expression, "people");
    assert!(err.message.contains("list"));
}

#[test]
fn test_optional_repeat_over_missing_list() {
    let template = repeat_template("people?");
    let env = Environment::standard();
    assert_eq!(template.merge_to_string(&VariableContext::root(&env)).unwrap(), "[]");
}

#[test]
fn test_repeat_with_named_counter() {
    let options = TemplateOptions::default();
    let mut builder = Template::builder(&options).unwrap();
    let mut body = builder.nested();
    body.text("{n + 1}.{p.name} ").unwrap();
    builder.repeat_indexed("people", "p", "n", body.build()).unwrap();
    let template = builder.build();

    let env = Environment::standard();
    let scope = VariableContext::root(&env).with("people", people());
    assert_eq!(template.merge_to_string(&scope).unwrap(), "1.Ann 2.Bob ");
}

#[test]
fn test_invalid_binding_name() {
    let options = TemplateOptions::default();
    let mut builder = Template::builder(&options).unwrap();
    let body = builder.nested().build();
    let err = builder.repeat("people", "1st", body).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1001);
}

#[test]
fn test_conditional() {
    let options = TemplateOptions::default();
    let mut builder = Template::builder(&options).unwrap();
    let mut body = builder.nested();
    body.text("VIP ").unwrap();
    builder.conditional("customer.age >= 40", body.build()).unwrap();
    builder.text("{customer.name}").unwrap();
    let template = builder.build();

    let env = Environment::standard();
    let bob = VariableContext::root(&env).with("customer", person("Bob", 41));
    let ann = VariableContext::root(&env).with("customer", person("Ann", 30));
    assert_eq!(template.merge_to_string(&bob).unwrap(), "VIP Bob");
    assert_eq!(template.merge_to_string(&ann).unwrap(), "Ann");
}

#[test]
fn test_merge_is_repeatable() {
    let template = repeat_template("people");
    let env = Environment::standard();
    let scope = VariableContext::root(&env).with("people", people());
    let first = template.merge(&scope).unwrap();
    let second = template.merge(&scope).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_placeholders_include_nested_bodies() {
    let template = repeat_template("people");
    let sources: Vec<&str> = template
        .placeholders()
        .into_iter()
        .map(|p| p.expression.source())
        .collect();
    assert_eq!(sources, vec!["index", "item.name", "item?"]);
}

#[test]
fn test_truthy() {
    assert!(truthy(&Value::Bool(true)).unwrap());
    assert!(!truthy(&Value::Null).unwrap());
    assert!(!truthy(&Value::from("  ")).unwrap());
    assert!(truthy(&Value::from("x")).unwrap());
    assert!(!truthy(&Value::from(0)).unwrap());
    assert!(truthy(&Value::from(-1)).unwrap());
    assert!(!truthy(&Value::list(Vec::new())).unwrap());
    let period = Value::Period(Period::new(1, TemporalUnit::Day));
    assert_eq!(truthy(&period).unwrap_err().code(), ErrorCode::E2002);
}

#[test]
fn test_empty_delimiters_are_rejected() {
    for (start, end) in [("", ""), ("<<", ""), ("", ">>")] {
        let options = TemplateOptions::default().delimiters(start, end);
        let err = Template::compile("{x}", &options).unwrap_err();
        assert_eq!(err.code(), ErrorCode::E2005, "{start:?} {end:?}");
        assert!(err.message.contains("delimiters"));
    }
    let env = Environment::standard();
    let options = TemplateOptions::default().delimiters("", "");
    assert!(fill_runs(&["x"], &VariableContext::root(&env), &options).is_err());
}

#[test]
fn test_fill_runs() {
    let runs = ["Dear {cust", "omer}, you owe {amount}."];
    let env = Environment::standard();
    let scope = bind_all(
        VariableContext::root(&env),
        &[("customer", "Ann".into()), ("amount", 12.into())],
    );
    let filled = fill_runs(&runs, &scope, &TemplateOptions::default()).unwrap();
    assert_eq!(filled, vec!["Dear Ann", ", you owe 12."]);
}

#[test]
fn test_fill_runs_vertical() {
    let runs = ["{year}年", "第2号"];
    let env = Environment::standard();
    let scope = bind_all(VariableContext::root(&env), &[("year", 2024.into())]);
    let options = TemplateOptions::default().vertical(true);
    let filled = fill_runs(&runs, &scope, &options).unwrap();
    assert_eq!(filled, vec!["二〇二四年", "第二号"]);
}
