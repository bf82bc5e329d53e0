use pretty_assertions::assert_eq;

use docfill_diagnostic::ErrorCode;
use docfill_ir::Value;

use crate::commands::{check_source, eval_source, render_source, CheckSummary, CliOptions, Report};
use crate::data::parse_bindings;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

#[test]
fn test_option_parsing() {
    let (positional, options) = CliOptions::parse(&args(&[
        "letter.txt",
        "--data",
        "data.json",
        "--start=<<",
        "--end",
        ">>",
        "--vertical",
    ]))
    .unwrap();
    assert_eq!(positional, vec!["letter.txt".to_string()]);
    assert_eq!(
        options,
        CliOptions {
            data: Some("data.json".to_string()),
            start: Some("<<".to_string()),
            end: Some(">>".to_string()),
            vertical: true,
            ..CliOptions::default()
        }
    );
}

#[test]
fn test_option_errors() {
    assert!(CliOptions::parse(&args(&["--data"])).is_err());
    assert!(CliOptions::parse(&args(&["--bogus"])).is_err());
}

#[test]
fn test_render_source() {
    let bindings = parse_bindings(
        r#"{"customer": {"name": "Ann"}, "items": [{"name": "pen", "price": 1.5}, {"name": "ink", "price": 3}]}"#,
    )
    .unwrap();
    let source = "Dear {customer.name},\n{#each items as item}\n- {item.name}: {fixed(item.price, 2)}\n{/each}\nTotal items: {items.size}\n";
    let output = render_source(source, &bindings, &CliOptions::default()).unwrap();
    assert_eq!(output, "Dear Ann,\n- pen: 1.50\n- ink: 3.00\nTotal items: 2\n");
}

#[test]
fn test_render_with_custom_delimiters() {
    let options = CliOptions {
        start: Some("<<".to_string()),
        end: Some(">>".to_string()),
        ..CliOptions::default()
    };
    let bindings = vec![("name".to_string(), Value::from("Bob"))];
    assert_eq!(
        render_source("{literal} <<name>>", &bindings, &options).unwrap(),
        "{literal} Bob"
    );
}

#[test]
fn test_no_builtins() {
    let options = CliOptions {
        no_builtins: true,
        ..CliOptions::default()
    };
    let err = eval_source("round(1.5)", &[], &options).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E2001);
    assert_eq!(eval_source("round(1.5)", &[], &CliOptions::default()).unwrap(), "2");
}

#[test]
fn test_eval_formats() {
    let options = CliOptions::default();
    assert_eq!(eval_source("1 + 2 * 3", &[], &options).unwrap(), "7");
    assert_eq!(eval_source("10 + 1.1", &[], &options).unwrap(), "11.1");
    assert_eq!(eval_source("date(2024, 1, 31) + 1month", &[], &options).unwrap(), "2024-02-29");
    assert_eq!(eval_source("missing?", &[], &options).unwrap(), "");
    let vertical = CliOptions {
        vertical: true,
        ..CliOptions::default()
    };
    assert_eq!(eval_source("2000 + 24", &[], &vertical).unwrap(), "二〇二四");
}

#[test]
fn test_check_source() {
    let summary = check_source(
        "{#each xs as x}{#if x}{x}{/if}{/each}{total}",
        &CliOptions::default(),
    )
    .unwrap();
    assert_eq!(
        summary,
        CheckSummary {
            placeholders: 2,
            blocks: 2,
        }
    );
    let err = check_source("{#if x}open", &CliOptions::default()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1001);
}

#[test]
fn test_json_report() {
    let failed = eval_source("1 / 0", &[], &CliOptions::default());
    let report = serde_json::to_value(Report::from_result(&failed)).unwrap();
    assert_eq!(report["success"], serde_json::json!(false));
    assert_eq!(report["error"]["code"], serde_json::json!("E2004"));
    assert_eq!(report["error"]["expression"], serde_json::json!("1 / 0"));

    let ok = eval_source("1 + 1", &[], &CliOptions::default());
    let report = serde_json::to_value(Report::from_result(&ok)).unwrap();
    assert_eq!(report["output"], serde_json::json!("2"));
}
