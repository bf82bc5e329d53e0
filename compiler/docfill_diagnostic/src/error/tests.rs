use super::*;
use crate::errors::{unresolved_reference, unterminated_placeholder};
use pretty_assertions::assert_eq;

#[test]
fn test_default_message_comes_from_kind() {
    let err = unresolved_reference("unknownVar");
    assert_eq!(err.message, "cannot resolve `unknownVar`");
    assert_eq!(err.code(), ErrorCode::E2001);
    assert!(err.is_unresolved_reference());
}

#[test]
fn test_at_keeps_innermost_span() {
    let err = unresolved_reference("x")
        .at(Span::new(4, 5))
        .at(Span::new(0, 9));
    assert_eq!(err.span, Some(Span::new(4, 5)));
    assert_eq!(err.offset(), Some(4));
}

#[test]
fn test_with_expression_keeps_first() {
    let err = unresolved_reference("x")
        .with_expression("x + 1")
        .with_expression("{x + 1}");
    assert_eq!(err.expression, "x + 1");
}

#[test]
fn test_display_includes_location() {
    let err = unresolved_reference("unknownVar")
        .at(Span::new(0, 10))
        .with_expression("unknownVar + 1");
    assert_eq!(
        err.to_string(),
        "[E2001] cannot resolve `unknownVar` in `unknownVar + 1` at offset 0"
    );
}

#[test]
fn test_render_caret() {
    let err = unresolved_reference("unknownVar")
        .at(Span::new(0, 10))
        .with_expression("unknownVar + 1");
    assert_eq!(
        err.render(),
        "error[E2001]: cannot resolve `unknownVar`\n  | unknownVar + 1\n  | ^^^^^^^^^^"
    );
}

#[test]
fn test_render_second_line() {
    let err = unterminated_placeholder("}", Span::new(8, 9)).with_expression("Dear X,\n{name");
    assert_eq!(
        err.render(),
        "error[E3001]: placeholder is never closed with `}`\n  | {name\n  | ^"
    );
}

#[test]
fn test_render_without_expression() {
    let err = unresolved_reference("x");
    assert_eq!(err.render(), "error[E2001]: cannot resolve `x`");
}
