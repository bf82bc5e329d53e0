//! Centralized error constructors.
//!
//! Every message docfill produces is defined here, so wording stays
//! consistent between phases.
//!
//! # Usage
//!
//! ```ignore
//! use docfill_diagnostic::errors::{unresolved_reference, type_mismatch};
//! ```

use docfill_ir::Span;

use crate::error::{ErrorKind, ExpressionError};

// Lexer Errors

pub fn unexpected_character(c: char, span: Span) -> ExpressionError {
    ExpressionError::new(ErrorKind::LexError {
        reason: format!("unexpected character `{c}`"),
    })
    .at(span)
}

pub fn unterminated_string(span: Span) -> ExpressionError {
    ExpressionError::new(ErrorKind::LexError {
        reason: "unterminated string literal".to_string(),
    })
    .at(span)
}

pub fn invalid_escape(escape: char, span: Span) -> ExpressionError {
    ExpressionError::new(ErrorKind::LexError {
        reason: format!("invalid escape sequence `\\{escape}`"),
    })
    .at(span)
}

pub fn invalid_number(text: &str, span: Span) -> ExpressionError {
    ExpressionError::new(ErrorKind::LexError {
        reason: format!("invalid number literal `{text}`"),
    })
    .at(span)
}

// Parser Errors

pub fn unexpected_token(found: &str, expected: &str, span: Span) -> ExpressionError {
    ExpressionError::new(ErrorKind::SyntaxError {
        reason: format!("expected {expected}, found {found}"),
    })
    .at(span)
}

pub fn unmatched_paren(span: Span) -> ExpressionError {
    ExpressionError::new(ErrorKind::SyntaxError {
        reason: "unmatched `(`".to_string(),
    })
    .at(span)
}

pub fn empty_expression(span: Span) -> ExpressionError {
    ExpressionError::new(ErrorKind::SyntaxError {
        reason: "empty expression".to_string(),
    })
    .at(span)
}

pub fn syntax_error(reason: impl Into<String>, span: Span) -> ExpressionError {
    ExpressionError::new(ErrorKind::SyntaxError {
        reason: reason.into(),
    })
    .at(span)
}

// Resolution Errors

pub fn unresolved_reference(name: &str) -> ExpressionError {
    ExpressionError::new(ErrorKind::UnresolvedReference {
        name: name.to_string(),
    })
}

pub fn unknown_function(name: &str, argc: usize) -> ExpressionError {
    ExpressionError::new(ErrorKind::UnresolvedReference {
        name: name.to_string(),
    })
    .with_message(format!(
        "no resolver provides function `{name}` taking {argc} argument(s)"
    ))
}

pub fn unknown_field(type_name: &str, field: &str) -> ExpressionError {
    ExpressionError::new(ErrorKind::UnresolvedReference {
        name: field.to_string(),
    })
    .with_message(format!("{type_name} has no field `{field}`"))
}

pub fn no_accessor(type_name: &str, field: &str) -> ExpressionError {
    ExpressionError::new(ErrorKind::UnresolvedReference {
        name: field.to_string(),
    })
    .with_message(format!(
        "no field accessor registered for `{type_name}` (reading `{field}`)"
    ))
}

// Type Errors

pub fn type_mismatch(expected: &str, found: &str) -> ExpressionError {
    ExpressionError::new(ErrorKind::TypeMismatch {
        expected: expected.to_string(),
        found: found.to_string(),
    })
}

pub fn invalid_operands(op: &str, left: &str, right: &str) -> ExpressionError {
    ExpressionError::new(ErrorKind::TypeMismatch {
        expected: format!("operands supported by `{op}`"),
        found: format!("{left} and {right}"),
    })
    .with_message(format!("cannot apply `{op}` to {left} and {right}"))
}

pub fn wrong_arg_count(function: &str, expected: &str, got: usize) -> ExpressionError {
    ExpressionError::new(ErrorKind::TypeMismatch {
        expected: format!("{expected} argument(s)"),
        found: got.to_string(),
    })
    .with_message(format!(
        "`{function}` takes {expected} argument(s) but {got} were supplied"
    ))
}

pub fn wrong_arg_type(function: &str, position: usize, expected: &str, found: &str) -> ExpressionError {
    ExpressionError::new(ErrorKind::TypeMismatch {
        expected: expected.to_string(),
        found: found.to_string(),
    })
    .with_message(format!(
        "argument {} of `{function}` must be a {expected}, found {found}",
        position + 1
    ))
}

pub fn repeat_requires_list(found: &str) -> ExpressionError {
    ExpressionError::new(ErrorKind::TypeMismatch {
        expected: "list".to_string(),
        found: found.to_string(),
    })
    .with_message(format!("repeat anchor must be bound to a list, found {found}"))
}

pub fn non_scalar_result(found: &str) -> ExpressionError {
    ExpressionError::new(ErrorKind::NonScalarResult {
        found: found.to_string(),
    })
}

// Arithmetic Errors

pub fn division_by_zero() -> ExpressionError {
    ExpressionError::new(ErrorKind::Arithmetic {
        reason: "division by zero".to_string(),
    })
}

pub fn arithmetic_overflow(op: &str) -> ExpressionError {
    ExpressionError::new(ErrorKind::Arithmetic {
        reason: format!("arithmetic overflow in `{op}`"),
    })
}

// Format Errors

pub fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> ExpressionError {
    ExpressionError::new(ErrorKind::FormatError {
        pattern: pattern.to_string(),
        reason: reason.into(),
    })
}

pub fn unparsable_input(input: &str, pattern: &str) -> ExpressionError {
    ExpressionError::new(ErrorKind::FormatError {
        pattern: pattern.to_string(),
        reason: format!("`{input}` does not match"),
    })
}

// Template Errors

pub fn unterminated_placeholder(delimiter: &str, span: Span) -> ExpressionError {
    ExpressionError::new(ErrorKind::UnterminatedPlaceholder {
        delimiter: delimiter.to_string(),
    })
    .at(span)
}

pub fn stray_end_delimiter(delimiter: &str, span: Span) -> ExpressionError {
    ExpressionError::new(ErrorKind::UnterminatedPlaceholder {
        delimiter: delimiter.to_string(),
    })
    .with_message(format!("`{delimiter}` closes no open placeholder"))
    .at(span)
}

pub fn nested_placeholder(start: &str, span: Span) -> ExpressionError {
    ExpressionError::new(ErrorKind::UnterminatedPlaceholder {
        delimiter: start.to_string(),
    })
    .with_message(format!(
        "placeholder is still open when the next `{start}` starts"
    ))
    .at(span)
}
