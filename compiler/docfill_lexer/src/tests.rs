#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use docfill_diagnostic::{ErrorCode, ErrorKind};
use docfill_ir::{Decimal, Period, TemporalUnit};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Ident(name.into())
}

fn num(n: i64) -> TokenKind {
    TokenKind::Number(Decimal::from(n))
}

#[test]
fn test_arithmetic() {
    assert_eq!(
        kinds("1+2*3"),
        vec![num(1), TokenKind::Plus, num(2), TokenKind::Star, num(3)]
    );
}

#[test]
fn test_decimal_literal_is_exact() {
    assert_eq!(kinds("1.1"), vec![TokenKind::Number(Decimal::new(11, 1))]);
}

#[test]
fn test_field_and_index_chain() {
    assert_eq!(
        kinds("a.b[0].c"),
        vec![
            ident("a"),
            TokenKind::Dot,
            ident("b"),
            TokenKind::LBracket,
            num(0),
            TokenKind::RBracket,
            TokenKind::Dot,
            ident("c"),
        ]
    );
}

#[test]
fn test_comparison_and_logic() {
    assert_eq!(
        kinds("a <= 1 && b != 2 || !c"),
        vec![
            ident("a"),
            TokenKind::LtEq,
            num(1),
            TokenKind::AndAnd,
            ident("b"),
            TokenKind::NotEq,
            num(2),
            TokenKind::PipePipe,
            TokenKind::Bang,
            ident("c"),
        ]
    );
}

#[test]
fn test_word_operators() {
    assert_eq!(
        kinds("a and not b or c"),
        vec![
            ident("a"),
            TokenKind::AndAnd,
            TokenKind::Bang,
            ident("b"),
            TokenKind::PipePipe,
            ident("c"),
        ]
    );
    // Keywords only match whole words.
    assert_eq!(kinds("android"), vec![ident("android")]);
}

#[test]
fn test_keywords() {
    assert_eq!(
        kinds("true false null"),
        vec![TokenKind::True, TokenKind::False, TokenKind::Null]
    );
}

#[test]
fn test_strings_and_escapes() {
    assert_eq!(
        kinds(r#""a\"b" 'it\'s' "tab\there""#),
        vec![
            TokenKind::Str("a\"b".to_string()),
            TokenKind::Str("it's".to_string()),
            TokenKind::Str("tab\there".to_string()),
        ]
    );
}

#[test]
fn test_period_literals() {
    assert_eq!(
        kinds("time - 10min"),
        vec![
            ident("time"),
            TokenKind::Minus,
            TokenKind::Period(Period::new(10, TemporalUnit::Minute)),
        ]
    );
    assert_eq!(
        kinds("3days 1年"),
        vec![
            TokenKind::Period(Period::new(3, TemporalUnit::Day)),
            TokenKind::Period(Period::new(1, TemporalUnit::Year)),
        ]
    );
}

#[test]
fn test_unicode_and_dollar_identifiers() {
    assert_eq!(kinds("$today 名前"), vec![ident("$today"), ident("名前")]);
}

#[test]
fn test_token_spans_and_text() {
    let tokens = tokenize("  price * 2").unwrap();
    assert_eq!(tokens[0].text, "price");
    assert_eq!(tokens[0].span, Span::new(2, 7));
    assert_eq!(tokens[2].span, Span::new(10, 11));
}

#[test]
fn test_unterminated_string() {
    let err = tokenize(r#"name + "abc"#).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E0001);
    assert_eq!(err.offset(), Some(7));
    assert_eq!(err.expression, r#"name + "abc"#);
    assert!(err.message.contains("unterminated"));
}

#[test]
fn test_invalid_character() {
    let err = tokenize("a # b").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::LexError { .. }));
    assert_eq!(err.offset(), Some(2));
    assert!(err.message.contains('#'));
}

#[test]
fn test_invalid_escape() {
    let err = tokenize(r#""a\qb""#).unwrap_err();
    assert_eq!(err.offset(), Some(2));
    assert!(err.message.contains("\\q"));
}

#[test]
fn test_lexer_is_lazy_and_fused() {
    let mut lexer = Lexer::new("a # b");
    assert!(matches!(lexer.next(), Some(Ok(_))));
    assert!(matches!(lexer.next(), Some(Err(_))));
    assert!(lexer.next().is_none());
    assert!(lexer.next().is_none());
}

#[test]
fn test_empty_input() {
    assert!(tokenize("").unwrap().is_empty());
    assert!(tokenize("   ").unwrap().is_empty());
}

proptest! {
    #[test]
    fn lexer_never_panics(source in "\\PC{0,40}") {
        let _ = tokenize(&source);
    }

    #[test]
    fn spans_stay_in_bounds(source in "[a-z0-9 +*().\"']{0,40}") {
        if let Ok(tokens) = tokenize(&source) {
            for token in tokens {
                prop_assert!(token.span.end as usize <= source.len());
                prop_assert_eq!(&source[token.span.to_range()], token.text);
            }
        }
    }
}
