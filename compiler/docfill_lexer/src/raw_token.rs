//! Raw Token Definition
//!
//! The `RawToken` enum is the logos-derived tokenizer output before literal
//! cooking (unescaping strings, parsing numbers and periods).

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum RawToken {
    // Keywords
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("?")]
    Question,

    // Arithmetic
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    // Comparison
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,

    // Logic (symbolic and word forms)
    #[token("&&")]
    #[token("and")]
    AndAnd,
    #[token("||")]
    #[token("or")]
    PipePipe,
    #[token("!")]
    #[token("not")]
    Bang,

    // Literals
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    /// Integer with a temporal unit suffix: `10min`, `3days`, `1年`.
    #[regex(r"[0-9]+(years?|months?|days?|hours?|minutes?|min|seconds?|sec|年|月|日|時間|時|分|秒)")]
    Period,

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    Str,

    /// A string whose closing quote never arrives. The terminated form is
    /// always one byte longer, so logos prefers it when it exists.
    #[regex(r#""([^"\\]|\\.)*"#)]
    #[regex(r"'([^'\\]|\\.)*")]
    UnterminatedStr,

    #[regex(r"[\p{L}_$][\p{L}\p{N}_$]*")]
    Ident,
}
