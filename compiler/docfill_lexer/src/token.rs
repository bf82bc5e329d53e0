//! Cooked tokens.

use std::fmt;

use docfill_ir::{Decimal, Name, Period, Span};

/// Token kind with cooked literal payloads.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Literals
    Number(Decimal),
    Period(Period),
    Str(String),
    Ident(Name),
    True,
    False,
    Null,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Question,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    AndAnd,
    PipePipe,
    Bang,
}

impl TokenKind {
    /// Short description for "expected X, found Y" messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Number(_) => "number",
            TokenKind::Period(_) => "period literal",
            TokenKind::Str(_) => "string",
            TokenKind::Ident(_) => "identifier",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::Null => "`null`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Comma => "`,`",
            TokenKind::Dot => "`.`",
            TokenKind::Question => "`?`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Lt => "`<`",
            TokenKind::LtEq => "`<=`",
            TokenKind::Gt => "`>`",
            TokenKind::GtEq => "`>=`",
            TokenKind::AndAnd => "`&&`",
            TokenKind::PipePipe => "`||`",
            TokenKind::Bang => "`!`",
        }
    }
}

/// A token with its source text and location.
#[derive(Clone, Debug, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub span: Span,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?} @ {}", self.kind, self.text, self.span)
    }
}
