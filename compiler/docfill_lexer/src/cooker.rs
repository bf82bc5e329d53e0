//! Converts raw logos tokens into cooked `TokenKind`s.
//!
//! Cooking is where literal payloads are produced: strings are unescaped,
//! numbers become exact decimals, and period literals are split into amount
//! and unit. Failures here are `LexError`s located inside the literal.

use std::str::FromStr;
use std::sync::Arc;

use docfill_diagnostic::errors::{invalid_escape, invalid_number, unterminated_string};
use docfill_diagnostic::ExpressionError;
use docfill_ir::{Decimal, Period, Span, TemporalUnit};

use crate::raw_token::RawToken;
use crate::token::TokenKind;

pub(crate) fn cook(raw: RawToken, text: &str, span: Span) -> Result<TokenKind, ExpressionError> {
    let kind = match raw {
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Null => TokenKind::Null,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Question => TokenKind::Question,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::AndAnd => TokenKind::AndAnd,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Number => {
            let n = Decimal::from_str(text).map_err(|_| invalid_number(text, span))?;
            TokenKind::Number(n)
        }
        RawToken::Period => TokenKind::Period(cook_period(text, span)?),
        RawToken::Str => TokenKind::Str(unescape(text, span)?),
        RawToken::UnterminatedStr => return Err(unterminated_string(span)),
        RawToken::Ident => TokenKind::Ident(Arc::from(text)),
    };
    Ok(kind)
}

fn cook_period(text: &str, span: Span) -> Result<Period, ExpressionError> {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    let (amount, unit) = text.split_at(digits);
    let amount: i64 = amount.parse().map_err(|_| invalid_number(text, span))?;
    let unit = TemporalUnit::parse(unit).ok_or_else(|| invalid_number(text, span))?;
    Ok(Period::new(amount, unit))
}

/// Unescape a quoted literal, including its quotes.
///
/// Valid escapes: `\\` `\"` `\'` `\n` `\t` `\r`.
fn unescape(text: &str, span: Span) -> Result<String, ExpressionError> {
    let body = text.get(1..text.len() - 1).unwrap_or_default();
    // Fast path: nothing to unescape.
    if !body.contains('\\') {
        return Ok(body.to_string());
    }

    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices();
    while let Some((_, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some((i, escaped)) = chars.next() else {
            // The raw regex never ends a literal on a lone backslash.
            break;
        };
        let resolved = match escaped {
            '\\' => '\\',
            '"' => '"',
            '\'' => '\'',
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            other => {
                // `i` indexes the body; +1 for the opening quote, -1 for the backslash.
                let at = span.start as usize + i;
                return Err(invalid_escape(other, Span::from_range(at..at + 1 + other.len_utf8())));
            }
        };
        out.push(resolved);
    }
    Ok(out)
}
