//! Lexer for docfill placeholder expressions, built on logos.
//!
//! [`Lexer`] is a lazy iterator: tokens are produced on demand and each
//! yielded item is either a cooked [`Token`] or the first [`ExpressionError`]
//! (kind `LexError`), after which the iterator is exhausted.
//! [`tokenize`] collects the whole stream.
//!
//! # Lexical grammar
//!
//! - Whitespace is insignificant.
//! - Numbers: `12`, `3.25` (exact decimals).
//! - Periods: an integer with a unit suffix, `10min`, `2days`, `1年`.
//! - Strings: `"..."` or `'...'` with `\\ \" \' \n \t \r` escapes.
//! - Identifiers: a letter, `_` or `$`, then letters, digits, `_` or `$`.
//! - Keywords: `true`, `false`, `null`, and `and`/`or`/`not` as aliases of
//!   `&&`/`||`/`!`.

mod cooker;
mod raw_token;
mod token;

use logos::Logos;

use docfill_diagnostic::errors::unexpected_character;
use docfill_diagnostic::ExpressionError;
use docfill_ir::Span;

use crate::raw_token::RawToken;

pub use token::{Token, TokenKind};

/// Lazy token stream over one expression.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, RawToken>,
    source: &'src str,
    failed: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            inner: RawToken::lexer(source),
            source,
            failed: false,
        }
    }

    /// The text being tokenized.
    pub fn source(&self) -> &'src str {
        self.source
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>, ExpressionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let raw = self.inner.next()?;
        let range = self.inner.span();
        let span = Span::from_range(range.clone());
        let text = self.inner.slice();

        let cooked = match raw {
            Ok(raw) => cooker::cook(raw, text, span),
            Err(()) => {
                let c = self.source.get(range.start..).and_then(|s| s.chars().next()).unwrap_or('\u{fffd}');
                Err(unexpected_character(c, Span::from_range(range.start..range.start + c.len_utf8())))
            }
        };

        match cooked {
            Ok(kind) => Some(Ok(Token { kind, text, span })),
            Err(err) => {
                self.failed = true;
                Some(Err(err.with_expression(self.source)))
            }
        }
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// Tokenize a whole expression, stopping at the first error.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, ExpressionError> {
    Lexer::new(source).collect()
}

#[cfg(test)]
mod tests;
