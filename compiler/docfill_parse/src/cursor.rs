//! Token cursor with one token of lookahead.
//!
//! Tokens are pulled from the lexer only as the parser advances, so a lex
//! error past the point where parsing fails is never reported.

use docfill_diagnostic::errors::unexpected_token;
use docfill_diagnostic::Result;
use docfill_ir::Span;
use docfill_lexer::{Lexer, Token, TokenKind};

pub(crate) struct Cursor<'src> {
    lexer: Lexer<'src>,
    current: Option<Token<'src>>,
    previous_span: Span,
    end: usize,
}

impl<'src> Cursor<'src> {
    pub(crate) fn new(source: &'src str) -> Result<Self> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next().transpose()?;
        Ok(Cursor {
            lexer,
            current,
            previous_span: Span::point(0),
            end: source.len(),
        })
    }

    #[inline]
    pub(crate) fn current(&self) -> Option<&Token<'src>> {
        self.current.as_ref()
    }

    #[inline]
    pub(crate) fn current_kind(&self) -> Option<&TokenKind> {
        self.current.as_ref().map(|t| &t.kind)
    }

    /// Span of the current token, or an empty span at the end of input.
    pub(crate) fn current_span(&self) -> Span {
        self.current.as_ref().map_or(Span::point(self.end), |t| t.span)
    }

    pub(crate) fn previous_span(&self) -> Span {
        self.previous_span
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.current.is_none()
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    /// Consume the current token and load the next one.
    pub(crate) fn advance(&mut self) -> Result<Token<'src>> {
        let next = self.lexer.next().transpose()?;
        match std::mem::replace(&mut self.current, next) {
            Some(token) => {
                self.previous_span = token.span;
                Ok(token)
            }
            None => Err(self.unexpected("more input")),
        }
    }

    /// Consume the current token if it is `kind`.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> Result<bool> {
        if self.check(kind) {
            self.advance()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Error for the current token (or end of input) not being `expected`.
    pub(crate) fn unexpected(&self, expected: &str) -> docfill_diagnostic::ExpressionError {
        let found = self
            .current()
            .map_or("end of expression", |t| t.kind.display_name());
        unexpected_token(found, expected, self.current_span())
    }
}
