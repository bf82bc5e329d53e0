//! Field access and indexing chains.

use docfill_diagnostic::Result;
use docfill_ir::{Expr, ExprKind, Name};
use docfill_lexer::TokenKind;

use crate::Parser;

impl Parser<'_> {
    /// A primary followed by any number of `.field` and `[index]` suffixes,
    /// applied left to right.
    ///
    /// A field may also be a position (`items.1`, `rows.2.3`), which the
    /// lexer hands over as a number token.
    pub(crate) fn parse_postfix(&mut self) -> Result<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.cursor.eat(&TokenKind::Dot)? {
                for field in self.field_names()? {
                    let span = expr.span.merge(self.cursor.previous_span());
                    expr = Expr::new(
                        ExprKind::Field {
                            receiver: Box::new(expr),
                            field,
                        },
                        span,
                    );
                }
            } else if self.cursor.eat(&TokenKind::LBracket)? {
                let index = self.parse_expr()?;
                if !self.cursor.eat(&TokenKind::RBracket)? {
                    return Err(self.cursor.unexpected("`]`"));
                }
                let span = expr.span.merge(self.cursor.previous_span());
                expr = Expr::new(
                    ExprKind::Index {
                        receiver: Box::new(expr),
                        index: Box::new(index),
                    },
                    span,
                );
            } else {
                return Ok(expr);
            }
        }
    }

    /// Names after a `.`: one identifier, or the digit groups of a number
    /// token (`2.3` in `rows.2.3` is two positions).
    fn field_names(&mut self) -> Result<Vec<Name>> {
        let number = match self.cursor.current() {
            Some(token) if matches!(token.kind, TokenKind::Number(_)) => Some(token.text),
            _ => None,
        };
        let Some(text) = number else {
            return Ok(vec![self.expect_ident("field name after `.`")?]);
        };
        if !text.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
            return Err(self.cursor.unexpected("field name after `.`"));
        }
        self.cursor.advance()?;
        Ok(text.split('.').map(Name::from).collect())
    }
}
