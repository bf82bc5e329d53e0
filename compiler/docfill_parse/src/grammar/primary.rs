//! Literals, identifiers, calls and parenthesized expressions.

use docfill_diagnostic::errors::unmatched_paren;
use docfill_diagnostic::Result;
use docfill_ir::{Expr, ExprKind, Name, Value};
use docfill_lexer::TokenKind;

use crate::Parser;

impl Parser<'_> {
    pub(crate) fn parse_primary(&mut self) -> Result<Expr> {
        let Some(kind) = self.cursor.current_kind() else {
            return Err(self.cursor.unexpected("an operand"));
        };
        let literal = match kind {
            TokenKind::Number(n) => Some(Value::Number(*n)),
            TokenKind::Period(p) => Some(Value::Period(*p)),
            TokenKind::Str(s) => Some(Value::string(s.as_str())),
            TokenKind::True => Some(Value::Bool(true)),
            TokenKind::False => Some(Value::Bool(false)),
            TokenKind::Null => Some(Value::Null),
            _ => None,
        };
        if let Some(value) = literal {
            let token = self.cursor.advance()?;
            return Ok(Expr::new(ExprKind::Literal(value), token.span));
        }

        match kind {
            TokenKind::Ident(_) => self.parse_ident_or_call(),
            TokenKind::LParen => self.parse_paren(),
            _ => Err(self.cursor.unexpected("an operand")),
        }
    }

    /// `name` or `name(arg, ...)`.
    fn parse_ident_or_call(&mut self) -> Result<Expr> {
        let start = self.cursor.current_span();
        let name = self.expect_ident("identifier")?;
        if !self.cursor.check(&TokenKind::LParen) {
            return Ok(Expr::new(ExprKind::Identifier(name), start));
        }

        let open = self.cursor.advance()?.span;
        let mut args = Vec::new();
        if !self.cursor.check(&TokenKind::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.cursor.eat(&TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.expect_close_paren(open)?;
        let span = start.merge(self.cursor.previous_span());
        Ok(Expr::new(ExprKind::Call { name, args }, span))
    }

    /// `( expr )`. The result keeps the span of the inner expression.
    fn parse_paren(&mut self) -> Result<Expr> {
        let open = self.cursor.advance()?.span;
        let inner = self.parse_expr()?;
        self.expect_close_paren(open)?;
        Ok(inner)
    }

    fn expect_close_paren(&mut self, open: docfill_ir::Span) -> Result<()> {
        if self.cursor.eat(&TokenKind::RParen)? {
            return Ok(());
        }
        if self.cursor.is_at_end() {
            return Err(unmatched_paren(open));
        }
        Err(self.cursor.unexpected("`)` or `,`"))
    }

    pub(crate) fn expect_ident(&mut self, expected: &str) -> Result<Name> {
        match self.cursor.current_kind() {
            Some(TokenKind::Ident(name)) => {
                let name = name.clone();
                self.cursor.advance()?;
                Ok(name)
            }
            _ => Err(self.cursor.unexpected(expected)),
        }
    }
}
