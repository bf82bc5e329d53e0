//! Expression grammar.
//!
//! Precedence, lowest to highest:
//!
//! | Level          | Operators              |
//! |----------------|------------------------|
//! | or             | `\|\|` `or`            |
//! | and            | `&&` `and`             |
//! | equality       | `==` `!=`              |
//! | relational     | `<` `<=` `>` `>=`      |
//! | additive       | `+` `-`                |
//! | multiplicative | `*` `/` `%`            |
//! | unary          | `-` `!` `not`          |
//! | postfix        | `.field` `[index]`     |
//!
//! All binary levels are left-associative. Postfix chains bind tighter than
//! unary operators: `-a.b` is `-(a.b)`.

mod operators;
mod postfix;
mod primary;

use docfill_diagnostic::Result;
use docfill_eval::ensure_sufficient_stack;
use docfill_ir::{BinaryOp, Expr, ExprKind};

use crate::Parser;

/// Generate a left-associative binary level that defers to `$next` for
/// operands and uses `$matcher` to recognise its operators.
macro_rules! binary_level {
    ($(#[$doc:meta])* $name:ident, $matcher:ident, $next:ident) => {
        $(#[$doc])*
        pub(crate) fn $name(&mut self) -> Result<Expr> {
            let mut left = self.$next()?;
            while let Some(op) = self.$matcher() {
                self.cursor.advance()?;
                let right = self.$next()?;
                left = binary(op, left, right);
            }
            Ok(left)
        }
    };
}

impl Parser<'_> {
    /// Parse a full expression (entry point of the precedence chain).
    ///
    /// Parenthesized groups, index expressions and call arguments all
    /// re-enter here, so this is where the stack grows.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr> {
        ensure_sufficient_stack(|| self.parse_binary_or())
    }

    binary_level!(
        /// `a || b`
        parse_binary_or, match_or_op, parse_binary_and
    );
    binary_level!(
        /// `a && b`
        parse_binary_and, match_and_op, parse_equality
    );
    binary_level!(parse_equality, match_equality_op, parse_comparison);
    binary_level!(parse_comparison, match_comparison_op, parse_additive);
    binary_level!(parse_additive, match_additive_op, parse_multiplicative);
    binary_level!(parse_multiplicative, match_multiplicative_op, parse_unary);

    /// `-x`, `!x`, or a postfix chain.
    pub(crate) fn parse_unary(&mut self) -> Result<Expr> {
        let Some(op) = self.match_unary_op() else {
            return self.parse_postfix();
        };
        let start = self.cursor.advance()?.span;
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        let span = start.merge(operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}
