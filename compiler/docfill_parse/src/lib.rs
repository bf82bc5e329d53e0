//! Parser for docfill placeholder expressions.
//!
//! Recursive descent over the lazy token stream, one method per precedence
//! level, followed by the constant folding pass in [`fold`].
//!
//! ```ignore
//! let expr = docfill_parse::parse("price * (1 + rate)")?;
//! let value = expr.evaluate(&scope)?;
//! ```

mod cursor;
pub mod fold;
mod grammar;
mod expression;

use std::sync::Arc;

use tracing::debug;

use docfill_diagnostic::errors::{empty_expression, syntax_error};
use docfill_diagnostic::Result;
use docfill_eval::ExpressionResolver;
use docfill_lexer::TokenKind;

use crate::cursor::Cursor;

pub use expression::Expression;
pub use fold::Folder;

/// Parse and fold `source` with default options.
pub fn parse(source: &str) -> Result<Expression> {
    ParseOptions::default().parse(source)
}

/// How expressions are compiled.
#[derive(Clone)]
pub struct ParseOptions {
    fold: bool,
    constants: Option<Arc<dyn ExpressionResolver>>,
}

impl ParseOptions {
    pub fn new() -> Self {
        ParseOptions {
            fold: true,
            constants: None,
        }
    }

    /// Keep the tree exactly as written.
    #[must_use]
    pub fn without_folding(mut self) -> Self {
        self.fold = false;
        self
    }

    /// Fold identifiers and calls this resolver answers at compile time.
    #[must_use]
    pub fn with_constants(mut self, constants: impl ExpressionResolver + 'static) -> Self {
        self.constants = Some(Arc::new(constants));
        self
    }

    pub fn parse(&self, source: &str) -> Result<Expression> {
        let parsed = Parser::new(source)
            .and_then(|mut parser| parser.parse_placeholder())
            .map_err(|e| e.with_expression(source))?;
        let (root, optional) = parsed;

        let root = if self.fold {
            let folder = match &self.constants {
                Some(constants) => Folder::with_constants(Arc::clone(constants)),
                None => Folder::new(),
            };
            folder.fold(root)
        } else {
            root
        };
        debug!(source, constant = root.is_constant(), "parsed expression");
        Ok(Expression::new(root, source, optional))
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions::new()
    }
}

impl std::fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseOptions")
            .field("fold", &self.fold)
            .field("constants", &self.constants.as_ref().map(|c| c.name().to_string()))
            .finish()
    }
}

/// Parser state over one expression.
pub(crate) struct Parser<'src> {
    cursor: Cursor<'src>,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str) -> Result<Self> {
        Ok(Parser {
            cursor: Cursor::new(source)?,
        })
    }

    /// `expr` or `expr?`, then end of input.
    fn parse_placeholder(&mut self) -> Result<(docfill_ir::Expr, bool)> {
        if self.cursor.is_at_end() {
            return Err(empty_expression(self.cursor.current_span()));
        }
        let root = self.parse_expr()?;
        let optional = self.cursor.eat(&TokenKind::Question)?;

        match self.cursor.current_kind() {
            None => Ok((root, optional)),
            Some(TokenKind::RParen) => Err(syntax_error("unmatched `)`", self.cursor.current_span())),
            Some(TokenKind::Question) => Err(syntax_error(
                "`?` may only appear once, at the end of an expression",
                self.cursor.current_span(),
            )),
            Some(_) if optional => Err(syntax_error(
                "`?` may only appear at the end of an expression",
                self.cursor.previous_span(),
            )),
            Some(_) => Err(self.cursor.unexpected("an operator or end of expression")),
        }
    }
}

#[cfg(test)]
mod tests;
