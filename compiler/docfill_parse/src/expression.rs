//! A compiled placeholder expression.

use std::fmt;
use std::sync::Arc;

use docfill_diagnostic::Result;
use docfill_eval::{evaluate, VariableContext};
use docfill_ir::{Expr, Value};

/// The parsed (and usually folded) tree of one expression, with its source.
///
/// Immutable and cheap to share; evaluating it never changes it.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    root: Expr,
    source: Arc<str>,
    optional: bool,
}

impl Expression {
    pub(crate) fn new(root: Expr, source: &str, optional: bool) -> Self {
        Expression {
            root,
            source: Arc::from(source),
            optional,
        }
    }

    pub fn root(&self) -> &Expr {
        &self.root
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// `true` when the expression ended with the `?` marker.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// `true` when folding reduced the whole tree to one value.
    pub fn is_constant(&self) -> bool {
        self.root.is_constant()
    }

    /// Evaluate in `scope`. Errors carry this expression's source text.
    pub fn evaluate(&self, scope: &VariableContext<'_>) -> Result<Value> {
        evaluate(&self.root, scope).map_err(|e| e.with_expression(&*self.source))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        if self.optional {
            f.write_str("?")?;
        }
        Ok(())
    }
}
