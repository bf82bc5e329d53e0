//! Constant folding.
//!
//! A bottom-up pass that replaces context-independent subtrees with
//! `ExprKind::Constant`:
//!
//! - every literal
//! - operators, field access and indexing whose operands are all constant
//! - `false && x` and `true || x`, whatever `x` is
//! - identifiers and all-constant calls answered by the designated constant
//!   resolver, when one is configured
//!
//! Folding evaluates candidates in a scratch environment that holds only the
//! constant resolver. A candidate whose evaluation fails (`1 / 0`) stays as
//! written, so the error is reported when the expression is merged.

use tracing::trace;

use docfill_eval::{ensure_sufficient_stack, evaluate, Environment, ExpressionResolver, VariableContext};
use docfill_ir::{BinaryOp, Expr, ExprKind, Value};

/// Constant folder for one expression tree.
pub struct Folder {
    env: Environment,
    has_constants: bool,
}

impl Folder {
    /// A folder that only folds literals and pure operators.
    pub fn new() -> Self {
        Folder {
            env: Environment::default(),
            has_constants: false,
        }
    }

    /// A folder that also asks `constants` for identifiers and calls.
    pub fn with_constants(constants: impl ExpressionResolver + 'static) -> Self {
        Folder {
            env: Environment::builder().resolver(constants).build(),
            has_constants: true,
        }
    }

    pub fn fold(&self, expr: Expr) -> Expr {
        let scope = VariableContext::root(&self.env);
        self.fold_expr(expr, &scope)
    }

    fn fold_expr(&self, expr: Expr, scope: &VariableContext<'_>) -> Expr {
        ensure_sufficient_stack(|| self.fold_inner(expr, scope))
    }

    fn fold_inner(&self, expr: Expr, scope: &VariableContext<'_>) -> Expr {
        let span = expr.span;
        let (candidate, foldable) = match expr.kind {
            ExprKind::Literal(value) => return Expr::new(ExprKind::Constant(value), span),
            ExprKind::Constant(_) => return expr,
            ExprKind::Identifier(_) => (expr, self.has_constants),
            ExprKind::Binary { op, left, right } => {
                let left = self.fold_expr(*left, scope);
                if let Some(decided) = short_circuit(op, &left) {
                    return Expr::new(ExprKind::Constant(decided), span);
                }
                let right = self.fold_expr(*right, scope);
                let foldable = left.is_constant() && right.is_constant();
                let kind = ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                };
                (Expr::new(kind, span), foldable)
            }
            ExprKind::Unary { op, operand } => {
                let operand = self.fold_expr(*operand, scope);
                let foldable = operand.is_constant();
                let kind = ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                };
                (Expr::new(kind, span), foldable)
            }
            ExprKind::Call { name, args } => {
                let args: Vec<Expr> = args.into_iter().map(|arg| self.fold_expr(arg, scope)).collect();
                let foldable = self.has_constants && args.iter().all(Expr::is_constant);
                (Expr::new(ExprKind::Call { name, args }, span), foldable)
            }
            ExprKind::Field { receiver, field } => {
                let receiver = self.fold_expr(*receiver, scope);
                let foldable = receiver.is_constant();
                let kind = ExprKind::Field {
                    receiver: Box::new(receiver),
                    field,
                };
                (Expr::new(kind, span), foldable)
            }
            ExprKind::Index { receiver, index } => {
                let receiver = self.fold_expr(*receiver, scope);
                let index = self.fold_expr(*index, scope);
                let foldable = receiver.is_constant() && index.is_constant();
                let kind = ExprKind::Index {
                    receiver: Box::new(receiver),
                    index: Box::new(index),
                };
                (Expr::new(kind, span), foldable)
            }
        };

        if !foldable {
            return candidate;
        }
        match evaluate(&candidate, scope) {
            Ok(value) => {
                trace!(expr = %candidate, value = ?value, "folded");
                Expr::new(ExprKind::Constant(value), span)
            }
            Err(_) => candidate,
        }
    }
}

impl Default for Folder {
    fn default() -> Self {
        Folder::new()
    }
}

/// `false && x` is `false` and `true || x` is `true` without looking at `x`.
fn short_circuit(op: BinaryOp, left: &Expr) -> Option<Value> {
    match (op, left.constant_value()?) {
        (BinaryOp::And, Value::Bool(false)) => Some(Value::Bool(false)),
        (BinaryOp::Or, Value::Bool(true)) => Some(Value::Bool(true)),
        _ => None,
    }
}
