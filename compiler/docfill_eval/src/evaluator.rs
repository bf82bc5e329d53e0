//! Tree-walking evaluation of expressions.

use docfill_diagnostic::errors::{type_mismatch, unknown_function, unresolved_reference};
use docfill_diagnostic::Result;
use docfill_ir::{BinaryOp, Expr, ExprKind, Value};

use crate::context::VariableContext;
use crate::navigate;
use crate::operators::evaluate_binary;
use crate::stack::ensure_sufficient_stack;
use crate::unary_operators::evaluate_unary;

/// Evaluate `expr` in `scope`.
///
/// Errors carry the span of the innermost node that failed. The caller
/// attaches the expression text.
pub fn evaluate(expr: &Expr, scope: &VariableContext<'_>) -> Result<Value> {
    ensure_sufficient_stack(|| eval_inner(expr, scope)).map_err(|e| e.at(expr.span))
}

fn eval_inner(expr: &Expr, scope: &VariableContext<'_>) -> Result<Value> {
    match &expr.kind {
        ExprKind::Literal(value) | ExprKind::Constant(value) => Ok(value.clone()),
        ExprKind::Identifier(name) => scope.get(name)?.ok_or_else(|| unresolved_reference(name)),
        ExprKind::Binary { op, left, right } => {
            if op.is_short_circuit() {
                return eval_short_circuit(*op, left, right, scope);
            }
            let left = evaluate(left, scope)?;
            let right = evaluate(right, scope)?;
            evaluate_binary(*op, left, right)
        }
        ExprKind::Unary { op, operand } => evaluate_unary(*op, evaluate(operand, scope)?),
        ExprKind::Call { name, args } => {
            let args = args
                .iter()
                .map(|arg| evaluate(arg, scope))
                .collect::<Result<Vec<_>>>()?;
            scope
                .call(name, &args)?
                .ok_or_else(|| unknown_function(name, args.len()))
        }
        ExprKind::Field { receiver, field } => {
            let base = evaluate(receiver, scope)?;
            navigate::field(&base, field, scope.environment().accessors())
        }
        ExprKind::Index { receiver, index } => {
            let base = evaluate(receiver, scope)?;
            let index = evaluate(index, scope)?;
            navigate::index(&base, &index, scope.environment().accessors())
        }
    }
}

/// `&&` and `||` skip the right operand when the left decides the result.
fn eval_short_circuit(
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    scope: &VariableContext<'_>,
) -> Result<Value> {
    let lhs = expect_bool(op, evaluate(left, scope)?).map_err(|e| e.at(left.span))?;
    match (op, lhs) {
        (BinaryOp::And, false) => return Ok(Value::Bool(false)),
        (BinaryOp::Or, true) => return Ok(Value::Bool(true)),
        _ => {}
    }
    let rhs = expect_bool(op, evaluate(right, scope)?).map_err(|e| e.at(right.span))?;
    Ok(Value::Bool(rhs))
}

fn expect_bool(op: BinaryOp, value: Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(b),
        other => Err(type_mismatch("boolean", other.type_name()).with_message(format!(
            "operands of `{}` must be booleans, found {}",
            op.as_symbol(),
            other.type_name()
        ))),
    }
}
