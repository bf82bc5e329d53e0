//! Unary operator semantics.

use docfill_diagnostic::errors::{arithmetic_overflow, type_mismatch};
use docfill_diagnostic::Result;
use docfill_ir::{UnaryOp, Value};

/// Apply a unary operator to an evaluated operand.
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers hand over freshly evaluated operands"
)]
pub fn evaluate_unary(op: UnaryOp, operand: Value) -> Result<Value> {
    match (op, &operand) {
        (UnaryOp::Neg, Value::Number(n)) => Ok(Value::Number(-*n)),
        (UnaryOp::Neg, Value::Period(p)) => p
            .negated()
            .map(Value::Period)
            .ok_or_else(|| arithmetic_overflow("-")),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!*b)),
        (UnaryOp::Neg, other) => Err(type_mismatch("number or period", other.type_name())
            .with_message(format!("cannot negate a {}", other.type_name()))),
        (UnaryOp::Not, other) => Err(type_mismatch("boolean", other.type_name())
            .with_message(format!("cannot apply `!` to a {}", other.type_name()))),
    }
}
