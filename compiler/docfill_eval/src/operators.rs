//! Binary operator semantics.
//!
//! Direct enum dispatch over the operand pair. The operand set is fixed, so
//! a match keeps every combination visible and exhaustive.
//!
//! Short-circuit operators (`&&`, `||`) are handled by the evaluator before
//! the right operand is evaluated; this module sees them only when both
//! sides are already known, as during constant folding.

use std::cmp::Ordering;

use docfill_diagnostic::errors::{arithmetic_overflow, division_by_zero, invalid_operands, type_mismatch};
use docfill_diagnostic::Result;
use docfill_ir::{BinaryOp, Decimal, Period, Temporal, Value};

use crate::format::display_text;

/// Apply a binary operator to two evaluated operands.
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers hand over freshly evaluated operands"
)]
pub fn evaluate_binary(op: BinaryOp, left: Value, right: Value) -> Result<Value> {
    match op {
        BinaryOp::And | BinaryOp::Or => eval_logic(op, &left, &right),
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => Ok(Value::Bool(left != right)),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            let ordering = compare(op, &left, &right)?;
            Ok(Value::Bool(match op {
                BinaryOp::Lt => ordering == Ordering::Less,
                BinaryOp::LtEq => ordering != Ordering::Greater,
                BinaryOp::Gt => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            }))
        }
        BinaryOp::Add => eval_add(&left, &right),
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            eval_arith(op, &left, &right)
        }
    }
}

fn eval_logic(op: BinaryOp, left: &Value, right: &Value) -> Result<Value> {
    let (Value::Bool(a), Value::Bool(b)) = (left, right) else {
        return Err(mismatch(op, left, right));
    };
    Ok(Value::Bool(if op == BinaryOp::And { *a && *b } else { *a || *b }))
}

fn compare(op: BinaryOp, left: &Value, right: &Value) -> Result<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(a.cmp(b)),
        (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
        (Value::Temporal(a), Value::Temporal(b)) if same_variant(*a, *b) => Ok(a.cmp(b)),
        _ => Err(mismatch(op, left, right)),
    }
}

fn same_variant(a: Temporal, b: Temporal) -> bool {
    std::mem::discriminant(&a) == std::mem::discriminant(&b)
}

fn eval_add(left: &Value, right: &Value) -> Result<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a
            .checked_add(*b)
            .map(Value::Number)
            .ok_or_else(|| arithmetic_overflow("+")),
        (Value::Temporal(t), Value::Period(p)) | (Value::Period(p), Value::Temporal(t)) => {
            shift(*t, *p)
        }
        (Value::List(a), Value::List(b)) => {
            Ok(Value::list(a.iter().chain(b.iter()).cloned().collect::<Vec<_>>()))
        }
        // Concatenation when either side is text.
        (Value::Str(_), other) | (other, Value::Str(_)) if other.is_scalar() => {
            let mut text = display_text(left);
            text.push_str(&display_text(right));
            Ok(Value::string(text))
        }
        _ => Err(mismatch(BinaryOp::Add, left, right)),
    }
}

fn eval_arith(op: BinaryOp, left: &Value, right: &Value) -> Result<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => eval_number(op, *a, *b),
        (Value::Temporal(t), Value::Period(p)) if op == BinaryOp::Sub => {
            let negated = p.negated().ok_or_else(|| arithmetic_overflow("-"))?;
            shift(*t, negated)
        }
        _ => Err(mismatch(op, left, right)),
    }
}

fn eval_number(op: BinaryOp, a: Decimal, b: Decimal) -> Result<Value> {
    let result = match op {
        BinaryOp::Sub => a.checked_sub(b),
        BinaryOp::Mul => a.checked_mul(b),
        BinaryOp::Div | BinaryOp::Mod if b.is_zero() => return Err(division_by_zero()),
        BinaryOp::Div => a.checked_div(b),
        BinaryOp::Mod => a.checked_rem(b),
        _ => a.checked_add(b),
    };
    result
        .map(Value::Number)
        .ok_or_else(|| arithmetic_overflow(op.as_symbol()))
}

fn shift(temporal: Temporal, period: Period) -> Result<Value> {
    temporal
        .shift(period.amount, period.unit)
        .map(Value::Temporal)
        .ok_or_else(|| {
            type_mismatch(
                &format!("a period that applies to a {}", temporal.kind_name()),
                &period.to_string(),
            )
            .with_message(format!(
                "cannot shift {} `{temporal}` by `{period}`",
                temporal.kind_name()
            ))
        })
}

fn mismatch(op: BinaryOp, left: &Value, right: &Value) -> docfill_diagnostic::ExpressionError {
    invalid_operands(op.as_symbol(), left.type_name(), right.type_name())
}
