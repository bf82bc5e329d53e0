//! Argument checking shared by the builtin resolvers.

use docfill_diagnostic::errors::{wrong_arg_count, wrong_arg_type};
use docfill_diagnostic::Result;
use docfill_ir::{Decimal, Temporal, TemporalUnit, Value};
use rust_decimal::prelude::ToPrimitive;

/// Fail unless `min <= args.len() <= max`.
pub(super) fn check_arity(function: &str, args: &[Value], min: usize, max: usize) -> Result<()> {
    if (min..=max).contains(&args.len()) {
        return Ok(());
    }
    let expected = if min == max {
        min.to_string()
    } else {
        format!("{min} to {max}")
    };
    Err(wrong_arg_count(function, &expected, args.len()))
}

pub(super) fn number(function: &str, args: &[Value], i: usize) -> Result<Decimal> {
    match args.get(i) {
        Some(Value::Number(n)) => Ok(*n),
        other => Err(mismatch(function, i, "number", other)),
    }
}

pub(super) fn integer(function: &str, args: &[Value], i: usize) -> Result<i64> {
    let n = number(function, args, i)?;
    Some(n)
        .filter(|n| n.fract().is_zero())
        .and_then(|n| n.to_i64())
        .ok_or_else(|| mismatch(function, i, "integer", args.get(i)))
}

/// A small non-negative integer such as a digit count.
pub(super) fn digits(function: &str, args: &[Value], i: usize) -> Result<u32> {
    integer(function, args, i).and_then(|n| {
        u32::try_from(n)
            .ok()
            .filter(|&d| d <= 28)
            .ok_or_else(|| mismatch(function, i, "digit count between 0 and 28", args.get(i)))
    })
}

pub(super) fn string<'a>(function: &str, args: &'a [Value], i: usize) -> Result<&'a str> {
    match args.get(i) {
        Some(Value::Str(s)) => Ok(s),
        other => Err(mismatch(function, i, "string", other)),
    }
}

pub(super) fn temporal(function: &str, args: &[Value], i: usize) -> Result<Temporal> {
    match args.get(i) {
        Some(Value::Temporal(t)) => Ok(*t),
        other => Err(mismatch(function, i, "date or time", other)),
    }
}

pub(super) fn unit(function: &str, args: &[Value], i: usize) -> Result<TemporalUnit> {
    let name = string(function, args, i)?;
    TemporalUnit::parse(name).ok_or_else(|| wrong_arg_type(function, i, "temporal unit", &format!("`{name}`")))
}

fn mismatch(function: &str, i: usize, expected: &str, found: Option<&Value>) -> docfill_diagnostic::ExpressionError {
    let found = found.map_or("nothing", Value::type_name);
    wrong_arg_type(function, i, expected, found)
}
