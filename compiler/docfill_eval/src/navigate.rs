//! Field and index access on evaluated values.
//!
//! Access on `null` yields `null`, so `order.customer.name` on a missing
//! customer renders as empty text instead of failing.

use chrono::{Datelike, Timelike};
use rust_decimal::prelude::ToPrimitive;

use docfill_diagnostic::errors::{type_mismatch, unknown_field};
use docfill_diagnostic::Result;
use docfill_ir::{Decimal, Temporal, Value};

use crate::accessor::AccessorRegistry;

/// Read `field` from `base`.
///
/// Objects go through their registered accessor. Lists, strings and
/// temporals expose a few built-in fields. A numeric field on a list is a
/// 1-based position: `items.1` is the first item, past the end is `null`.
pub fn field(base: &Value, field: &str, accessors: &AccessorRegistry) -> Result<Value> {
    match base {
        Value::Null => Ok(Value::Null),
        Value::Object(object) => accessors.read(object, field),
        Value::List(items) => match field {
            "size" | "length" => Ok(count(items.len())),
            "first" => Ok(items.first().cloned().unwrap_or(Value::Null)),
            "last" => Ok(items.last().cloned().unwrap_or(Value::Null)),
            _ => match position(field) {
                Some(n) => Ok(items.get(n - 1).cloned().unwrap_or(Value::Null)),
                None => Err(unknown_field("list", field)),
            },
        },
        Value::Str(text) => match field {
            "length" => Ok(count(text.chars().count())),
            _ => match line_number(field) {
                Some(n) => Ok(line(text, n)),
                None => Err(unknown_field("string", field)),
            },
        },
        Value::Temporal(t) => temporal_field(*t, field).ok_or_else(|| unknown_field(t.kind_name(), field)),
        Value::Bool(_) | Value::Number(_) | Value::Period(_) => Err(unknown_field(base.type_name(), field)),
    }
}

/// Read `base[index]`.
///
/// Lists and strings take a non-negative integer; out of range is `null`.
/// Objects take a string and read that field.
pub fn index(base: &Value, index: &Value, accessors: &AccessorRegistry) -> Result<Value> {
    match (base, index) {
        (Value::Null, _) => Ok(Value::Null),
        (Value::List(items), Value::Number(n)) => {
            let i = integer_index(*n)?;
            Ok(i.and_then(|i| items.get(i)).cloned().unwrap_or(Value::Null))
        }
        (Value::Str(text), Value::Number(n)) => {
            let i = integer_index(*n)?;
            Ok(i
                .and_then(|i| text.chars().nth(i))
                .map_or(Value::Null, |c| Value::string(c.to_string())))
        }
        (Value::Object(object), Value::Str(name)) => accessors.read(object, name),
        (Value::List(_) | Value::Str(_), other) => Err(type_mismatch("integer index", other.type_name())),
        (Value::Object(_), other) => Err(type_mismatch("string key", other.type_name())),
        (other, _) => Err(type_mismatch("list, string or object", other.type_name())
            .with_message(format!("cannot index into a {}", other.type_name()))),
    }
}

/// `Ok(None)` for negative or huge indices, which are out of range.
fn integer_index(n: Decimal) -> Result<Option<usize>> {
    if !n.fract().is_zero() {
        return Err(type_mismatch("integer index", &n.normalize().to_string()));
    }
    Ok(n.to_u64().and_then(|i| usize::try_from(i).ok()))
}

fn count(n: usize) -> Value {
    Value::Number(Decimal::from(n))
}

/// `line3` -> `Some(3)`.
fn line_number(field: &str) -> Option<usize> {
    field.strip_prefix("line")?.parse().ok().filter(|&n| n > 0)
}

/// 1-based line of `text`; `null` past the last line.
fn line(text: &str, n: usize) -> Value {
    text.split('\n')
        .nth(n - 1)
        .map_or(Value::Null, |l| Value::string(l.strip_suffix('\r').unwrap_or(l)))
}

fn temporal_field(t: Temporal, field: &str) -> Option<Value> {
    let date = match t {
        Temporal::Date(d) => Some(d),
        Temporal::DateTime(dt) => Some(dt.date()),
        Temporal::Time(_) => None,
    };
    let time = match t {
        Temporal::Time(time) => Some(time),
        Temporal::DateTime(dt) => Some(dt.time()),
        Temporal::Date(_) => None,
    };
    let value = match field {
        "year" => Value::from(i64::from(date?.year())),
        "month" => Value::from(i64::from(date?.month())),
        "day" => Value::from(i64::from(date?.day())),
        "weekday" => Value::from(i64::from(date?.weekday().number_from_monday())),
        "hour" => Value::from(i64::from(time?.hour())),
        "minute" => Value::from(i64::from(time?.minute())),
        "second" => Value::from(i64::from(time?.second())),
        "date" => Value::Temporal(Temporal::Date(date?)),
        "time" => Value::Temporal(Temporal::Time(time?)),
        _ => return None,
    };
    Some(value)
}

/// A 1-based position written as a field name.
fn position(field: &str) -> Option<usize> {
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok().filter(|&n| n >= 1)
}
