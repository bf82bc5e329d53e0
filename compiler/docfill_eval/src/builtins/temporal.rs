//! Date and time functions.
//!
//! Identifiers `now` and `today` (also spelled `$now`, `$today`) read the
//! resolver's clock. Functions:
//!
//! - `now()`, `today()`
//! - `date(year, month, day)`, `time(hour, minute[, second])`
//! - `formatDate(t, pattern)` with strftime patterns
//! - `parseDate(text, pattern)`, `parseTime(text, pattern)`,
//!   `parseDateTime(text, pattern)`
//! - `plus(t, amount, unit)`, `minus(t, amount, unit)`
//! - `between(a, b, unit)`: whole units from `a` to `b`
//!
//! Units are names like `"day"`, `"months"`, `"min"` or `"日"`.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

use docfill_diagnostic::errors::{arithmetic_overflow, type_mismatch, unparsable_input, wrong_arg_type};
use docfill_diagnostic::Result;
use docfill_ir::{Temporal, Value};

use super::args;
use crate::context::VariableContext;
use crate::format::{format_temporal, strftime_items};
use crate::resolver::ExpressionResolver;

#[derive(Clone, Copy, Debug)]
enum Clock {
    System,
    Fixed(NaiveDateTime),
}

/// Resolver for the temporal identifiers and functions.
#[derive(Clone, Copy, Debug)]
pub struct TemporalResolver {
    clock: Clock,
}

impl TemporalResolver {
    /// Reads the local system clock.
    pub fn new() -> Self {
        TemporalResolver { clock: Clock::System }
    }

    /// Always reports `now` as the given instant.
    pub fn fixed(now: NaiveDateTime) -> Self {
        TemporalResolver {
            clock: Clock::Fixed(now),
        }
    }

    fn now(&self) -> NaiveDateTime {
        match self.clock {
            Clock::System => Local::now().naive_local(),
            Clock::Fixed(now) => now,
        }
    }
}

impl Default for TemporalResolver {
    fn default() -> Self {
        TemporalResolver::new()
    }
}

impl ExpressionResolver for TemporalResolver {
    fn name(&self) -> &str {
        "temporal"
    }

    fn resolve_identifier(&self, name: &str, _scope: &VariableContext<'_>) -> Result<Option<Value>> {
        let now = self.now();
        Ok(match name.strip_prefix('$').unwrap_or(name) {
            "now" => Some(Value::Temporal(Temporal::DateTime(now))),
            "today" => Some(Value::Temporal(Temporal::Date(now.date()))),
            _ => None,
        })
    }

    fn resolve_function(&self, name: &str, args: &[Value], _scope: &VariableContext<'_>) -> Result<Option<Value>> {
        let arity = match name {
            "now" | "today" => (0, 0),
            "formatDate" | "parseDate" | "parseTime" | "parseDateTime" => (2, 2),
            "date" | "plus" | "minus" | "between" => (3, 3),
            "time" => (2, 3),
            _ => return Ok(None),
        };
        args::check_arity(name, args, arity.0, arity.1)?;
        if args.first().is_some_and(Value::is_null) {
            return Ok(Some(Value::Null));
        }

        let value = match name {
            "now" => Value::Temporal(Temporal::DateTime(self.now())),
            "today" => Value::Temporal(Temporal::Date(self.now().date())),
            "date" => construct_date(name, args)?,
            "time" => construct_time(name, args)?,
            "formatDate" => {
                let t = args::temporal(name, args, 0)?;
                Value::string(format_temporal(t, args::string(name, args, 1)?)?)
            }
            "parseDate" | "parseTime" | "parseDateTime" => parse(name, args)?,
            "plus" | "minus" => {
                let t = args::temporal(name, args, 0)?;
                let mut amount = args::integer(name, args, 1)?;
                let unit = args::unit(name, args, 2)?;
                if name == "minus" {
                    amount = amount.checked_neg().ok_or_else(|| arithmetic_overflow(name))?;
                }
                let shifted = t.shift(amount, unit).ok_or_else(|| {
                    type_mismatch(&format!("a unit that applies to a {}", t.kind_name()), unit.suffix())
                        .with_message(format!("cannot shift a {} by {unit}", t.kind_name()))
                })?;
                Value::Temporal(shifted)
            }
            _ => {
                let from = args::temporal(name, args, 0)?;
                let to = args::temporal(name, args, 1)?;
                let unit = args::unit(name, args, 2)?;
                let n = from.until(to, unit).ok_or_else(|| {
                    type_mismatch(from.kind_name(), to.kind_name()).with_message(format!(
                        "cannot count {unit} between a {} and a {}",
                        from.kind_name(),
                        to.kind_name()
                    ))
                })?;
                Value::from(n)
            }
        };
        Ok(Some(value))
    }
}

fn construct_date(name: &str, args: &[Value]) -> Result<Value> {
    let year = args::integer(name, args, 0)?;
    let month = args::integer(name, args, 1)?;
    let day = args::integer(name, args, 2)?;
    let date = i32::try_from(year).ok().and_then(|y| {
        NaiveDate::from_ymd_opt(y, u32::try_from(month).ok()?, u32::try_from(day).ok()?)
    });
    date.map(|d| Value::Temporal(Temporal::Date(d)))
        .ok_or_else(|| wrong_arg_type(name, 0, "valid calendar date", &format!("{year}-{month}-{day}")))
}

fn construct_time(name: &str, args: &[Value]) -> Result<Value> {
    let hour = args::integer(name, args, 0)?;
    let minute = args::integer(name, args, 1)?;
    let second = if args.len() > 2 { args::integer(name, args, 2)? } else { 0 };
    let field = |n: i64| u32::try_from(n).ok();
    let time = NaiveTime::from_hms_opt(
        field(hour).unwrap_or(u32::MAX),
        field(minute).unwrap_or(u32::MAX),
        field(second).unwrap_or(u32::MAX),
    );
    time.map(|t| Value::Temporal(Temporal::Time(t)))
        .ok_or_else(|| wrong_arg_type(name, 0, "valid time of day", &format!("{hour}:{minute}:{second}")))
}

fn parse(name: &str, args: &[Value]) -> Result<Value> {
    let text = args::string(name, args, 0)?;
    let pattern = args::string(name, args, 1)?;
    strftime_items(pattern)?;
    let parsed = match name {
        "parseDate" => NaiveDate::parse_from_str(text, pattern).map(Temporal::Date),
        "parseTime" => NaiveTime::parse_from_str(text, pattern).map(Temporal::Time),
        _ => NaiveDateTime::parse_from_str(text, pattern).map(Temporal::DateTime),
    };
    parsed
        .map(Value::Temporal)
        .map_err(|_| unparsable_input(text, pattern))
}
