//! Turning values into text.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};

use docfill_diagnostic::errors::{invalid_pattern, non_scalar_result};
use docfill_diagnostic::Result;
use docfill_ir::{Temporal, Value};

use crate::number_format::NumberPattern;

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How scalar values are written into text slots.
///
/// Numbers print in normalized decimal form unless a pattern is set;
/// temporals use strftime patterns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Formats {
    pub number: Option<NumberPattern>,
    pub date: String,
    pub time: String,
    pub datetime: String,
}

impl Default for Formats {
    fn default() -> Self {
        Formats {
            number: None,
            date: DEFAULT_DATE_FORMAT.to_string(),
            time: DEFAULT_TIME_FORMAT.to_string(),
            datetime: DEFAULT_DATETIME_FORMAT.to_string(),
        }
    }
}

impl Formats {
    /// Text for a scalar value. Lists and objects are a `NonScalarResult`.
    pub fn text(&self, value: &Value) -> Result<String> {
        match value {
            Value::Number(n) => Ok(match &self.number {
                Some(pattern) => pattern.format(*n)?,
                None => n.normalize().to_string(),
            }),
            Value::Temporal(t) => {
                let pattern = match t {
                    Temporal::Date(_) => &self.date,
                    Temporal::Time(_) => &self.time,
                    Temporal::DateTime(_) => &self.datetime,
                };
                format_temporal(*t, pattern)
            }
            Value::List(_) | Value::Object(_) => Err(non_scalar_result(value.type_name())),
            Value::Null | Value::Bool(_) | Value::Str(_) | Value::Period(_) => Ok(display_text(value)),
        }
    }
}

/// Default text form of a value, used for string concatenation.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.normalize().to_string(),
        Value::Str(s) => s.to_string(),
        Value::Temporal(t) => t.to_string(),
        Value::Period(p) => p.to_string(),
        Value::List(items) => {
            let parts: Vec<String> = items.iter().map(display_text).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Object(o) => format!("<{}>", o.type_name()),
    }
}

/// Format a temporal with a strftime pattern.
///
/// Unknown specifiers, and specifiers the value cannot satisfy (`%H` on a
/// plain date), are a `FormatError` rather than a panic.
pub fn format_temporal(temporal: Temporal, pattern: &str) -> Result<String> {
    let items = strftime_items(pattern)?;
    let mut out = String::new();
    let written = match temporal {
        Temporal::Date(d) => write!(out, "{}", d.format_with_items(items.iter())),
        Temporal::Time(t) => write!(out, "{}", t.format_with_items(items.iter())),
        Temporal::DateTime(dt) => write!(out, "{}", dt.format_with_items(items.iter())),
    };
    written.map_err(|_| {
        invalid_pattern(
            pattern,
            format!("pattern needs fields a {} does not have", temporal.kind_name()),
        )
    })?;
    Ok(out)
}

/// Parse and validate a strftime pattern.
pub fn strftime_items(pattern: &str) -> Result<Vec<Item<'_>>> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(invalid_pattern(pattern, "unknown format specifier"));
    }
    Ok(items)
}

/// Replace ASCII and full-width digits with kanji numerals for vertical
/// writing (`2024` becomes `二〇二四`). Other characters pass through.
pub fn verticalize(text: &str) -> String {
    const KANJI: [char; 10] = ['〇', '一', '二', '三', '四', '五', '六', '七', '八', '九'];
    text.chars()
        .map(|c| match c {
            '0'..='9' => KANJI[(c as usize) - ('0' as usize)],
            '０'..='９' => KANJI[(c as usize) - ('０' as usize)],
            other => other,
        })
        .collect()
}
