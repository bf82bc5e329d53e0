//! Number patterns in the `#,##0.00` style.
//!
//! A pattern is an optional literal prefix, a numeric core made of `#`, `0`,
//! `,` and `.`, and an optional literal suffix:
//!
//! | Pattern      | 1234.5        |
//! |--------------|---------------|
//! | `#,##0.00`   | `1,234.50`    |
//! | `0.#`        | `1234.5`      |
//! | `$#,##0`     | `$1,235`      |
//! | `0.0%`       | `123450.0%`   |
//!
//! `0` is a required digit, `#` an optional one, `,` turns on grouping by
//! thousands. A `%` anywhere in the prefix or suffix scales the value by 100.
//! Rounding is half away from zero.

use docfill_diagnostic::errors::{arithmetic_overflow, invalid_pattern};
use docfill_diagnostic::Result;
use docfill_ir::Decimal;
use rust_decimal::RoundingStrategy;

/// Fraction digits kept when a pattern places no upper bound.
const MAX_SCALE: u32 = 28;

/// A parsed number pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberPattern {
    prefix: String,
    suffix: String,
    grouping: bool,
    min_integer: usize,
    min_fraction: u32,
    max_fraction: u32,
    percent: bool,
}

impl NumberPattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        let is_core = |c: char| matches!(c, '#' | '0' | ',' | '.');
        let Some(start) = pattern.find(is_core) else {
            return Err(invalid_pattern(pattern, "pattern has no digit placeholders"));
        };
        let end = pattern.rfind(is_core).map_or(start, |i| i + 1);
        let (prefix, rest) = pattern.split_at(start);
        let (core, suffix) = rest.split_at(end - start);

        if !core.contains(['#', '0']) {
            return Err(invalid_pattern(pattern, "pattern has no digit placeholders"));
        }

        let mut parts = core.split('.');
        let integer = parts.next().unwrap_or_default();
        let fraction = parts.next().unwrap_or_default();
        if parts.next().is_some() {
            return Err(invalid_pattern(pattern, "more than one decimal point"));
        }
        if fraction.contains(',') {
            return Err(invalid_pattern(pattern, "grouping separator after the decimal point"));
        }

        let count = |s: &str, c: char| s.chars().filter(|&x| x == c).count();
        let min_fraction = u32::try_from(count(fraction, '0'))
            .map_err(|_| invalid_pattern(pattern, "too many fraction digits"))?;
        let max_fraction = u32::try_from(fraction.len())
            .map_err(|_| invalid_pattern(pattern, "too many fraction digits"))?;
        if max_fraction > MAX_SCALE {
            return Err(invalid_pattern(pattern, "too many fraction digits"));
        }

        Ok(NumberPattern {
            percent: prefix.contains('%') || suffix.contains('%'),
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            grouping: integer.contains(','),
            min_integer: count(integer, '0'),
            min_fraction,
            max_fraction,
        })
    }

    /// Exactly `digits` fraction digits, no grouping.
    pub fn fixed(digits: u32) -> Self {
        let digits = digits.min(MAX_SCALE);
        NumberPattern {
            prefix: String::new(),
            suffix: String::new(),
            grouping: false,
            min_integer: 1,
            min_fraction: digits,
            max_fraction: digits,
            percent: false,
        }
    }

    /// Thousands grouping, fraction digits kept as they are.
    pub fn grouped() -> Self {
        NumberPattern {
            grouping: true,
            max_fraction: MAX_SCALE,
            ..NumberPattern::fixed(0)
        }
    }

    /// Symbol prefix, grouping and a fixed number of fraction digits.
    pub fn currency(symbol: &str, digits: u32) -> Self {
        NumberPattern {
            prefix: symbol.to_string(),
            grouping: true,
            ..NumberPattern::fixed(digits)
        }
    }

    /// Format `value`. Fails only when `%` scaling overflows.
    pub fn format(&self, value: Decimal) -> Result<String> {
        let scaled = if self.percent {
            value
                .checked_mul(Decimal::ONE_HUNDRED)
                .ok_or_else(|| arithmetic_overflow("%"))?
        } else {
            value
        };
        let rounded = scaled
            .round_dp_with_strategy(self.max_fraction, RoundingStrategy::MidpointAwayFromZero)
            .normalize();
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let digits = rounded.abs().to_string();
        let (integer, fraction) = digits.split_once('.').unwrap_or((&digits, ""));

        let mut out = String::with_capacity(digits.len() + self.prefix.len() + self.suffix.len() + 4);
        out.push_str(&self.prefix);
        if negative {
            out.push('-');
        }

        let padded = format!("{integer:0>width$}", width = self.min_integer.max(1));
        if self.grouping {
            push_grouped(&mut out, &padded);
        } else {
            out.push_str(&padded);
        }

        let min_fraction = self.min_fraction as usize;
        if !fraction.is_empty() || min_fraction > 0 {
            out.push('.');
            out.push_str(fraction);
            for _ in fraction.len()..min_fraction {
                out.push('0');
            }
        }
        out.push_str(&self.suffix);
        Ok(out)
    }
}

fn push_grouped(out: &mut String, integer: &str) {
    let len = integer.len();
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
}

/// Parse user-facing number text: grouping commas, underscores and
/// surrounding whitespace are ignored, and a trailing `%` divides by 100.
pub fn parse_number_text(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    let (body, percent) = match trimmed.strip_suffix('%') {
        Some(body) => (body.trim_end(), true),
        None => (trimmed, false),
    };
    let cleaned: String = body.chars().filter(|c| !matches!(c, ',' | '_')).collect();
    let value: Decimal = cleaned.parse().ok()?;
    if percent {
        value.checked_div(Decimal::ONE_HUNDRED)
    } else {
        Some(value)
    }
}
