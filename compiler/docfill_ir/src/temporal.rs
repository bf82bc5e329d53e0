//! Temporal values, calendar units and unit-tagged periods.

use std::fmt;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

/// A date, a time of day, or both. No time zone is attached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Temporal {
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
}

/// Calendar or clock unit used by period literals and date arithmetic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TemporalUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

/// A signed amount of one temporal unit, e.g. the literal `10min`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Period {
    pub amount: i64,
    pub unit: TemporalUnit,
}

impl TemporalUnit {
    /// Parse a unit name.
    ///
    /// Accepts the short literal suffixes (`min`, `sec`), long English forms
    /// in singular and plural, and the Japanese unit characters used in
    /// templates authored for Japanese documents.
    pub fn parse(name: &str) -> Option<TemporalUnit> {
        let unit = match name {
            "year" | "years" | "年" => TemporalUnit::Year,
            "month" | "months" | "月" => TemporalUnit::Month,
            "day" | "days" | "日" => TemporalUnit::Day,
            "hour" | "hours" | "時間" | "時" => TemporalUnit::Hour,
            "min" | "minute" | "minutes" | "分" => TemporalUnit::Minute,
            "sec" | "second" | "seconds" | "秒" => TemporalUnit::Second,
            _ => return None,
        };
        Some(unit)
    }

    /// Canonical literal suffix.
    pub const fn suffix(self) -> &'static str {
        match self {
            TemporalUnit::Year => "year",
            TemporalUnit::Month => "month",
            TemporalUnit::Day => "day",
            TemporalUnit::Hour => "hour",
            TemporalUnit::Minute => "min",
            TemporalUnit::Second => "sec",
        }
    }

    /// `true` for units that count whole months.
    const fn is_calendar(self) -> bool {
        matches!(self, TemporalUnit::Year | TemporalUnit::Month)
    }

    /// `true` for units below one day.
    const fn is_clock(self) -> bool {
        matches!(
            self,
            TemporalUnit::Hour | TemporalUnit::Minute | TemporalUnit::Second
        )
    }

    fn delta(self, amount: i64) -> Option<TimeDelta> {
        match self {
            TemporalUnit::Day => TimeDelta::try_days(amount),
            TemporalUnit::Hour => TimeDelta::try_hours(amount),
            TemporalUnit::Minute => TimeDelta::try_minutes(amount),
            TemporalUnit::Second => TimeDelta::try_seconds(amount),
            TemporalUnit::Year | TemporalUnit::Month => None,
        }
    }

    fn months(self, amount: i64) -> Option<i64> {
        match self {
            TemporalUnit::Year => amount.checked_mul(12),
            TemporalUnit::Month => Some(amount),
            _ => None,
        }
    }
}

impl fmt::Display for TemporalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl Period {
    pub const fn new(amount: i64, unit: TemporalUnit) -> Self {
        Period { amount, unit }
    }

    #[must_use]
    pub fn negated(self) -> Option<Period> {
        Some(Period {
            amount: self.amount.checked_neg()?,
            unit: self.unit,
        })
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit)
    }
}

impl Temporal {
    /// Human name of the variant, used in type mismatch messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Temporal::Date(_) => "date",
            Temporal::Time(_) => "time",
            Temporal::DateTime(_) => "datetime",
        }
    }

    /// Shift by `amount` units.
    ///
    /// Returns `None` when the unit does not apply to this variant (hours on a
    /// plain date, months on a time of day) or the result is out of range.
    /// Times of day wrap around midnight. Month arithmetic clamps to the last
    /// day of the target month.
    pub fn shift(self, amount: i64, unit: TemporalUnit) -> Option<Temporal> {
        match self {
            Temporal::Date(date) => {
                if unit.is_clock() {
                    return None;
                }
                shift_date(date, amount, unit).map(Temporal::Date)
            }
            Temporal::Time(time) => {
                if !unit.is_clock() {
                    return None;
                }
                let (shifted, _) = time.overflowing_add_signed(unit.delta(amount)?);
                Some(Temporal::Time(shifted))
            }
            Temporal::DateTime(datetime) => {
                if unit.is_calendar() {
                    let months = unit.months(amount)?;
                    return add_months(datetime.date(), months)
                        .map(|date| Temporal::DateTime(date.and_time(datetime.time())));
                }
                datetime
                    .checked_add_signed(unit.delta(amount)?)
                    .map(Temporal::DateTime)
            }
        }
    }

    /// Count whole `unit`s from `self` to `other` (negative when `other` is
    /// earlier). Both values must be the same variant.
    pub fn until(self, other: Temporal, unit: TemporalUnit) -> Option<i64> {
        match (self, other) {
            (Temporal::Date(a), Temporal::Date(b)) => {
                let start = a.and_time(NaiveTime::MIN);
                let end = b.and_time(NaiveTime::MIN);
                between_datetimes(start, end, unit)
            }
            (Temporal::DateTime(a), Temporal::DateTime(b)) => between_datetimes(a, b, unit),
            (Temporal::Time(a), Temporal::Time(b)) => {
                if unit.is_calendar() {
                    return None;
                }
                count_delta(b.signed_duration_since(a), unit)
            }
            _ => None,
        }
    }
}

fn shift_date(date: NaiveDate, amount: i64, unit: TemporalUnit) -> Option<NaiveDate> {
    if unit.is_calendar() {
        add_months(date, unit.months(amount)?)
    } else {
        date.checked_add_signed(unit.delta(amount)?)
    }
}

fn add_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}

fn between_datetimes(a: NaiveDateTime, b: NaiveDateTime, unit: TemporalUnit) -> Option<i64> {
    if !unit.is_calendar() {
        return count_delta(b.signed_duration_since(a), unit);
    }
    let mut months = i64::from(b.year() - a.year()) * 12
        + (i64::from(b.month()) - i64::from(a.month()));
    // Only count complete months.
    let a_rest = (a.day(), a.num_seconds_from_midnight());
    let b_rest = (b.day(), b.num_seconds_from_midnight());
    if months > 0 && b_rest < a_rest {
        months -= 1;
    } else if months < 0 && b_rest > a_rest {
        months += 1;
    }
    match unit {
        TemporalUnit::Year => Some(months / 12),
        _ => Some(months),
    }
}

fn count_delta(delta: TimeDelta, unit: TemporalUnit) -> Option<i64> {
    match unit {
        TemporalUnit::Day => Some(delta.num_days()),
        TemporalUnit::Hour => Some(delta.num_hours()),
        TemporalUnit::Minute => Some(delta.num_minutes()),
        TemporalUnit::Second => Some(delta.num_seconds()),
        TemporalUnit::Year | TemporalUnit::Month => None,
    }
}

impl fmt::Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temporal::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Temporal::Time(time) => write!(f, "{}", time.format("%H:%M:%S")),
            Temporal::DateTime(datetime) => write!(f, "{}", datetime.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}
