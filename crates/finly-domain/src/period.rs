//! Period-boundary arithmetic for budget rollovers.
//!
//! Every function here is a pure function of its inputs. Callers pass `today`
//! explicitly; nothing in this module reads a clock.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Cadence governing when a budget's spend tracking resets.
#[derive(Default)]
pub enum PeriodType {
    #[default]
    Monthly,
    Yearly,
}

impl PeriodType {
    pub fn as_str(self) -> &'static str {
        match self {
            PeriodType::Monthly => "monthly",
            PeriodType::Yearly => "yearly",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodType {
    type Err = ParsePeriodTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(PeriodType::Monthly),
            "yearly" => Ok(PeriodType::Yearly),
            _ => Err(ParsePeriodTypeError(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raised when an input string names no known period type.
pub struct ParsePeriodTypeError(pub String);

impl fmt::Display for ParsePeriodTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized period type `{}`", self.0)
    }
}

impl std::error::Error for ParsePeriodTypeError {}

/// Returns the first day of the period containing `date`.
pub fn current_period_start(period: PeriodType, date: NaiveDate) -> NaiveDate {
    match period {
        PeriodType::Monthly => date.with_day(1).unwrap(),
        PeriodType::Yearly => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap(),
    }
}

/// Returns the first day of the period following the one starting at `period_start`.
pub fn next_period_start(period: PeriodType, period_start: NaiveDate) -> NaiveDate {
    match period {
        PeriodType::Monthly => shift_month(period_start, 1),
        PeriodType::Yearly => shift_year(period_start, 1),
    }
}

/// True when `today` has entered (or passed) the period after `last_reset`.
pub fn needs_reset(period: PeriodType, last_reset: NaiveDate, today: NaiveDate) -> bool {
    today >= next_period_start(period, last_reset)
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap()
}

fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let mut day = date.day();
    let month = date.month();
    day = day.min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}
