//! Calendar helpers for year/month filtering
//!
//! Income and payouts are bucketed by calendar month; income is further
//! bucketed by a 1-based week-of-month.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English full month name for a 1-based month, or `""` when out of range
pub fn month_name(month: u32) -> &'static str {
    match month {
        1..=12 => MONTH_NAMES[(month - 1) as usize],
        _ => "",
    }
}

/// Three-letter month name for a 1-based month, or `""` when out of range
pub fn short_month_name(month: u32) -> &'static str {
    let name = month_name(month);
    name.get(..3).unwrap_or("")
}

/// Week-of-month bucket: `ceil(day_of_month / 7)`, always 1 through 5
pub fn week_of_month(date: NaiveDate) -> u32 {
    date.day().div_ceil(7)
}

/// A calendar month in a given year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthPeriod {
    pub year: i32,
    pub month: u32,
}

impl MonthPeriod {
    /// Create a month period; returns `None` for months outside 1-12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current local month
    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    /// Parse "2025-03", "2025-3" or "2025/03"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let invalid = || PeriodParseError::InvalidFormat(s.to_string());

        let (year, month) = s
            .split_once('-')
            .or_else(|| s.split_once('/'))
            .ok_or_else(invalid)?;

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Self::new(year, month).ok_or(PeriodParseError::MonthOutOfRange(month))
    }

    pub fn name(&self) -> &'static str {
        month_name(self.month)
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    MonthOutOfRange(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid period '{}', expected YYYY-MM", s),
            Self::MonthOutOfRange(m) => write!(f, "Month must be between 1 and 12, got {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_of_month_boundaries() {
        assert_eq!(week_of_month(date(2025, 3, 1)), 1);
        assert_eq!(week_of_month(date(2025, 3, 7)), 1);
        assert_eq!(week_of_month(date(2025, 3, 8)), 2);
        assert_eq!(week_of_month(date(2025, 3, 28)), 4);
        assert_eq!(week_of_month(date(2025, 3, 29)), 5);
        assert_eq!(week_of_month(date(2025, 3, 31)), 5);
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "");
        assert_eq!(month_name(13), "");
        assert_eq!(short_month_name(9), "Sep");
        assert_eq!(short_month_name(13), "");
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            MonthPeriod::parse("2025-03").unwrap(),
            MonthPeriod { year: 2025, month: 3 }
        );
        assert_eq!(MonthPeriod::parse("2025/11").unwrap().month, 11);
        assert_eq!(
            MonthPeriod::parse("2025-13"),
            Err(PeriodParseError::MonthOutOfRange(13))
        );
        assert!(MonthPeriod::parse("March").is_err());
    }

    #[test]
    fn test_display_and_contains() {
        let period = MonthPeriod::new(2025, 4).unwrap();
        assert_eq!(period.to_string(), "April 2025");
        assert!(period.contains(date(2025, 4, 30)));
        assert!(!period.contains(date(2024, 4, 30)));
    }
}
