//! Calendar-month period tokens.
//!
//! Block rules and trend buckets are keyed by calendar month, written as
//! `YYYY-MM` (e.g. `2026-08`).

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors when parsing or constructing a [`Period`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    /// Token did not match `YYYY-MM`.
    #[error("Invalid period '{0}', expected YYYY-MM")]
    InvalidFormat(String),

    /// Year/month combination is not a representable date.
    #[error("Period {year:04}-{month:02} is out of range")]
    OutOfRange {
        /// Parsed year.
        year: i32,
        /// Parsed month.
        month: u32,
    },
}

/// A calendar month.
///
/// Construction is validated, so `year`/`month` always form a representable
/// date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Creates a period from a year and a 1-based month.
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(PeriodError::OutOfRange { year, month });
        }
        Ok(Self { year, month })
    }

    /// The month the given date falls in.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The year component.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// The 1-based month component.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// First day of the month.
    #[must_use]
    pub fn first_day(self) -> NaiveDate {
        // Valid by construction.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month.
    #[must_use]
    pub fn last_day(self) -> NaiveDate {
        self.succ()
            .first_day()
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }

    /// Returns true if the date falls inside this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The previous month.
    #[must_use]
    pub fn pred(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year.saturating_sub(1),
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The next month.
    #[must_use]
    pub fn succ(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year.saturating_add(1),
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The `count` months ending at `last`, in chronological order.
    #[must_use]
    pub fn window_ending_at(last: Self, count: u32) -> Vec<Self> {
        let mut months = Vec::with_capacity(count as usize);
        let mut current = last;
        for _ in 0..count {
            months.push(current);
            current = current.pred();
        }
        months.reverse();
        months
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year_part, month_part) = s
            .split_once('-')
            .ok_or_else(|| PeriodError::InvalidFormat(s.to_string()))?;
        if year_part.len() != 4 || month_part.len() != 2 {
            return Err(PeriodError::InvalidFormat(s.to_string()));
        }
        let year: i32 = year_part
            .parse()
            .map_err(|_| PeriodError::InvalidFormat(s.to_string()))?;
        let month: u32 = month_part
            .parse()
            .map_err(|_| PeriodError::InvalidFormat(s.to_string()))?;
        Self::new(year, month)
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case("2026-08", 2026, 8)]
    #[case("2024-01", 2024, 1)]
    #[case("1999-12", 1999, 12)]
    fn test_parse_valid_tokens(#[case] token: &str, #[case] year: i32, #[case] month: u32) {
        let period: Period = token.parse().unwrap();
        assert_eq!(period.year(), year);
        assert_eq!(period.month(), month);
        assert_eq!(period.to_string(), token);
    }

    #[rstest]
    #[case("2026-13")]
    #[case("2026-00")]
    #[case("2026-8")]
    #[case("26-08")]
    #[case("2026/08")]
    #[case("202608")]
    #[case("")]
    fn test_parse_rejects_bad_tokens(#[case] token: &str) {
        assert!(token.parse::<Period>().is_err());
    }

    #[test]
    fn test_day_bounds() {
        let period: Period = "2026-02".parse().unwrap();
        assert_eq!(period.first_day(), date(2026, 2, 1));
        assert_eq!(period.last_day(), date(2026, 2, 28));

        let leap: Period = "2024-02".parse().unwrap();
        assert_eq!(leap.last_day(), date(2024, 2, 29));
    }

    #[test]
    fn test_contains() {
        let period: Period = "2026-08".parse().unwrap();
        assert!(period.contains(date(2026, 8, 1)));
        assert!(period.contains(date(2026, 8, 31)));
        assert!(!period.contains(date(2026, 7, 31)));
        assert!(!period.contains(date(2026, 9, 1)));
        assert!(!period.contains(date(2025, 8, 15)));
    }

    #[test]
    fn test_pred_succ_cross_year_boundary() {
        let january: Period = "2026-01".parse().unwrap();
        assert_eq!(january.pred().to_string(), "2025-12");
        let december: Period = "2025-12".parse().unwrap();
        assert_eq!(december.succ().to_string(), "2026-01");
    }

    #[test]
    fn test_window_is_chronological_and_exact() {
        let last: Period = "2026-02".parse().unwrap();
        let window = Period::window_ending_at(last, 4);
        let labels: Vec<String> = window.iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["2025-11", "2025-12", "2026-01", "2026-02"]);
    }

    #[test]
    fn test_serde_round_trip() {
        let period: Period = "2026-08".parse().unwrap();
        let json = serde_json::to_string(&period).unwrap();
        assert_eq!(json, "\"2026-08\"");
        let back: Period = serde_json::from_str(&json).unwrap();
        assert_eq!(back, period);
    }
}
