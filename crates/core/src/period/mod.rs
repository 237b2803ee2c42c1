//! Calendar-month period tokens.
//!
//! Allocations and withdrawals are grouped by calendar month. The canonical
//! wire and storage form is `YYYY-MM` (e.g. `"2025-05"`).

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// A calendar-month period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    year: i32,
    month: u32,
}

/// Error parsing a period token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid period token: {0}")]
pub struct PeriodParseError(pub String);

impl Period {
    /// Creates a period, validating the month is 1-12.
    #[must_use]
    pub const fn new(year: i32, month: u32) -> Option<Self> {
        if matches!(month, 1..=12) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// Returns the period containing the given instant.
    #[must_use]
    pub fn containing(now: DateTime<Utc>) -> Self {
        let date = now.date_naive();
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the following period.
    #[must_use]
    pub const fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The calendar year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// The calendar month (1-12).
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError(s.to_string()))?;
        let year: i32 = year.parse().map_err(|_| PeriodParseError(s.to_string()))?;
        let month: u32 = month.parse().map_err(|_| PeriodParseError(s.to_string()))?;
        Self::new(year, month).ok_or_else(|| PeriodParseError(s.to_string()))
    }
}

impl TryFrom<String> for Period {
    type Error = PeriodParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Period> for String {
    fn from(p: Period) -> Self {
        p.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_new_validates_month() {
        assert!(Period::new(2025, 5).is_some());
        assert!(Period::new(2025, 12).is_some());
        assert!(Period::new(2025, 0).is_none());
        assert!(Period::new(2025, 13).is_none());
    }

    #[rstest]
    #[case(2025, 5, "2025-05")]
    #[case(2025, 12, "2025-12")]
    #[case(999, 1, "0999-01")]
    fn test_display(#[case] year: i32, #[case] month: u32, #[case] expected: &str) {
        assert_eq!(Period::new(year, month).unwrap().to_string(), expected);
    }

    #[rstest]
    #[case("2025-05", 2025, 5)]
    #[case("2025-12", 2025, 12)]
    #[case("1999-01", 1999, 1)]
    fn test_parse(#[case] input: &str, #[case] year: i32, #[case] month: u32) {
        let period: Period = input.parse().unwrap();
        assert_eq!(period, Period::new(year, month).unwrap());
    }

    #[rstest]
    #[case("2025")]
    #[case("2025-13")]
    #[case("2025-00")]
    #[case("abcd-ef")]
    #[case("")]
    fn test_parse_rejects_invalid(#[case] input: &str) {
        assert!(input.parse::<Period>().is_err());
    }

    #[test]
    fn test_next_rolls_over_year() {
        let dec = Period::new(2025, 12).unwrap();
        assert_eq!(dec.next(), Period::new(2026, 1).unwrap());

        let may = Period::new(2025, 5).unwrap();
        assert_eq!(may.next(), Period::new(2025, 6).unwrap());
    }

    #[test]
    fn test_containing_now() {
        let now = DateTime::parse_from_rfc3339("2025-05-17T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(Period::containing(now), Period::new(2025, 5).unwrap());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a = Period::new(2024, 12).unwrap();
        let b = Period::new(2025, 1).unwrap();
        let c = Period::new(2025, 2).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_serde_string_form() {
        let period = Period::new(2025, 5).unwrap();
        let json = serde_json::to_string(&period).unwrap();
        assert_eq!(json, r#""2025-05""#);
        let back: Period = serde_json::from_str(&json).unwrap();
        assert_eq!(back, period);
    }
}
