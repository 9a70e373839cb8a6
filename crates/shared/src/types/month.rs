//! Billing month key (`YYYY-MM`).
//!
//! Reconciliation reports are keyed by `(month, company)`. The month is a
//! calendar month, serialized as `YYYY-MM`. Descending string order on the
//! serialized form matches descending chronological order, which the
//! variance dashboard relies on.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A calendar month used as the reconciliation period key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BillingMonth {
    year: i32,
    month: u32,
}

/// Error parsing a `YYYY-MM` month identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid month identifier: {0} (expected YYYY-MM)")]
pub struct MonthParseError(pub String);

impl BillingMonth {
    /// Creates a month from a year and a 1-based month number.
    pub fn new(year: i32, month: u32) -> Result<Self, MonthParseError> {
        if !(1..=12).contains(&month) || !(1970..=9999).contains(&year) {
            return Err(MonthParseError(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// Returns the month containing the given date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the 1-based month number.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Returns the first day of the month.
    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        // Both components were validated on construction.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Returns the last day of the month (leap-year aware).
    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .unwrap_or(NaiveDate::MAX)
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }

    /// Returns true if the given date falls within this month.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Returns a display name such as "February 2026".
    #[must_use]
    pub fn display_name(&self) -> String {
        const NAMES: [&str; 12] = [
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
        let name = NAMES[(self.month - 1) as usize];
        format!("{name} {}", self.year)
    }
}

impl fmt::Display for BillingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for BillingMonth {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| MonthParseError(s.to_string()))?;
        if year.len() != 4 || month.len() != 2 {
            return Err(MonthParseError(s.to_string()));
        }
        let year: i32 = year.parse().map_err(|_| MonthParseError(s.to_string()))?;
        let month: u32 = month.parse().map_err(|_| MonthParseError(s.to_string()))?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for BillingMonth {
    type Error = MonthParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<BillingMonth> for String {
    fn from(month: BillingMonth) -> Self {
        month.to_string()
    }
}
