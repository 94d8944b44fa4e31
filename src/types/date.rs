// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar date bound used by intervals and records

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::constants::DATE_FORMAT;
use crate::errors::IntervalError;

/// A calendar date with no time component
///
/// Renders and parses as `YYYY-MM-DD` only, so the textual form sorts in the
/// same order as the dates themselves. Ordering and equality are chronological.
///
/// # Examples
///
/// ```
/// use txrange::DateBound;
///
/// let date: DateBound = "2024-01-15".parse().unwrap();
/// assert_eq!(date.to_string(), "2024-01-15");
/// assert!(date < "2024-02-01".parse::<DateBound>().unwrap());
/// assert!("2024-1-15".parse::<DateBound>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateBound(NaiveDate);

impl DateBound {
    /// Create a date bound from year, month and day
    ///
    /// Returns `None` for dates that do not exist on the calendar.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today's date in UTC
    pub fn today() -> Self {
        Self(Utc::now().date_naive())
    }

    /// The underlying `chrono` date
    pub const fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Add days, failing if the result leaves chrono's date range
    pub fn checked_add_days(self, days: u64) -> Option<Self> {
        self.0.checked_add_days(Days::new(days)).map(Self)
    }

    /// Subtract days, failing if the result leaves chrono's date range
    pub fn checked_sub_days(self, days: u64) -> Option<Self> {
        self.0.checked_sub_days(Days::new(days)).map(Self)
    }
}

impl From<NaiveDate> for DateBound {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<DateBound> for NaiveDate {
    fn from(date: DateBound) -> Self {
        date.0
    }
}

impl fmt::Display for DateBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for DateBound {
    type Err = IntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date =
            NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| IntervalError::parse(s, e))?;
        let bound = Self(date);

        // chrono accepts unpadded fields; only the canonical form sorts correctly
        if bound.to_string() != s {
            return Err(IntervalError::non_canonical(s));
        }
        Ok(bound)
    }
}

impl TryFrom<String> for DateBound {
    type Error = IntervalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DateBound> for String {
    fn from(date: DateBound) -> Self {
        date.to_string()
    }
}
