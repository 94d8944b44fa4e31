// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Closed date intervals used as cache keys and query bounds

use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::date::DateBound;
use crate::config::constants::KEY_SEPARATOR;
use crate::errors::IntervalError;

/// A closed range of calendar dates `[start, end]`
///
/// The constructor guarantees `start <= end`; a single-day interval has
/// `start == end`. Intervals order by start, then by end.
///
/// The textual key form is `"<start>_<end>"`, e.g. `"2024-01-01_2024-01-31"`.
///
/// # Examples
///
/// ```
/// use txrange::Interval;
///
/// let january = Interval::parse("2024-01-01", "2024-01-31").unwrap();
/// let mid = Interval::parse("2024-01-10", "2024-01-20").unwrap();
///
/// assert!(january.contains(&mid));
/// assert!(january.intersects(&mid));
/// assert_eq!(january.key(), "2024-01-01_2024-01-31");
/// assert_eq!(january.days(), 31);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Interval {
    start: DateBound,
    end: DateBound,
}

impl Interval {
    /// Create an interval, rejecting `start > end`
    pub fn new(start: DateBound, end: DateBound) -> Result<Self, IntervalError> {
        if start > end {
            return Err(IntervalError::inverted(start, end));
        }
        Ok(Self { start, end })
    }

    /// Parse both bounds from `YYYY-MM-DD` text
    pub fn parse(start: &str, end: &str) -> Result<Self, IntervalError> {
        Self::new(start.parse()?, end.parse()?)
    }

    /// Single-day interval
    pub const fn day(date: DateBound) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Construct from bounds already known to be ordered
    pub(crate) fn from_ordered(start: DateBound, end: DateBound) -> Self {
        debug_assert!(start <= end, "interval bounds out of order");
        Self { start, end }
    }

    /// First day of `today`'s month through its last day
    pub fn current_month(today: DateBound) -> Result<Self, IntervalError> {
        let date = today.as_naive();
        let first = date
            .with_day(1)
            .ok_or_else(|| IntervalError::out_of_range(format!("first day of month of {today}")))?;
        let (year, month) = if date.month() == 12 {
            (date.year() + 1, 1)
        } else {
            (date.year(), date.month() + 1)
        };
        let last = DateBound::from_ymd(year, month, 1)
            .and_then(|next| next.checked_sub_days(1))
            .ok_or_else(|| IntervalError::out_of_range(format!("last day of month of {today}")))?;
        Self::new(first.into(), last)
    }

    /// The `days` days before `today` through `today`
    pub fn last_n_days(today: DateBound, days: u32) -> Result<Self, IntervalError> {
        let start = today
            .checked_sub_days(u64::from(days))
            .ok_or_else(|| IntervalError::out_of_range(format!("{days} days before {today}")))?;
        Self::new(start, today)
    }

    /// Inclusive start bound
    pub const fn start(&self) -> DateBound {
        self.start
    }

    /// Inclusive end bound
    pub const fn end(&self) -> DateBound {
        self.end
    }

    /// Number of calendar days covered, counting both ends
    pub fn days(&self) -> u64 {
        let span = self
            .end
            .as_naive()
            .signed_duration_since(self.start.as_naive())
            .num_days();
        span.unsigned_abs() + 1
    }

    /// Whether `other` lies entirely inside this interval
    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// Whether the two intervals share at least one day
    pub fn intersects(&self, other: &Interval) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Whether `date` falls within `[start, end]`
    pub fn contains_date(&self, date: DateBound) -> bool {
        self.start <= date && date <= self.end
    }

    /// Render as the textual cache key `"<start>_<end>"`
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{KEY_SEPARATOR}{}", self.start, self.end)
    }
}

impl FromStr for Interval {
    type Err = IntervalError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let (start, end) = key
            .split_once(KEY_SEPARATOR)
            .ok_or_else(|| IntervalError::malformed_key(key))?;
        Self::parse(start, end)
    }
}

impl TryFrom<String> for Interval {
    type Error = IntervalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Interval> for String {
    fn from(interval: Interval) -> Self {
        interval.key()
    }
}

impl TryFrom<(DateBound, DateBound)> for Interval {
    type Error = IntervalError;

    fn try_from((start, end): (DateBound, DateBound)) -> Result<Self, Self::Error> {
        Self::new(start, end)
    }
}

impl From<Interval> for (DateBound, DateBound) {
    fn from(interval: Interval) -> Self {
        (interval.start, interval.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> DateBound {
        s.parse().unwrap()
    }

    fn interval(start: &str, end: &str) -> Interval {
        Interval::parse(start, end).unwrap()
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let err = Interval::parse("2024-01-31", "2024-01-01").unwrap_err();
        assert!(matches!(err, IntervalError::Inverted { .. }));
    }

    #[test]
    fn test_single_day_is_valid() {
        let single = interval("2024-01-15", "2024-01-15");
        assert_eq!(single, Interval::day(date("2024-01-15")));
        assert_eq!(single.days(), 1);
        assert!(single.contains_date(date("2024-01-15")));
        assert!(!single.contains_date(date("2024-01-16")));
    }

    #[test]
    fn test_containment_is_inclusive() {
        let outer = interval("2024-01-01", "2024-01-31");
        assert!(outer.contains(&outer));
        assert!(outer.contains(&interval("2024-01-01", "2024-01-01")));
        assert!(outer.contains(&interval("2024-01-31", "2024-01-31")));
        assert!(!outer.contains(&interval("2023-12-31", "2024-01-10")));
        assert!(!outer.contains(&interval("2024-01-20", "2024-02-01")));
    }

    #[test]
    fn test_touching_intervals_intersect() {
        let a = interval("2024-01-01", "2024-01-15");
        let b = interval("2024-01-15", "2024-01-31");
        let c = interval("2024-01-16", "2024-01-31");
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_key_roundtrip() {
        let january = interval("2024-01-01", "2024-01-31");
        assert_eq!(january.key(), "2024-01-01_2024-01-31");
        assert_eq!(january.key().parse::<Interval>().unwrap(), january);
    }

    #[test]
    fn test_malformed_keys() {
        assert!(matches!(
            "2024-01-01".parse::<Interval>(),
            Err(IntervalError::MalformedKey { .. })
        ));
        assert!(matches!(
            "2024-01-31_2024-01-01".parse::<Interval>(),
            Err(IntervalError::Inverted { .. })
        ));
        assert!("2024-01-01_".parse::<Interval>().is_err());
    }

    #[test]
    fn test_ordering_by_start_then_end() {
        let mut intervals = vec![
            interval("2024-02-01", "2024-02-10"),
            interval("2024-01-01", "2024-01-31"),
            interval("2024-01-01", "2024-01-15"),
        ];
        intervals.sort();
        assert_eq!(
            intervals,
            vec![
                interval("2024-01-01", "2024-01-15"),
                interval("2024-01-01", "2024-01-31"),
                interval("2024-02-01", "2024-02-10"),
            ]
        );
    }

    #[test]
    fn test_current_month() {
        assert_eq!(
            Interval::current_month(date("2024-02-14")).unwrap(),
            interval("2024-02-01", "2024-02-29")
        );
        assert_eq!(
            Interval::current_month(date("2023-12-31")).unwrap(),
            interval("2023-12-01", "2023-12-31")
        );
    }

    #[test]
    fn test_last_n_days() {
        assert_eq!(
            Interval::last_n_days(date("2024-03-05"), 30).unwrap(),
            interval("2024-02-04", "2024-03-05")
        );
        assert_eq!(
            Interval::last_n_days(date("2024-03-05"), 0).unwrap(),
            interval("2024-03-05", "2024-03-05")
        );
    }

    #[test]
    fn test_serde_as_key() {
        let january = interval("2024-01-01", "2024-01-31");
        let json = serde_json::to_string(&january).unwrap();
        assert_eq!(json, "\"2024-01-01_2024-01-31\"");
        assert_eq!(serde_json::from_str::<Interval>(&json).unwrap(), january);
    }
}
