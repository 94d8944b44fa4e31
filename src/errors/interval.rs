// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for date bounds and intervals.
//!
//! These are raised before any cache or source interaction happens, so a
//! caller receiving one can be sure nothing was fetched or written.

/// Errors that can occur when constructing or parsing an [`Interval`](crate::Interval).
///
/// # Examples
///
/// ```rust
/// use txrange::{Interval, IntervalError};
///
/// match Interval::parse("2024-02-01", "2024-01-01") {
///     Err(IntervalError::Inverted { start, end }) => {
///         assert_eq!(start, "2024-02-01");
///         assert_eq!(end, "2024-01-01");
///     }
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum IntervalError {
    /// The start bound lies after the end bound.
    #[error("Invalid interval: start {start} is after end {end}")]
    Inverted {
        /// Start bound as supplied
        start: String,
        /// End bound as supplied
        end: String,
    },

    /// A date bound is not a valid `YYYY-MM-DD` calendar date.
    #[error("Invalid date {input:?}: expected YYYY-MM-DD")]
    Parse {
        /// The text that failed to parse
        input: String,
        /// The underlying chrono error
        #[source]
        source: chrono::ParseError,
    },

    /// A date parsed, but not from its zero-padded `YYYY-MM-DD` form.
    #[error("Non-canonical date {input:?}: expected zero-padded YYYY-MM-DD")]
    NonCanonical {
        /// The text that was supplied
        input: String,
    },

    /// A cache key is not of the form `<start>_<end>`.
    #[error("Malformed interval key {key:?}: expected <start>_<end>")]
    MalformedKey {
        /// The offending key
        key: String,
    },

    /// Calendar arithmetic left the representable date range.
    #[error("Date arithmetic out of range: {details}")]
    OutOfRange {
        /// What was being computed
        details: String,
    },
}

impl IntervalError {
    /// Create an `Inverted` error from any displayable bounds.
    pub fn inverted(start: impl ToString, end: impl ToString) -> Self {
        IntervalError::Inverted {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    /// Create a `Parse` error for the given input.
    pub fn parse(input: impl Into<String>, source: chrono::ParseError) -> Self {
        IntervalError::Parse {
            input: input.into(),
            source,
        }
    }

    /// Create a `NonCanonical` error for the given input.
    pub fn non_canonical(input: impl Into<String>) -> Self {
        IntervalError::NonCanonical {
            input: input.into(),
        }
    }

    /// Create a `MalformedKey` error.
    pub fn malformed_key(key: impl Into<String>) -> Self {
        IntervalError::MalformedKey { key: key.into() }
    }

    /// Create an `OutOfRange` error.
    pub fn out_of_range(details: impl Into<String>) -> Self {
        IntervalError::OutOfRange {
            details: details.into(),
        }
    }
}
