// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for range resolution.
//!
//! A failed resolution never mutates the cache: the write-back happens only
//! after every gap fetch has succeeded and the merge has been validated.

use super::{IntervalError, SourceError};

/// Errors that can occur while resolving a requested interval.
///
/// # Examples
///
/// ```rust,ignore
/// use txrange::{ResolveError, TransactionCache};
///
/// match cache.get_transactions("2024-01-01", "2024-01-31", &options).await {
///     Ok(records) => println!("{} records", records.len()),
///     Err(ResolveError::InvalidInterval(e)) => eprintln!("bad request: {e}"),
///     Err(ResolveError::Source(e)) => eprintln!("provider unavailable: {e}"),
///     Err(e) => eprintln!("other error: {e}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The requested interval was rejected before any cache access.
    #[error("Invalid interval: {0}")]
    InvalidInterval(#[from] IntervalError),

    /// A gap fetch failed; the whole resolution is abandoned.
    #[error("Source unavailable: {0}")]
    Source(#[from] SourceError),

    /// Two copies of one record id differ in content.
    ///
    /// Only raised under [`DivergencePolicy::Reject`](crate::DivergencePolicy::Reject).
    #[error("Divergent record content for id {id}")]
    DivergentRecord {
        /// Debug rendering of the record id
        id: String,
    },
}

impl ResolveError {
    /// Create a `DivergentRecord` error from any debuggable id.
    pub fn divergent_record(id: &impl std::fmt::Debug) -> Self {
        ResolveError::DivergentRecord {
            id: format!("{id:?}"),
        }
    }

    /// Whether the failure came from the remote source.
    pub fn is_source_failure(&self) -> bool {
        matches!(self, ResolveError::Source(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divergent_record_renders_id() {
        let err = ResolveError::divergent_record(&42u64);
        assert_eq!(err.to_string(), "Divergent record content for id 42");
        assert!(!err.is_source_failure());
    }

    #[test]
    fn test_source_failure_passes_through() {
        let err: ResolveError = SourceError::unauthorized("token expired").into();
        assert!(err.is_source_failure());
        assert_eq!(
            err.to_string(),
            "Source unavailable: Source rejected credentials: token expired"
        );
    }
}
