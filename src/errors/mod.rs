// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the txrange library.
//!
//! This module provides strongly-typed errors for all public APIs in txrange.
//! It follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained error handling ([`IntervalError`],
//!   [`SourceError`], [`ResolveError`])
//! - **Unified error type** ([`TxRangeError`]) for convenience when you don't need
//!   to distinguish between error sources
//!
//! # Examples
//!
//! ## Fine-grained error handling
//!
//! ```rust,ignore
//! use txrange::{FetchOptions, ResolveError, SourceError};
//!
//! match cache.get_transactions("2024-01-01", "2024-01-31", &FetchOptions::new()).await {
//!     Ok(records) => println!("{} transactions", records.len()),
//!     Err(ResolveError::Source(SourceError::RateLimited { details })) => {
//!         eprintln!("slow down: {details}");
//!     }
//!     Err(e) => eprintln!("Other error: {e}"),
//! }
//! ```
//!
//! ## Using the unified error type
//!
//! ```rust,ignore
//! use txrange::{FetchOptions, Interval, TxRangeError};
//!
//! async fn example() -> Result<(), TxRangeError> {
//!     let interval: Interval = "2024-01-01_2024-01-31".parse()?;
//!     let resolution = cache.resolve(interval, &FetchOptions::new()).await?;
//!     Ok(())
//! }
//! ```

mod interval;
mod resolve;
mod source;

pub use interval::IntervalError;
pub use resolve::ResolveError;
pub use source::SourceError;

/// Unified error type for all txrange operations.
///
/// All module-specific error types automatically convert to `TxRangeError` via
/// `From` implementations, so you can use `?` to propagate errors naturally.
#[derive(Debug, thiserror::Error)]
pub enum TxRangeError {
    /// Error from date or interval construction.
    #[error("Interval error: {0}")]
    Interval(#[from] IntervalError),

    /// Error from a transaction source.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Error from range resolution.
    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::interval::Interval;

    fn parse_key(key: &str) -> Result<Interval, TxRangeError> {
        Ok(key.parse()?)
    }

    #[test]
    fn test_question_mark_converts_to_unified_error() {
        let err = parse_key("2024-01-31").unwrap_err();
        assert!(matches!(err, TxRangeError::Interval(IntervalError::MalformedKey { .. })));
        assert!(parse_key("2024-01-01_2024-01-31").is_ok());
    }

    #[test]
    fn test_unified_error_wraps_message() {
        let err: TxRangeError = ResolveError::divergent_record(&7u64).into();
        assert_eq!(
            err.to_string(),
            "Resolve error: Divergent record content for id 7"
        );
    }
}
