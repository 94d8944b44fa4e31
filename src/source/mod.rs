// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Remote transaction sources
//!
//! This module defines the [`TransactionSource`] trait the resolver fetches
//! gaps through, plus adapters that compose around any source.
//!
//! # Architecture
//!
//! A source answers one question: which records are dated within `[start, end]`
//! given some provider-specific filters. Everything else (credentials,
//! pagination, retries, backoff) stays inside the implementation.
//!
//! - [`MemorySource`]: serves a fixed record set (fixtures, tests, offline use)
//! - [`ThrottledSource`]: token-bucket rate limiting in front of another source
//! - [`LoggingSource`]: per-call timing and failure logging via `tracing`
//!
//! # Example: Implementing a source
//!
//! ```rust,ignore
//! use async_trait::async_trait;
//! use txrange::{FetchOptions, Interval, SourceError, Transaction, TransactionSource};
//!
//! struct ProviderClient { /* http client, token, ... */ }
//!
//! #[async_trait]
//! impl TransactionSource for ProviderClient {
//!     async fn fetch(
//!         &self,
//!         interval: Interval,
//!         options: &FetchOptions,
//!     ) -> Result<Vec<Transaction>, SourceError> {
//!         let response = self
//!             .get_transactions(interval.start(), interval.end(), options)
//!             .await
//!             .map_err(|e| SourceError::request_failed(format!("fetch {interval}"), e))?;
//!         Ok(response.transactions)
//!     }
//! }
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::SourceError;
use crate::types::interval::Interval;
use crate::types::record::DatedRecord;
use crate::types::transaction::Transaction;

mod logging;
mod memory;
mod throttle;

pub use logging::LoggingSource;
pub use memory::MemorySource;
pub use throttle::ThrottledSource;

/// Provider-specific query filters passed through to every fetch
///
/// Keys are ordered so the options render deterministically in logs.
///
/// # Examples
///
/// ```
/// use txrange::FetchOptions;
///
/// let options = FetchOptions::new()
///     .with("category_id", "42")
///     .with("debit_as_negative", "true");
/// assert_eq!(options.get("category_id"), Some("42"));
/// assert_eq!(options.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FetchOptions(BTreeMap<String, String>);

impl FetchOptions {
    /// Empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace one option
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up one option
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterate options in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of options
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no options are set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FetchOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Trait for fetching date-ranged records from a remote provider
///
/// Implementations must return every record whose date lies in
/// `[interval.start(), interval.end()]` inclusive. Errors are propagated to
/// the resolver's caller unchanged.
///
/// # Thread Safety
///
/// The resolver may call `fetch` concurrently for independent gaps of one
/// request; implementations must be `Send + Sync`.
#[async_trait]
pub trait TransactionSource<R: DatedRecord = Transaction>: Send + Sync {
    /// Fetch all records dated within `interval`
    async fn fetch(&self, interval: Interval, options: &FetchOptions)
        -> Result<Vec<R>, SourceError>;

    /// Returns a human-readable name for this source
    ///
    /// Used for logging and debugging.
    fn name(&self) -> &'static str {
        "TransactionSource"
    }
}

#[async_trait]
impl<R, S> TransactionSource<R> for Arc<S>
where
    R: DatedRecord,
    S: TransactionSource<R> + ?Sized,
{
    async fn fetch(
        &self,
        interval: Interval,
        options: &FetchOptions,
    ) -> Result<Vec<R>, SourceError> {
        (**self).fetch(interval, options).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_ordered_and_replaced() {
        let mut options: FetchOptions = [("tag_id", "1"), ("category_id", "2")]
            .into_iter()
            .collect();
        options.insert("tag_id", "3");

        let pairs: Vec<(&str, &str)> = options.iter().collect();
        assert_eq!(pairs, vec![("category_id", "2"), ("tag_id", "3")]);
    }

    #[test]
    fn test_options_serialize_as_map() {
        let options = FetchOptions::new().with("limit", "100");
        assert_eq!(
            serde_json::to_string(&options).unwrap(),
            r#"{"limit":"100"}"#
        );
        assert!(FetchOptions::new().is_empty());
    }
}
