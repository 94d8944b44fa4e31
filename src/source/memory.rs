// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory source serving a fixed record set.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{FetchOptions, TransactionSource};
use crate::errors::SourceError;
use crate::types::interval::Interval;
use crate::types::record::DatedRecord;
use crate::types::transaction::Transaction;

/// A source answering every fetch from a fixed list of records
///
/// Each fetch returns the records dated within the requested interval,
/// ignoring options. Calls are counted and the requested intervals are
/// logged, which makes this the reference source for fixtures and tests.
///
/// # Examples
///
/// ```
/// use txrange::{MemorySource, Transaction};
///
/// let source = MemorySource::from_json_str(
///     r#"{"transactions": [{"id": 1, "date": "2024-01-05", "amount": "-12.50"}]}"#,
/// )
/// .unwrap();
/// assert_eq!(source.records().len(), 1);
/// assert_eq!(source.call_count(), 0);
/// ```
#[derive(Debug)]
pub struct MemorySource<R> {
    records: Vec<R>,
    calls: AtomicUsize,
    requests: Mutex<Vec<Interval>>,
}

impl<R> Default for MemorySource<R> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<R> MemorySource<R> {
    /// Serve `records`
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// All records this source can serve
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Number of fetches answered so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Intervals requested so far, in call order
    pub fn requested(&self) -> Vec<Interval> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

/// Provider payloads come either as a bare array or wrapped in an envelope
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Bare(Vec<Transaction>),
    Envelope { transactions: Vec<Transaction> },
}

impl MemorySource<Transaction> {
    /// Load transactions from a JSON document
    ///
    /// Accepts either `[...]` or `{"transactions": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::MalformedResponse`] if the document matches neither shape.
    pub fn from_json_str(json: &str) -> Result<Self, SourceError> {
        let payload: Payload = serde_json::from_str(json)
            .map_err(|e| SourceError::malformed_response("transaction fixture", e))?;

        let records = match payload {
            Payload::Bare(records) => records,
            Payload::Envelope { transactions } => transactions,
        };
        Ok(Self::new(records))
    }

    /// Load transactions from a JSON file on disk
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::RequestFailed`] if the file cannot be read, or
    /// [`SourceError::MalformedResponse`] if its content is not a transaction list.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SourceError::request_failed(format!("read {}", path.display()), e))?;

        let source = Self::from_json_str(&json)?;
        debug!(
            path = %path.display(),
            records = source.records.len(),
            "Loaded transaction fixture"
        );
        Ok(source)
    }
}

#[async_trait]
impl<R: DatedRecord> TransactionSource<R> for MemorySource<R> {
    async fn fetch(
        &self,
        interval: Interval,
        _options: &FetchOptions,
    ) -> Result<Vec<R>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(interval);

        Ok(self
            .records
            .iter()
            .filter(|record| interval.contains_date(record.date()))
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "MemorySource"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FIXTURE: &str = r#"[
        {"id": 1, "date": "2024-01-05", "amount": "-12.50", "payee": "Bakery"},
        {"id": 2, "date": "2024-01-20", "amount": "2500.00"},
        {"id": 3, "date": "2024-02-02", "amount": "-40"}
    ]"#;

    #[tokio::test]
    async fn test_fetch_filters_by_interval_and_counts() {
        let source = MemorySource::from_json_str(FIXTURE).unwrap();
        let january = Interval::parse("2024-01-01", "2024-01-31").unwrap();

        let records = source.fetch(january, &FetchOptions::new()).await.unwrap();

        let ids: Vec<u64> = records.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(source.call_count(), 1);
        assert_eq!(source.requested(), vec![january]);
    }

    #[tokio::test]
    async fn test_fetch_includes_boundary_days() {
        let source = MemorySource::from_json_str(FIXTURE).unwrap();
        let single = Interval::parse("2024-01-20", "2024-01-20").unwrap();

        let records = source.fetch(single, &FetchOptions::new()).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 2);
    }

    #[test]
    fn test_envelope_payload() {
        let source =
            MemorySource::from_json_str(&format!(r#"{{"transactions": {FIXTURE}}}"#)).unwrap();
        assert_eq!(source.records().len(), 3);
    }

    #[test]
    fn test_malformed_payload() {
        let err = MemorySource::from_json_str(r#"{"items": []}"#).unwrap_err();
        assert!(matches!(err, SourceError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();

        let source = MemorySource::from_json_file(file.path()).await.unwrap();
        assert_eq!(source.records().len(), 3);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = MemorySource::from_json_file("/nonexistent/fixture.json")
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::RequestFailed { .. }));
    }
}
