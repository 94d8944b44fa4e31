//! Range-aware caching of date-bounded transaction queries.
//!
//! A [`TransactionCache`] answers "all transactions between two dates" by
//! reusing previously fetched intervals and fetching only the uncovered gaps
//! from a [`TransactionSource`].
//!
//! ```rust,ignore
//! let cache = TransactionCache::new(LoggingSource::new(provider));
//! let january = cache
//!     .get_transactions("2024-01-01", "2024-01-31", &FetchOptions::new())
//!     .await?;
//! ```

pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod errors;
mod resolver;
pub mod source;
mod spans;
mod summary;
pub mod types;

pub use cache::merge::{merge_records, Merged};
pub use cache::reconcile::{filter_to, find_gaps, reconcile, Lookup, LookupKind};
pub use cache::store::{RangeStore, Records, StoreStats};
pub use config::{CacheConfig, CacheConfigBuilder, DivergencePolicy};
pub use errors::{IntervalError, ResolveError, SourceError, TxRangeError};
pub use resolver::*;
pub use source::{FetchOptions, LoggingSource, MemorySource, ThrottledSource, TransactionSource};
pub use summary::*;
pub use types::date::DateBound;
pub use types::interval::Interval;
pub use types::record::DatedRecord;
pub use types::transaction::{Transaction, TransactionId};
