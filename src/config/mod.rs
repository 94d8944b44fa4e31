//! Configuration for txrange operations
//!
//! This module provides the configuration that controls how a
//! [`TransactionCache`](crate::TransactionCache) resolves intervals: how many
//! gap fetches run at once, which optional cache writes are performed, and how
//! conflicting duplicate records are treated.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use txrange::CacheConfig;
//!
//! let config = CacheConfig::default();
//! assert_eq!(config.max_concurrent_fetches, 4);
//! assert!(config.write_back_contained);
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use txrange::{CacheConfigBuilder, DivergencePolicy};
//!
//! let config = CacheConfigBuilder::new()
//!     .max_concurrent_fetches(1) // sequential gap fetches
//!     .divergence_policy(DivergencePolicy::Reject)
//!     .build();
//! ```

pub mod constants;

use constants::DEFAULT_MAX_CONCURRENT_FETCHES;

/// How to treat a cached record and a fetched record that share an id but differ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DivergencePolicy {
    /// Keep the freshly fetched copy and log the divergence at `warn`
    #[default]
    PreferFetched,
    /// Fail the resolution without touching the cache
    Reject,
}

/// Configuration for a [`TransactionCache`](crate::TransactionCache)
///
/// Use [`CacheConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of gap fetches in flight for one resolution
    /// Default: 4 (1 means strictly sequential)
    pub max_concurrent_fetches: usize,

    /// Store a containment hit's filtered records under the requested key
    /// Default: true
    pub write_back_contained: bool,

    /// Additionally store each fetched gap under its own key
    /// Default: false
    pub cache_fetched_gaps: bool,

    /// Tie-break for divergent duplicates
    /// Default: [`DivergencePolicy::PreferFetched`]
    pub divergence_policy: DivergencePolicy,

    /// Drop fetched records dated outside the interval they were fetched for
    /// Default: true
    pub drop_inconsistent_records: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            write_back_contained: true,
            cache_fetched_gaps: false,
            divergence_policy: DivergencePolicy::default(),
            drop_inconsistent_records: true,
        }
    }
}

impl CacheConfig {
    /// Create minimal config: sequential fetches and no optional cache writes
    ///
    /// Every entry in the cache is then the result of exactly one `resolve`
    /// call for exactly that key.
    ///
    /// # Example
    ///
    /// ```rust
    /// use txrange::CacheConfig;
    ///
    /// let config = CacheConfig::minimal();
    /// assert_eq!(config.max_concurrent_fetches, 1);
    /// assert!(!config.write_back_contained);
    /// ```
    pub fn minimal() -> Self {
        Self {
            max_concurrent_fetches: 1,
            write_back_contained: false,
            cache_fetched_gaps: false,
            divergence_policy: DivergencePolicy::PreferFetched,
            drop_inconsistent_records: true,
        }
    }

    /// Effective fetch concurrency, never below one
    pub fn fetch_concurrency(&self) -> usize {
        self.max_concurrent_fetches.max(1)
    }
}

/// Builder for [`CacheConfig`]
///
/// # Example
///
/// ```rust
/// use txrange::CacheConfigBuilder;
///
/// let config = CacheConfigBuilder::new()
///     .max_concurrent_fetches(8)
///     .cache_fetched_gaps(true)
///     .build();
/// assert!(config.cache_fetched_gaps);
/// ```
#[derive(Debug, Default)]
pub struct CacheConfigBuilder {
    config: CacheConfig,
}

impl CacheConfigBuilder {
    /// Create a new builder starting from [`CacheConfig::default`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from [`CacheConfig::minimal`]
    pub fn minimal() -> Self {
        Self {
            config: CacheConfig::minimal(),
        }
    }

    /// Set the bound on concurrently issued gap fetches
    pub fn max_concurrent_fetches(mut self, max: usize) -> Self {
        self.config.max_concurrent_fetches = max;
        self
    }

    /// Enable or disable write-back of containment hits
    pub fn write_back_contained(mut self, enabled: bool) -> Self {
        self.config.write_back_contained = enabled;
        self
    }

    /// Enable or disable caching of each fetched gap under its own key
    pub fn cache_fetched_gaps(mut self, enabled: bool) -> Self {
        self.config.cache_fetched_gaps = enabled;
        self
    }

    /// Set the tie-break for divergent duplicates
    pub fn divergence_policy(mut self, policy: DivergencePolicy) -> Self {
        self.config.divergence_policy = policy;
        self
    }

    /// Enable or disable dropping of records dated outside their fetch interval
    pub fn drop_inconsistent_records(mut self, enabled: bool) -> Self {
        self.config.drop_inconsistent_records = enabled;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> CacheConfig {
        self.config
    }
}
