// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for remote transaction sources.
//!
//! Every variant here means the source could not deliver the records for a
//! requested interval. The resolver propagates them unchanged and never
//! retries; retry and backoff policy belongs to the source implementation.

/// Errors that a [`TransactionSource`](crate::TransactionSource) can return.
///
/// # Examples
///
/// ```rust
/// use txrange::SourceError;
///
/// let error = SourceError::unauthorized("token expired");
/// assert_eq!(error.to_string(), "Source rejected credentials: token expired");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The request could not be completed (network failure, timeout, 5xx).
    #[error("Source request failed during {operation}")]
    RequestFailed {
        /// Description of the request, e.g. "fetch 2024-01-01_2024-01-31"
        operation: String,
        /// The underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The source rejected the caller's credentials.
    #[error("Source rejected credentials: {details}")]
    Unauthorized {
        /// Details reported by the source
        details: String,
    },

    /// The source refused the request because of rate limiting.
    #[error("Source rate limit exceeded: {details}")]
    RateLimited {
        /// Details reported by the source
        details: String,
    },

    /// The source answered with a payload that could not be decoded.
    #[error("Malformed source response: {details}")]
    MalformedResponse {
        /// What was wrong with the payload
        details: String,
        /// The underlying decode error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl SourceError {
    /// Helper to create a `RequestFailed` error from any error type.
    pub fn request_failed(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        SourceError::RequestFailed {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Create an `Unauthorized` error.
    pub fn unauthorized(details: impl Into<String>) -> Self {
        SourceError::Unauthorized {
            details: details.into(),
        }
    }

    /// Create a `RateLimited` error.
    pub fn rate_limited(details: impl Into<String>) -> Self {
        SourceError::RateLimited {
            details: details.into(),
        }
    }

    /// Helper to create a `MalformedResponse` error from any decode error.
    pub fn malformed_response(
        details: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        SourceError::MalformedResponse {
            details: details.into(),
            source: Box::new(source),
        }
    }
}
