//! Embedding service error types.
//!
//! This module defines the error types that can occur while computing
//! embeddings, split into fatal and transient classes. The orchestrator
//! isolates transient failures to the batch that hit them; fatal failures
//! abort the whole run since every subsequent batch would fail identically.

use thiserror::Error;

/// Errors that can occur while calling the embedding service.
#[derive(Debug, Clone, Error)]
pub enum EmbeddingError {
    /// Authentication or authorization failure (bad or expired API key).
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// The service rejected the request due to rate limiting.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Network-level failure reaching the service.
    #[error("Network error: {0}")]
    Network(String),

    /// The service returned a non-success status.
    #[error("Embedding service error (HTTP {status}): {message}")]
    Service { status: u16, message: String },

    /// The caller supplied invalid input (e.g. an empty text sequence).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The service response could not be parsed or violated the
    /// order-preserving length contract.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl EmbeddingError {
    /// Create an authentication error.
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a rate limit error.
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create a network error.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an invalid response error.
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Whether this error would fail every remaining batch identically.
    ///
    /// Authentication failures are fatal; rate limits, network blips, and
    /// per-request service errors are scoped to the batch that hit them.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }
}
