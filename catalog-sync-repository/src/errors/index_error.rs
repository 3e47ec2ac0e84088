//! Vector index error types.
//!
//! This module defines the error types that can occur during vector index
//! operations, with the same fatal/transient classification as embedding
//! errors.

use thiserror::Error;

/// Errors that can occur during vector index operations.
#[derive(Debug, Clone, Error)]
pub enum IndexError {
    /// Authentication or authorization failure against the index service.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Failed to reach the index service.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to create the index.
    #[error("Index creation error: {0}")]
    CreateError(String),

    /// An upsert request failed.
    #[error("Index write error: {0}")]
    WriteError(String),

    /// The index never reached ready state within the provisioning timeout.
    #[error("Index '{name}' not ready after {waited_secs}s")]
    ProvisioningTimeout { name: String, waited_secs: u64 },

    /// The named index does not exist.
    #[error("Index not found: {0}")]
    NotFound(String),

    /// Failed to parse a response from the index service.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl IndexError {
    /// Create an authentication error.
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index creation error.
    pub fn create(msg: impl Into<String>) -> Self {
        Self::CreateError(msg.into())
    }

    /// Create a write error.
    pub fn write(msg: impl Into<String>) -> Self {
        Self::WriteError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Whether this error would fail every remaining batch identically.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Authentication(_) | Self::ProvisioningTimeout { .. } | Self::NotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_is_fatal() {
        assert!(IndexError::authentication("bad key").is_fatal());
    }

    #[test]
    fn write_error_is_transient() {
        assert!(!IndexError::write("upsert rejected").is_fatal());
    }

    #[test]
    fn provisioning_timeout_is_fatal() {
        let err = IndexError::ProvisioningTimeout {
            name: "product-catalog-index".to_string(),
            waited_secs: 300,
        };
        assert!(err.is_fatal());
        assert!(err.to_string().contains("product-catalog-index"));
    }
}
