//! Record source error types.
//!
//! This module defines the error types that can occur while reading records
//! from the catalog store.

use thiserror::Error;

/// Errors that can occur while reading from the catalog store.
///
/// Any source error aborts the sync run before batch work begins: a sync
/// over a partially fetched catalog would silently drop records.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The catalog store cannot be reached.
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    /// A query against the catalog store failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// A row is missing a required field or has an unusable type.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
}

impl SourceError {
    /// Create an unavailable error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a malformed record error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRecord(msg.into())
    }
}
