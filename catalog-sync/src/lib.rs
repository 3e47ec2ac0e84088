//! # Catalog Sync
//!
//! Main library for the product catalog vector sync.
//!
//! This crate provides the entry point and configuration for running the
//! sync pipeline against the real Postgres catalog, Gemini embedding
//! service, and Pinecone index.

pub mod config;

pub use config::Dependencies;

use thiserror::Error;

/// Errors that can occur during sync initialization or execution.
#[derive(Error, Debug)]
pub enum RunError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Sync pipeline error.
    #[error("Sync error: {0}")]
    SyncError(#[from] catalog_sync_pipeline::SyncError),

    /// Record source error.
    #[error("Source error: {0}")]
    SourceError(#[from] catalog_sync_repository::SourceError),

    /// Vector index error.
    #[error("Index error: {0}")]
    IndexError(#[from] catalog_sync_repository::IndexError),
}

impl RunError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
