//! # Catalog Sync Pipeline
//!
//! This crate provides the pipeline components for synchronizing catalog
//! records into a vector index.
//!
//! ## Architecture
//!
//! The pipeline follows the provision-fetch-batch-embed-upsert flow:
//!
//! 1. **Provisioner**: Ensures the target index exists and is ready
//! 2. **Projector**: Renders each record into its embedding text
//! 3. **Orchestrator**: Partitions records into batches and drives
//!    projector → embedder → index per batch, isolating transient failures
//!    to the batch that hit them

pub mod errors;
pub mod orchestrator;
pub mod projector;
pub mod provisioner;

pub use errors::{BatchError, SyncError};
pub use orchestrator::{BatchFailure, SyncConfig, SyncOrchestrator, SyncOutcome, SyncReport};
pub use provisioner::{IndexProvisioner, ProvisionerConfig};
