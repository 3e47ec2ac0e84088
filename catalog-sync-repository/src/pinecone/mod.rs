//! Pinecone implementation of the vector index provider.
//!
//! This module provides a concrete implementation of `VectorIndexProvider`
//! using the Pinecone REST API.

mod client;

pub use client::{PineconeConfig, PineconeIndexClient};
