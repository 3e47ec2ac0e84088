//! Gemini implementation of the embedding client.
//!
//! This module provides a concrete implementation of `EmbeddingClient`
//! backed by the Generative Language API.

mod embeddings;

pub use embeddings::{GeminiEmbeddings, GeminiEmbeddingsConfig};
