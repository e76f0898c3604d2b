//! Trait seams for the external collaborators.
//!
//! The retrieval pipeline only ever sees these traits; the HTTP
//! implementations live in `ragline-providers` and tests inject mocks.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{VectorMatch, VectorRecord};

/// Converts text batches into fixed-length vectors, one per input text,
/// in input order. Implementations normalize the provider's response
/// shape before returning.
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Persists vectors with metadata and answers nearest-neighbor queries.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Insert or replace records. Returns the number of records accepted.
    async fn upsert(&self, records: &[VectorRecord]) -> Result<usize>;

    /// Top-`top_k` matches ordered by similarity descending, metadata
    /// attached.
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<VectorMatch>>;
}

/// Turns a composed prompt into a natural-language answer.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}
