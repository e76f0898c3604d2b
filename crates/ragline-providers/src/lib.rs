//! # Ragline Providers
//!
//! HTTP implementations of the external collaborator traits. Each client
//! is a thin reqwest wrapper; response bodies are normalized through
//! explicit tagged unions of the shapes seen in the wild, and anything
//! unrecognized is an `UnsupportedShape` error rather than a silent
//! coercion.

pub mod completion;
pub mod embedding;
pub mod vectorize;

use std::sync::Arc;

use ragline_core::config::RaglineConfig;
use ragline_core::traits::{CompletionClient, EmbeddingClient, VectorIndex};

pub use completion::HttpCompletionClient;
pub use embedding::HttpEmbeddingClient;
pub use vectorize::HttpVectorIndex;

/// Build the embedding client from configuration.
pub fn build_embedding_client(config: &RaglineConfig) -> Arc<dyn EmbeddingClient> {
    Arc::new(HttpEmbeddingClient::new(
        &config.embedding.endpoint,
        &config.embedding.model,
        &config.embedding.api_key,
    ))
}

/// Build the vector index client from configuration.
pub fn build_vector_index(config: &RaglineConfig) -> Arc<dyn VectorIndex> {
    Arc::new(HttpVectorIndex::new(
        &config.index.endpoint,
        &config.index.api_key,
    ))
}

/// Build the completion client from configuration.
pub fn build_completion_client(config: &RaglineConfig) -> Arc<dyn CompletionClient> {
    Arc::new(HttpCompletionClient::new(
        &config.completion.endpoint,
        &config.completion.model,
        &config.completion.api_key,
    ))
}
