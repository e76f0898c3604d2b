//! Ragline error taxonomy.
//!
//! Batch-level embedding failures (`UpstreamBatch`) are contained by the
//! indexing pipeline and never reach a request boundary. Everything else
//! propagates to the gateway, where `Validation` maps to HTTP 400 and the
//! rest to 500. No variant is retried; failures are one-shot.

use thiserror::Error;

/// All errors produced by Ragline components.
#[derive(Debug, Error)]
pub enum RaglineError {
    /// A required request field is missing or empty.
    #[error("{0}")]
    Validation(String),

    /// One embedding batch failed; its chunks are dropped, the upload
    /// as a whole still succeeds.
    #[error("embedding batch failed: {0}")]
    UpstreamBatch(String),

    /// An external response could not be normalized into a known shape.
    #[error("unsupported response shape: {0}")]
    UnsupportedShape(String),

    /// Embedding service error.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Vector index error.
    #[error("vector index error: {0}")]
    Index(String),

    /// Completion service error.
    #[error("completion error: {0}")]
    Completion(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// HTTP transport error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

/// Ragline result alias.
pub type Result<T> = std::result::Result<T, RaglineError>;
