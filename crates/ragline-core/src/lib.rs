//! # Ragline Core
//!
//! Shared foundation for the Ragline retrieval-augmented QA backend:
//! configuration, the error taxonomy, the data model, and the trait seams
//! for the three external collaborators (embedding service, vector index,
//! completion service).

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use error::{RaglineError, Result};
