//! In-memory document store for keyword-fallback mode.
//!
//! An explicitly owned, injectable store rather than process-global state:
//! handlers share one instance behind an `Arc`, tests build fresh ones.
//! Appends are atomic under the lock so concurrent uploads never lose
//! updates. The store grows unbounded for the process lifetime and nothing
//! is persisted across restarts.

use std::sync::Mutex;

use ragline_core::error::{RaglineError, Result};
use ragline_core::types::Document;

/// Whole raw documents keyed by filename. Duplicate filenames are allowed
/// and coexist in upload order.
#[derive(Debug, Default)]
pub struct DocumentStore {
    docs: Mutex<Vec<Document>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document and return the number of documents now held.
    pub fn add(&self, doc: Document) -> Result<usize> {
        let mut docs = self
            .docs
            .lock()
            .map_err(|e| RaglineError::Other(format!("document store lock poisoned: {e}")))?;
        docs.push(doc);
        Ok(docs.len())
    }

    /// Snapshot of all documents in upload order.
    pub fn snapshot(&self) -> Result<Vec<Document>> {
        let docs = self
            .docs
            .lock()
            .map_err(|e| RaglineError::Other(format!("document store lock poisoned: {e}")))?;
        Ok(docs.clone())
    }

    pub fn len(&self) -> usize {
        self.docs.lock().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
