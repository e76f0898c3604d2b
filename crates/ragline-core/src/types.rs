//! Ragline data model.

use serde::{Deserialize, Serialize};

/// An uploaded document. Identity key is `filename`, but uniqueness is not
/// enforced: duplicate uploads under the same name coexist in upload order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub filename: String,
    pub text: String,
}

impl Document {
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
        }
    }
}

/// Metadata stored alongside each vector in the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    pub text: String,
    pub filename: String,
    pub chunk_id: String,
}

/// A chunk embedding as persisted in the vector index. The index owns the
/// record once upserted; the service keeps no independent copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorRecord {
    /// `"{filename}_chunk_{index}"` where `index` is the chunk's global
    /// position within the document.
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: RecordMetadata,
}

/// One nearest-neighbor result from the vector index. Ranking is the
/// index's job; `score` is carried through but not re-ranked here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorMatch {
    pub id: String,
    pub score: f32,
    #[serde(default)]
    pub metadata: Option<RecordMetadata>,
}

/// A synthesized answer plus the filenames it was drawn from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub answer: String,
    pub sources: Vec<String>,
}
