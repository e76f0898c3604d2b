//! Vector-backed retrieval and answer synthesis.
//!
//! Embeds the query, pulls the top-k matches from the index, assembles a
//! context block from their metadata and hands a single composed prompt to
//! the completion service.

use std::collections::BTreeSet;
use std::sync::Arc;

use ragline_core::error::{RaglineError, Result};
use ragline_core::traits::{CompletionClient, EmbeddingClient, VectorIndex};
use ragline_core::types::{ChatReply, VectorMatch};

/// Shown to the model when no match carried metadata.
pub const NO_CONTEXT: &str = "No relevant context found.";

const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant that answers questions based on \
the provided context. If the answer cannot be found in the context, say so clearly.";

/// Answers queries from the vector index.
pub struct VectorChat {
    embedder: Arc<dyn EmbeddingClient>,
    index: Arc<dyn VectorIndex>,
    completion: Arc<dyn CompletionClient>,
    top_k: usize,
}

impl VectorChat {
    pub fn new(
        embedder: Arc<dyn EmbeddingClient>,
        index: Arc<dyn VectorIndex>,
        completion: Arc<dyn CompletionClient>,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            index,
            completion,
            top_k,
        }
    }

    /// Retrieve context for `query` and synthesize an answer.
    pub async fn chat(&self, query: &str) -> Result<ChatReply> {
        if query.is_empty() {
            return Err(RaglineError::Validation("Query cannot be empty".into()));
        }

        // Single-item batch; the provider has already normalized the shape.
        let vectors = self.embedder.embed(&[query.to_string()]).await?;
        let query_vector = vectors
            .into_iter()
            .next()
            .ok_or_else(|| RaglineError::Embedding("embedding service returned no vectors".into()))?;

        let matches = self.index.query(&query_vector, self.top_k).await?;
        let (context, sources) = assemble_context(&matches);

        let prompt = build_prompt(&context, query);
        let answer = self.completion.complete(&prompt).await?;

        Ok(ChatReply { answer, sources })
    }
}

/// Join match texts with blank lines and collect deduplicated source
/// filenames. Matches without metadata contribute nothing. Source order is
/// not significant; sorting keeps responses deterministic.
pub fn assemble_context(matches: &[VectorMatch]) -> (String, Vec<String>) {
    let mut texts: Vec<&str> = Vec::new();
    let mut sources: BTreeSet<String> = BTreeSet::new();
    for m in matches {
        if let Some(meta) = &m.metadata {
            texts.push(&meta.text);
            sources.insert(meta.filename.clone());
        }
    }

    let context = if texts.is_empty() {
        NO_CONTEXT.to_string()
    } else {
        texts.join("\n\n")
    };
    (context, sources.into_iter().collect())
}

/// Compose the single prompt string in the completion service's chat-style
/// marker convention: system instruction + context, then the raw query.
pub fn build_prompt(context: &str, query: &str) -> String {
    format!(
        "<|system|>\n{SYSTEM_INSTRUCTION}\n\nContext:\n{context}\n<|user|>\n{query}\n<|assistant|>\n"
    )
}
