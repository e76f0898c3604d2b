//! # Ragline Retrieval
//!
//! The retrieval core: document chunking, the embedding-backed indexing
//! pipeline, keyword-paragraph retrieval over an in-memory store, and
//! answer synthesis for both modes.
//!
//! ```text
//! Upload → chunker → (embedder → vector index)   [vector mode]
//!                  → DocumentStore                [keyword mode]
//! Query  → (embedder → index query → synthesis)  [vector mode]
//!        → (keyword retriever → fallback chat)   [keyword mode]
//! ```

pub mod chunker;
pub mod fallback;
pub mod indexer;
pub mod keyword;
pub mod store;
pub mod synthesis;

pub use indexer::Indexer;
pub use store::DocumentStore;
pub use synthesis::VectorChat;

/// Appended when a snippet or combined answer is cut at its character
/// budget. Shared by the keyword retriever and fallback chat so both
/// truncate identically.
pub const TRUNCATION_NOTICE: &str = "\n... [truncated]";

/// Truncate to at most `max_chars` characters (not bytes), appending the
/// truncation notice only when something was actually cut.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push_str(TRUNCATION_NOTICE);
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_within_budget_is_identity() {
        assert_eq!(truncate_chars("hello", 5), "hello");
        assert_eq!(truncate_chars("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_cuts_to_exact_length_plus_notice() {
        let out = truncate_chars("abcdefgh", 3);
        assert_eq!(out, format!("abc{TRUNCATION_NOTICE}"));
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let out = truncate_chars("ééééé", 2);
        assert_eq!(out, format!("éé{TRUNCATION_NOTICE}"));
    }
}
