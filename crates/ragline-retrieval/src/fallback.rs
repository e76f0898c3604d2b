//! Keyword-mode chat synthesis.
//!
//! No model call here: the "answer" is the concatenation of per-document
//! keyword snippets, bounded by a combined character budget.

use ragline_core::error::{RaglineError, Result};
use ragline_core::types::{ChatReply, Document};

use crate::{keyword, truncate_chars};

/// Returned when the store holds no documents.
pub const NO_DOCUMENTS_ANSWER: &str =
    "No documents are loaded. Upload a document before asking questions.";

/// Returned when no document yielded a snippet.
pub const NOTHING_FOUND_ANSWER: &str =
    "I could not find anything relevant to your question in the uploaded documents.";

/// Separator between per-document snippet blocks.
const BLOCK_SEPARATOR: &str = "\n\n==========\n\n";

/// Answer `query` from raw documents via keyword-paragraph retrieval.
///
/// Every document contributes at most one snippet (capped at
/// `snippet_chars`), prefixed with its filename; the combined answer is
/// capped at `answer_chars`. Sources keep first-appearance order, without
/// duplicates.
pub fn chat(
    documents: &[Document],
    query: &str,
    snippet_chars: usize,
    answer_chars: usize,
) -> Result<ChatReply> {
    if query.is_empty() {
        return Err(RaglineError::Validation("Query cannot be empty".into()));
    }

    if documents.is_empty() {
        return Ok(ChatReply {
            answer: NO_DOCUMENTS_ANSWER.to_string(),
            sources: Vec::new(),
        });
    }

    let mut blocks: Vec<String> = Vec::new();
    let mut sources: Vec<String> = Vec::new();
    for doc in documents {
        let snippet = keyword::retrieve(&doc.text, query, snippet_chars);
        if snippet.is_empty() {
            continue;
        }
        blocks.push(format!("From {}:\n{snippet}", doc.filename));
        if !sources.contains(&doc.filename) {
            sources.push(doc.filename.clone());
        }
    }

    if blocks.is_empty() {
        return Ok(ChatReply {
            answer: NOTHING_FOUND_ANSWER.to_string(),
            sources: Vec::new(),
        });
    }

    Ok(ChatReply {
        answer: truncate_chars(&blocks.join(BLOCK_SEPARATOR), answer_chars),
        sources,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TRUNCATION_NOTICE;

    fn doc(filename: &str, text: &str) -> Document {
        Document::new(filename, text)
    }

    #[test]
    fn test_empty_store_gives_fixed_answer() {
        let reply = chat(&[], "dogs", 800, 1500).unwrap();
        assert_eq!(reply.answer, NO_DOCUMENTS_ANSWER);
        assert!(reply.sources.is_empty());
    }

    #[test]
    fn test_empty_query_is_rejected() {
        let docs = vec![doc("a.txt", "some text")];
        assert!(matches!(
            chat(&docs, "", 800, 1500),
            Err(RaglineError::Validation(_))
        ));
    }

    #[test]
    fn test_end_to_end_keyword_scenario() {
        let docs = vec![doc("a.txt", "Cats are great.\n\nDogs are loyal.")];
        let reply = chat(&docs, "dogs", 800, 1500).unwrap();

        assert!(reply.answer.contains("Dogs are loyal."));
        assert!(!reply.answer.contains("Cats are great."));
        assert!(reply.answer.contains("From a.txt:"));
        assert_eq!(reply.sources, vec!["a.txt".to_string()]);
    }

    #[test]
    fn test_sources_are_deduplicated_in_first_appearance_order() {
        let docs = vec![
            doc("b.txt", "dogs bark"),
            doc("a.txt", "dogs run"),
            doc("b.txt", "dogs sleep"),
        ];
        let reply = chat(&docs, "dogs", 800, 1500).unwrap();
        assert_eq!(reply.sources, vec!["b.txt".to_string(), "a.txt".to_string()]);
    }

    #[test]
    fn test_blocks_are_joined_with_separator() {
        let docs = vec![doc("a.txt", "dogs run"), doc("b.txt", "dogs sleep")];
        let reply = chat(&docs, "dogs", 800, 1500).unwrap();
        assert!(reply.answer.contains("=========="));
        assert!(reply.answer.contains("From a.txt:"));
        assert!(reply.answer.contains("From b.txt:"));
    }

    #[test]
    fn test_combined_answer_is_truncated_at_budget() {
        let long = format!("dogs {}", "a".repeat(2000));
        let docs = vec![doc("a.txt", &long)];
        let reply = chat(&docs, "dogs", 800, 100).unwrap();
        assert!(reply.answer.ends_with(TRUNCATION_NOTICE));
        let body = &reply.answer[..reply.answer.len() - TRUNCATION_NOTICE.len()];
        assert_eq!(body.chars().count(), 100);
    }

    #[test]
    fn test_unmatched_documents_still_yield_head_snippets() {
        // The keyword retriever falls back to a head-of-document snippet,
        // so a document without the keyword still contributes.
        let docs = vec![doc("a.txt", "Nothing about the topic here.")];
        let reply = chat(&docs, "dogs", 800, 1500).unwrap();
        assert!(reply.answer.contains("Nothing about the topic here."));
        assert_eq!(reply.sources, vec!["a.txt".to_string()]);
    }

    #[test]
    fn test_whitespace_only_document_contributes_nothing() {
        let docs = vec![doc("a.txt", "   \n  \n")];
        let reply = chat(&docs, "dogs", 800, 1500).unwrap();
        assert_eq!(reply.answer, NOTHING_FOUND_ANSWER);
        assert!(reply.sources.is_empty());
    }
}
