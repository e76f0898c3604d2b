//! Keyword-paragraph retrieval.
//!
//! Scores nothing and embeds nothing: a paragraph is kept iff its lowercase
//! form contains any lowercase query token as a substring. Used when no
//! vector infrastructure is configured.

use std::sync::LazyLock;

use regex::Regex;

use crate::truncate_chars;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("word regex must compile"));

/// Blank-line boundary: whitespace runs containing at least one empty line.
static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("paragraph regex must compile"));

/// Separator placed between matched paragraphs in a snippet.
const PARAGRAPH_SEPARATOR: &str = "\n\n---\n\n";

/// Lowercase word tokens of `query`.
fn tokenize(query: &str) -> Vec<String> {
    WORD_RE
        .find_iter(&query.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// A plain head-of-document excerpt: the trimmed text verbatim when it fits
/// within `max_chars`, otherwise the first `max_chars` characters followed
/// by the truncation notice.
pub fn simple_snippet(text: &str, max_chars: usize) -> String {
    truncate_chars(text.trim(), max_chars)
}

/// Extract a bounded excerpt of `text` relevant to `query`.
///
/// Paragraphs (blank-line separated) containing at least one query token
/// are joined in their original order; when the query yields no tokens or
/// no paragraph matches, falls back to [`simple_snippet`] over the whole
/// text. The result never exceeds `max_chars` characters plus
/// [`crate::TRUNCATION_NOTICE`].
pub fn retrieve(text: &str, query: &str, max_chars: usize) -> String {
    let tokens = tokenize(query);
    if tokens.is_empty() {
        return simple_snippet(text, max_chars);
    }

    let matching: Vec<&str> = PARAGRAPH_RE
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .filter(|p| {
            let lower = p.to_lowercase();
            tokens.iter().any(|t| lower.contains(t.as_str()))
        })
        .collect();

    if matching.is_empty() {
        return simple_snippet(text, max_chars);
    }

    truncate_chars(&matching.join(PARAGRAPH_SEPARATOR), max_chars)
}
