//! Fixed-width document chunking.
//!
//! A naive split: no word or sentence boundary awareness. Every chunk is
//! exactly `chunk_size` characters except possibly the last, and the chunks
//! concatenated in order reconstruct the input exactly.

/// Split `text` into contiguous, non-overlapping chunks of at most
/// `chunk_size` characters, left to right. Empty input yields no chunks.
///
/// Counts characters, not bytes, so multibyte input never splits a code
/// point.
///
/// # Panics
/// Panics if `chunk_size` is zero.
pub fn split(text: &str, chunk_size: usize) -> Vec<String> {
    assert!(chunk_size > 0, "chunk_size must be positive");

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;
    for ch in text.chars() {
        current.push(ch);
        count += 1;
        if count == chunk_size {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
