//! Embedding-backed indexing pipeline.
//!
//! Upload flow: validate → chunk → embed in fixed-size batches → upsert.
//! A failed embedding batch drops that batch's chunks (logged, not retried);
//! the upload still succeeds with whatever was embedded. Batches run
//! strictly sequentially, so upload latency scales linearly with batch
//! count.

use std::sync::Arc;

use ragline_core::error::{RaglineError, Result};
use ragline_core::traits::{EmbeddingClient, VectorIndex};
use ragline_core::types::{RecordMetadata, VectorRecord};
use tracing::{info, warn};

use crate::chunker;

/// Outcome of one embedding batch: the vectors, or the contained error.
type BatchOutcome = std::result::Result<Vec<Vec<f32>>, RaglineError>;

/// Chunks, embeds and upserts uploaded documents.
pub struct Indexer {
    embedder: Arc<dyn EmbeddingClient>,
    index: Arc<dyn VectorIndex>,
    chunk_size: usize,
    batch_size: usize,
}

impl Indexer {
    pub fn new(
        embedder: Arc<dyn EmbeddingClient>,
        index: Arc<dyn VectorIndex>,
        chunk_size: usize,
        batch_size: usize,
    ) -> Self {
        Self {
            embedder,
            index,
            chunk_size,
            batch_size,
        }
    }

    /// Index a document. Returns the number of chunks actually embedded,
    /// which may be less than the number attempted when batches fail.
    pub async fn upload(&self, filename: &str, text: &str) -> Result<usize> {
        if filename.is_empty() || text.is_empty() {
            return Err(RaglineError::Validation(
                "Missing filename or text in request body".into(),
            ));
        }

        let chunks = chunker::split(text, self.chunk_size);
        info!(filename, chunks = chunks.len(), "processing upload");

        let mut records: Vec<VectorRecord> = Vec::new();
        // One global counter keeps record ids aligned with chunk positions;
        // a failed batch still advances it by the batch length.
        let mut chunk_index = 0;

        for (batch_no, batch) in chunks.chunks(self.batch_size).enumerate() {
            let outcome: BatchOutcome = self.embedder.embed(batch).await;
            match outcome {
                Ok(vectors) => {
                    for (chunk_text, values) in batch.iter().zip(vectors) {
                        records.push(VectorRecord {
                            id: format!("{filename}_chunk_{chunk_index}"),
                            values,
                            metadata: RecordMetadata {
                                text: chunk_text.clone(),
                                filename: filename.to_string(),
                                chunk_id: chunk_index.to_string(),
                            },
                        });
                        chunk_index += 1;
                    }
                }
                Err(e) => {
                    warn!(filename, batch_no, error = %e, "embedding batch failed, dropping its chunks");
                    chunk_index += batch.len();
                }
            }
        }

        if !records.is_empty() {
            let count = records.len();
            self.index.upsert(&records).await?;
            Ok(count)
        } else {
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ragline_core::types::VectorMatch;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Embeds every text as [0.1, 0.2], optionally failing chosen batches.
    struct MockEmbedder {
        calls: AtomicUsize,
        fail_batches: Vec<usize>,
    }

    impl MockEmbedder {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_batches: Vec::new(),
            }
        }

        fn failing_on(batches: &[usize]) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_batches: batches.to_vec(),
            }
        }
    }

    #[async_trait]
    impl EmbeddingClient for MockEmbedder {
        async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_batches.contains(&call) {
                return Err(RaglineError::UpstreamBatch("mock batch failure".into()));
            }
            Ok(texts.iter().map(|_| vec![0.1, 0.2]).collect())
        }
    }

    #[derive(Default)]
    struct MockIndex {
        upserts: AtomicUsize,
        records: Mutex<Vec<VectorRecord>>,
    }

    #[async_trait]
    impl VectorIndex for MockIndex {
        async fn upsert(&self, records: &[VectorRecord]) -> Result<usize> {
            self.upserts.fetch_add(1, Ordering::SeqCst);
            self.records.lock().unwrap().extend_from_slice(records);
            Ok(records.len())
        }

        async fn query(&self, _vector: &[f32], _top_k: usize) -> Result<Vec<VectorMatch>> {
            Ok(Vec::new())
        }
    }

    fn indexer(embedder: MockEmbedder, index: &Arc<MockIndex>) -> Indexer {
        Indexer::new(
            Arc::new(embedder),
            Arc::clone(index) as Arc<dyn VectorIndex>,
            800,
            5,
        )
    }

    #[tokio::test]
    async fn test_upload_rejects_empty_fields() {
        let index = Arc::new(MockIndex::default());
        let pipeline = indexer(MockEmbedder::new(), &index);

        assert!(matches!(
            pipeline.upload("", "body").await,
            Err(RaglineError::Validation(_))
        ));
        assert!(matches!(
            pipeline.upload("a.txt", "").await,
            Err(RaglineError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_1800_chars_is_one_batch_and_one_upsert_of_three() {
        let embedder = MockEmbedder::new();
        let index = Arc::new(MockIndex::default());
        let embedder_calls = Arc::new(embedder);
        let pipeline = Indexer::new(
            Arc::clone(&embedder_calls) as Arc<dyn EmbeddingClient>,
            Arc::clone(&index) as Arc<dyn VectorIndex>,
            800,
            5,
        );

        let text = "x".repeat(1800);
        let processed = pipeline.upload("doc.txt", &text).await.unwrap();

        assert_eq!(processed, 3);
        assert_eq!(embedder_calls.calls.load(Ordering::SeqCst), 1);
        assert_eq!(index.upserts.load(Ordering::SeqCst), 1);
        let records = index.records.lock().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, "doc.txt_chunk_0");
        assert_eq!(records[2].id, "doc.txt_chunk_2");
        assert_eq!(records[1].metadata.chunk_id, "1");
        assert_eq!(records[1].metadata.filename, "doc.txt");
    }

    #[tokio::test]
    async fn test_failed_batch_is_dropped_but_upload_succeeds() {
        // 12 single-char chunks at batch size 5 → batches of 5, 5, 2.
        let index = Arc::new(MockIndex::default());
        let pipeline = Indexer::new(
            Arc::new(MockEmbedder::failing_on(&[1])) as Arc<dyn EmbeddingClient>,
            Arc::clone(&index) as Arc<dyn VectorIndex>,
            1,
            5,
        );

        let processed = pipeline.upload("doc.txt", "abcdefghijkl").await.unwrap();
        assert_eq!(processed, 7);

        // Ids skip the dropped batch's positions (5..=9).
        let records = index.records.lock().unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert!(ids.contains(&"doc.txt_chunk_4"));
        assert!(!ids.contains(&"doc.txt_chunk_5"));
        assert!(ids.contains(&"doc.txt_chunk_10"));
        assert!(ids.contains(&"doc.txt_chunk_11"));
    }

    #[tokio::test]
    async fn test_all_batches_failing_skips_upsert() {
        let index = Arc::new(MockIndex::default());
        let pipeline = Indexer::new(
            Arc::new(MockEmbedder::failing_on(&[0])) as Arc<dyn EmbeddingClient>,
            Arc::clone(&index) as Arc<dyn VectorIndex>,
            800,
            5,
        );

        let processed = pipeline.upload("doc.txt", "short text").await.unwrap();
        assert_eq!(processed, 0);
        assert_eq!(index.upserts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_chunk_text_round_trips_into_metadata() {
        let index = Arc::new(MockIndex::default());
        let pipeline = indexer(MockEmbedder::new(), &index);

        pipeline.upload("notes.txt", "hello world").await.unwrap();
        let records = index.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].metadata.text, "hello world");
    }
}
