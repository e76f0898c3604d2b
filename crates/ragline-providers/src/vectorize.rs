//! Vector index client.
//!
//! Speaks a Vectorize-style REST surface: `POST {endpoint}/upsert` with the
//! records, `POST {endpoint}/query` with the query vector. The index owns
//! ranking; matches come back ordered by similarity descending.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use ragline_core::error::{RaglineError, Result};
use ragline_core::traits::VectorIndex;
use ragline_core::types::{VectorMatch, VectorRecord};

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<VectorMatch>,
}

#[derive(Debug, Deserialize)]
struct UpsertResponse {
    #[serde(default)]
    count: Option<usize>,
}

/// Reqwest-backed vector index client.
pub struct HttpVectorIndex {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpVectorIndex {
    pub fn new(endpoint: &str, api_key: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.is_empty() {
            req
        } else {
            req.header("Authorization", format!("Bearer {}", self.api_key))
        }
    }
}

#[async_trait]
impl VectorIndex for HttpVectorIndex {
    async fn upsert(&self, records: &[VectorRecord]) -> Result<usize> {
        tracing::debug!(records = records.len(), "upserting vectors");
        let url = format!("{}/upsert", self.endpoint);
        let resp = self
            .apply_auth(self.client.post(&url).json(&json!({ "vectors": records })))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| RaglineError::Index(e.to_string()))?;

        let ack: UpsertResponse = resp.json().await?;
        Ok(ack.count.unwrap_or(records.len()))
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<VectorMatch>> {
        let url = format!("{}/query", self.endpoint);
        let body = json!({
            "vector": vector,
            "topK": top_k,
            "returnMetadata": true,
        });

        let resp = self
            .apply_auth(self.client.post(&url).json(&body))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| RaglineError::Index(e.to_string()))?;

        let parsed: QueryResponse = resp.json().await?;
        Ok(parsed.matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_response_parses_matches_with_metadata() {
        let body = r#"{
            "matches": [
                {"id": "a.txt_chunk_0", "score": 0.91,
                 "metadata": {"text": "Dogs are loyal.", "filename": "a.txt", "chunk_id": "0"}},
                {"id": "b.txt_chunk_2", "score": 0.55, "metadata": null}
            ]
        }"#;
        let parsed: QueryResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.matches.len(), 2);
        let meta = parsed.matches[0].metadata.as_ref().unwrap();
        assert_eq!(meta.filename, "a.txt");
        assert!(parsed.matches[1].metadata.is_none());
    }

    #[test]
    fn test_query_response_without_matches_field_is_empty() {
        let parsed: QueryResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.matches.is_empty());
    }

    #[test]
    fn test_upsert_ack_count_is_optional() {
        let with: UpsertResponse = serde_json::from_str(r#"{"count": 3}"#).unwrap();
        assert_eq!(with.count, Some(3));
        let without: UpsertResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(without.count, None);
    }
}
