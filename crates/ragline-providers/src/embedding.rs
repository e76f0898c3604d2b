//! Embedding service client.
//!
//! Providers do not agree on a response envelope. The known shapes are an
//! explicit untagged union; a body matching none of them is an
//! `UnsupportedShape` error.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use ragline_core::error::{RaglineError, Result};
use ragline_core::traits::EmbeddingClient;

/// Admissible embedding response shapes, tried in order.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingResponse {
    /// `{"data": [[f32, ...], ...]}` — a results list, one vector per input.
    Data { data: Vec<Vec<f32>> },
    /// Tensor-like: `{"shape": [n, d], "data": [f32, ...]}` — a flat buffer
    /// to be re-split by row width.
    Tensor { shape: Vec<usize>, data: Vec<f32> },
    /// A bare list of vectors.
    Bare(Vec<Vec<f32>>),
}

/// Normalize a raw response body into one vector per input text.
pub fn normalize(body: Value) -> Result<Vec<Vec<f32>>> {
    let parsed: EmbeddingResponse = serde_json::from_value(body.clone())
        .map_err(|_| RaglineError::UnsupportedShape(format!("embedding response: {body}")))?;

    match parsed {
        EmbeddingResponse::Data { data } | EmbeddingResponse::Bare(data) => Ok(data),
        EmbeddingResponse::Tensor { shape, data } => {
            let width = *shape.last().unwrap_or(&0);
            if width == 0 || data.len() % width != 0 {
                return Err(RaglineError::UnsupportedShape(format!(
                    "tensor shape {shape:?} does not divide {} values",
                    data.len()
                )));
            }
            Ok(data.chunks(width).map(<[f32]>::to_vec).collect())
        }
    }
}

/// Reqwest-backed embedding client posting `{"model", "text": [...]}`.
pub struct HttpEmbeddingClient {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpEmbeddingClient {
    pub fn new(endpoint: &str, model: &str, api_key: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
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
impl EmbeddingClient for HttpEmbeddingClient {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        tracing::debug!(batch = texts.len(), "embedding batch");
        let body = json!({
            "model": self.model,
            "text": texts,
        });

        let resp = self
            .apply_auth(self.client.post(&self.endpoint).json(&body))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| RaglineError::Embedding(e.to_string()))?;

        let raw: Value = resp.json().await?;
        let vectors = normalize(raw)?;
        if vectors.len() != texts.len() {
            return Err(RaglineError::Embedding(format!(
                "expected {} vectors, got {}",
                texts.len(),
                vectors.len()
            )));
        }
        Ok(vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_data_list() {
        let body = json!({"data": [[0.1, 0.2], [0.3, 0.4]]});
        let vectors = normalize(body).unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0], vec![0.1, 0.2]);
    }

    #[test]
    fn test_normalize_tensor_shape() {
        let body = json!({"shape": [2, 3], "data": [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]});
        let vectors = normalize(body).unwrap();
        assert_eq!(vectors, vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    }

    #[test]
    fn test_normalize_bare_list() {
        let body = json!([[0.5, 0.6]]);
        let vectors = normalize(body).unwrap();
        assert_eq!(vectors, vec![vec![0.5, 0.6]]);
    }

    #[test]
    fn test_unrecognized_shape_is_rejected() {
        let body = json!({"embeddings": "nope"});
        assert!(matches!(
            normalize(body),
            Err(RaglineError::UnsupportedShape(_))
        ));
    }

    #[test]
    fn test_tensor_with_non_dividing_shape_is_rejected() {
        let body = json!({"shape": [2, 4], "data": [1.0, 2.0, 3.0]});
        assert!(matches!(
            normalize(body),
            Err(RaglineError::UnsupportedShape(_))
        ));
    }
}
