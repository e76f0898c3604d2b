//! Completion service client.
//!
//! Takes the single composed prompt string and returns prose. As with
//! embeddings, the response envelope varies by provider; the known shapes
//! are an explicit union and anything else is an `UnsupportedShape` error —
//! no fallback string coercion.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use ragline_core::error::{RaglineError, Result};
use ragline_core::traits::CompletionClient;

/// Admissible completion response shapes, tried in order.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CompletionResponse {
    /// `{"response": "..."}`
    Response { response: String },
    /// `{"text": "..."}`
    Text { text: String },
    /// `{"result": {"response": "..."}}` or `{"result": {"text": "..."}}`
    Wrapped { result: Box<CompletionResponse> },
    /// A bare string body.
    Bare(String),
}

/// Normalize a raw response body into the answer text.
pub fn normalize(body: Value) -> Result<String> {
    let parsed: CompletionResponse = serde_json::from_value(body.clone())
        .map_err(|_| RaglineError::UnsupportedShape(format!("completion response: {body}")))?;
    Ok(flatten(parsed))
}

fn flatten(resp: CompletionResponse) -> String {
    match resp {
        CompletionResponse::Response { response } => response,
        CompletionResponse::Text { text } => text,
        CompletionResponse::Wrapped { result } => flatten(*result),
        CompletionResponse::Bare(s) => s,
    }
}

/// Reqwest-backed completion client posting `{"model", "text": prompt}`.
pub struct HttpCompletionClient {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpCompletionClient {
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
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.model,
            "text": prompt,
        });

        let resp = self
            .apply_auth(self.client.post(&self.endpoint).json(&body))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| RaglineError::Completion(e.to_string()))?;

        let raw: Value = resp.json().await?;
        normalize(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_response_field() {
        let out = normalize(json!({"response": "the answer"})).unwrap();
        assert_eq!(out, "the answer");
    }

    #[test]
    fn test_normalize_text_field() {
        let out = normalize(json!({"text": "the answer"})).unwrap();
        assert_eq!(out, "the answer");
    }

    #[test]
    fn test_normalize_wrapped_result() {
        let out = normalize(json!({"result": {"response": "nested"}})).unwrap();
        assert_eq!(out, "nested");
        let out = normalize(json!({"result": {"text": "nested text"}})).unwrap();
        assert_eq!(out, "nested text");
    }

    #[test]
    fn test_normalize_bare_string() {
        let out = normalize(json!("plain answer")).unwrap();
        assert_eq!(out, "plain answer");
    }

    #[test]
    fn test_unrecognized_shape_is_rejected() {
        assert!(matches!(
            normalize(json!({"choices": [{"message": 42}]})),
            Err(RaglineError::UnsupportedShape(_))
        ));
        assert!(matches!(
            normalize(json!(17)),
            Err(RaglineError::UnsupportedShape(_))
        ));
    }
}
