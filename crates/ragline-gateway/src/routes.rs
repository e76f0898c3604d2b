//! API route handlers for the gateway.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use ragline_core::error::RaglineError;
use ragline_core::types::Document;
use ragline_retrieval::fallback;

use super::server::{AppState, RetrievalEngine};

/// Handler failure carried to the response boundary: `Validation` becomes
/// 400, everything else 500, always as JSON `{"error": ...}`.
#[derive(Debug)]
pub struct ApiError(pub RaglineError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            RaglineError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RaglineError> for ApiError {
    fn from(err: RaglineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(json!({"error": self.0.to_string()}))).into_response()
    }
}

type ApiResult = std::result::Result<Json<Value>, ApiError>;

/// Health check endpoint.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Backend is online",
    }))
}

/// Plain-text banner for unmatched routes.
pub async fn banner() -> &'static str {
    "Ragline backend online"
}

/// Accept a document: chunk+embed+upsert in vector mode, or append to the
/// in-memory store in keyword mode.
pub async fn upload(State(state): State<Arc<AppState>>, Json(body): Json<Value>) -> ApiResult {
    let filename = body["filename"].as_str().unwrap_or("");
    let text = body["text"].as_str().unwrap_or("");
    if filename.is_empty() || text.is_empty() {
        return Err(RaglineError::Validation(
            "Missing filename or text in request body".into(),
        )
        .into());
    }

    match &state.engine {
        RetrievalEngine::Vector { indexer, .. } => {
            let processed = indexer.upload(filename, text).await?;
            Ok(Json(json!({
                "status": "success",
                "chunks_processed": processed,
            })))
        }
        RetrievalEngine::Keyword => {
            let count = state.store.add(Document::new(filename, text))?;
            Ok(Json(json!({
                "status": "success",
                "docs_in_memory": count,
            })))
        }
    }
}

/// Answer a query from the indexed/stored documents.
pub async fn chat(State(state): State<Arc<AppState>>, Json(body): Json<Value>) -> ApiResult {
    let query = body["query"].as_str().unwrap_or("");
    if query.is_empty() {
        return Err(RaglineError::Validation("Query cannot be empty".into()).into());
    }

    let reply = match &state.engine {
        RetrievalEngine::Vector { chat, .. } => chat.chat(query).await?,
        RetrievalEngine::Keyword => {
            let docs = state.store.snapshot()?;
            fallback::chat(
                &docs,
                query,
                state.config.retrieval.snippet_chars,
                state.config.retrieval.answer_chars,
            )?
        }
    };

    Ok(Json(json!({
        "answer": reply.answer,
        "sources": reply.sources,
    })))
}
