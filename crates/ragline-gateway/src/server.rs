//! HTTP server implementation using Axum.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use ragline_core::config::{RaglineConfig, RetrievalMode};
use ragline_core::error::Result;
use ragline_retrieval::{DocumentStore, Indexer, VectorChat};

/// Which pipeline serves uploads and chat.
pub enum RetrievalEngine {
    /// Embedding + vector-index pipeline.
    Vector {
        indexer: Indexer,
        chat: VectorChat,
    },
    /// Keyword-paragraph retrieval over the in-memory store.
    Keyword,
}

impl RetrievalEngine {
    /// Build the engine the config asks for, wiring in the HTTP provider
    /// clients for vector mode.
    pub fn from_config(config: &RaglineConfig) -> Result<Self> {
        config.validate()?;
        match config.retrieval.mode {
            RetrievalMode::Vector => {
                let embedder = ragline_providers::build_embedding_client(config);
                let index = ragline_providers::build_vector_index(config);
                let completion = ragline_providers::build_completion_client(config);
                Ok(Self::Vector {
                    indexer: Indexer::new(
                        Arc::clone(&embedder),
                        Arc::clone(&index),
                        config.retrieval.chunk_size,
                        config.retrieval.batch_size,
                    ),
                    chat: VectorChat::new(embedder, index, completion, config.retrieval.top_k),
                })
            }
            RetrievalMode::Keyword => Ok(Self::Keyword),
        }
    }
}

/// Shared state for the gateway server.
pub struct AppState {
    pub config: RaglineConfig,
    pub start_time: std::time::Instant,
    /// Raw documents for keyword mode. Appends are atomic under its lock.
    pub store: Arc<DocumentStore>,
    pub engine: RetrievalEngine,
}

impl AppState {
    pub fn new(config: RaglineConfig, engine: RetrievalEngine) -> Self {
        Self {
            config,
            start_time: std::time::Instant::now(),
            store: Arc::new(DocumentStore::new()),
            engine,
        }
    }
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let shared = Arc::new(state);

    Router::new()
        .route("/health", get(super::routes::health_check))
        .route("/api/upload", post(super::routes::upload))
        .route("/api/chat", post(super::routes::chat))
        // Anything unmatched gets the plain-text banner, with CORS.
        .fallback(get(super::routes::banner))
        .layer(
            // Permissive CORS on every response; the layer answers
            // preflight OPTIONS with 204.
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Start the HTTP server and serve until shutdown.
pub async fn start(config: RaglineConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let engine = RetrievalEngine::from_config(&config)?;
    let mode = config.retrieval.mode;
    let router = build_router(AppState::new(config, engine));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("ragline gateway listening on {addr} (mode: {mode:?})");
    axum::serve(listener, router).await?;
    Ok(())
}
