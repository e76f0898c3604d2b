//! Ragline configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{RaglineError, Result};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RaglineConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
}

/// Which retrieval pipeline serves uploads and chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RetrievalMode {
    /// Embedding + vector-index pipeline; needs all three external services.
    Vector,
    /// In-memory keyword-paragraph retrieval; no external infrastructure.
    #[default]
    Keyword,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8787
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Retrieval tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    #[serde(default)]
    pub mode: RetrievalMode,
    /// Fixed chunk width in characters.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Chunks per embedding request.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Nearest neighbors fetched per chat query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Per-document snippet budget in keyword mode.
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,
    /// Combined answer budget in keyword mode.
    #[serde(default = "default_answer_chars")]
    pub answer_chars: usize,
}

fn default_chunk_size() -> usize {
    800
}
fn default_batch_size() -> usize {
    5
}
fn default_top_k() -> usize {
    5
}
fn default_snippet_chars() -> usize {
    800
}
fn default_answer_chars() -> usize {
    1500
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            mode: RetrievalMode::default(),
            chunk_size: default_chunk_size(),
            batch_size: default_batch_size(),
            top_k: default_top_k(),
            snippet_chars: default_snippet_chars(),
            answer_chars: default_answer_chars(),
        }
    }
}

/// Embedding service endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default = "default_embedding_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: String,
}

fn default_embedding_model() -> String {
    "@cf/baai/bge-base-en-v1.5".into()
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            model: default_embedding_model(),
            api_key: String::new(),
        }
    }
}

/// Vector index endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IndexConfig {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
}

/// Completion (answer generation) service endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default = "default_completion_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: String,
}

fn default_completion_model() -> String {
    "@cf/meta/llama-3-8b-instruct".into()
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            model: default_completion_model(),
            api_key: String::new(),
        }
    }
}

impl RaglineConfig {
    /// Load config from the default path (~/.ragline/config.toml), falling
    /// back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RaglineError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| RaglineError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| RaglineError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Ragline home directory (~/.ragline).
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ragline")
    }

    /// Vector mode needs all three external services configured.
    pub fn validate(&self) -> Result<()> {
        if self.retrieval.mode == RetrievalMode::Vector {
            if self.embedding.endpoint.is_empty() {
                return Err(RaglineError::Config(
                    "vector mode requires [embedding].endpoint".into(),
                ));
            }
            if self.index.endpoint.is_empty() {
                return Err(RaglineError::Config(
                    "vector mode requires [index].endpoint".into(),
                ));
            }
            if self.completion.endpoint.is_empty() {
                return Err(RaglineError::Config(
                    "vector mode requires [completion].endpoint".into(),
                ));
            }
        }
        if self.retrieval.chunk_size == 0 {
            return Err(RaglineError::Config(
                "[retrieval].chunk_size must be positive".into(),
            ));
        }
        if self.retrieval.batch_size == 0 {
            return Err(RaglineError::Config(
                "[retrieval].batch_size must be positive".into(),
            ));
        }
        Ok(())
    }
}
