//! # Ragline — retrieval-augmented QA backend
//!
//! Accepts uploaded text documents, indexes them (vector or keyword mode)
//! and answers natural-language queries over them.
//!
//! Usage:
//!   ragline                       # Serve with ~/.ragline/config.toml
//!   ragline --port 8080           # Custom port
//!   ragline --config ragline.toml # Explicit config file

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ragline_core::config::RaglineConfig;

#[derive(Parser)]
#[command(name = "ragline", version, about = "Retrieval-augmented QA backend")]
struct Cli {
    /// Bind host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Config file path (default: ~/.ragline/config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "ragline=debug,tower_http=debug"
    } else {
        "ragline=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => RaglineConfig::load_from(std::path::Path::new(path))?,
        None => RaglineConfig::load()?,
    };
    if let Some(host) = cli.host {
        config.gateway.host = host;
    }
    if let Some(port) = cli.port {
        config.gateway.port = port;
    }

    ragline_gateway::start(config).await
}
