//! Command-line interface for book-minder.
//!
//! The binary has a single job: serve the catalog API. Flags override the
//! config file, which in turn overrides the built-in defaults.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::runtime::Runtime;

use crate::catalog::CatalogService;
use crate::enrichment::OpenLibraryClient;
use crate::store::BookStore;
use crate::{api, config};

/// Book Minder - an in-memory book catalog with ISBN enrichment
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Listen address for the HTTP API
    #[arg(long)]
    pub listen: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Base URL of the external enrichment source
    #[arg(long, env = "OPENLIBRARY_BASE_URL")]
    pub ext_base_url: Option<String>,

    /// Retries after the first failed enrichment attempt
    #[arg(long)]
    pub retries: Option<u32>,

    /// Path to a config file (defaults to the OS config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Resolve the effective configuration from file and flags.
pub fn resolve_config(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    };
    if let Some(listen) = &cli.listen {
        config.server.listen = listen.clone();
    }
    if let Some(url) = &cli.ext_base_url {
        config.enrichment.base_url = url.clone();
    }
    if let Some(retries) = cli.retries {
        config.enrichment.retries = retries;
    }
    config
}

/// Run the server until a shutdown signal arrives.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;
    rt.block_on(serve(resolve_config(cli)))
}

async fn serve(config: config::Config) -> anyhow::Result<()> {
    let store = Arc::new(BookStore::new());
    let lookup = Arc::new(OpenLibraryClient::new(
        config.enrichment.base_url.clone(),
        config.enrichment.retries,
    ));
    let catalog = Arc::new(CatalogService::new(store, lookup));
    let state = api::AppState { catalog };

    let listener = tokio::net::TcpListener::bind(&config.server.listen).await?;
    tracing::info!(addr = %config.server.listen, "listening");
    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Resolves when ctrl-c is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("shutdown signal received");
}
