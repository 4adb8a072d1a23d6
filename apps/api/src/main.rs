mod config;
mod credentials;
mod db;
mod errors;
mod export;
mod generation;
mod llm_client;
mod models;
mod routes;
mod scheduling;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{MemoryStore, PgStore, Store};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Postsmith API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the document store
    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => Arc::new(PgStore::new(
            create_pool(url, config.db_max_connections).await?,
        )),
        None => {
            warn!("DATABASE_URL not set; using in-memory store (records are lost on restart)");
            Arc::new(MemoryStore::new())
        }
    };

    // Initialize LLM client
    let llm = LlmClient::new(
        Duration::from_secs(config.llm_timeout_secs),
        config.provider_endpoints.clone(),
    )
    .context("Failed to build LLM HTTP client")?;
    info!(
        "LLM client initialized (timeout: {}s)",
        config.llm_timeout_secs
    );

    let state = AppState {
        store,
        llm: Arc::new(llm),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
