mod awards;
mod candidates;
mod config;
mod errors;
mod extractors;
mod prompts;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::prompts::PromptLibrary;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Nominator API v{}", env!("CARGO_PKG_VERSION"));

    let prompts = PromptLibrary::load(config.prompts_dir.as_deref())?;
    match &config.prompts_dir {
        Some(dir) => info!("Prompt templates loaded from {}", dir.display()),
        None => info!("Using built-in prompt templates"),
    }

    let state = AppState::new(config.clone(), prompts)?;
    info!(
        "CV index ready (chunk size {}, overlap {}, top-k {}, retriever: {})",
        state.chunk_params.size(),
        state.chunk_params.overlap(),
        config.top_k_chunks,
        state.retriever.backend()
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
