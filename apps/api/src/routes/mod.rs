pub mod health;

use axum::{
    extract::{DefaultBodyLimit, OriginalUri},
    routing::{get, post},
    Router,
};

use crate::awards::handlers as awards;
use crate::candidates::handlers as candidates;
use crate::errors::AppError;
use crate::prompts::handlers as prompts;
use crate::state::AppState;

async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Prompt rendering
        .route("/api/v1/prompts/render", post(prompts::handle_render))
        .route("/api/v1/prompts/:mode", get(prompts::handle_get_template))
        // CV ingestion and matching
        .route(
            "/api/v1/cvs",
            post(candidates::handle_ingest_cvs)
                .get(candidates::handle_list_cvs)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/v1/match", post(candidates::handle_match))
        // Award database
        .route(
            "/api/v1/awards/extract",
            post(awards::handle_extract_awards),
        )
        .fallback(not_found)
        .with_state(state)
}
