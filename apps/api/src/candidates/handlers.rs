//! Axum route handlers for CV ingestion and award matching.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::candidates::context::format_candidate_context;
use crate::candidates::index::CvSummary;
use crate::candidates::ingest::{commit_documents, prepare_document, IngestedCv};
use crate::candidates::retrieval::ExcerptHit;
use crate::errors::AppError;
use crate::extractors::AppJson;
use crate::prompts::ProfessorMode;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub ingested: Vec<IngestedCv>,
}

#[derive(Debug, Serialize)]
pub struct CvListResponse {
    pub cvs: Vec<CvSummary>,
    pub total_chunks: usize,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub award_text: String,
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub prompt: String,
    pub matched_faculty: Vec<String>,
    pub excerpt_count: usize,
    pub excerpts: Vec<ExcerptHit>,
    pub retriever: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cvs
///
/// Accepts one or more multipart `file` parts (.pdf or .txt). Re-uploading a
/// file name replaces its previous chunks. Every part is extracted before any
/// is indexed; one bad part rejects the whole upload.
pub async fn handle_ingest_cvs(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<IngestResponse>, AppError> {
    let mut prepared = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("file part is missing a file name".to_string()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read '{file_name}': {e}")))?;

        prepared.push(prepare_document(state.chunk_params, file_name, bytes).await?);
    }

    if prepared.is_empty() {
        return Err(AppError::Validation(
            "request must contain at least one 'file' part".to_string(),
        ));
    }

    let ingested = commit_documents(&state.index, prepared).await;
    Ok(Json(IngestResponse { ingested }))
}

/// GET /api/v1/cvs
pub async fn handle_list_cvs(State(state): State<AppState>) -> Json<CvListResponse> {
    Json(CvListResponse {
        cvs: state.index.summaries().await,
        total_chunks: state.index.chunk_count().await,
    })
}

/// POST /api/v1/match
///
/// Retrieves the CV excerpts most relevant to an award and renders the
/// multiple-professor prompt around them. The prompt is returned, not sent.
pub async fn handle_match(
    State(state): State<AppState>,
    AppJson(request): AppJson<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let top_k = request.top_k.unwrap_or(state.config.top_k_chunks);
    if top_k == 0 {
        return Err(AppError::Validation("top_k must be at least 1".to_string()));
    }

    let chunks = state.index.snapshot().await;
    if chunks.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No CVs have been ingested yet".to_string(),
        ));
    }
    let hits = state
        .retriever
        .retrieve(&chunks, &request.award_text, top_k)
        .await?;

    let (cv_text, matched_faculty) = format_candidate_context(&hits);
    info!(
        "Matched {} excerpts from {} faculty: {:?}",
        hits.len(),
        matched_faculty.len(),
        matched_faculty
    );

    let prompt = state
        .prompts
        .render(ProfessorMode::Multiple, &request.award_text, &cv_text);

    Ok(Json(MatchResponse {
        prompt,
        matched_faculty,
        excerpt_count: hits.len(),
        excerpts: hits,
        retriever: state.retriever.backend().to_string(),
    }))
}
