//! Axum route handlers for prompt rendering.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::candidates::context::{format_candidate_profiles, CandidateProfile};
use crate::errors::AppError;
use crate::extractors::{AppJson, AppPath};
use crate::prompts::templates::{OUTPUT_FORMAT_FOOTER, REASONING_LABEL, SCORE_LABEL};
use crate::prompts::ProfessorMode;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub mode: ProfessorMode,
    pub award_text: Option<String>,
    pub cv_text: Option<String>,
    /// Whole CVs to list in place of `cv_text` (multiple mode only).
    pub candidates: Option<Vec<CandidateProfile>>,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub mode: ProfessorMode,
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct TemplateResponse {
    pub mode: ProfessorMode,
    pub template: String,
    pub output_format: &'static str,
    pub output_labels: [&'static str; 2],
}

/// POST /api/v1/prompts/render
///
/// Inputs are substituted as-is. Empty strings are accepted; an absent value
/// is a 400 naming the placeholder.
pub async fn handle_render(
    State(state): State<AppState>,
    AppJson(request): AppJson<RenderRequest>,
) -> Result<Json<RenderResponse>, AppError> {
    let cv_text = match (request.cv_text, request.candidates) {
        (Some(_), Some(_)) => {
            return Err(AppError::Validation(
                "supply either cv_text or candidates, not both".to_string(),
            ))
        }
        (None, Some(_)) if request.mode == ProfessorMode::Single => {
            return Err(AppError::Validation(
                "candidates require mode 'multiple'".to_string(),
            ))
        }
        (None, Some(candidates)) => Some(format_candidate_profiles(&candidates)),
        (cv_text, None) => cv_text,
    };

    let prompt = state
        .prompts
        .template(request.mode)
        .try_render(request.award_text.as_deref(), cv_text.as_deref())?;

    debug!("Rendered {} prompt ({} bytes)", request.mode, prompt.len());

    Ok(Json(RenderResponse {
        mode: request.mode,
        prompt,
    }))
}

/// GET /api/v1/prompts/:mode
pub async fn handle_get_template(
    State(state): State<AppState>,
    AppPath(mode): AppPath<ProfessorMode>,
) -> Json<TemplateResponse> {
    Json(TemplateResponse {
        mode,
        template: state.prompts.template(mode).source().to_string(),
        output_format: OUTPUT_FORMAT_FOOTER,
        output_labels: [REASONING_LABEL, SCORE_LABEL],
    })
}
