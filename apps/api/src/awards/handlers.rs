use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::awards::sheet::{AwardDocument, AwardSheet};
use crate::errors::AppError;
use crate::extractors::AppJson;

#[derive(Debug, Serialize)]
pub struct AwardExtractResponse {
    pub awards: Vec<AwardDocument>,
}

/// POST /api/v1/awards/extract
///
/// Converts each sheet row into an award document named `"{B}_{G}.txt"`.
pub async fn handle_extract_awards(
    AppJson(sheet): AppJson<AwardSheet>,
) -> Result<Json<AwardExtractResponse>, AppError> {
    let awards = sheet.documents()?;
    info!("Extracted {} awards", awards.len());
    Ok(Json(AwardExtractResponse { awards }))
}
