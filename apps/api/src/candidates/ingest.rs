use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::candidates::chunking::{chunk_text, ChunkParams};
use crate::candidates::extract::{extract_text, IngestError};
use crate::candidates::index::{build_chunks, CvChunk, CvIndex};
use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestedCv {
    pub faculty_name: String,
    pub file_name: String,
    pub chunk_count: usize,
    pub chunk_ids: Vec<Uuid>,
}

/// A CV that has been extracted and chunked but not yet indexed.
#[derive(Debug, Clone)]
pub struct PreparedCv {
    pub file_name: String,
    pub chunks: Vec<CvChunk>,
}

/// Extracts and chunks one uploaded CV on the blocking pool. The index is not
/// touched.
pub async fn prepare_document(
    params: ChunkParams,
    file_name: String,
    bytes: Bytes,
) -> Result<PreparedCv, AppError> {
    let name = file_name.clone();
    let texts = tokio::task::spawn_blocking(move || -> Result<Vec<String>, IngestError> {
        let text = extract_text(&name, &bytes)?;
        let chunks = chunk_text(&text, params);
        if chunks.is_empty() {
            return Err(IngestError::EmptyDocument(name));
        }
        Ok(chunks)
    })
    .await
    .map_err(|e| {
        warn!("CV extraction task for {file_name} failed: {e}");
        AppError::Extraction(format!("Text extraction failed for '{file_name}'"))
    })??;

    let chunks = build_chunks(&file_name, texts);
    Ok(PreparedCv { file_name, chunks })
}

/// Indexes prepared CVs in order. Call only once every upload part has been
/// prepared, so a failing part leaves the index unchanged.
pub async fn commit_documents(index: &CvIndex, prepared: Vec<PreparedCv>) -> Vec<IngestedCv> {
    let mut ingested = Vec::with_capacity(prepared.len());

    for cv in prepared {
        let chunk_ids = cv.chunks.iter().map(|c| c.id).collect();
        let summary = index.upsert(&cv.file_name, cv.chunks).await;

        info!(
            "Indexed {} chunks for {} ({})",
            summary.chunk_count, summary.faculty_name, summary.file_name
        );

        ingested.push(IngestedCv {
            faculty_name: summary.faculty_name,
            file_name: summary.file_name,
            chunk_count: summary.chunk_count,
            chunk_ids,
        });
    }

    ingested
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ingest_text_cv() {
        let index = CvIndex::new();
        let params = ChunkParams::new(3, 1).unwrap();
        let body = Bytes::from_static(b"one two three four five");

        let prepared = prepare_document(params, "Jane_Doe.txt".to_string(), body)
            .await
            .unwrap();
        assert_eq!(index.chunk_count().await, 0);

        let cvs = commit_documents(&index, vec![prepared]).await;

        assert_eq!(cvs[0].faculty_name, "Jane_Doe");
        assert_eq!(cvs[0].chunk_count, 2);
        assert_eq!(cvs[0].chunk_ids.len(), 2);
        assert_eq!(index.chunk_count().await, 2);
    }

    #[tokio::test]
    async fn test_reingest_keeps_ids_stable() {
        let index = CvIndex::new();
        let params = ChunkParams::new(300, 50).unwrap();
        let body = Bytes::from_static(b"Professor of Engineering");

        let first = prepare_document(params, "doe.txt".to_string(), body.clone())
            .await
            .unwrap();
        let second = prepare_document(params, "doe.txt".to_string(), body)
            .await
            .unwrap();
        let cvs = commit_documents(&index, vec![first, second]).await;

        assert_eq!(cvs[0].chunk_ids, cvs[1].chunk_ids);
        assert_eq!(index.chunk_count().await, 1);
    }

    #[tokio::test]
    async fn test_prepare_rejects_unsupported_file() {
        let params = ChunkParams::new(300, 50).unwrap();
        let err = prepare_document(params, "doe.docx".to_string(), Bytes::from_static(b"x"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }
}
