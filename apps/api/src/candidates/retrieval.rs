//! Excerpt retrieval: picks the CV chunks most relevant to an award.
//!
//! Default: `KeywordRetriever` (pure-Rust term overlap, deterministic).
//! `AppState` holds an `Arc<dyn ExcerptRetriever>` so an embedding-backed
//! retriever can be swapped in without touching handlers.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::candidates::index::CvChunk;
use crate::errors::AppError;

/// Terms shorter than this are ignored ("of", "in", "a").
const MIN_TERM_LEN: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExcerptHit {
    pub chunk_id: Uuid,
    pub faculty_name: String,
    pub text: String,
    pub score: f32, // 0.0 to 1.0
}

#[async_trait]
pub trait ExcerptRetriever: Send + Sync {
    /// Returns at most `k` hits, best first.
    async fn retrieve(
        &self,
        chunks: &[CvChunk],
        query: &str,
        k: usize,
    ) -> Result<Vec<ExcerptHit>, AppError>;

    /// Short backend label, logged at startup.
    fn backend(&self) -> &'static str;
}

/// Scores each chunk by the fraction of distinct query terms it contains.
/// Chunks sharing no term are dropped; equal scores keep index order.
pub struct KeywordRetriever;

#[async_trait]
impl ExcerptRetriever for KeywordRetriever {
    async fn retrieve(
        &self,
        chunks: &[CvChunk],
        query: &str,
        k: usize,
    ) -> Result<Vec<ExcerptHit>, AppError> {
        Ok(rank_by_terms(chunks, query, k))
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

fn terms(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= MIN_TERM_LEN)
        .map(|t| t.to_lowercase())
        .collect()
}

fn rank_by_terms(chunks: &[CvChunk], query: &str, k: usize) -> Vec<ExcerptHit> {
    let query_terms = terms(query);
    if query_terms.is_empty() || k == 0 {
        return Vec::new();
    }

    let mut hits: Vec<ExcerptHit> = chunks
        .iter()
        .filter_map(|chunk| {
            let chunk_terms = terms(&chunk.text);
            let shared = query_terms.intersection(&chunk_terms).count();
            if shared == 0 {
                return None;
            }
            Some(ExcerptHit {
                chunk_id: chunk.id,
                faculty_name: chunk.faculty_name.clone(),
                text: chunk.text.clone(),
                score: shared as f32 / query_terms.len() as f32,
            })
        })
        .collect();

    // sort_by is stable: ties stay in index order
    hits.sort_by(|a, b| b.score.total_cmp(&a.score));
    hits.truncate(k);
    hits
}
