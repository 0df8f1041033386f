//! In-process CV chunk index. Holds chunks for the lifetime of the server;
//! nothing is written to disk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::candidates::chunking::chunk_id;
use crate::candidates::extract::faculty_name;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvChunk {
    pub id: Uuid,
    pub file_name: String,
    pub faculty_name: String,
    pub chunk_index: usize,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CvSummary {
    pub faculty_name: String,
    pub file_name: String,
    pub chunk_count: usize,
    pub indexed_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct IndexInner {
    chunks: Vec<CvChunk>,
    files: Vec<CvSummary>,
}

#[derive(Debug, Default)]
pub struct CvIndex {
    inner: RwLock<IndexInner>,
}

/// Builds the chunk records for one file without touching the index.
pub fn build_chunks(file_name: &str, texts: Vec<String>) -> Vec<CvChunk> {
    let faculty = faculty_name(file_name);
    texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| CvChunk {
            id: chunk_id(file_name, i),
            file_name: file_name.to_string(),
            faculty_name: faculty.clone(),
            chunk_index: i,
            text,
        })
        .collect()
}

impl CvIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every chunk previously stored for `file_name`.
    pub async fn upsert(&self, file_name: &str, chunks: Vec<CvChunk>) -> CvSummary {
        let summary = CvSummary {
            faculty_name: faculty_name(file_name),
            file_name: file_name.to_string(),
            chunk_count: chunks.len(),
            indexed_at: Utc::now(),
        };

        let mut inner = self.inner.write().await;
        inner.chunks.retain(|c| c.file_name != file_name);
        inner.chunks.extend(chunks);
        inner.files.retain(|f| f.file_name != file_name);
        inner.files.push(summary.clone());

        summary
    }

    /// Owned copy of the indexed chunks, in insertion order. The lock is
    /// released before this returns, so callers may await freely.
    pub async fn snapshot(&self) -> Vec<CvChunk> {
        self.inner.read().await.chunks.clone()
    }

    pub async fn summaries(&self) -> Vec<CvSummary> {
        self.inner.read().await.files.clone()
    }

    pub async fn chunk_count(&self) -> usize {
        self.inner.read().await.chunks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_chunks_assigns_ids_and_faculty() {
        let chunks = build_chunks("Jane_Doe.pdf", texts(&["a", "b"]));
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].faculty_name, "Jane_Doe");
        assert_eq!(chunks[1].chunk_index, 1);
        assert_eq!(chunks[1].id, chunk_id("Jane_Doe.pdf", 1));
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_file() {
        let index = CvIndex::new();
        index
            .upsert("doe.pdf", build_chunks("doe.pdf", texts(&["a", "b", "c"])))
            .await;
        index
            .upsert("roe.pdf", build_chunks("roe.pdf", texts(&["x"])))
            .await;
        let summary = index
            .upsert("doe.pdf", build_chunks("doe.pdf", texts(&["d"])))
            .await;

        assert_eq!(summary.chunk_count, 1);
        assert_eq!(index.chunk_count().await, 2);

        let summaries = index.summaries().await;
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].faculty_name, "roe");
        assert_eq!(summaries[1].faculty_name, "doe");

        let chunks = index.snapshot().await;
        let doe: Vec<&str> = chunks
            .iter()
            .filter(|c| c.faculty_name == "doe")
            .map(|c| c.text.as_str())
            .collect();
        assert_eq!(doe, vec!["d"]);
    }

    #[tokio::test]
    async fn test_snapshot_does_not_block_writers() {
        let index = CvIndex::new();
        index
            .upsert("doe.pdf", build_chunks("doe.pdf", texts(&["a"])))
            .await;

        let snapshot = index.snapshot().await;
        let upsert = index.upsert("roe.pdf", build_chunks("roe.pdf", texts(&["b"])));
        tokio::time::timeout(std::time::Duration::from_secs(1), upsert)
            .await
            .expect("upsert should not wait on an outstanding snapshot");

        assert_eq!(snapshot.len(), 1);
        assert_eq!(index.chunk_count().await, 2);
    }
}
