//! Word-window chunking for CV text.

use thiserror::Error;
use uuid::Uuid;

/// Namespace for chunk ids. Fixed so the same file and index always yield the
/// same id across restarts.
const CHUNK_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a9e_4b7d_4e35_9a0c_1d2e_3f40_5b6c);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkingError {
    #[error("chunk size must be greater than zero")]
    ZeroChunkSize,

    #[error("chunk overlap ({overlap}) must be smaller than chunk size ({size})")]
    OverlapTooLarge { size: usize, overlap: usize },
}

/// Window parameters, validated once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkParams {
    size: usize,
    overlap: usize,
}

impl ChunkParams {
    pub fn new(size: usize, overlap: usize) -> Result<Self, ChunkingError> {
        if size == 0 {
            return Err(ChunkingError::ZeroChunkSize);
        }
        if overlap >= size {
            return Err(ChunkingError::OverlapTooLarge { size, overlap });
        }
        Ok(Self { size, overlap })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    fn step(&self) -> usize {
        self.size - self.overlap
    }
}

/// Splits `text` on whitespace into windows of `params.size()` words that
/// advance by `size - overlap`. The window reaching the last word is final.
pub fn chunk_text(text: &str, params: ChunkParams) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut chunks = Vec::new();

    let mut start = 0;
    while start < words.len() {
        let end = (start + params.size).min(words.len());
        chunks.push(words[start..end].join(" "));

        if start + params.size >= words.len() {
            break;
        }
        start += params.step();
    }

    chunks
}

/// Deterministic id for chunk `index` of `file_name`.
pub fn chunk_id(file_name: &str, index: usize) -> Uuid {
    Uuid::new_v5(&CHUNK_NAMESPACE, format!("{file_name}_{index}").as_bytes())
}
