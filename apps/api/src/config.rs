use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::candidates::chunking::ChunkParams;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory holding `award_to_cv_prompt.md` / `award_to_cvs_prompt.md`
    /// overrides. Built-in templates are used when unset.
    pub prompts_dir: Option<PathBuf>,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k_chunks: usize,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            prompts_dir: lookup("PROMPTS_DIR")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            chunk_size: parse_or(&lookup, "CHUNK_SIZE", 300)?,
            chunk_overlap: parse_or(&lookup, "CHUNK_OVERLAP", 50)?,
            top_k_chunks: parse_or(&lookup, "TOP_K_CHUNKS", 10)?,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        };

        if config.top_k_chunks == 0 {
            bail!("TOP_K_CHUNKS must be at least 1");
        }
        config.chunk_params()?;

        Ok(config)
    }

    pub fn chunk_params(&self) -> Result<ChunkParams> {
        ChunkParams::new(self.chunk_size, self.chunk_overlap)
            .context("CHUNK_SIZE / CHUNK_OVERLAP are inconsistent")
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
