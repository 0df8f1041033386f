use std::sync::Arc;

use anyhow::Result;

use crate::candidates::chunking::ChunkParams;
use crate::candidates::index::CvIndex;
use crate::candidates::retrieval::{ExcerptRetriever, KeywordRetriever};
use crate::config::Config;
use crate::prompts::PromptLibrary;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub prompts: Arc<PromptLibrary>,
    pub index: Arc<CvIndex>,
    /// Pluggable excerpt retriever. Default: KeywordRetriever.
    pub retriever: Arc<dyn ExcerptRetriever>,
    pub chunk_params: ChunkParams,
}

impl AppState {
    pub fn new(config: Config, prompts: PromptLibrary) -> Result<Self> {
        let chunk_params = config.chunk_params()?;
        Ok(Self {
            config,
            prompts: Arc::new(prompts),
            index: Arc::new(CvIndex::new()),
            retriever: Arc::new(KeywordRetriever),
            chunk_params,
        })
    }
}
