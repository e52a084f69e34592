use std::sync::Arc;

use crate::config::Config;
use crate::extraction::storage::UploadStore;
use crate::nlp::LanguagePipeline;
use crate::similarity::SimilarityModel;
use crate::store::ResultStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Scored records keyed by filename. Last write wins.
    pub store: Arc<ResultStore>,
    pub uploads: UploadStore,
    /// Tokenizer, tagger and lemmatizer used for keyword extraction.
    pub pipeline: Arc<dyn LanguagePipeline>,
    /// Pluggable similarity backend. Default: LexicalSimilarity. Swap via EMBEDDINGS_URL.
    pub similarity: Arc<dyn SimilarityModel>,
}

impl AppState {
    /// Starts with an empty result store and uploads under `config.upload_dir`.
    pub fn new(
        config: Config,
        pipeline: Arc<dyn LanguagePipeline>,
        similarity: Arc<dyn SimilarityModel>,
    ) -> Self {
        Self {
            uploads: UploadStore::new(&config.upload_dir),
            store: Arc::new(ResultStore::new()),
            config,
            pipeline,
            similarity,
        }
    }
}
