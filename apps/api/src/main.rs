mod config;
mod errors;
mod extraction;
mod models;
mod nlp;
mod routes;
mod screening;
mod similarity;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::nlp::{LanguagePipeline, RuleBasedPipeline};
use crate::routes::build_router;
use crate::similarity::{EmbeddingSimilarity, LexicalSimilarity, SimilarityModel};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (bad numbers or a half-configured backend are fatal)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screener API v{}", env!("CARGO_PKG_VERSION"));

    // Language pipeline is built once and shared by keyword extraction and lexical similarity
    let pipeline: Arc<dyn LanguagePipeline> = Arc::new(RuleBasedPipeline::new());

    // Similarity backend (LexicalSimilarity by default; swap via EMBEDDINGS_URL)
    let similarity: Arc<dyn SimilarityModel> = match &config.embeddings {
        Some(embeddings) => {
            info!(
                "Similarity backend: embeddings at {} (model: {})",
                embeddings.url, embeddings.model
            );
            Arc::new(EmbeddingSimilarity::new(embeddings)?)
        }
        None => {
            info!("Similarity backend: lexical");
            Arc::new(LexicalSimilarity::new(pipeline.clone()))
        }
    };

    // Build app state
    let state = AppState::new(config.clone(), pipeline, similarity);
    state.uploads.ensure_root().await?;
    info!("Uploads stored under {}", state.uploads.root().display());

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
