//! Similarity Scoring: pluggable, trait-based semantic closeness between two texts.
//!
//! Default: `LexicalSimilarity` (pure-Rust, deterministic, no network).
//! Optional: `EmbeddingSimilarity` (remote embeddings endpoint, enabled via EMBEDDINGS_URL).
//!
//! `AppState` holds an `Arc<dyn SimilarityModel>`, chosen at startup from config.

pub mod lexical;
pub mod remote;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

pub use lexical::LexicalSimilarity;
pub use remote::EmbeddingSimilarity;

#[derive(Debug, Error)]
pub enum SimilarityError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Embedding response did not contain two vectors")]
    EmptyEmbedding,

    #[error("Embedding dimensions differ ({left} vs {right})")]
    DimensionMismatch { left: usize, right: usize },
}

/// The similarity model trait. Implement this to swap backends without touching
/// the analyzer, handlers, or score composition.
///
/// Returns the model's native similarity, nominally in [0, 1]. Callers must not
/// assume the bound holds.
#[async_trait]
pub trait SimilarityModel: Send + Sync {
    async fn similarity(&self, left: &str, right: &str) -> Result<f64, SimilarityError>;

    /// Short label for logs ("lexical" | "embedding").
    fn backend(&self) -> &'static str;
}

/// Scores a normalized resume against a job description on a 0–100 scale.
///
/// Empty resume text short-circuits to 0.0 without calling the model.
/// The result is NOT clamped; score composition owns clamping.
pub async fn similarity_score(
    model: &dyn SimilarityModel,
    resume_text: &str,
    job_description: &str,
) -> Result<f64, SimilarityError> {
    if resume_text.is_empty() {
        return Ok(0.0);
    }
    let raw = model.similarity(resume_text, job_description).await?;
    debug!("{} similarity = {raw:.4}", model.backend());
    Ok(raw * 100.0)
}

/// Cosine similarity of two dense vectors. Zero-norm input yields 0.0.
pub fn cosine_similarity(left: &[f64], right: &[f64]) -> f64 {
    let dot: f64 = left.iter().zip(right).map(|(a, b)| a * b).sum();
    let norm_left = left.iter().map(|v| v * v).sum::<f64>().sqrt();
    let norm_right = right.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm_left == 0.0 || norm_right == 0.0 {
        return 0.0;
    }
    dot / (norm_left * norm_right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedModel {
        value: f64,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SimilarityModel for FixedModel {
        async fn similarity(&self, _left: &str, _right: &str) -> Result<f64, SimilarityError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.value)
        }

        fn backend(&self) -> &'static str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn test_empty_resume_skips_model() {
        let model = FixedModel {
            value: 0.9,
            calls: AtomicUsize::new(0),
        };
        let score = similarity_score(&model, "", "Rust engineer").await.unwrap();
        assert_eq!(score, 0.0);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_score_is_scaled_not_clamped() {
        let model = FixedModel {
            value: 1.02,
            calls: AtomicUsize::new(0),
        };
        let score = similarity_score(&model, "resume", "job").await.unwrap();
        assert!((score - 102.0).abs() < 1e-9);
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cosine_identical_vectors() {
        let v = [0.3, 0.4, 0.5];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_orthogonal_and_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }
}
