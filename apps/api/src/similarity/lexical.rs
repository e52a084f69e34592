use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::nlp::LanguagePipeline;
use crate::similarity::{SimilarityError, SimilarityModel};

/// Cosine similarity over lemma-frequency vectors.
///
/// Only alphabetic, non-stop tokens contribute. Lemmas are lowercased so
/// "APIs" in one text and "api" in the other land on the same dimension.
/// `BTreeMap` keeps the float summation order fixed between runs.
pub struct LexicalSimilarity {
    pipeline: Arc<dyn LanguagePipeline>,
}

impl LexicalSimilarity {
    pub fn new(pipeline: Arc<dyn LanguagePipeline>) -> Self {
        Self { pipeline }
    }

    fn term_vector(&self, text: &str) -> BTreeMap<String, f64> {
        let mut counts = BTreeMap::new();
        for token in self.pipeline.analyze(text) {
            if token.is_stop || !token.is_alpha {
                continue;
            }
            *counts.entry(token.lemma.to_lowercase()).or_insert(0.0) += 1.0;
        }
        counts
    }
}

#[async_trait]
impl SimilarityModel for LexicalSimilarity {
    async fn similarity(&self, left: &str, right: &str) -> Result<f64, SimilarityError> {
        Ok(sparse_cosine(&self.term_vector(left), &self.term_vector(right)))
    }

    fn backend(&self) -> &'static str {
        "lexical"
    }
}

fn sparse_cosine(left: &BTreeMap<String, f64>, right: &BTreeMap<String, f64>) -> f64 {
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    let dot: f64 = left
        .iter()
        .filter_map(|(term, weight)| right.get(term).map(|other| weight * other))
        .sum();
    let norm_left = left.values().map(|v| v * v).sum::<f64>().sqrt();
    let norm_right = right.values().map(|v| v * v).sum::<f64>().sqrt();
    dot / (norm_left * norm_right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::RuleBasedPipeline;

    fn model() -> LexicalSimilarity {
        LexicalSimilarity::new(Arc::new(RuleBasedPipeline::new()))
    }

    #[tokio::test]
    async fn test_identical_texts_score_one() {
        let text = "Rust engineer building distributed storage systems";
        let score = model().similarity(text, text).await.unwrap();
        assert!((score - 1.0).abs() < 1e-9, "got {score}");
    }

    #[tokio::test]
    async fn test_disjoint_texts_score_zero() {
        let score = model()
            .similarity("Python Django developer", "Pastry chef bakery")
            .await
            .unwrap();
        assert_eq!(score, 0.0);
    }

    #[tokio::test]
    async fn test_stop_words_only_scores_zero() {
        let score = model()
            .similarity("the and of with", "Rust engineer")
            .await
            .unwrap();
        assert_eq!(score, 0.0);
    }

    #[tokio::test]
    async fn test_overlap_scores_between_bounds() {
        let score = model()
            .similarity(
                "Experienced Python Developer skilled in Django, Flask, REST APIs, 3 years experience",
                "Looking for a Python developer with Django and REST API experience, 3+ years required",
            )
            .await
            .unwrap();
        assert!(score > 0.3 && score < 1.0, "got {score}");
    }

    #[tokio::test]
    async fn test_similarity_is_symmetric() {
        let m = model();
        let a = "Kubernetes operators and Go services";
        let b = "Go microservices deployed on Kubernetes";
        let ab = m.similarity(a, b).await.unwrap();
        let ba = m.similarity(b, a).await.unwrap();
        assert!((ab - ba).abs() < 1e-12);
    }
}
