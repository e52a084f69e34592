//! Remote embedding backend for an OpenAI-compatible `/embeddings` endpoint.
//!
//! Both texts go out in a single request and the cosine of the two returned
//! vectors is the similarity. One attempt per pair; failures surface to the
//! caller unchanged.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EmbeddingsConfig;
use crate::similarity::{cosine_similarity, SimilarityError, SimilarityModel};

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: [&'a str; 2],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    #[serde(default)]
    index: usize,
    embedding: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct EmbeddingSimilarity {
    client: Client,
    url: String,
    model: String,
    api_key: Option<String>,
}

impl EmbeddingSimilarity {
    pub fn new(config: &EmbeddingsConfig) -> Result<Self, SimilarityError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()?,
            url: config.url.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    async fn embed_pair(&self, left: &str, right: &str) -> Result<(Vec<f64>, Vec<f64>), SimilarityError> {
        let body = EmbeddingRequest {
            model: &self.model,
            input: [left, right],
        };

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("Embeddings API returned {status}: {message}");
            return Err(SimilarityError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: EmbeddingResponse = response.json().await?;
        split_pair(parsed.data)
    }
}

#[async_trait]
impl SimilarityModel for EmbeddingSimilarity {
    async fn similarity(&self, left: &str, right: &str) -> Result<f64, SimilarityError> {
        let (a, b) = self.embed_pair(left, right).await?;
        if a.len() != b.len() {
            return Err(SimilarityError::DimensionMismatch {
                left: a.len(),
                right: b.len(),
            });
        }
        debug!("Embedded pair with {} dimensions", a.len());
        Ok(cosine_similarity(&a, &b))
    }

    fn backend(&self) -> &'static str {
        "embedding"
    }
}

/// Orders the response by `index` and takes the first two vectors.
fn split_pair(mut data: Vec<EmbeddingData>) -> Result<(Vec<f64>, Vec<f64>), SimilarityError> {
    data.sort_by_key(|d| d.index);
    let mut vectors = data.into_iter().map(|d| d.embedding);
    match (vectors.next(), vectors.next()) {
        (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => Ok((a, b)),
        _ => Err(SimilarityError::EmptyEmbedding),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> EmbeddingsConfig {
        EmbeddingsConfig {
            url: format!("{}/v1/embeddings", server.uri()),
            model: "test-embedder".to_string(),
            api_key: Some("secret".to_string()),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_split_pair_orders_by_index() {
        let data = vec![
            EmbeddingData {
                index: 1,
                embedding: vec![0.0, 1.0],
            },
            EmbeddingData {
                index: 0,
                embedding: vec![1.0, 0.0],
            },
        ];
        let (a, b) = split_pair(data).unwrap();
        assert_eq!(a, vec![1.0, 0.0]);
        assert_eq!(b, vec![0.0, 1.0]);
    }

    #[test]
    fn test_split_pair_rejects_single_vector() {
        let data = vec![EmbeddingData {
            index: 0,
            embedding: vec![1.0],
        }];
        assert!(matches!(
            split_pair(data),
            Err(SimilarityError::EmptyEmbedding)
        ));
    }

    #[tokio::test]
    async fn test_similarity_from_remote_vectors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {"index": 0, "embedding": [1.0, 1.0]},
                    {"index": 1, "embedding": [1.0, 0.0]}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let model = EmbeddingSimilarity::new(&config_for(&server)).unwrap();
        let score = model.similarity("resume", "job").await.unwrap();
        assert!((score - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_api_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({
                "error": {"message": "overloaded"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let model = EmbeddingSimilarity::new(&config_for(&server)).unwrap();
        let err = model.similarity("resume", "job").await.unwrap_err();
        match err {
            SimilarityError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "overloaded");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
