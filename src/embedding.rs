use ndarray::Array1;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("embedding service returned {status}: {body}")]
    Service {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("embedding response contained no embedding data")]
    EmptyResponse,
}

/// Converts a text string into a fixed-length vector. Implementations own
/// the I/O boundary; callers only see a vector or a typed failure.
pub trait Embedder {
    fn embed(&self, text: &str) -> Result<Array1<f32>, EmbeddingError>;
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Client for an OpenAI-compatible `/embeddings` endpoint. One blocking
/// request per call; no retries.
pub struct OpenAiEmbedder {
    client: reqwest::blocking::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl OpenAiEmbedder {
    pub fn new(api_base: &str, api_key: &str, model: &str) -> Self {
        OpenAiEmbedder {
            client: reqwest::blocking::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

impl Embedder for OpenAiEmbedder {
    fn embed(&self, text: &str) -> Result<Array1<f32>, EmbeddingError> {
        let response = self
            .client
            .post(format!("{}/embeddings", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest {
                model: &self.model,
                input: text,
            })
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(EmbeddingError::Service { status, body });
        }

        let parsed: EmbeddingResponse = response.json()?;
        let first = parsed
            .data
            .into_iter()
            .next()
            .ok_or(EmbeddingError::EmptyResponse)?;

        Ok(Array1::from(first.embedding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_embedding_response() {
        let payload = r#"{
            "object": "list",
            "data": [{"object": "embedding", "index": 0, "embedding": [0.1, -0.2, 0.3]}],
            "model": "text-embedding-ada-002",
            "usage": {"prompt_tokens": 5, "total_tokens": 5}
        }"#;

        let parsed: EmbeddingResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.data.len(), 1);
        assert_eq!(parsed.data[0].embedding, vec![0.1, -0.2, 0.3]);
    }

    #[test]
    fn test_empty_data_is_typed_error() {
        let payload = r#"{"data": []}"#;
        let parsed: EmbeddingResponse = serde_json::from_str(payload).unwrap();
        let result = parsed
            .data
            .into_iter()
            .next()
            .ok_or(EmbeddingError::EmptyResponse);
        assert!(matches!(result, Err(EmbeddingError::EmptyResponse)));
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(EmbeddingRequest {
            model: "text-embedding-ada-002",
            input: "how often should I feed my cat?",
        })
        .unwrap();
        assert_eq!(body["model"], "text-embedding-ada-002");
        assert_eq!(body["input"], "how often should I feed my cat?");
    }
}
