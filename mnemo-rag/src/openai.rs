//! OpenAI embedding provider using the OpenAI embeddings API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// The default OpenAI API base URL.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// The default embedding model.
const DEFAULT_MODEL: &str = "text-embedding-3-small";

/// The dimensionality of `text-embedding-3-small`.
const DEFAULT_DIMENSIONS: usize = 1536;

/// An [`EmbeddingProvider`] backed by the OpenAI embeddings API.
///
/// Calls `{base_url}/embeddings` directly via `reqwest`. The base URL can be
/// overridden to point at an OpenAI-compatible API.
pub struct OpenAIEmbeddingProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    dimensions: usize,
    /// If set, passed to the API for Matryoshka dimension truncation.
    request_dimensions: Option<usize>,
}

impl OpenAIEmbeddingProvider {
    /// Create a new provider with the given API key and default model.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::EmbeddingError`] if the API key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Self::provider_error("API key must not be empty"));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            dimensions: DEFAULT_DIMENSIONS,
            request_dimensions: None,
        })
    }

    /// Create a new provider using the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| Self::provider_error("OPENAI_API_KEY environment variable not set"))?;
        Self::new(api_key)
    }

    /// Point the provider at an OpenAI-compatible API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the model name (e.g. `text-embedding-3-large`).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the output dimensions (Matryoshka truncation).
    pub fn with_dimensions(mut self, dims: usize) -> Self {
        self.dimensions = dims;
        self.request_dimensions = Some(dims);
        self
    }

    fn provider_error(message: impl Into<String>) -> RagError {
        RagError::EmbeddingError { provider: "OpenAI".into(), message: message.into() }
    }
}

// ── OpenAI API request/response types ──────────────────────────────

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[async_trait]
impl EmbeddingProvider for OpenAIEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let results = self.embed_batch(&[text]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| Self::provider_error("API returned empty response"))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(batch_size = texts.len(), model = %self.model, "embedding batch");

        let request_body = EmbeddingRequest {
            model: &self.model,
            input: texts.to_vec(),
            dimensions: self.request_dimensions,
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "embedding request failed");
                Self::provider_error(format!("request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            error!(%status, "embeddings API error");
            return Err(Self::provider_error(format!("API returned {status}: {detail}")));
        }

        let embedding_response: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| Self::provider_error(format!("failed to parse response: {e}")))?;

        Ok(embedding_response.data.into_iter().map(|d| d.embedding).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_api_key_is_rejected() {
        assert!(OpenAIEmbeddingProvider::new("").is_err());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let provider = OpenAIEmbeddingProvider::new("sk-test")
            .unwrap()
            .with_base_url("https://api.chatanywhere.tech/v1/");
        assert_eq!(provider.base_url, "https://api.chatanywhere.tech/v1");
    }

    #[test]
    fn dimensions_override_updates_reported_dimensions() {
        let provider = OpenAIEmbeddingProvider::new("sk-test").unwrap().with_dimensions(256);
        assert_eq!(provider.dimensions(), 256);
        assert_eq!(provider.request_dimensions, Some(256));
    }
}
