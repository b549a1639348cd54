//! Provider construction seam for request handlers.
//!
//! Handlers build fresh embedding and completion handles per request; the
//! factory trait lets tests substitute deterministic fakes for the OpenAI
//! clients.

use std::sync::Arc;

use mnemo_model::{CompletionModel, ModelError, OpenAIChatConfig, OpenAIChatModel};
use mnemo_rag::{EmbeddingProvider, OpenAIEmbeddingProvider};

/// Builds per-request embedding and completion handles from a credential.
pub trait ProviderFactory: Send + Sync {
    /// Construct an embedding provider authenticated with the given key.
    fn embedding_provider(&self, api_key: &str) -> mnemo_rag::Result<Arc<dyn EmbeddingProvider>>;

    /// Construct a completion model authenticated with the given key.
    fn completion_model(&self, api_key: &str) -> Result<Arc<dyn CompletionModel>, ModelError>;
}

/// The production factory: OpenAI embeddings and chat completions.
///
/// Nothing is cached or pooled; every request gets its own clients.
#[derive(Debug, Clone, Default)]
pub struct OpenAIProviderFactory {
    /// Optional base URL override for OpenAI-compatible APIs.
    pub base_url: Option<String>,
}

impl ProviderFactory for OpenAIProviderFactory {
    fn embedding_provider(&self, api_key: &str) -> mnemo_rag::Result<Arc<dyn EmbeddingProvider>> {
        let mut provider = OpenAIEmbeddingProvider::new(api_key)?;
        if let Some(base_url) = &self.base_url {
            provider = provider.with_base_url(base_url);
        }
        Ok(Arc::new(provider))
    }

    fn completion_model(&self, api_key: &str) -> Result<Arc<dyn CompletionModel>, ModelError> {
        let mut config = OpenAIChatConfig::new(api_key);
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url);
        }
        Ok(Arc::new(OpenAIChatModel::new(config)?))
    }
}
