//! OpenAI chat completion client.

use async_openai::{
    Client,
    config::OpenAIConfig as AsyncOpenAIConfig,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
};
use async_trait::async_trait;
use tracing::{debug, error};

use crate::{CompletionModel, error::ModelError};

/// The default chat model.
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Configuration for [`OpenAIChatModel`].
#[derive(Debug, Clone)]
pub struct OpenAIChatConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Model name, defaults to `gpt-3.5-turbo`.
    pub model: String,
    /// Optional base URL override for OpenAI-compatible APIs.
    pub base_url: Option<String>,
    /// Optional sampling temperature.
    pub temperature: Option<f32>,
}

impl OpenAIChatConfig {
    /// Create a config with the given API key and default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            temperature: None,
        }
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point the client at an OpenAI-compatible API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// A [`CompletionModel`] backed by the OpenAI chat completions API.
pub struct OpenAIChatModel {
    client: Client<AsyncOpenAIConfig>,
    model: String,
    temperature: Option<f32>,
}

impl OpenAIChatModel {
    /// Create a new client from the given config.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Config`] if the API key is empty.
    pub fn new(config: OpenAIChatConfig) -> Result<Self, ModelError> {
        if config.api_key.is_empty() {
            return Err(ModelError::Config("API key must not be empty".into()));
        }

        let mut openai_config = AsyncOpenAIConfig::new().with_api_key(&config.api_key);
        if let Some(base_url) = &config.base_url {
            openai_config = openai_config.with_api_base(base_url);
        }

        Ok(Self {
            client: Client::with_config(openai_config),
            model: config.model,
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl CompletionModel for OpenAIChatModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        debug!(model = %self.model, prompt_len = prompt.len(), "requesting completion");

        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| ModelError::Request(format!("failed to build message: {e}")))?;

        let mut request_builder = CreateChatCompletionRequestArgs::default();
        request_builder.model(&self.model).messages(vec![message.into()]);
        if let Some(temperature) = self.temperature {
            request_builder.temperature(temperature);
        }
        let request = request_builder
            .build()
            .map_err(|e| ModelError::Request(format!("failed to build request: {e}")))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            error!(model = %self.model, error = %e, "completion request failed");
            ModelError::Api(format!("OpenAI API error: {e}"))
        })?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ModelError::Api("empty completion response".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_gpt_35_turbo() {
        let config = OpenAIChatConfig::new("sk-test");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.base_url.is_none());
        assert!(config.temperature.is_none());
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let result = OpenAIChatModel::new(OpenAIChatConfig::new(""));
        assert!(matches!(result, Err(ModelError::Config(_))));
    }

    #[test]
    fn builder_overrides_are_applied() {
        let config = OpenAIChatConfig::new("sk-test")
            .with_model("gpt-4o-mini")
            .with_base_url("https://api.chatanywhere.tech/v1")
            .with_temperature(0.0);
        let model = OpenAIChatModel::new(config).unwrap();
        assert_eq!(model.name(), "gpt-4o-mini");
        assert_eq!(model.temperature, Some(0.0));
    }
}
