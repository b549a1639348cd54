//! Completion model integrations for the mnemo agent memory service.
//!
//! Defines the [`CompletionModel`] trait and an OpenAI-backed implementation.
//! The trait deliberately covers only single-prompt completion: the retrieval
//! chain builds one prompt and needs one answer back.

pub mod error;
pub mod openai;

pub use error::ModelError;
pub use openai::{OpenAIChatConfig, OpenAIChatModel};

use async_trait::async_trait;

/// A language model that turns a prompt into a completion.
///
/// Implementations wrap a specific provider behind a unified async interface.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// The model identifier, e.g. `gpt-3.5-turbo`.
    fn name(&self) -> &str;

    /// Generate a completion for the given prompt.
    async fn complete(&self, prompt: &str) -> Result<String, ModelError>;
}
