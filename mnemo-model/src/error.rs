//! Error types for the `mnemo-model` crate.

use thiserror::Error;

/// Errors that can occur when talking to a completion model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The model client was misconfigured.
    #[error("Model configuration error: {0}")]
    Config(String),

    /// A request could not be constructed.
    #[error("Model request error: {0}")]
    Request(String),

    /// The provider API rejected the call or returned an unusable response.
    #[error("Model API error: {0}")]
    Api(String),
}
