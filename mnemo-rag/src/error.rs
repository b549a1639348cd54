//! Error types for the `mnemo-rag` crate.

use thiserror::Error;

/// Errors that can occur in retrieval operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// A document source could not be loaded.
    #[error("Loader error ({path}): {message}")]
    LoaderError {
        /// The file or directory that failed to load.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the vector store backend.
    #[error("Vector store error ({backend}): {message}")]
    VectorStoreError {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// The named collection has never been persisted.
    #[error("Collection '{0}' does not exist")]
    CollectionNotFound(String),

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An error in the retrieval-QA chain orchestration.
    #[error("Chain error: {0}")]
    ChainError(String),

    /// An error propagated from the completion model.
    #[error(transparent)]
    ModelError(#[from] mnemo_model::ModelError),
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
