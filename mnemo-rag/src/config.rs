//! Configuration for the retrieval-QA chain.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Configuration parameters for retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievalConfig {
    /// Number of top results to draw from vector search.
    pub top_k: usize,
    /// Minimum similarity score for results (results below this are dropped).
    ///
    /// Unbounded by default: the `top_k` nearest records are returned
    /// regardless of score sign. Cosine scores can be negative, so a
    /// threshold only makes sense as an explicit opt-in.
    pub similarity_threshold: f32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 4, similarity_threshold: f32::NEG_INFINITY }
    }
}

impl RetrievalConfig {
    /// Create a config with the given `top_k` and no similarity threshold.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if `top_k` is zero.
    pub fn with_top_k(top_k: usize) -> Result<Self> {
        if top_k == 0 {
            return Err(RagError::ConfigError("top_k must be greater than zero".to_string()));
        }
        Ok(Self { top_k, ..Self::default() })
    }
}
