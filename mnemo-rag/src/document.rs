//! Data types for documents, stored records, and search results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A source document containing text content and loader-assigned metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Identifier for the document, stable across reloads of the same source.
    pub id: String,
    /// The text content of the document.
    pub text: String,
    /// Key-value metadata assigned by the loader (e.g. `source` path).
    pub metadata: HashMap<String, String>,
}

/// A [`Document`] paired with its embedding, as persisted by a vector store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredRecord {
    /// The source document.
    pub document: Document,
    /// The embedding vector for the document's text.
    pub embedding: Vec<f32>,
}

/// A retrieved [`Document`] paired with a relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved document.
    pub document: Document,
    /// The cosine similarity score (higher is more relevant).
    pub score: f32,
}
