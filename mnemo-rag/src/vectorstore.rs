//! Vector store trait for persisting and searching embeddings.

use async_trait::async_trait;

use crate::document::{SearchResult, StoredRecord};
use crate::error::Result;

/// A storage backend for embedded documents with similarity search.
///
/// Collections follow a create-on-persist lifecycle: the first upsert into a
/// name creates it, and searching a name that was never persisted is an error.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Whether the named collection has been persisted.
    async fn collection_exists(&self, name: &str) -> Result<bool>;

    /// Insert records into a collection, creating it if absent.
    ///
    /// Records whose document ID already exists in the collection are
    /// replaced; all others are appended.
    async fn upsert(&self, collection: &str, records: &[StoredRecord]) -> Result<()>;

    /// Search for the `top_k` records most similar to the given embedding.
    ///
    /// Returns results ordered by descending similarity score.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::CollectionNotFound`](crate::RagError::CollectionNotFound)
    /// if the collection was never persisted.
    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>>;
}
