//! Retrieval-QA chain: embed the query, search the store, stuff the
//! retrieved documents into a completion prompt, return the answer with
//! its sources.

use std::sync::Arc;

use mnemo_model::CompletionModel;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::RetrievalConfig;
use crate::document::{Document, SearchResult, StoredRecord};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// The answer to a retrieval-augmented query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryOutcome {
    /// The original query text.
    pub query: String,
    /// The generated answer.
    pub result: String,
    /// The documents retrieval selected as context for the answer.
    pub source_documents: Vec<Document>,
}

/// Embed a batch of documents and upsert them into a collection.
///
/// Returns the number of records written. The collection is created on
/// first persist.
pub async fn ingest_documents(
    embeddings: &dyn EmbeddingProvider,
    store: &dyn VectorStore,
    collection: &str,
    documents: &[Document],
) -> Result<usize> {
    if documents.is_empty() {
        info!(collection, count = 0, "nothing to ingest");
        return Ok(0);
    }

    let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
    let vectors = embeddings.embed_batch(&texts).await.map_err(|e| {
        error!(collection, error = %e, "embedding failed during ingestion");
        RagError::ChainError(format!("embedding failed during ingestion: {e}"))
    })?;

    let records: Vec<StoredRecord> = documents
        .iter()
        .cloned()
        .zip(vectors)
        .map(|(document, embedding)| StoredRecord { document, embedding })
        .collect();

    store.upsert(collection, &records).await?;
    info!(collection, count = records.len(), "ingested documents");
    Ok(records.len())
}

/// "Stuff" prompt: instruction header, retrieved context, then the question.
fn stuff_prompt(query: &str, results: &[SearchResult]) -> String {
    let mut prompt = String::from(
        "Use the following pieces of context to answer the question at the end. \
         If you don't know the answer, just say that you don't know, don't try \
         to make up an answer.\n\n",
    );
    for result in results {
        prompt.push_str(&result.document.text);
        prompt.push_str("\n\n");
    }
    prompt.push_str("Question: ");
    prompt.push_str(query);
    prompt.push_str("\nHelpful Answer:");
    prompt
}

/// The retrieval-QA chain.
///
/// Composes an [`EmbeddingProvider`], a [`VectorStore`], and a
/// [`CompletionModel`]. Construct one via [`RetrievalQa::builder()`].
pub struct RetrievalQa {
    config: RetrievalConfig,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStore>,
    model: Arc<dyn CompletionModel>,
}

impl RetrievalQa {
    /// Create a new [`RetrievalQaBuilder`].
    pub fn builder() -> RetrievalQaBuilder {
        RetrievalQaBuilder::default()
    }

    /// Answer a query against a collection.
    ///
    /// Embeds the query, searches the collection for the configured `top_k`
    /// results, stuffs them into a prompt, and asks the completion model.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::CollectionNotFound`] if the collection was never
    /// persisted, and [`RagError::ChainError`] if embedding or completion
    /// fails.
    pub async fn answer(&self, collection: &str, query: &str) -> Result<QueryOutcome> {
        if !self.vector_store.collection_exists(collection).await? {
            return Err(RagError::CollectionNotFound(collection.to_string()));
        }

        let query_embedding = self.embedding_provider.embed(query).await.map_err(|e| {
            error!(error = %e, "query embedding failed");
            RagError::ChainError(format!("query embedding failed: {e}"))
        })?;

        let results = self
            .vector_store
            .search(collection, &query_embedding, self.config.top_k)
            .await?
            .into_iter()
            .filter(|r| r.score >= self.config.similarity_threshold)
            .collect::<Vec<_>>();

        let prompt = stuff_prompt(query, &results);
        let result = self.model.complete(&prompt).await.map_err(|e| {
            error!(model = self.model.name(), error = %e, "completion failed");
            RagError::ChainError(format!("completion failed: {e}"))
        })?;

        info!(collection, sources = results.len(), "query answered");

        Ok(QueryOutcome {
            query: query.to_string(),
            result,
            source_documents: results.into_iter().map(|r| r.document).collect(),
        })
    }
}

/// Builder for constructing a [`RetrievalQa`] chain.
///
/// All fields except `config` are required; `config` falls back to
/// [`RetrievalConfig::default()`].
#[derive(Default)]
pub struct RetrievalQaBuilder {
    config: Option<RetrievalConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    vector_store: Option<Arc<dyn VectorStore>>,
    model: Option<Arc<dyn CompletionModel>>,
}

impl RetrievalQaBuilder {
    /// Set the retrieval configuration.
    pub fn config(mut self, config: RetrievalConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the vector store backend.
    pub fn vector_store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.vector_store = Some(store);
        self
    }

    /// Set the completion model.
    pub fn model(mut self, model: Arc<dyn CompletionModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Build the [`RetrievalQa`] chain, validating required fields.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if a required field is missing.
    pub fn build(self) -> Result<RetrievalQa> {
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| RagError::ConfigError("embedding_provider is required".to_string()))?;
        let vector_store = self
            .vector_store
            .ok_or_else(|| RagError::ConfigError("vector_store is required".to_string()))?;
        let model =
            self.model.ok_or_else(|| RagError::ConfigError("model is required".to_string()))?;

        Ok(RetrievalQa {
            config: self.config.unwrap_or_default(),
            embedding_provider,
            vector_store,
            model,
        })
    }
}
