//! Retrieval plumbing for the mnemo agent memory service.
//!
//! This crate covers the path from raw memory sources to an answered
//! question:
//!
//! - [`loader`] — turn a JSON field or a directory of text files into
//!   [`Document`]s
//! - [`embedding`] / [`openai`] — generate vector embeddings
//! - [`vectorstore`] / [`disk`] — persist embeddings per collection and
//!   search them by cosine similarity
//! - [`chain`] — the retrieval-QA chain that stuffs retrieved documents
//!   into a completion prompt

pub mod chain;
pub mod config;
pub mod disk;
pub mod document;
pub mod embedding;
pub mod error;
pub mod loader;
pub mod openai;
pub mod vectorstore;

pub use chain::{QueryOutcome, RetrievalQa, RetrievalQaBuilder, ingest_documents};
pub use config::RetrievalConfig;
pub use disk::DiskVectorStore;
pub use document::{Document, SearchResult, StoredRecord};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use loader::{DirectoryLoader, JsonFieldLoader};
pub use openai::OpenAIEmbeddingProvider;
pub use vectorstore::VectorStore;
