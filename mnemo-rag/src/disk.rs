//! Disk-backed vector store persisting one directory per collection.
//!
//! Each collection lives at `<root>/<name>/records.json`, a JSON array of
//! [`StoredRecord`]s. Every operation reads or rewrites the file directly;
//! the filesystem is the only state, so separately constructed stores over
//! the same root see each other's writes.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use crate::document::{SearchResult, StoredRecord};
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// File name holding a collection's records inside its directory.
const RECORDS_FILE: &str = "records.json";

/// A [`VectorStore`] backed by per-collection JSON files on disk.
#[derive(Debug, Clone)]
pub struct DiskVectorStore {
    root: PathBuf,
}

impl DiskVectorStore {
    /// Create a store rooted at the given directory.
    ///
    /// The directory is created lazily on first upsert.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory under which collections are stored.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn records_path(&self, collection: &str) -> PathBuf {
        self.root.join(collection).join(RECORDS_FILE)
    }

    fn backend_error(message: impl Into<String>) -> RagError {
        RagError::VectorStoreError { backend: "disk".into(), message: message.into() }
    }

    fn load_records(&self, collection: &str) -> Result<Vec<StoredRecord>> {
        let path = self.records_path(collection);
        if !path.exists() {
            return Err(RagError::CollectionNotFound(collection.to_string()));
        }
        let raw = std::fs::read_to_string(&path)
            .map_err(|e| Self::backend_error(format!("failed to read {}: {e}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| Self::backend_error(format!("corrupt records in {}: {e}", path.display())))
    }

    fn write_records(&self, collection: &str, records: &[StoredRecord]) -> Result<()> {
        let dir = self.root.join(collection);
        std::fs::create_dir_all(&dir)
            .map_err(|e| Self::backend_error(format!("failed to create {}: {e}", dir.display())))?;
        let raw = serde_json::to_string(records)
            .map_err(|e| Self::backend_error(format!("failed to serialize records: {e}")))?;
        let path = self.records_path(collection);
        std::fs::write(&path, raw)
            .map_err(|e| Self::backend_error(format!("failed to write {}: {e}", path.display())))
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorStore for DiskVectorStore {
    async fn collection_exists(&self, name: &str) -> Result<bool> {
        Ok(self.records_path(name).exists())
    }

    async fn upsert(&self, collection: &str, records: &[StoredRecord]) -> Result<()> {
        let mut existing = match self.load_records(collection) {
            Ok(records) => records,
            Err(RagError::CollectionNotFound(_)) => Vec::new(),
            Err(e) => return Err(e),
        };

        for record in records {
            match existing.iter_mut().find(|r| r.document.id == record.document.id) {
                Some(slot) => *slot = record.clone(),
                None => existing.push(record.clone()),
            }
        }

        self.write_records(collection, &existing)?;
        info!(collection, added = records.len(), total = existing.len(), "persisted records");
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>> {
        let records = self.load_records(collection)?;

        let mut scored: Vec<SearchResult> = records
            .into_iter()
            .map(|record| {
                let score = cosine_similarity(&record.embedding, embedding);
                SearchResult { document: record.document, score }
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(top_k);
        Ok(scored)
    }
}
