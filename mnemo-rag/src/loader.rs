//! Document loaders for agent memory sources.
//!
//! Two sources are supported: a named array field inside a JSON file
//! (structured memories) and a directory tree of text files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::info;
use walkdir::WalkDir;

use crate::document::Document;
use crate::error::{RagError, Result};

fn loader_error(path: &Path, message: impl Into<String>) -> RagError {
    RagError::LoaderError { path: path.display().to_string(), message: message.into() }
}

/// Loads one [`Document`] per element of a named top-level array field
/// inside a JSON file.
///
/// String elements are taken verbatim; other values are serialized back to
/// compact JSON so structured memory records survive as text.
pub struct JsonFieldLoader {
    path: PathBuf,
    field: String,
}

impl JsonFieldLoader {
    /// Create a loader for the given file and array field name.
    pub fn new(path: impl Into<PathBuf>, field: impl Into<String>) -> Self {
        Self { path: path.into(), field: field.into() }
    }

    /// Load the documents.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::LoaderError`] if the file is unreadable, is not
    /// valid JSON, or the field is missing or not an array.
    pub fn load(&self) -> Result<Vec<Document>> {
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| loader_error(&self.path, format!("failed to read file: {e}")))?;
        let value: Value = serde_json::from_str(&raw)
            .map_err(|e| loader_error(&self.path, format!("invalid JSON: {e}")))?;

        let items = value
            .get(&self.field)
            .ok_or_else(|| loader_error(&self.path, format!("field '{}' not found", self.field)))?
            .as_array()
            .ok_or_else(|| {
                loader_error(&self.path, format!("field '{}' is not an array", self.field))
            })?;

        let source = self.path.display().to_string();
        let documents: Vec<Document> = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let text = match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                let mut metadata = HashMap::new();
                metadata.insert("source".to_string(), source.clone());
                metadata.insert("seq_num".to_string(), (index + 1).to_string());
                Document { id: format!("{source}:{index}"), text, metadata }
            })
            .collect();

        info!(path = %source, count = documents.len(), "loaded documents from JSON field");
        Ok(documents)
    }
}

/// Loads one [`Document`] per matching file under a directory tree.
///
/// Files are matched by extension (`txt` by default) and visited in sorted
/// order so repeated loads are deterministic.
pub struct DirectoryLoader {
    path: PathBuf,
    extension: String,
}

impl DirectoryLoader {
    /// Create a loader over the given directory, matching `*.txt` files.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), extension: "txt".to_string() }
    }

    /// Match a different file extension (without the leading dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Load the documents.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::LoaderError`] if the path is not a directory or a
    /// matching file cannot be read.
    pub fn load(&self) -> Result<Vec<Document>> {
        if !self.path.is_dir() {
            return Err(loader_error(&self.path, "not a directory"));
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&self.path)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry.path().extension().is_some_and(|ext| ext == self.extension.as_str())
            })
            .map(|entry| entry.into_path())
            .collect();
        files.sort();

        let mut documents = Vec::with_capacity(files.len());
        for file in files {
            let text = std::fs::read_to_string(&file)
                .map_err(|e| loader_error(&file, format!("failed to read file: {e}")))?;
            let source = file.display().to_string();
            let mut metadata = HashMap::new();
            metadata.insert("source".to_string(), source.clone());
            documents.push(Document { id: source, text, metadata });
        }

        info!(path = %self.path.display(), count = documents.len(), "loaded documents from directory");
        Ok(documents)
    }
}
