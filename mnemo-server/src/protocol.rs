//! Wire types for the mnemo HTTP API.

use mnemo_rag::Document;
use serde::{Deserialize, Serialize};

/// Body of `POST /query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Free-text question to answer.
    pub query: String,
    /// Collection identifier selecting the agent's memory.
    pub guid: String,
}

/// Body of `POST /persist` and `POST /persist/code`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistRequest {
    /// Source path: a JSON file for `/persist`, a directory for `/persist/code`.
    pub path: String,
    /// Collection identifier selecting the agent's memory.
    pub guid: String,
}

/// Body of `POST /initialize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeRequest {
    /// Provider credential held for the process lifetime.
    pub api_key: String,
}

/// Generic status reply for persist and initialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
}

/// Reply for `POST /query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// The original query text.
    pub query: String,
    /// The generated answer.
    pub result: String,
    /// Documents retrieval selected as context for the answer.
    pub source_documents: Vec<Document>,
}

/// Error reply carrying the underlying failure text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
