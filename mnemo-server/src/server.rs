//! Axum server wiring the four memory operations to the retrieval crates.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use mnemo_model::ModelError;
use mnemo_rag::{
    DirectoryLoader, DiskVectorStore, Document, JsonFieldLoader, RagError, RetrievalConfig,
    RetrievalQa, ingest_documents,
};
use serde_json::json;
use tokio::sync::RwLock;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::protocol::{
    ErrorResponse, InitializeRequest, PersistRequest, QueryRequest, QueryResponse, StatusResponse,
};
use crate::providers::{OpenAIProviderFactory, ProviderFactory};

/// JSON field `/persist` reads memory records from.
const MEMORY_FIELD: &str = "actionMemories";

/// Shared handler state: the store root, the held credential, and the
/// provider construction seam.
#[derive(Clone)]
pub struct AppState {
    store_root: PathBuf,
    credential: Arc<RwLock<Option<String>>>,
    factory: Arc<dyn ProviderFactory>,
}

impl AppState {
    /// Create state over the given vector-store root and provider factory.
    pub fn new(store_root: impl Into<PathBuf>, factory: Arc<dyn ProviderFactory>) -> Self {
        Self { store_root: store_root.into(), credential: Arc::new(RwLock::new(None)), factory }
    }

    /// Seed the credential at startup (e.g. from the environment).
    pub async fn set_credential(&self, api_key: String) {
        *self.credential.write().await = Some(api_key);
    }

    /// The credential set by `/initialize` (or seeded at startup), if any.
    pub async fn credential(&self) -> Option<String> {
        self.credential.read().await.clone()
    }

    /// The directory collections are persisted under.
    pub fn store_root(&self) -> &PathBuf {
        &self.store_root
    }
}

/// Server bind address and storage location.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Root directory for per-agent vector collections.
    pub store_root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            store_root: PathBuf::from("./vector_store"),
        }
    }
}

/// A request failure mapped onto an HTTP status.
///
/// No retries or recovery; the underlying error text passes through verbatim.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "API key not set; call /initialize first".to_string(),
        }
    }
}

impl From<RagError> for ApiError {
    fn from(err: RagError) -> Self {
        let status = match &err {
            RagError::CollectionNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self { status, message: err.to_string() }
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: err.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(status = %self.status, message = %self.message, "request failed");
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}

/// Build the application router.
pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/query", post(query))
        .route("/persist", post(persist_memory))
        .route("/persist/code", post(persist_code))
        .route("/initialize", post(initialize))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Bind and serve until the process exits.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::new(&config.store_root, Arc::new(OpenAIProviderFactory::default()));
    if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
        state.set_credential(api_key).await;
    }

    let app = app_router(state);
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| "invalid host/port for mnemo server")?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("mnemo-server listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok", "service": "mnemo-server"}))
}

async fn initialize(
    State(state): State<AppState>,
    Json(request): Json<InitializeRequest>,
) -> Json<StatusResponse> {
    state.set_credential(request.api_key).await;
    info!("API key initialized");
    Json(StatusResponse { message: "OpenAI api key set successfully.".to_string() })
}

async fn query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    let api_key = state.credential().await.ok_or_else(ApiError::unauthorized)?;

    let chain = RetrievalQa::builder()
        .config(RetrievalConfig::default())
        .embedding_provider(state.factory.embedding_provider(&api_key)?)
        .vector_store(Arc::new(DiskVectorStore::new(state.store_root())))
        .model(state.factory.completion_model(&api_key)?)
        .build()?;

    let outcome = chain.answer(&request.guid, &request.query).await?;
    Ok(Json(QueryResponse {
        query: outcome.query,
        result: outcome.result,
        source_documents: outcome.source_documents,
    }))
}

async fn persist_memory(
    State(state): State<AppState>,
    Json(request): Json<PersistRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    info!(path = %request.path, guid = %request.guid, "loading memory");
    let documents = JsonFieldLoader::new(&request.path, MEMORY_FIELD).load()?;
    ingest(&state, &request.guid, documents).await?;
    Ok(Json(StatusResponse { message: "Persist memory completed successfully.".to_string() }))
}

async fn persist_code(
    State(state): State<AppState>,
    Json(request): Json<PersistRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    info!(path = %request.path, guid = %request.guid, "loading code memory");
    let documents = DirectoryLoader::new(&request.path).load()?;
    ingest(&state, &request.guid, documents).await?;
    Ok(Json(StatusResponse { message: "Persist memory completed successfully.".to_string() }))
}

async fn ingest(state: &AppState, guid: &str, documents: Vec<Document>) -> Result<usize, ApiError> {
    let api_key = state.credential().await.ok_or_else(ApiError::unauthorized)?;
    let embeddings = state.factory.embedding_provider(&api_key)?;
    let store = DiskVectorStore::new(state.store_root());
    Ok(ingest_documents(embeddings.as_ref(), &store, guid, &documents).await?)
}
