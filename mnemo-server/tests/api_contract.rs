//! Contract tests for the HTTP surface, run against a real listener with
//! deterministic fake providers in place of the OpenAI clients.

use std::sync::Arc;

use async_trait::async_trait;
use mnemo_model::{CompletionModel, ModelError};
use mnemo_rag::EmbeddingProvider;
use mnemo_server::{AppState, ProviderFactory, app_router};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Maps text onto a byte-frequency vector: identical text embeds identically.
struct ByteFrequencyEmbeddings;

#[async_trait]
impl EmbeddingProvider for ByteFrequencyEmbeddings {
    async fn embed(&self, text: &str) -> mnemo_rag::Result<Vec<f32>> {
        let mut v = vec![0.0f32; 8];
        for (i, b) in text.bytes().enumerate() {
            v[i % 8] += b as f32;
        }
        Ok(v)
    }

    fn dimensions(&self) -> usize {
        8
    }
}

struct StaticModel;

#[async_trait]
impl CompletionModel for StaticModel {
    fn name(&self) -> &str {
        "static"
    }

    async fn complete(&self, _prompt: &str) -> Result<String, ModelError> {
        Ok("stub answer".to_string())
    }
}

struct FakeFactory;

impl ProviderFactory for FakeFactory {
    fn embedding_provider(
        &self,
        _api_key: &str,
    ) -> mnemo_rag::Result<Arc<dyn EmbeddingProvider>> {
        Ok(Arc::new(ByteFrequencyEmbeddings))
    }

    fn completion_model(&self, _api_key: &str) -> Result<Arc<dyn CompletionModel>, ModelError> {
        Ok(Arc::new(StaticModel))
    }
}

async fn spawn_server() -> (String, TempDir, tokio::task::JoinHandle<()>) {
    let store_root = tempfile::tempdir().expect("store root");
    let state = AppState::new(store_root.path(), Arc::new(FakeFactory));
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server run");
    });

    (format!("http://{}", addr), store_root, handle)
}

async fn initialize(client: &reqwest::Client, base: &str) {
    let response = client
        .post(format!("{base}/initialize"))
        .json(&json!({"apiKey": "sk-test"}))
        .send()
        .await
        .expect("initialize response");
    assert!(response.status().is_success());
}

fn write_memory_file(dir: &TempDir, memories: Value) -> String {
    let path = dir.path().join("Memory.json");
    std::fs::write(&path, json!({"actionMemories": memories}).to_string()).expect("memory file");
    path.display().to_string()
}

#[tokio::test]
async fn health_reports_ok() {
    let (base, _store, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client.get(format!("{base}/health")).send().await.expect("health response");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("health json");
    assert_eq!(body.get("status").and_then(Value::as_str), Some("ok"));

    handle.abort();
}

#[tokio::test]
async fn persist_then_query_draws_sources_from_persisted_content() {
    let (base, _store, handle) = spawn_server().await;
    let client = reqwest::Client::new();
    initialize(&client, &base).await;

    let memory_dir = tempfile::tempdir().unwrap();
    let memory_path = write_memory_file(
        &memory_dir,
        json!(["went to the well for water", "fed the player", "danced at the festival"]),
    );

    let persist = client
        .post(format!("{base}/persist"))
        .json(&json!({"path": memory_path, "guid": "agent-1"}))
        .send()
        .await
        .expect("persist response");
    assert!(persist.status().is_success());
    let status: Value = persist.json().await.expect("persist json");
    assert_eq!(
        status.get("message").and_then(Value::as_str),
        Some("Persist memory completed successfully.")
    );

    let query = client
        .post(format!("{base}/query"))
        .json(&json!({"query": "what did you do today?", "guid": "agent-1"}))
        .send()
        .await
        .expect("query response");
    assert!(query.status().is_success());

    let body: Value = query.json().await.expect("query json");
    assert_eq!(body.get("result").and_then(Value::as_str), Some("stub answer"));

    let sources = body
        .get("source_documents")
        .and_then(Value::as_array)
        .expect("source_documents field");
    assert!(!sources.is_empty());
    let persisted = ["went to the well for water", "fed the player", "danced at the festival"];
    for source in sources {
        let text = source.get("text").and_then(Value::as_str).expect("source text");
        assert!(persisted.contains(&text), "unexpected source: {text}");
    }

    handle.abort();
}

#[tokio::test]
async fn query_unknown_collection_is_an_error_not_an_empty_answer() {
    let (base, _store, handle) = spawn_server().await;
    let client = reqwest::Client::new();
    initialize(&client, &base).await;

    let response = client
        .post(format!("{base}/query"))
        .json(&json!({"query": "anything?", "guid": "never-persisted"}))
        .send()
        .await
        .expect("query response");

    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("error json");
    let error = body.get("error").and_then(Value::as_str).expect("error field");
    assert!(error.contains("never-persisted"));

    handle.abort();
}

#[tokio::test]
async fn credentialed_calls_fail_before_initialize() {
    let (base, _store, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let memory_dir = tempfile::tempdir().unwrap();
    let memory_path = write_memory_file(&memory_dir, json!(["a memory"]));

    let persist = client
        .post(format!("{base}/persist"))
        .json(&json!({"path": memory_path, "guid": "agent-1"}))
        .send()
        .await
        .expect("persist response");
    assert_eq!(persist.status(), reqwest::StatusCode::UNAUTHORIZED);

    // After initialize the same call goes through.
    initialize(&client, &base).await;
    let persist = client
        .post(format!("{base}/persist"))
        .json(&json!({"path": memory_path, "guid": "agent-1"}))
        .send()
        .await
        .expect("persist response");
    assert!(persist.status().is_success());

    handle.abort();
}

#[tokio::test]
async fn structured_and_code_persists_produce_non_interfering_collections() {
    let (base, _store, handle) = spawn_server().await;
    let client = reqwest::Client::new();
    initialize(&client, &base).await;

    let memory_dir = tempfile::tempdir().unwrap();
    let memory_path = write_memory_file(&memory_dir, json!(["structured memory record"]));

    let code_dir = tempfile::tempdir().unwrap();
    std::fs::write(code_dir.path().join("note.txt"), "code directory note").unwrap();

    let persist = client
        .post(format!("{base}/persist"))
        .json(&json!({"path": memory_path, "guid": "agent-structured"}))
        .send()
        .await
        .expect("persist response");
    assert!(persist.status().is_success());

    let persist_code = client
        .post(format!("{base}/persist/code"))
        .json(&json!({"path": code_dir.path().display().to_string(), "guid": "agent-code"}))
        .send()
        .await
        .expect("persist/code response");
    assert!(persist_code.status().is_success());

    for (guid, expected) in
        [("agent-structured", "structured memory record"), ("agent-code", "code directory note")]
    {
        let query = client
            .post(format!("{base}/query"))
            .json(&json!({"query": "what do you remember?", "guid": guid}))
            .send()
            .await
            .expect("query response");
        assert!(query.status().is_success());

        let body: Value = query.json().await.expect("query json");
        let sources = body
            .get("source_documents")
            .and_then(Value::as_array)
            .expect("source_documents field");
        assert_eq!(sources.len(), 1, "collection {guid} leaked records");
        assert_eq!(sources[0].get("text").and_then(Value::as_str), Some(expected));
    }

    handle.abort();
}
