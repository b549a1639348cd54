//! HTTP service exposing agent memory persistence and retrieval-augmented
//! query.
//!
//! Four operations: `/initialize` stores the provider credential,
//! `/persist` and `/persist/code` ingest memory sources into a per-agent
//! collection, `/query` answers a question against one. See
//! [`server::app_router`] for the route table.

pub mod protocol;
pub mod providers;
pub mod server;

pub use providers::{OpenAIProviderFactory, ProviderFactory};
pub use server::{AppState, ServerConfig, app_router, run_server};
