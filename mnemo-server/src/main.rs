use mnemo_server::server::{ServerConfig, run_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut config = ServerConfig::default();
    if let Ok(host) = std::env::var("MNEMO_HOST") {
        config.host = host;
    }
    if let Some(port) = std::env::var("MNEMO_PORT").ok().and_then(|value| value.parse().ok()) {
        config.port = port;
    }
    if let Ok(store_root) = std::env::var("MNEMO_STORE_ROOT") {
        config.store_root = store_root.into();
    }

    run_server(config).await
}
