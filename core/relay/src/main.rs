//! relay: API キーをサーバ側に隠す 1 ルートのプロキシ
//!
//! クライアントは { contents } を送るだけで、鍵は GEMINI_API_KEY から
//! このプロセスだけが読む。

mod routes;

use anyhow::Context;
use common::adapter::{FileJsonLog, StdFileSystem};
use common::config::{data_dir, DEFAULT_API_KEY_ENV, DEFAULT_MODEL};
use common::ports::outbound::{FileSystem, Log, LogLevel, LogRecord};
use routes::AppState;
use std::sync::Arc;

const DEFAULT_ADDR: &str = "127.0.0.1:8787";
const LOG_FILENAME: &str = "relay.log.jsonl";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let addr = env_or("RELAY_ADDR", DEFAULT_ADDR);
    let model = env_or("GEMINI_MODEL", DEFAULT_MODEL);

    // 鍵の有無は起動時に確かめる（最初のリクエストで気づくより早い）
    if std::env::var(DEFAULT_API_KEY_ENV)
        .map(|v| v.trim().is_empty())
        .unwrap_or(true)
    {
        anyhow::bail!("{} environment variable is not set", DEFAULT_API_KEY_ENV);
    }

    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let log: Arc<dyn Log> = Arc::new(FileJsonLog::new(fs, data_dir().join(LOG_FILENAME)));

    let state = AppState {
        model: model.clone(),
        api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        log: Arc::clone(&log),
    };
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    let _ = log.log(
        &LogRecord::new(LogLevel::Info, "relay started")
            .layer("relay")
            .kind("lifecycle")
            .field("addr", serde_json::json!(addr))
            .field("model", serde_json::json!(model)),
    );
    eprintln!("relay listening on {} (model: {})", addr, model);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    let _ = log.log(
        &LogRecord::new(LogLevel::Info, "relay stopped")
            .layer("relay")
            .kind("lifecycle"),
    );
    Ok(())
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
