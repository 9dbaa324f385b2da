//! POST /api/chat — { contents } を Gemini へ中継して { text } / { error } を返す
//!
//! 契約: 成功は 2xx { text }、それ以外はすべて非 2xx { error }。
//! パス以外のメソッドはルーターが 405 を返す。

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use common::error::Error;
use common::llm::{Content, DirectTransport, GenerateRequest, Reply, Transport};
use common::ports::outbound::{Log, LogLevel, LogRecord};
use serde::Deserialize;
use std::sync::Arc;

/// 中継経由の応答に適用する出力トークン上限
pub const MAX_OUTPUT_TOKENS: u32 = 500;

/// ハンドラ共有状態
#[derive(Clone)]
pub struct AppState {
    pub model: String,
    pub api_key_env: String,
    pub log: Arc<dyn Log>,
}

/// 中継リクエスト（クライアントが送る contents そのもの）
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub contents: Vec<Content>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .with_state(state)
}

async fn chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Response {
    let contents_len = request.contents.len();
    let outcome = forward(&state, request.contents).await;

    if let Err(ref e) = outcome {
        // クライアントには一般的な文言を返し、詳細はログにのみ残す
        let _ = state.log.log(
            &LogRecord::new(LogLevel::Warn, "upstream request failed")
                .layer("relay")
                .kind("error")
                .field("error", serde_json::json!(e.to_string())),
        );
    }

    let (status, body) = upstream_to_http(outcome);
    let _ = state.log.log(
        &LogRecord::new(LogLevel::Info, "chat relayed")
            .layer("relay")
            .kind("exchange")
            .field("contents", serde_json::json!(contents_len))
            .field("status", serde_json::json!(status.as_u16())),
    );
    (status, Json(body)).into_response()
}

/// ブロッキングのトランスポートを spawn_blocking 経由で呼ぶ
async fn forward(state: &AppState, contents: Vec<Content>) -> Result<Reply, Error> {
    let transport = DirectTransport::new(&state.model, &state.api_key_env)?;
    let request = GenerateRequest::new(contents).with_max_output_tokens(MAX_OUTPUT_TOKENS);
    tokio::task::spawn_blocking(move || transport.dispatch(&request))
        .await
        .map_err(|e| Error::http(format!("Relay task failed: {}", e)))?
}

/// 上流の結果をプロキシ契約へ写す。鍵や内部事情はエラーメッセージに出さない
fn upstream_to_http(outcome: Result<Reply, Error>) -> (StatusCode, serde_json::Value) {
    match outcome {
        Ok(Reply::Text(text)) => (StatusCode::OK, serde_json::json!({ "text": text })),
        Ok(Reply::ApiError(msg)) => {
            (StatusCode::BAD_GATEWAY, serde_json::json!({ "error": msg }))
        }
        Ok(Reply::Blocked(reason)) => (
            StatusCode::BAD_GATEWAY,
            serde_json::json!({
                "error": format!("Blocked for safety reasons: {}", reason)
            }),
        ),
        Ok(Reply::Empty) => (
            StatusCode::BAD_GATEWAY,
            serde_json::json!({ "error": "No text in upstream response." }),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            serde_json::json!({ "error": "Server error. Try again later." }),
        ),
    }
}
