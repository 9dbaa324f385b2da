//! relay 経由のトランスポート
//!
//! クライアントはキーを持たず、`{ contents }` をそのまま relay に渡す。
//! 契約: 2xx は `{ text }`、非 2xx は本文の形に関係なく失敗として扱う。

use crate::error::Error;
use crate::llm::transport::{Reply, Transport};
use crate::llm::wire::GenerateRequest;
use serde::Deserialize;

/// relay の固定パス
pub const PROXY_CHAT_PATH: &str = "/api/chat";

/// relay（`POST {base_url}/api/chat`）へのトランスポート
pub struct ProxyTransport {
    base_url: String,
}

#[derive(Debug, Default, Deserialize)]
struct ProxyBody {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ProxyTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), PROXY_CHAT_PATH)
    }
}

impl Transport for ProxyTransport {
    fn name(&self) -> &str {
        "proxy"
    }

    fn dispatch(&self, request: &GenerateRequest) -> Result<Reply, Error> {
        let client = reqwest::blocking::Client::new();
        let response = client
            .post(self.endpoint())
            .json(request)
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        Ok(reply_from_body(
            status.is_success(),
            status.as_u16(),
            &body,
        ))
    }
}

fn reply_from_body(is_success: bool, status: u16, body: &str) -> Reply {
    let parsed: ProxyBody = serde_json::from_str(body).unwrap_or_default();
    if is_success {
        match parsed.text {
            Some(text) if !text.is_empty() => Reply::Text(text),
            _ => Reply::Empty,
        }
    } else {
        match parsed.error {
            Some(error) if !error.is_empty() => Reply::ApiError(error),
            _ => Reply::ApiError(format!("HTTP {}", status)),
        }
    }
}
