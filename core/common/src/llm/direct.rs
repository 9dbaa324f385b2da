//! Gemini API を直接呼ぶトランスポート
//!
//! API キーは環境変数から読む。コードや設定ファイルへのキー埋め込みはしない。

use crate::error::Error;
use crate::llm::transport::{Reply, Transport};
use crate::llm::wire::{GenerateRequest, GenerateResponse};
use std::env;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini generateContent への直接トランスポート
pub struct DirectTransport {
    model: String,
    api_key: String,
}

impl DirectTransport {
    /// 環境変数 `api_key_env` からキーを読んで作成
    ///
    /// # Returns
    /// * `Ok(Self)` - トランスポート
    /// * `Err(Error)` - 環境変数が未設定
    pub fn new(model: impl Into<String>, api_key_env: &str) -> Result<Self, Error> {
        let api_key = env::var(api_key_env).map_err(|_| {
            Error::env(format!("{} environment variable is not set", api_key_env))
        })?;
        Ok(Self {
            model: model.into(),
            api_key,
        })
    }

    /// キーを直接渡して作成（テスト用）
    #[cfg(test)]
    fn with_key(model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            API_BASE, self.model, self.api_key
        )
    }
}

impl Transport for DirectTransport {
    fn name(&self) -> &str {
        "direct"
    }

    fn dispatch(&self, request: &GenerateRequest) -> Result<Reply, Error> {
        let body = serde_json::to_string(request)
            .map_err(|e| Error::json(format!("Failed to serialize request: {}", e)))?;

        let client = reqwest::blocking::Client::new();
        let response = client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        Ok(reply_from_body(
            status.is_success(),
            status.as_u16(),
            &response_text,
        ))
    }
}

/// 本文を分類する。API はエラー時も 4xx/5xx の本文に error 記述子を載せるため、
/// ステータスに関係なくまず型付きデコードを試み、壊れた本文だけステータスで救う。
fn reply_from_body(is_success: bool, status: u16, body: &str) -> Reply {
    match serde_json::from_str::<GenerateResponse>(body) {
        Ok(resp) => resp.classify(),
        Err(_) if !is_success => Reply::ApiError(format!("HTTP {}", status)),
        Err(_) => Reply::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_contains_model_and_key() {
        let t = DirectTransport::with_key("gemini-2.5-flash", "test-key");
        let url = t.endpoint();
        assert!(url.contains("/gemini-2.5-flash:generateContent"));
        assert!(url.ends_with("key=test-key"));
        assert_eq!(t.name(), "direct");
    }

    #[test]
    fn test_reply_from_body_success() {
        let reply = reply_from_body(
            true,
            200,
            r#"{"candidates":[{"content":{"parts":[{"text":"hi"}]}}]}"#,
        );
        assert_eq!(reply, Reply::Text("hi".to_string()));
    }

    #[test]
    fn test_reply_from_body_error_descriptor_on_4xx() {
        let reply = reply_from_body(false, 429, r#"{"error":{"message":"rate limited"}}"#);
        assert_eq!(reply, Reply::ApiError("rate limited".to_string()));
    }

    #[test]
    fn test_reply_from_body_unparsable_4xx_falls_back_to_status() {
        let reply = reply_from_body(false, 503, "upstream overloaded");
        assert_eq!(reply, Reply::ApiError("HTTP 503".to_string()));
    }

    #[test]
    fn test_reply_from_body_unparsable_2xx_is_empty() {
        let reply = reply_from_body(true, 200, "not json");
        assert_eq!(reply, Reply::Empty);
    }
}
