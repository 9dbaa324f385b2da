//! Echo トランスポート
//!
//! 実際に API を呼ばず、末尾の user テキストをそのまま返す。
//! オフラインでの動作確認やデバッグ用。

use crate::error::Error;
use crate::llm::transport::{Reply, Transport};
use crate::llm::wire::GenerateRequest;

/// 末尾の user テキストを返すだけのトランスポート
#[derive(Debug, Clone, Default)]
pub struct EchoTransport;

impl EchoTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for EchoTransport {
    fn name(&self) -> &str {
        "echo"
    }

    fn dispatch(&self, request: &GenerateRequest) -> Result<Reply, Error> {
        match request.trailing_user_text() {
            Some(text) => Ok(Reply::Text(format!("[echo] {}", text))),
            None => Ok(Reply::Empty),
        }
    }
}
