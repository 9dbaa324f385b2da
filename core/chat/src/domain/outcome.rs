//! 送信 1 回の結果（判別共用体）
//!
//! どの失敗経路も表示文字列へ解決され、この境界より上へ伝播しない。

/// submit 1 回の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 空入力（送信なし・状態変化なし）
    Ignored,
    /// 応答テキストを表示し、履歴に追記済み
    Success(String),
    /// リモートサービスの構造化エラー
    ApiError(String),
    /// 安全方針による出力停止
    SafetyBlock(String),
    /// ネットワーク到達不能など（詳細はログ用に保持、表示は固定文言）
    TransportError(String),
    /// HTTP は成立したがテキストを取り出せなかった
    ExtractionFailure,
}

impl Outcome {
    /// ユーザーに表示する文字列。Ignored のみ表示なし
    pub fn display_message(&self) -> Option<String> {
        match self {
            Self::Ignored => None,
            Self::Success(text) => Some(text.clone()),
            Self::ApiError(msg) => Some(format!("API error: {}.", msg)),
            Self::SafetyBlock(reason) => Some(format!(
                "Your question was blocked for safety reasons. Reason: {}",
                reason
            )),
            Self::TransportError(_) => {
                Some("Connection error. Check your network or the relay server.".to_string())
            }
            Self::ExtractionFailure => {
                Some("Failed to generate a reply. Could not extract any text.".to_string())
            }
        }
    }

    /// ログの fields 用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ignored => "ignored",
            Self::Success(_) => "success",
            Self::ApiError(_) => "api_error",
            Self::SafetyBlock(_) => "safety_block",
            Self::TransportError(_) => "transport_error",
            Self::ExtractionFailure => "extraction_failure",
        }
    }
}
