//! Gemini generateContent のリクエスト・レスポンス型
//!
//! レスポンスは ad hoc なフィールド探りではなく型付きでデコードし、
//! `classify` が固定の優先順位で `Reply` に畳み込む:
//! error → blockReason（候補テキストなし）→ 候補テキスト → Empty。
//! error と candidates が同時に載った曖昧な応答も常に error 側に倒れる。

use crate::llm::transport::Reply;
use serde::{Deserialize, Serialize};

/// メッセージの役割。Gemini API は assistant ではなく model を使う
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// 1 メッセージ分のテキスト断片
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// contents の 1 要素（role + parts）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part { text: text.into() }],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![Part { text: text.into() }],
        }
    }

    /// 最初の非空テキスト
    pub fn text(&self) -> Option<&str> {
        self.parts
            .iter()
            .map(|p| p.text.as_str())
            .find(|t| !t.is_empty())
    }
}

/// 生成リクエスト本体。contents は必ず role: user で終わる前提（組み立て側の不変条件）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    #[serde(
        rename = "generationConfig",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: u32,
}

impl GenerateRequest {
    pub fn new(contents: Vec<Content>) -> Self {
        Self {
            contents,
            generation_config: None,
        }
    }

    /// 出力トークン上限を付ける（プロキシ側で使用）
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.generation_config = Some(GenerationConfig { max_output_tokens });
        self
    }

    /// 末尾の user テキスト（echo トランスポートとログ用）
    pub fn trailing_user_text(&self) -> Option<&str> {
        self.contents
            .last()
            .filter(|c| c.role == Role::User)
            .and_then(Content::text)
    }
}

// --- レスポンス側。フィールドはどれも欠けうるので全て default で受ける

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default, rename = "promptFeedback")]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

/// 候補側の content。parts には text 以外（functionCall 等）も並びうるため
/// text は Option で受ける
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromptFeedback {
    #[serde(default, rename = "blockReason")]
    pub block_reason: Option<String>,
}

impl GenerateResponse {
    /// 最初の候補から最初の非空テキストを取り出す
    fn candidate_text(&self) -> Option<String> {
        self.candidates.first().and_then(|c| {
            c.content.as_ref().and_then(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .find(|t| !t.is_empty())
                    .map(|t| t.to_string())
            })
        })
    }

    /// 固定優先順位の分類（全域関数）
    pub fn classify(&self) -> Reply {
        if let Some(ref err) = self.error {
            let msg = if err.message.is_empty() {
                "Unknown error".to_string()
            } else {
                err.message.clone()
            };
            return Reply::ApiError(msg);
        }
        let text = self.candidate_text();
        if text.is_none() {
            if let Some(reason) = self
                .prompt_feedback
                .as_ref()
                .and_then(|fb| fb.block_reason.clone())
            {
                return Reply::Blocked(reason);
            }
        }
        match text {
            Some(t) => Reply::Text(t),
            None => Reply::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(body: &str) -> GenerateResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_classify_success() {
        let resp = decode(r#"{"candidates":[{"content":{"parts":[{"text":"hello"}]}}]}"#);
        assert_eq!(resp.classify(), Reply::Text("hello".to_string()));
    }

    #[test]
    fn test_classify_error_wins_over_candidates() {
        let resp = decode(
            r#"{"error":{"message":"quota exceeded"},"candidates":[{"content":{"parts":[{"text":"hi"}]}}]}"#,
        );
        assert_eq!(resp.classify(), Reply::ApiError("quota exceeded".to_string()));
    }

    #[test]
    fn test_classify_block_reason_without_candidates() {
        let resp = decode(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        assert_eq!(resp.classify(), Reply::Blocked("SAFETY".to_string()));
    }

    #[test]
    fn test_classify_candidate_text_wins_over_block_reason() {
        let resp = decode(
            r#"{"candidates":[{"content":{"parts":[{"text":"ok"}]}}],"promptFeedback":{"blockReason":"SAFETY"}}"#,
        );
        assert_eq!(resp.classify(), Reply::Text("ok".to_string()));
    }

    #[test]
    fn test_classify_empty_body() {
        let resp = decode("{}");
        assert_eq!(resp.classify(), Reply::Empty);
    }

    #[test]
    fn test_classify_candidates_without_text() {
        let resp = decode(r#"{"candidates":[{"content":{"parts":[{}]}}]}"#);
        assert_eq!(resp.classify(), Reply::Empty);
    }

    #[test]
    fn test_classify_skips_non_text_parts() {
        let resp = decode(
            r#"{"candidates":[{"content":{"parts":[{},{"text":""},{"text":"second"}]}}]}"#,
        );
        assert_eq!(resp.classify(), Reply::Text("second".to_string()));
    }

    #[test]
    fn test_classify_error_without_message() {
        let resp = decode(r#"{"error":{}}"#);
        assert_eq!(resp.classify(), Reply::ApiError("Unknown error".to_string()));
    }

    #[test]
    fn test_request_serializes_roles_lowercase() {
        let req = GenerateRequest::new(vec![Content::user("hi"), Content::model("hello")]);
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains(r#""role":"user""#));
        assert!(json.contains(r#""role":"model""#));
        assert!(!json.contains("generationConfig"));
    }

    #[test]
    fn test_request_with_max_output_tokens() {
        let req = GenerateRequest::new(vec![Content::user("hi")]).with_max_output_tokens(500);
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains(r#""generationConfig":{"maxOutputTokens":500}"#));
    }

    #[test]
    fn test_trailing_user_text() {
        let req = GenerateRequest::new(vec![Content::user("hi"), Content::model("hello")]);
        assert_eq!(req.trailing_user_text(), None);

        let req = GenerateRequest::new(vec![Content::model("hello"), Content::user("again")]);
        assert_eq!(req.trailing_user_text(), Some("again"));
    }
}
