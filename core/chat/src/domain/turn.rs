//! 1 往復の会話（Turn）と一覧表示用サマリ

use serde::{Deserialize, Serialize};

/// 完了した 1 往復（ユーザー入力と AI 応答の組）。作成後は不変
///
/// 正常系では両側が埋まるが、手で編集された履歴ファイルから片側が
/// 欠けた状態で読み込まれうるため、派生ビュー側で is_complete により除外する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub ai: String,
}

impl Turn {
    pub fn new(user: impl Into<String>, ai: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            ai: ai.into(),
        }
    }

    /// 両側が空でない（派生ビューに含めてよい）
    pub fn is_complete(&self) -> bool {
        !self.user.trim().is_empty() && !self.ai.trim().is_empty()
    }
}

/// サイドバー表示用ラベルの最大文字数
pub const SUMMARY_MAX_CHARS: usize = 30;

/// 一覧表示用のサマリ（フィルタ済みビュー内の位置とラベル）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSummary {
    pub index: usize,
    pub label: String,
}

impl TurnSummary {
    pub fn of(index: usize, turn: &Turn) -> Self {
        Self {
            index,
            label: truncate_label(&turn.user),
        }
    }
}

/// 文字数（バイト数ではない）で切り詰める
fn truncate_label(source: &str) -> String {
    if source.chars().count() <= SUMMARY_MAX_CHARS {
        return source.to_string();
    }
    source.chars().take(SUMMARY_MAX_CHARS).collect::<String>() + "..."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_complete() {
        assert!(Turn::new("hi", "hello").is_complete());
        assert!(!Turn::new("hi", "").is_complete());
        assert!(!Turn::new("   ", "hello").is_complete());
    }

    #[test]
    fn test_turn_serde_round_trip() {
        let turn = Turn::new("hi", "hello");
        let json = serde_json::to_string(&turn).unwrap();
        assert_eq!(json, r#"{"user":"hi","ai":"hello"}"#);
        let back: Turn = serde_json::from_str(&json).unwrap();
        assert_eq!(back, turn);
    }

    #[test]
    fn test_missing_side_deserializes_as_empty() {
        let turn: Turn = serde_json::from_str(r#"{"user":"hi"}"#).unwrap();
        assert_eq!(turn.ai, "");
        assert!(!turn.is_complete());
    }

    #[test]
    fn test_summary_truncates_long_labels() {
        let turn = Turn::new("a".repeat(40), "ok");
        let summary = TurnSummary::of(0, &turn);
        assert_eq!(summary.label, format!("{}...", "a".repeat(30)));
    }

    #[test]
    fn test_summary_keeps_short_labels() {
        let turn = Turn::new("short question", "ok");
        assert_eq!(TurnSummary::of(2, &turn).label, "short question");
    }

    #[test]
    fn test_summary_counts_chars_not_bytes() {
        let turn = Turn::new("á".repeat(30), "ok");
        assert_eq!(TurnSummary::of(0, &turn).label, "á".repeat(30));
    }
}
