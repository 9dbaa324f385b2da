//! 会話履歴（Conversation Store のドメイン側）
//!
//! 挿入順の Turn 列を保持し、外向きコンテキストの組み立てと表示用ビューの
//! 導出を担う。コーディネータから見ると追記専用で、失敗した交換は追記しない。
//! 永続化は HistoryStorage ポート側の責務。

use crate::domain::turn::{Turn, TurnSummary};
use common::llm::Content;

/// 会話履歴
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// 永続化済みの列から復元する
    pub fn from_turns(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// 完全な Turn のみ（すべての派生ビューの土台）
    fn complete_turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter().filter(|t| t.is_complete())
    }

    /// 直近 k 往復と新しい user テキストから成る送信コンテキスト
    ///
    /// 往復ごとに user / model の 2 メッセージを古い順に並べ、末尾に
    /// 対応する応答を持たない user メッセージをちょうど 1 つ置く。
    /// 切り詰めマーカーは出さない。
    pub fn bounded_context(&self, k: usize, user_text: &str) -> Vec<Content> {
        let complete: Vec<&Turn> = self.complete_turns().collect();
        let start = complete.len().saturating_sub(k);
        let mut contents = Vec::with_capacity((complete.len() - start) * 2 + 1);
        for turn in &complete[start..] {
            contents.push(Content::user(turn.user.clone()));
            contents.push(Content::model(turn.ai.clone()));
        }
        contents.push(Content::user(user_text));
        contents
    }

    /// サイドバー用サマリの遅延列（呼ぶたびに先頭から再開できる）
    pub fn summaries(&self) -> impl Iterator<Item = TurnSummary> + '_ {
        self.complete_turns()
            .enumerate()
            .map(|(index, turn)| TurnSummary::of(index, turn))
    }

    /// サマリ index までの Turn 列（履歴の再生表示用）
    pub fn replay(&self, index: usize) -> Vec<&Turn> {
        self.complete_turns().take(index.saturating_add(1)).collect()
    }
}
