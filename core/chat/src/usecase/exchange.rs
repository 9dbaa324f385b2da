//! Exchange Coordinator
//!
//! 入力 1 件を境界つき履歴と合わせて 1 リクエストにまとめ、応答を
//! Outcome に解決する。履歴への追記は成功経路のみ。分類の優先順位:
//! トランスポート障害 → API エラー → 安全ブロック → 成功 → 抽出失敗。

use crate::domain::{Conversation, Outcome, Turn};
use crate::ports::outbound::{HistoryStorage, TransportFactory};
use common::error::Error;
use common::llm::{GenerateRequest, Reply};
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;

pub struct ExchangeCoordinator {
    transport_factory: Arc<dyn TransportFactory>,
    storage: Arc<dyn HistoryStorage>,
    log: Arc<dyn Log>,
    max_history_pairs: usize,
    verbose: bool,
}

impl ExchangeCoordinator {
    pub fn new(
        transport_factory: Arc<dyn TransportFactory>,
        storage: Arc<dyn HistoryStorage>,
        log: Arc<dyn Log>,
        max_history_pairs: usize,
        verbose: bool,
    ) -> Self {
        Self {
            transport_factory,
            storage,
            log,
            max_history_pairs,
            verbose,
        }
    }

    /// 保存済み履歴を読み込む。無い・壊れている場合は空へソフトフォール
    pub fn load_conversation(&self) -> Conversation {
        match self.storage.load() {
            Ok(turns) => Conversation::from_turns(turns),
            Err(e) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Warn, "failed to load history; starting empty")
                        .layer("usecase")
                        .kind("storage")
                        .field("error", serde_json::json!(e.to_string())),
                );
                Conversation::new()
            }
        }
    }

    /// 1 往復を実行する
    ///
    /// 空入力は Outcome::Ignored（送信なし）。成功時のみ追記し同期的に
    /// 永続化する。永続化失敗はベストエフォート扱いで、そのターンは
    /// セッション内のみとして続行する。
    ///
    /// # Returns
    /// * `Ok(Outcome)` - 表示文字列へ解決済みの結果（失敗もこちら）
    /// * `Err(Error)` - トランスポート生成前の設定エラー（キー未設定など）
    pub fn submit(
        &self,
        conversation: &mut Conversation,
        user_text: &str,
    ) -> Result<Outcome, Error> {
        let trimmed = user_text.trim();
        if trimmed.is_empty() {
            return Ok(Outcome::Ignored);
        }

        let transport = self.transport_factory.create()?;
        let request = GenerateRequest::new(
            conversation.bounded_context(self.max_history_pairs, trimmed),
        );
        if self.verbose {
            eprintln!(
                "[chat] sending {} messages via {}",
                request.contents.len(),
                transport.name()
            );
        }

        let outcome = match transport.dispatch(&request) {
            Err(e) => Outcome::TransportError(e.to_string()),
            Ok(Reply::ApiError(msg)) => Outcome::ApiError(msg),
            Ok(Reply::Blocked(reason)) => Outcome::SafetyBlock(reason),
            Ok(Reply::Empty) => Outcome::ExtractionFailure,
            Ok(Reply::Text(text)) => {
                conversation.append(Turn::new(trimmed, text.clone()));
                if let Err(e) = self.storage.save(conversation.turns()) {
                    let _ = self.log.log(
                        &LogRecord::new(
                            LogLevel::Warn,
                            "history persist failed; continuing with in-memory state",
                        )
                        .layer("usecase")
                        .kind("storage")
                        .field("error", serde_json::json!(e.to_string())),
                    );
                }
                Outcome::Success(text)
            }
        };

        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "exchange completed")
                .layer("usecase")
                .kind("exchange")
                .field("outcome", serde_json::json!(outcome.label()))
                .field(
                    "context_messages",
                    serde_json::json!(request.contents.len()),
                ),
        );
        Ok(outcome)
    }

    /// 履歴を空にして空の状態を永続化する（確認ゲートは CLI 側）
    pub fn clear(&self, conversation: &mut Conversation) -> Result<(), Error> {
        conversation.clear();
        self.storage.clear()
    }
}
