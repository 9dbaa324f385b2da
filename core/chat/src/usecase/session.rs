//! CLI セッションのオーケストレーション（単発・対話・一覧・再生・リセット）
//!
//! 表示は stdout、プロンプトと確認は stderr。交換は 1 件ずつ完了してから
//! 次の入力を読むため、送信が重なることはない。

use crate::domain::Outcome;
use crate::ports::outbound::{InterruptChecker, ResetConfirmation};
use crate::usecase::ExchangeCoordinator;
use common::error::Error;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

const WELCOME: &str = "Welcome to Marina Chat! How can I help you today?";

pub struct SessionDeps {
    pub coordinator: ExchangeCoordinator,
    pub confirm: Arc<dyn ResetConfirmation>,
    pub interrupt: Arc<dyn InterruptChecker>,
}

pub struct ChatSession {
    deps: SessionDeps,
}

impl ChatSession {
    pub fn new(deps: SessionDeps) -> Self {
        Self { deps }
    }

    fn print_outcome(outcome: &Outcome) {
        if let Some(message) = outcome.display_message() {
            println!("{}", message);
        }
    }

    /// 1 メッセージを送って終了する。失敗も表示文字列に解決されるため終了コードは 0
    pub fn run_send(&self, message: &str) -> Result<i32, Error> {
        let mut conversation = self.deps.coordinator.load_conversation();
        let outcome = self.deps.coordinator.submit(&mut conversation, message)?;
        Self::print_outcome(&outcome);
        Ok(0)
    }

    /// 対話セッション。EOF か Ctrl-C で終了
    pub fn run_interactive(&self) -> Result<i32, Error> {
        let mut conversation = self.deps.coordinator.load_conversation();
        if conversation.is_empty() {
            println!("{}", WELCOME);
        }

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            if self.deps.interrupt.interrupted() {
                break;
            }
            eprint!("> ");
            let _ = io::stderr().flush();

            let line = match lines.next() {
                None => break,
                Some(Err(_)) if self.deps.interrupt.interrupted() => break,
                Some(Err(e)) => return Err(Error::io_msg(format!("Failed to read input: {}", e))),
                Some(Ok(line)) => line,
            };

            let outcome = self.deps.coordinator.submit(&mut conversation, &line)?;
            Self::print_outcome(&outcome);
        }
        Ok(0)
    }

    /// 履歴サマリの一覧（サイドバー相当）
    pub fn list(&self) -> Result<i32, Error> {
        let conversation = self.deps.coordinator.load_conversation();
        let mut printed = 0usize;
        for summary in conversation.summaries() {
            println!("{:>3}  {}", summary.index, summary.label);
            printed += 1;
        }
        if printed == 0 {
            println!("(no history)");
        }
        Ok(0)
    }

    /// サマリ index までの往復を再表示する
    pub fn replay(&self, index: usize) -> Result<i32, Error> {
        let conversation = self.deps.coordinator.load_conversation();
        let turns = conversation.replay(index);
        if turns.len() <= index {
            return Err(Error::invalid_argument(format!(
                "No conversation at index {} (history has {} entries)",
                index,
                conversation.summaries().count()
            )));
        }
        println!("Loaded conversation from history:");
        for turn in turns {
            println!("[you] {}", turn.user);
            println!("[ai] {}", turn.ai);
        }
        Ok(0)
    }

    /// 確認つきで履歴を空にする
    pub fn clear(&self, skip_confirm: bool) -> Result<i32, Error> {
        if !skip_confirm
            && !self
                .deps
                .confirm
                .confirm("Clear all conversation history?")
        {
            println!("Cancelled.");
            return Ok(0);
        }
        let mut conversation = self.deps.coordinator.load_conversation();
        self.deps.coordinator.clear(&mut conversation)?;
        println!("Conversation history cleared.");
        Ok(0)
    }
}
