//! ドメイン型（会話・コマンド・結果）

pub mod command;
pub mod conversation;
pub mod outcome;
pub mod turn;

pub use command::ChatCommand;
pub use conversation::Conversation;
pub use outcome::Outcome;
pub use turn::{Turn, TurnSummary};
