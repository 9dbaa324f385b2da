//! ユースケース（ポート経由で I/O を行う）

pub mod exchange;
pub mod session;

pub use exchange::ExchangeCoordinator;
pub use session::{ChatSession, SessionDeps};
