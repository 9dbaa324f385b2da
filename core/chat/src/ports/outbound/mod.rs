//! Outbound ポート: usecase が外界に触れるための trait

pub mod confirm;
pub mod history_storage;
pub mod interrupt;
pub mod transport_factory;

pub use confirm::ResetConfirmation;
pub use history_storage::HistoryStorage;
pub use interrupt::InterruptChecker;
pub use transport_factory::TransportFactory;
