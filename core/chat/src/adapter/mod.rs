//! アダプター（ポートの標準実装）

pub mod cli_confirm;
pub mod file_history_storage;
pub mod sigint;
pub mod transport_factory;

pub use cli_confirm::CliResetConfirmation;
pub use file_history_storage::FileHistoryStorage;
pub use sigint::CtrlcInterrupt;
pub use transport_factory::StdTransportFactory;
