//! 配線: 標準アダプタで ChatSession を組み立てる

use std::sync::Arc;

use common::adapter::{FileJsonLog, StdFileSystem};
use common::config::AppConfig;
use common::error::Error;
use common::ports::outbound::{FileSystem, Log};

use crate::adapter::{
    CliResetConfirmation, CtrlcInterrupt, FileHistoryStorage, StdTransportFactory,
};
use crate::ports::outbound::{HistoryStorage, InterruptChecker, ResetConfirmation, TransportFactory};
use crate::usecase::{ChatSession, ExchangeCoordinator, SessionDeps};

/// 組み立て済みアプリ（main がディスパッチとライフサイクルログに使う）
pub struct App {
    pub session: ChatSession,
    pub log: Arc<dyn Log>,
}

/// 標準アダプタで App を組み立てる
pub fn wire_chat(config: AppConfig, verbose: bool) -> Result<App, Error> {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let log: Arc<dyn Log> = Arc::new(FileJsonLog::new(Arc::clone(&fs), &config.log_path));

    let storage: Arc<dyn HistoryStorage> = Arc::new(FileHistoryStorage::new(
        Arc::clone(&fs),
        config.history_path.clone(),
    ));
    let transport_factory: Arc<dyn TransportFactory> =
        Arc::new(StdTransportFactory::new(config.clone()));
    let coordinator = ExchangeCoordinator::new(
        transport_factory,
        storage,
        Arc::clone(&log),
        config.max_history_pairs,
        verbose,
    );

    let confirm: Arc<dyn ResetConfirmation> = Arc::new(CliResetConfirmation);
    let interrupt: Arc<dyn InterruptChecker> = Arc::new(CtrlcInterrupt::install()?);

    Ok(App {
        session: ChatSession::new(SessionDeps {
            coordinator,
            confirm,
            interrupt,
        }),
        log,
    })
}
