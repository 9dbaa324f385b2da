//! Ctrl-C を割り込みフラグに変換するアダプタ

use crate::ports::outbound::InterruptChecker;
use common::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// ctrlc ハンドラでフラグを立てる InterruptChecker 実装
pub struct CtrlcInterrupt {
    flag: Arc<AtomicBool>,
}

impl CtrlcInterrupt {
    /// ハンドラを登録する。プロセスにつき 1 回だけ呼ぶこと
    pub fn install() -> Result<Self, Error> {
        let flag = Arc::new(AtomicBool::new(false));
        let handler_flag = Arc::clone(&flag);
        ctrlc::set_handler(move || {
            handler_flag.store(true, Ordering::SeqCst);
        })
        .map_err(|e| Error::io_msg(format!("Failed to install Ctrl-C handler: {}", e)))?;
        Ok(Self { flag })
    }
}

impl InterruptChecker for CtrlcInterrupt {
    fn interrupted(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
