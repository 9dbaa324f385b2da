//! トランスポート生成ポート
//!
//! 送信のたびに作る（direct はここで環境変数のキーを解決する）。

use common::error::Error;
use common::llm::Transport;

/// 設定済みトランスポートを生成する
pub trait TransportFactory: Send + Sync {
    fn create(&self) -> Result<Box<dyn Transport>, Error>;
}
