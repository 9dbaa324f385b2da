//! 設定からトランスポートを作る標準ファクトリ

use crate::ports::outbound::TransportFactory;
use common::config::AppConfig;
use common::error::Error;
use common::llm::{create_transport, Transport};

/// common のファクトリを AppConfig で呼ぶ実装
pub struct StdTransportFactory {
    config: AppConfig,
}

impl StdTransportFactory {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}

impl TransportFactory for StdTransportFactory {
    fn create(&self) -> Result<Box<dyn Transport>, Error> {
        let transport = create_transport(
            self.config.transport,
            &self.config.model,
            &self.config.api_key_env,
            &self.config.base_url,
        )?;
        Ok(Box::new(transport))
    }
}
