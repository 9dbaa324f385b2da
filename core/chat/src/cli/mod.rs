//! CLI（引数解析とコマンド解決）

pub mod args;

pub use args::{parse_args, print_completion, Config, ParseOutcome};

use crate::domain::ChatCommand;
use common::config::{parse_transport, AppConfig};
use common::error::Error;

/// CLI 設定からコマンドを解決する（help はパース直後に処理済みの前提）
pub fn config_to_command(config: &Config) -> ChatCommand {
    if config.list {
        ChatCommand::List
    } else if let Some(index) = config.replay {
        ChatCommand::Replay(index)
    } else if config.clear {
        ChatCommand::Clear
    } else if config.message_args.is_empty() {
        ChatCommand::Interactive
    } else {
        ChatCommand::Send(config.message_args.join(" "))
    }
}

/// CLI フラグを設定ファイル由来の AppConfig に重ねる
pub fn apply_overrides(mut cfg: AppConfig, cli: &Config) -> Result<AppConfig, Error> {
    if let Some(ref model) = cli.model {
        cfg.model = model.clone();
    }
    if let Some(ref transport) = cli.transport {
        cfg.transport = parse_transport(transport)?;
    }
    if let Some(ref base_url) = cli.base_url {
        cfg.base_url = base_url.clone();
    }
    if let Some(pairs) = cli.history_pairs {
        cfg.max_history_pairs = pairs;
    }
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::llm::TransportKind;

    #[test]
    fn test_config_to_command_priorities() {
        let mut config = Config::default();
        assert_eq!(config_to_command(&config), ChatCommand::Interactive);

        config.message_args = vec!["hello".to_string(), "there".to_string()];
        assert_eq!(
            config_to_command(&config),
            ChatCommand::Send("hello there".to_string())
        );

        config.clear = true;
        assert_eq!(config_to_command(&config), ChatCommand::Clear);

        config.replay = Some(2);
        assert_eq!(config_to_command(&config), ChatCommand::Replay(2));

        config.list = true;
        assert_eq!(config_to_command(&config), ChatCommand::List);
    }

    #[test]
    fn test_apply_overrides() {
        let mut cli = Config::default();
        cli.model = Some("gemini-2.5-pro".to_string());
        cli.transport = Some("proxy".to_string());
        cli.history_pairs = Some(3);

        let cfg = apply_overrides(AppConfig::default(), &cli).unwrap();
        assert_eq!(cfg.model, "gemini-2.5-pro");
        assert_eq!(cfg.transport, TransportKind::Proxy);
        assert_eq!(cfg.max_history_pairs, 3);
    }

    #[test]
    fn test_apply_overrides_rejects_unknown_transport() {
        let mut cli = Config::default();
        cli.transport = Some("smoke-signal".to_string());
        let err = apply_overrides(AppConfig::default(), &cli).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
