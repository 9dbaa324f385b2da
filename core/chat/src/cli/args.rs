//! 引数解析（clap ビルダー）

use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::error::Error;
use std::path::PathBuf;

/// 解析済みの CLI 設定
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub help: bool,
    /// -l / --list: 履歴サマリ一覧を表示
    pub list: bool,
    /// --replay <n>: サマリ index n までの往復を再表示
    pub replay: Option<usize>,
    /// --clear: 確認つきで履歴を空にする
    pub clear: bool,
    /// -y / --yes: 確認プロンプトを出さない
    pub yes: bool,
    /// -v / --verbose: 診断情報を stderr に出力する
    pub verbose: bool,
    pub config_path: Option<PathBuf>,
    pub model: Option<String>,
    pub transport: Option<String>,
    pub base_url: Option<String>,
    pub history_pairs: Option<usize>,
    pub message_args: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            help: false,
            list: false,
            replay: None,
            clear: false,
            yes: false,
            verbose: false,
            config_path: None,
            model: None,
            transport: None,
            base_url: None,
            history_pairs: None,
            message_args: Vec::new(),
        }
    }
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("chat")
        .about("Chat with the Gemini API, keeping history across runs")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("list")
                .short('l')
                .long("list")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("replay")
                .long("replay")
                .value_name("n")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            clap::Arg::new("clear")
                .long("clear")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("yes")
                .short('y')
                .long("yes")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("config")
                .short('c')
                .long("config")
                .value_name("path")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model"),
        )
        .arg(
            clap::Arg::new("transport")
                .short('t')
                .long("transport")
                .value_name("kind"),
        )
        .arg(
            clap::Arg::new("base-url")
                .long("base-url")
                .value_name("url"),
        )
        .arg(
            clap::Arg::new("history-pairs")
                .short('k')
                .long("history-pairs")
                .value_name("n")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            clap::Arg::new("completion")
                .long("completion")
                .value_name("shell")
                .value_parser(value_parser!(Shell)),
        )
        .arg(clap::Arg::new("message").num_args(0..))
}

/// 引数列を解析する（args[0] はプログラム名）
pub fn parse_args(args: &[String]) -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(shell) = matches.get_one::<Shell>("completion") {
        return Ok(ParseOutcome::GenerateCompletion(*shell));
    }

    let config = Config {
        help: matches.get_flag("help"),
        list: matches.get_flag("list"),
        replay: matches.get_one::<usize>("replay").copied(),
        clear: matches.get_flag("clear"),
        yes: matches.get_flag("yes"),
        verbose: matches.get_flag("verbose"),
        config_path: matches.get_one::<PathBuf>("config").cloned(),
        model: matches.get_one::<String>("model").cloned(),
        transport: matches.get_one::<String>("transport").cloned(),
        base_url: matches.get_one::<String>("base-url").cloned(),
        history_pairs: matches.get_one::<usize>("history-pairs").copied(),
        message_args: matches
            .get_many::<String>("message")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
    };
    Ok(ParseOutcome::Config(config))
}

/// シェル補完スクリプトを stdout に出力する
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "chat", &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let args: Vec<String> = std::iter::once("chat".to_string())
            .chain(args.iter().map(|s| s.to_string()))
            .collect();
        match parse_args(&args).unwrap() {
            ParseOutcome::Config(c) => c,
            other => panic!("expected Config, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_message_args() {
        let config = parse(&["hello", "there"]);
        assert_eq!(config.message_args, vec!["hello", "there"]);
        assert!(!config.list);
    }

    #[test]
    fn test_parse_no_args_is_interactive_config() {
        let config = parse(&[]);
        assert!(config.message_args.is_empty());
        assert!(!config.help);
    }

    #[test]
    fn test_parse_flags() {
        let config = parse(&[
            "-l",
            "-v",
            "-y",
            "--clear",
            "-m",
            "gemini-2.5-pro",
            "-t",
            "proxy",
            "-k",
            "7",
        ]);
        assert!(config.list);
        assert!(config.verbose);
        assert!(config.yes);
        assert!(config.clear);
        assert_eq!(config.model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(config.transport.as_deref(), Some("proxy"));
        assert_eq!(config.history_pairs, Some(7));
    }

    #[test]
    fn test_parse_replay_index() {
        let config = parse(&["--replay", "3"]);
        assert_eq!(config.replay, Some(3));
    }

    #[test]
    fn test_parse_completion() {
        let args = vec!["chat".to_string(), "--completion".to_string(), "bash".to_string()];
        assert!(matches!(
            parse_args(&args).unwrap(),
            ParseOutcome::GenerateCompletion(Shell::Bash)
        ));
    }

    #[test]
    fn test_parse_invalid_value_is_usage_error() {
        let args = vec!["chat".to_string(), "--replay".to_string(), "abc".to_string()];
        let err = parse_args(&args).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
