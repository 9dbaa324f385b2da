//! config.json の読み込みと解決
//!
//! すべてのキーは省略可能。ファイルが無ければデフォルト、JSON が壊れていれば
//! Err（メッセージにパスを含める）。パスを明示指定した場合は欠けていてもエラー。

use crate::error::Error;
use crate::llm::factory::TransportKind;
use crate::ports::outbound::FileSystem;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_MAX_HISTORY_PAIRS: usize = 20;
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_PROXY_BASE_URL: &str = "http://127.0.0.1:8787";

const CONFIG_FILENAME: &str = "config.json";
const HISTORY_FILENAME: &str = "history.json";
const LOG_FILENAME: &str = "chat.log.jsonl";

/// データディレクトリ（MARINA_HOME、無ければ ~/.marina）
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MARINA_HOME") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    match std::env::var("HOME") {
        Ok(home) if !home.trim().is_empty() => PathBuf::from(home).join(".marina"),
        _ => PathBuf::from(".marina"),
    }
}

/// デフォルトの設定ファイルパス（MARINA_CONFIG で上書き可能）
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var("MARINA_CONFIG") {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    data_dir().join(CONFIG_FILENAME)
}

/// config.json のスキーマ（全キー省略可能）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    model: Option<String>,
    max_history_pairs: Option<usize>,
    transport: Option<String>,
    base_url: Option<String>,
    api_key_env: Option<String>,
    history_path: Option<PathBuf>,
    log_path: Option<PathBuf>,
}

/// 解決済みの設定
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// モデル名
    pub model: String,
    /// 外向きコンテキストに含める直近の往復数 k
    pub max_history_pairs: usize,
    pub transport: TransportKind,
    /// relay のベース URL（proxy のみ使用）
    pub base_url: String,
    /// API キーを読む環境変数名（direct のみ使用）
    pub api_key_env: String,
    pub history_path: PathBuf,
    pub log_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let dir = data_dir();
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_history_pairs: DEFAULT_MAX_HISTORY_PAIRS,
            transport: TransportKind::Direct,
            base_url: DEFAULT_PROXY_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            history_path: dir.join(HISTORY_FILENAME),
            log_path: dir.join(LOG_FILENAME),
        }
    }
}

impl AppConfig {
    /// ConfigFile をデフォルトに重ねて解決する
    fn resolve(file: ConfigFile) -> Result<Self, Error> {
        let mut cfg = Self::default();
        if let Some(model) = file.model {
            cfg.model = model;
        }
        if let Some(k) = file.max_history_pairs {
            cfg.max_history_pairs = k;
        }
        if let Some(ref t) = file.transport {
            cfg.transport = parse_transport(t)?;
        }
        if let Some(base_url) = file.base_url {
            cfg.base_url = base_url;
        }
        if let Some(api_key_env) = file.api_key_env {
            cfg.api_key_env = api_key_env;
        }
        if let Some(history_path) = file.history_path {
            cfg.history_path = history_path;
        }
        if let Some(log_path) = file.log_path {
            cfg.log_path = log_path;
        }
        Ok(cfg)
    }
}

/// トランスポート名を解析する。不明なら利用可能一覧つきの usage エラー
pub fn parse_transport(s: &str) -> Result<TransportKind, Error> {
    TransportKind::from_str(s).ok_or_else(|| {
        Error::invalid_argument(format!(
            "Unknown transport: {}. Supported transports: direct, proxy, echo",
            s
        ))
    })
}

/// 設定を読み込む
///
/// * `path` が Some - そのファイルを読む。無ければエラー
/// * `path` が None - デフォルトパスを読む。無ければデフォルト設定
pub fn load_config(fs: &dyn FileSystem, path: Option<&Path>) -> Result<AppConfig, Error> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (default_config_path(), false),
    };
    if !fs.exists(&path) {
        if required {
            return Err(Error::io_msg(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return Ok(AppConfig::default());
    }
    let contents = fs.read_to_string(&path)?;
    let file: ConfigFile = serde_json::from_str(&contents)
        .map_err(|e| Error::json(format!("{}: {}", path.display(), e)))?;
    AppConfig::resolve(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::StdFileSystem;

    #[test]
    fn test_defaults_when_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let fs = StdFileSystem;
        // デフォルトパス解決を避けるため、存在しない明示パスではなく None を使う
        std::env::set_var("MARINA_CONFIG", dir.path().join("absent.json"));
        let cfg = load_config(&fs, None).unwrap();
        std::env::remove_var("MARINA_CONFIG");

        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.max_history_pairs, DEFAULT_MAX_HISTORY_PAIRS);
        assert_eq!(cfg.transport, TransportKind::Direct);
        assert_eq!(cfg.api_key_env, DEFAULT_API_KEY_ENV);
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let fs = StdFileSystem;
        let err = load_config(&fs, Some(&dir.path().join("absent.json"))).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_loads_partial_file_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"model":"gemini-2.5-pro","transport":"proxy","max_history_pairs":3}"#,
        )
        .unwrap();

        let cfg = load_config(&StdFileSystem, Some(&path)).unwrap();
        assert_eq!(cfg.model, "gemini-2.5-pro");
        assert_eq!(cfg.transport, TransportKind::Proxy);
        assert_eq!(cfg.max_history_pairs, 3);
        assert_eq!(cfg.base_url, DEFAULT_PROXY_BASE_URL);
    }

    #[test]
    fn test_malformed_file_is_json_error_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{broken").unwrap();

        let err = load_config(&StdFileSystem, Some(&path)).unwrap_err();
        match err {
            Error::Json(msg) => assert!(msg.contains("config.json")),
            other => panic!("expected Json error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_transport_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"transport":"carrier-pigeon"}"#).unwrap();

        let err = load_config(&StdFileSystem, Some(&path)).unwrap_err();
        match err {
            Error::InvalidArgument(msg) => assert!(msg.contains("carrier-pigeon")),
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }
}
