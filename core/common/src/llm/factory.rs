//! トランスポートファクトリー
//!
//! 設定のトランスポート種別から適切な実装を作成します。

use crate::error::Error;
use crate::llm::direct::DirectTransport;
use crate::llm::echo::EchoTransport;
use crate::llm::proxy::ProxyTransport;
use crate::llm::transport::{Reply, Transport};
use crate::llm::wire::GenerateRequest;

/// トランスポート種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Gemini API を直接呼ぶ（キーは環境変数）
    Direct,
    /// relay 経由（クライアントはキーを持たない）
    Proxy,
    /// オフラインの echo
    Echo,
}

impl TransportKind {
    /// 文字列からトランスポート種別を解析
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "direct" | "gemini" => Some(Self::Direct),
            "proxy" | "relay" => Some(Self::Proxy),
            "echo" => Some(Self::Echo),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Proxy => "proxy",
            Self::Echo => "echo",
        }
    }
}

/// トランスポートの enum ラッパー
///
/// 異なるトランスポートを型安全に扱うために使用します。
pub enum AnyTransport {
    Direct(DirectTransport),
    Proxy(ProxyTransport),
    Echo(EchoTransport),
}

impl Transport for AnyTransport {
    fn name(&self) -> &str {
        match self {
            Self::Direct(t) => t.name(),
            Self::Proxy(t) => t.name(),
            Self::Echo(t) => t.name(),
        }
    }

    fn dispatch(&self, request: &GenerateRequest) -> Result<Reply, Error> {
        match self {
            Self::Direct(t) => t.dispatch(request),
            Self::Proxy(t) => t.dispatch(request),
            Self::Echo(t) => t.dispatch(request),
        }
    }
}

/// 種別と設定値からトランスポートを作成する
///
/// # Arguments
/// * `kind` - トランスポート種別
/// * `model` - モデル名（direct のみ使用）
/// * `api_key_env` - API キーを読む環境変数名（direct のみ使用）
/// * `base_url` - relay のベース URL（proxy のみ使用）
pub fn create_transport(
    kind: TransportKind,
    model: &str,
    api_key_env: &str,
    base_url: &str,
) -> Result<AnyTransport, Error> {
    match kind {
        TransportKind::Direct => Ok(AnyTransport::Direct(DirectTransport::new(
            model,
            api_key_env,
        )?)),
        TransportKind::Proxy => Ok(AnyTransport::Proxy(ProxyTransport::new(base_url))),
        TransportKind::Echo => Ok(AnyTransport::Echo(EchoTransport::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_kind_from_str() {
        assert_eq!(TransportKind::from_str("direct"), Some(TransportKind::Direct));
        assert_eq!(TransportKind::from_str("Gemini"), Some(TransportKind::Direct));
        assert_eq!(TransportKind::from_str("proxy"), Some(TransportKind::Proxy));
        assert_eq!(TransportKind::from_str("RELAY"), Some(TransportKind::Proxy));
        assert_eq!(TransportKind::from_str("echo"), Some(TransportKind::Echo));
        assert_eq!(TransportKind::from_str("unknown"), None);
    }

    #[test]
    fn test_transport_kind_as_str() {
        assert_eq!(TransportKind::Direct.as_str(), "direct");
        assert_eq!(TransportKind::Proxy.as_str(), "proxy");
        assert_eq!(TransportKind::Echo.as_str(), "echo");
    }

    #[test]
    fn test_create_echo_transport() {
        let t = create_transport(TransportKind::Echo, "gemini-2.5-flash", "GEMINI_API_KEY", "")
            .unwrap();
        assert_eq!(t.name(), "echo");
    }

    #[test]
    fn test_create_proxy_transport_needs_no_key() {
        let t = create_transport(
            TransportKind::Proxy,
            "gemini-2.5-flash",
            "GEMINI_API_KEY",
            "http://127.0.0.1:8787",
        )
        .unwrap();
        assert_eq!(t.name(), "proxy");
    }
}
