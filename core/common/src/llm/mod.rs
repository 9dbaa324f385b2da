//! Gemini generateContent の wire 型とトランスポート
//!
//! `Transport` trait が直接 API・プロキシ・echo の共通境界。
//! 応答は `Reply`（分類済みタグ付き共用体）へ正規化して返す。

pub mod direct;
pub mod echo;
pub mod factory;
pub mod proxy;
pub mod transport;
pub mod wire;

pub use direct::DirectTransport;
pub use echo::EchoTransport;
pub use factory::{create_transport, AnyTransport, TransportKind};
pub use proxy::ProxyTransport;
pub use transport::{Reply, Transport};
pub use wire::{Content, GenerateRequest, GenerateResponse, Part, Role};
