//! marina 共通ライブラリ
//!
//! `chat`（クライアント）と `relay`（プロキシ）で共有される機能を提供します。

/// エラーハンドリング
pub mod error;

/// config.json の読み込みと解決
pub mod config;

/// Gemini wire 型とトランスポート
pub mod llm;

/// Outbound ポート（trait）
pub mod ports;

/// 標準アダプタ
pub mod adapter;
