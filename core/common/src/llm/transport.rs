//! トランスポートの trait 定義
//!
//! 各トランスポート（直接 API・プロキシ・echo）はこの trait を実装する。
//! HTTP を喋れたかどうかと、応答の中身の分類を分けて返す:
//! `Err` はトランスポート障害のみ、中身の成否は `Reply` が運ぶ。

use crate::error::Error;
use crate::llm::wire::GenerateRequest;

/// 分類済みの応答（タグ付き共用体）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// 抽出できたテキスト
    Text(String),
    /// リモートサービスが返した構造化エラー
    ApiError(String),
    /// 安全方針による出力停止（理由つき）
    Blocked(String),
    /// HTTP としては成立したがテキストを取り出せない応答
    Empty,
}

/// トランスポートの trait
pub trait Transport: Send + Sync {
    /// トランスポート名を返す（ログ・デバッグ表示用）
    fn name(&self) -> &str;

    /// ペイロードを送り、分類済みの応答を返す
    ///
    /// # Returns
    /// * `Ok(Reply)` - 応答の分類結果（APIエラー・ブロックも Ok 側）
    /// * `Err(Error)` - ネットワーク到達不能などのトランスポート障害
    fn dispatch(&self, request: &GenerateRequest) -> Result<Reply, Error>;
}
