//! 会話履歴の永続化ポート
//!
//! 履歴はメモリ側が正で、永続化はベストエフォート。書き込み失敗は
//! usecase 側でログに落として続行する（そのターンはセッション内のみ）。

use crate::domain::Turn;
use common::error::Error;

/// 会話履歴の保存・読み込み
pub trait HistoryStorage: Send + Sync {
    /// 保存済み履歴を読み込む。保存先が存在しなければ空列を返す。
    /// 壊れた内容は Err（呼び出し側が警告ログの上で空として扱う）。
    fn load(&self) -> Result<Vec<Turn>, Error>;

    /// 列全体を同期的に書き戻す
    fn save(&self, turns: &[Turn]) -> Result<(), Error>;

    /// 空の状態を永続化する（保存先の削除ではない）
    fn clear(&self) -> Result<(), Error>;
}
