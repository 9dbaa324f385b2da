//! 履歴リセットの確認ポート
//!
//! 確認ゲートは UI 層の責務（ストアは無条件に clear する）。

/// ユーザーへの y/N 確認
pub trait ResetConfirmation: Send + Sync {
    /// 確認し、承認されたら true
    fn confirm(&self, prompt: &str) -> bool;
}
