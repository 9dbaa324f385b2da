//! CLI 引数から解決されたコマンド

/// 実行するコマンド（main でディスパッチ。help はパース直後に処理される）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// 履歴サマリ一覧を表示
    List,
    /// サマリ index までの往復を再表示
    Replay(usize),
    /// 確認つきで履歴を空にする
    Clear,
    /// メッセージなし起動: 対話セッション
    Interactive,
    /// 1 メッセージを送って終了
    Send(String),
}
