//! エラーハンドリング
//!
//! 層をまたいで運ぶ配管エラー。ユーザー向けの応答分類（APIエラー・安全ブロック等）は
//! chat 側の Outcome が担い、ここには載せない。

/// 共通エラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// HTTP リクエストの送信・受信に失敗した（ネットワーク到達不能など）
    #[error("{0}")]
    Http(String),
    /// JSON のシリアライズ・デシリアライズに失敗した
    #[error("{0}")]
    Json(String),
    /// ファイル I/O に失敗した
    #[error("{0}")]
    Io(String),
    /// 必要な環境変数が未設定
    #[error("{0}")]
    Env(String),
    /// 引数・設定値が不正
    #[error("{0}")]
    InvalidArgument(String),
}

impl Error {
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Self::Env(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// CLI の終了コード（sysexits 準拠: 64=usage, 74=ioerr, 70=software）
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 64,
            Self::Io(_) => 74,
            _ => 70,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_helpers() {
        let err = Error::invalid_argument("bad flag");
        assert_eq!(err.to_string(), "bad flag");
        assert_eq!(err.exit_code(), 64);

        let err = Error::io_msg("disk gone");
        assert_eq!(err.exit_code(), 74);

        let err = Error::http("connect refused");
        assert_eq!(err.exit_code(), 70);
        assert_eq!(Error::env("KEY not set").exit_code(), 70);
    }
}
