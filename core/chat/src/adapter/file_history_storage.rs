//! 履歴を JSON ファイル 1 つで保存・読み込みするアダプタ

use crate::domain::Turn;
use crate::ports::outbound::HistoryStorage;
use common::error::Error;
use common::ports::outbound::FileSystem;
use std::path::PathBuf;
use std::sync::Arc;

/// 履歴ファイル（Turn 列の JSON 配列）を扱う HistoryStorage 実装
pub struct FileHistoryStorage {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl FileHistoryStorage {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }
}

impl HistoryStorage for FileHistoryStorage {
    fn load(&self) -> Result<Vec<Turn>, Error> {
        if !self.fs.exists(&self.path) {
            return Ok(Vec::new());
        }
        let contents = self.fs.read_to_string(&self.path)?;
        serde_json::from_str(&contents)
            .map_err(|e| Error::json(format!("{}: {}", self.path.display(), e)))
    }

    fn save(&self, turns: &[Turn]) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            self.fs.create_dir_all(parent)?;
        }
        let json = serde_json::to_string(turns).map_err(|e| Error::json(e.to_string()))?;
        self.fs.write(&self.path, &json)
    }

    fn clear(&self) -> Result<(), Error> {
        self.save(&[])
    }
}
