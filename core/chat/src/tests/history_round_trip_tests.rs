//! 永続化ラウンドトリップ（ファイル実装でのストア不変条件）

use crate::adapter::FileHistoryStorage;
use crate::domain::{Conversation, Turn};
use crate::ports::outbound::HistoryStorage;
use common::adapter::StdFileSystem;
use std::sync::Arc;

fn storage(path: &std::path::Path) -> FileHistoryStorage {
    FileHistoryStorage::new(Arc::new(StdFileSystem), path)
}

#[test]
fn test_append_then_reload_yields_identical_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let s = storage(&dir.path().join("history.json"));

    let mut conversation = Conversation::new();
    for i in 0..3 {
        conversation.append(Turn::new(format!("q{}", i), format!("a{}", i)));
        s.save(conversation.turns()).unwrap();
    }

    let reloaded = Conversation::from_turns(s.load().unwrap());
    assert_eq!(reloaded.turns(), conversation.turns());
}

#[test]
fn test_clear_then_load_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let s = storage(&dir.path().join("history.json"));

    s.save(&[Turn::new("hi", "hello")]).unwrap();
    s.clear().unwrap();
    assert!(s.load().unwrap().is_empty());
}

#[test]
fn test_incomplete_persisted_turns_are_filtered_from_views() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    // 片側が欠けたエントリを含む手書きの履歴ファイル
    std::fs::write(
        &path,
        r#"[{"user":"hi","ai":"hello"},{"user":"orphan"},{"ai":"dangling"}]"#,
    )
    .unwrap();

    let conversation = Conversation::from_turns(storage(&path).load().unwrap());
    assert_eq!(conversation.turns().len(), 3);
    assert_eq!(conversation.summaries().count(), 1);
    let contents = conversation.bounded_context(10, "next");
    assert_eq!(contents.len(), 3);
}
