use super::*;
use tempfile::tempdir;

#[test]
fn write_then_read_round_trips() {
    let dir = tempdir().unwrap();
    let store = SavegameStore::new(dir.path().join("savegames"));

    store.write("evening-game", "{\"cells\":[]}").unwrap();
    assert_eq!(store.read("evening-game").unwrap(), "{\"cells\":[]}");
}

#[test]
fn missing_root_lists_as_empty() {
    let dir = tempdir().unwrap();
    let store = SavegameStore::new(dir.path().join("never-created"));

    assert_eq!(store.list().unwrap(), Vec::new());
}

#[test]
fn list_only_returns_json_stems() {
    let dir = tempdir().unwrap();
    let store = SavegameStore::new(dir.path());

    store.write("first", "{}").unwrap();
    store.write("second", "{}").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not a savegame").unwrap();

    let names: Vec<String> = store.list().unwrap().into_iter().map(|e| e.name).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"first".to_string()));
    assert!(names.contains(&"second".to_string()));
}

#[test]
fn write_creates_root_recursively() {
    let dir = tempdir().unwrap();
    let store = SavegameStore::new(dir.path().join("a").join("b"));

    store.write("nested", "content").unwrap();
    assert_eq!(store.read("nested").unwrap(), "content");
}

#[test]
fn rejects_empty_and_path_like_names() {
    let dir = tempdir().unwrap();
    let store = SavegameStore::new(dir.path());

    assert!(store.write("", "x").is_err());
    assert!(store.write("  ", "x").is_err());
    assert!(store.write("../escape", "x").is_err());
    assert!(store.write("a/b", "x").is_err());
    assert!(store.read("..\\up").is_err());
}

#[test]
fn read_missing_savegame_is_an_error() {
    let dir = tempdir().unwrap();
    let store = SavegameStore::new(dir.path());

    assert!(store.read("no-such-game").is_err());
}
