//! Integration tests for journal persistence.

use biomarker_notifier::{JournalStore, NotifierError, Protocol, Snapshot};
use std::fs;
use tempfile::TempDir;

fn sample_snapshot() -> Snapshot {
    let mut snapshot = Snapshot::new();
    snapshot.insert(
        "urn:p:1".to_string(),
        Protocol::new("urn:p:1", "Lung Screening", "EGFR, KRAS"),
    );
    snapshot.insert(
        "urn:p:2".to_string(),
        Protocol::new("urn:p:2", "Breast Panel", "BRCA1"),
    );
    snapshot
}

#[test]
fn load_missing_journal_returns_empty_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let store = JournalStore::new(temp_dir.path().join("journal.msgpack"));

    assert!(!store.exists());
    let snapshot = store.load().unwrap();
    assert!(snapshot.is_empty());
}

#[test]
fn save_then_load_round_trips() {
    let temp_dir = TempDir::new().unwrap();
    let store = JournalStore::new(temp_dir.path().join("journal.msgpack"));

    let snapshot = sample_snapshot();
    store.save(&snapshot).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded.len(), 2);
    // Protocol equality only checks identifiers, so compare every field.
    for (identifier, record) in &snapshot {
        let restored = &loaded[identifier];
        assert_eq!(restored.identifier, record.identifier);
        assert_eq!(restored.title, record.title);
        assert_eq!(restored.biomarkers, record.biomarkers);
    }
}

#[test]
fn empty_snapshot_round_trips() {
    let temp_dir = TempDir::new().unwrap();
    let store = JournalStore::new(temp_dir.path().join("journal.msgpack"));

    store.save(&Snapshot::new()).unwrap();
    assert!(store.exists());
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn save_fully_overwrites_prior_contents() {
    let temp_dir = TempDir::new().unwrap();
    let store = JournalStore::new(temp_dir.path().join("journal.msgpack"));

    store.save(&sample_snapshot()).unwrap();

    let mut smaller = Snapshot::new();
    smaller.insert(
        "urn:p:3".to_string(),
        Protocol::new("urn:p:3", "Ovarian Study", "CA-125"),
    );
    store.save(&smaller).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(loaded.contains_key("urn:p:3"));
    assert!(!loaded.contains_key("urn:p:1"));
}

#[test]
fn corrupt_journal_fails_fast() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("journal.msgpack");
    fs::write(&path, b"not a messagepack journal at all").unwrap();

    let store = JournalStore::new(&path);
    let result = store.load();
    assert!(matches!(result, Err(NotifierError::CorruptJournal(_))));
}

#[test]
fn reset_removes_journal_and_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let store = JournalStore::new(temp_dir.path().join("journal.msgpack"));

    store.save(&sample_snapshot()).unwrap();
    assert!(store.exists());

    store.reset().unwrap();
    assert!(!store.exists());

    // Resetting an absent journal is a no-op, not an error.
    store.reset().unwrap();
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("journal.msgpack");
    let store = JournalStore::new(&path);

    store.save(&sample_snapshot()).unwrap();

    let leftovers: Vec<_> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec![path.file_name().unwrap().to_os_string()]);
}

#[test]
fn save_creates_missing_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested/dir/journal.msgpack");
    let store = JournalStore::new(&path);

    store.save(&sample_snapshot()).unwrap();
    assert!(store.exists());
    assert_eq!(store.load().unwrap().len(), 2);
}
