use chrono::NaiveDate;
use habitz::model::HabitRecord;
use habitz::store::backend::StorageBackend;
use habitz::store::fs_backend::FsBackend;
use habitz::store::snapshot::{PersistedSnapshot, Persistence, STATE_KEY};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().join("data"));
    (dir, backend)
}

fn leftover_tmp_files(backend: &FsBackend) -> Vec<String> {
    fs::read_dir(backend.root())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".tmp"))
        .collect()
}

#[test]
fn test_fs_backend_get_set_remove() {
    let (_dir, backend) = setup();

    assert_eq!(backend.get("slot").unwrap(), None);

    backend.set("slot", "hello").unwrap();
    assert_eq!(backend.get("slot").unwrap(), Some("hello".to_string()));

    backend.set("slot", "again").unwrap();
    assert_eq!(backend.get("slot").unwrap(), Some("again".to_string()));

    backend.remove("slot").unwrap();
    assert_eq!(backend.get("slot").unwrap(), None);

    // Removing a missing key is fine
    backend.remove("slot").unwrap();
}

#[test]
fn test_fs_backend_atomic_write_artifacts() {
    let (_dir, backend) = setup();
    backend.set("slot", "atomic").unwrap();

    let expected = backend.root().join("slot.json");
    assert_eq!(backend.location("slot"), expected);
    assert_eq!(fs::read_to_string(&expected).unwrap(), "atomic");
    assert!(leftover_tmp_files(&backend).is_empty());
}

#[test]
fn test_failed_rename_cleans_up_tmp_file() {
    let (_dir, backend) = setup();
    // A non-empty directory in the target's place cannot be renamed over.
    let target = backend.location("slot");
    fs::create_dir_all(target.join("occupied")).unwrap();

    assert!(backend.set("slot", "value").is_err());
    assert!(target.is_dir());
    assert!(leftover_tmp_files(&backend).is_empty());
}

#[test]
fn test_persistence_round_trip_on_disk() {
    let (_dir, backend) = setup();
    let backend = Arc::new(backend);
    let persistence = Persistence::with_key(backend.clone(), STATE_KEY).unwrap();

    let mut habits = vec![
        HabitRecord::new("Read", "20 pages"),
        HabitRecord::new("Stretch", "5 min"),
    ];
    habits[1].completed = true;
    let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

    persistence.save(&PersistedSnapshot::capture(&habits, today));
    persistence.flush();
    assert!(persistence.take_write_errors().is_empty());

    let loaded = persistence.load().unwrap();
    assert_eq!(loaded.habits, habits);
    assert!(loaded.date.is_same_day(today));
}

#[test]
fn test_unwritable_root_reports_failure() {
    let dir = TempDir::new().unwrap();
    // A file where the data directory should be makes every write fail.
    let blocked = dir.path().join("blocked");
    fs::write(&blocked, "not a directory").unwrap();

    let persistence = Persistence::new(FsBackend::new(blocked)).unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    persistence.save(&PersistedSnapshot::capture(&[], today));
    persistence.flush();

    assert_eq!(persistence.take_write_errors().len(), 1);
    assert_eq!(persistence.load(), None);
}
