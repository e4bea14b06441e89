use super::backend::StorageBackend;
use super::writer::{SnapshotWriter, WriteFailure, WriteOp};
use crate::day::DayStamp;
use crate::error::Result;
use crate::model::HabitRecord;
use chrono::NaiveDate;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// The single fixed slot the whole state lives in.
pub const STATE_KEY: &str = "habitz-state";

/// The full persisted state: the habit list plus the day it was written on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    pub habits: Vec<HabitRecord>,
    pub date: DayStamp,
}

impl PersistedSnapshot {
    /// Captures `habits` as of `today`.
    pub fn capture(habits: &[HabitRecord], today: NaiveDate) -> Self {
        Self {
            habits: habits.to_vec(),
            date: DayStamp::for_day(today),
        }
    }
}

/// Persistence adapter: reads and writes the snapshot blob in one slot of a
/// key-value backend.
///
/// Reads fail soft (anything unreadable is "no data"). Writes go through the ordered
/// [`SnapshotWriter`] and never fail the caller; failures are logged and can be drained
/// with [`Persistence::take_write_errors`].
pub struct Persistence<B: StorageBackend + 'static> {
    backend: Arc<B>,
    key: String,
    writer: SnapshotWriter,
}

impl<B: StorageBackend + 'static> Persistence<B> {
    pub fn new(backend: B) -> Result<Self> {
        Self::with_key(Arc::new(backend), STATE_KEY)
    }

    pub fn with_key(backend: Arc<B>, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let writer = SnapshotWriter::spawn(backend.clone(), key.clone())?;
        Ok(Self {
            backend,
            key,
            writer,
        })
    }

    /// Reads the stored snapshot. Missing, unreadable, or corrupt data all yield `None`.
    pub fn load(&self) -> Option<PersistedSnapshot> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=snapshot_load status=absent key={}", self.key);
                return None;
            }
            Err(e) => {
                warn!(
                    "event=snapshot_load status=error stage=read key={} error={}",
                    self.key, e
                );
                return None;
            }
        };

        match serde_json::from_str::<PersistedSnapshot>(&raw) {
            Ok(snapshot) => {
                debug!(
                    "event=snapshot_load status=ok key={} habits={}",
                    self.key,
                    snapshot.habits.len()
                );
                Some(snapshot)
            }
            Err(e) => {
                warn!(
                    "event=snapshot_load status=error stage=parse key={} error={}",
                    self.key, e
                );
                None
            }
        }
    }

    /// Schedules `snapshot` to replace whatever is stored.
    pub fn save(&self, snapshot: &PersistedSnapshot) {
        match serde_json::to_string(snapshot) {
            Ok(blob) => {
                self.writer.schedule(WriteOp::Set(blob));
            }
            Err(e) => {
                error!(
                    "event=snapshot_write status=error stage=encode key={} error={}",
                    self.key, e
                );
                self.writer.record_failure("set", e.to_string());
            }
        }
    }

    /// Schedules removal of the slot.
    pub fn clear(&self) {
        self.writer.schedule(WriteOp::Remove);
    }

    /// Waits for all scheduled writes to finish.
    pub fn flush(&self) {
        self.writer.flush();
    }

    pub fn take_write_errors(&self) -> Vec<WriteFailure> {
        self.writer.take_failures()
    }

    pub fn location(&self) -> PathBuf {
        self.backend.location(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_habits;
    use crate::store::mem_backend::MemBackend;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn persistence() -> (Arc<MemBackend>, Persistence<MemBackend>) {
        let backend = Arc::new(MemBackend::new());
        let persistence = Persistence::with_key(backend.clone(), STATE_KEY).unwrap();
        (backend, persistence)
    }

    #[test]
    fn load_on_empty_backend_is_absent() {
        let (_, p) = persistence();
        assert_eq!(p.load(), None);
    }

    #[test]
    fn save_then_load_round_trips_order_and_fields() {
        let (_, p) = persistence();
        let mut habits = default_habits();
        habits[1].completed = true;
        habits.push(HabitRecord::new("Stretch", "5 min"));

        let snapshot = PersistedSnapshot::capture(&habits, day(2024, 6, 10));
        p.save(&snapshot);
        p.flush();

        let loaded = p.load().unwrap();
        assert_eq!(loaded.habits, habits);
        assert_eq!(loaded.date.as_str(), "Mon Jun 10 2024");
    }

    #[test]
    fn blob_matches_documented_layout() {
        let (backend, p) = persistence();
        let habits = vec![HabitRecord {
            id: "a1".into(),
            name: "Read".into(),
            description: "20 pages".into(),
            completed: false,
        }];
        p.save(&PersistedSnapshot::capture(&habits, day(2024, 6, 10)));
        p.flush();

        let raw = backend.get(STATE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "habits": [
                    {"id": "a1", "name": "Read", "description": "20 pages", "completed": false}
                ],
                "date": "Mon Jun 10 2024"
            })
        );
    }

    #[test]
    fn corrupt_blob_is_absent() {
        let (backend, p) = persistence();
        backend.set(STATE_KEY, "{not json").unwrap();
        assert_eq!(p.load(), None);

        let wrong_shape = r#"{"habits": 3, "date": "x"}"#;
        backend.set(STATE_KEY, wrong_shape).unwrap();
        assert_eq!(p.load(), None);
    }

    #[test]
    fn read_error_is_absent() {
        let (backend, p) = persistence();
        let valid = r#"{"habits": [], "date": "2024-01-01"}"#;
        backend.set(STATE_KEY, valid).unwrap();
        backend.set_simulate_read_error(true);
        assert_eq!(p.load(), None);
    }

    #[test]
    fn clear_removes_slot() {
        let (backend, p) = persistence();
        let snapshot = PersistedSnapshot::capture(&default_habits(), day(2024, 1, 1));
        p.save(&snapshot);
        p.clear();
        p.flush();
        assert_eq!(backend.get(STATE_KEY).unwrap(), None);
        assert_eq!(p.load(), None);
    }

    #[test]
    fn write_failure_is_reported_not_raised() {
        let (backend, p) = persistence();
        backend.set_simulate_write_error(true);
        let snapshot = PersistedSnapshot::capture(&default_habits(), day(2024, 1, 1));
        p.save(&snapshot);
        p.flush();

        let errors = p.take_write_errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Simulated write error"));
    }
}
