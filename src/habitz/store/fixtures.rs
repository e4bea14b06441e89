//! Test fixtures: sessions backed by [`MemBackend`] on a fixed day.

use super::mem_backend::MemBackend;
use super::snapshot::{PersistedSnapshot, Persistence, STATE_KEY};
use crate::day::{DayStamp, FixedClock};
use crate::model::{HabitRecord, DEFAULT_DESCRIPTION};
use crate::session::Session;
use crate::store::backend::StorageBackend;
use chrono::NaiveDate;
use std::sync::Arc;

pub struct SessionFixture {
    pub backend: Arc<MemBackend>,
    pub today: NaiveDate,
}

impl Default for SessionFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionFixture {
    /// An empty backend, with "today" pinned to 2024-06-10.
    pub fn new() -> Self {
        Self {
            backend: Arc::new(MemBackend::new()),
            today: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
        }
    }

    /// Another fixture over the same backend, pinned to `today`.
    pub fn on(&self, today: NaiveDate) -> Self {
        Self {
            backend: self.backend.clone(),
            today,
        }
    }

    /// Seeds the slot with `habits` stamped with the raw `date`.
    pub fn with_stored(self, habits: Vec<HabitRecord>, date: &str) -> Self {
        let snapshot = PersistedSnapshot {
            habits,
            date: DayStamp::from_raw(date),
        };
        let blob = serde_json::to_string(&snapshot).unwrap();
        self.backend.set(STATE_KEY, &blob).unwrap();
        self
    }

    /// Seeds the slot with arbitrary text.
    pub fn with_raw(self, raw: &str) -> Self {
        self.backend.set(STATE_KEY, raw).unwrap();
        self
    }

    pub fn open(&self) -> Session<MemBackend> {
        let persistence = Persistence::with_key(self.backend.clone(), STATE_KEY).unwrap();
        Session::open(
            persistence,
            Box::new(FixedClock(self.today)),
            DEFAULT_DESCRIPTION,
        )
    }

    /// The snapshot currently in the slot.
    pub fn stored(&self) -> Option<PersistedSnapshot> {
        self.backend
            .get(STATE_KEY)
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }
}
