//! # Session
//!
//! A session owns the [`HabitStore`] for one run of the program. Opening a session
//! evaluates the daily load rule exactly once:
//!
//! ```text
//!   stored snapshot?
//!     ├─ none ...................... NoStoredData → built-in default list
//!     ├─ date == today ............. SameDay      → stored habits, flags kept
//!     └─ date != today ............. NewDay       → stored habits, flags cleared
//! ```
//!
//! The rule is never re-evaluated while the session lives, even if it crosses
//! midnight. After opening, every successful mutation writes the whole store, stamped
//! with today's date, through the [`Persistence`] adapter (write-through).

use crate::day::Clock;
use crate::error::Result;
use crate::habits::HabitStore;
use crate::model::{default_habits, HabitRecord};
use crate::store::backend::StorageBackend;
use crate::store::snapshot::{PersistedSnapshot, Persistence};
use crate::store::writer::WriteFailure;
use chrono::NaiveDate;
use log::info;
use std::path::PathBuf;

/// Which branch of the load rule a session started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NoStoredData,
    SameDay,
    NewDay,
}

impl LoadState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadState::NoStoredData => "no_stored_data",
            LoadState::SameDay => "same_day",
            LoadState::NewDay => "new_day",
        }
    }
}

/// The load rule as a pure function of the stored snapshot and today's date.
pub fn resolve_initial(
    snapshot: Option<PersistedSnapshot>,
    today: NaiveDate,
) -> (LoadState, Vec<HabitRecord>) {
    match snapshot {
        None => (LoadState::NoStoredData, default_habits()),
        Some(stored) if stored.date.is_same_day(today) => (LoadState::SameDay, stored.habits),
        Some(stored) => {
            let habits = stored
                .habits
                .into_iter()
                .map(|h| HabitRecord {
                    completed: false,
                    ..h
                })
                .collect();
            (LoadState::NewDay, habits)
        }
    }
}

pub struct Session<B: StorageBackend + 'static> {
    store: HabitStore,
    persistence: Persistence<B>,
    clock: Box<dyn Clock>,
    load_state: LoadState,
}

impl<B: StorageBackend + 'static> Session<B> {
    /// Reads the stored snapshot and initializes the store from it.
    ///
    /// A day rollover is written back immediately so the stored stamp moves to today.
    /// The default list is not written until the first mutation.
    pub fn open(persistence: Persistence<B>, clock: Box<dyn Clock>, placeholder: &str) -> Self {
        let today = clock.today();
        let (load_state, habits) = resolve_initial(persistence.load(), today);
        info!(
            "event=session_open status=ok state={} habits={}",
            load_state.as_str(),
            habits.len()
        );

        let store = HabitStore::new(placeholder).with_habits(habits);
        let session = Self {
            store,
            persistence,
            clock,
            load_state,
        };
        if load_state == LoadState::NewDay {
            session.persist();
        }
        session
    }

    pub fn store(&self) -> &HabitStore {
        &self.store
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn add(&mut self, name: &str, description: Option<&str>) -> Result<HabitRecord> {
        let record = self.store.add(name, description)?;
        self.persist();
        Ok(record)
    }

    /// `None` when no habit has `id`; nothing is written in that case.
    pub fn remove(&mut self, id: &str) -> Option<HabitRecord> {
        let removed = self.store.remove(id)?;
        self.persist();
        Some(removed)
    }

    /// Returns the new completion flag, or `None` when no habit has `id`.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let completed = self.store.toggle(id)?;
        self.persist();
        Some(completed)
    }

    pub fn update(
        &mut self,
        id: &str,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<HabitRecord> {
        let record = self.store.update(id, name, description)?;
        self.persist();
        Ok(record)
    }

    /// Clears every completion flag and writes the result.
    pub fn reset_all(&mut self) -> usize {
        let cleared = self.store.reset_all();
        self.persist();
        cleared
    }

    /// Deletes the stored slot. The in-memory list goes back to the built-in defaults,
    /// which is what the next session would start from anyway.
    pub fn clear_storage(&mut self) {
        self.persistence.clear();
        self.store.replace_all(default_habits());
        info!("event=storage_clear status=scheduled");
    }

    /// Blocks until every write issued so far has finished.
    pub fn flush(&self) {
        self.persistence.flush();
    }

    pub fn take_write_errors(&self) -> Vec<WriteFailure> {
        self.persistence.take_write_errors()
    }

    pub fn storage_location(&self) -> PathBuf {
        self.persistence.location()
    }

    fn persist(&self) {
        let snapshot = PersistedSnapshot::capture(self.store.habits(), self.clock.today());
        self.persistence.save(&snapshot);
    }
}
