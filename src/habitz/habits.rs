//! The in-memory habit list.
//!
//! [`HabitStore`] is pure data: it knows nothing about persistence or dates. The
//! [`crate::session::Session`] wraps it and turns every successful mutation into a
//! snapshot write.

use crate::error::{HabitzError, Result};
use crate::model::{
    new_habit_id, normalize_description, normalize_name, HabitRecord, DEFAULT_DESCRIPTION,
};
use log::warn;
use std::collections::HashSet;

/// Ordered list of habits. Insertion order is display order.
#[derive(Debug, Clone)]
pub struct HabitStore {
    habits: Vec<HabitRecord>,
    placeholder: String,
}

impl Default for HabitStore {
    fn default() -> Self {
        Self::new(DEFAULT_DESCRIPTION)
    }
}

impl HabitStore {
    /// An empty store whose blank descriptions become `placeholder`.
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            habits: Vec::new(),
            placeholder: placeholder.into(),
        }
    }

    pub fn with_habits(mut self, records: Vec<HabitRecord>) -> Self {
        self.replace_all(records);
        self
    }

    pub fn habits(&self) -> &[HabitRecord] {
        &self.habits
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.habits.iter().filter(|h| h.completed).count()
    }

    pub fn get(&self, id: &str) -> Option<&HabitRecord> {
        self.habits.iter().find(|h| h.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.habits.iter().position(|h| h.id == id)
    }

    /// Appends a new, incomplete habit.
    ///
    /// Fails with a validation error, leaving the store untouched, if `name` is blank.
    pub fn add(&mut self, name: &str, description: Option<&str>) -> Result<HabitRecord> {
        let name = normalize_name(name).ok_or_else(empty_name)?;
        let description = normalize_description(description, &self.placeholder);

        let mut record = HabitRecord::new(name, description);
        while self.get(&record.id).is_some() {
            record.id = new_habit_id();
        }
        self.habits.push(record.clone());
        Ok(record)
    }

    /// Removes and returns the habit with `id`. `None` means nothing changed.
    pub fn remove(&mut self, id: &str) -> Option<HabitRecord> {
        let pos = self.position(id)?;
        Some(self.habits.remove(pos))
    }

    /// Flips the completion flag and returns the new value. `None` means nothing changed.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let habit = self.habits.iter_mut().find(|h| h.id == id)?;
        habit.completed = !habit.completed;
        Some(habit.completed)
    }

    /// Edits name and/or description in place. Position and completion are kept.
    pub fn update(
        &mut self,
        id: &str,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<HabitRecord> {
        let name = match name {
            Some(raw) => Some(normalize_name(raw).ok_or_else(empty_name)?),
            None => None,
        };
        let description = description.map(|d| normalize_description(Some(d), &self.placeholder));

        let habit = self
            .habits
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| HabitzError::HabitNotFound(id.to_string()))?;

        if let Some(name) = name {
            habit.name = name;
        }
        if let Some(description) = description {
            habit.description = description;
        }
        Ok(habit.clone())
    }

    /// Clears every completion flag. Returns how many habits were done.
    pub fn reset_all(&mut self) -> usize {
        let mut cleared = 0;
        for habit in &mut self.habits {
            if habit.completed {
                habit.completed = false;
                cleared += 1;
            }
        }
        cleared
    }

    /// Replaces the whole list. Records repeating an earlier id are dropped so the
    /// uniqueness invariant holds even for hand-edited snapshots.
    pub fn replace_all(&mut self, records: Vec<HabitRecord>) {
        let mut seen = HashSet::new();
        let mut habits = Vec::with_capacity(records.len());
        for record in records {
            if seen.insert(record.id.clone()) {
                habits.push(record);
            } else {
                warn!("event=store_replace status=dropped reason=duplicate_id");
            }
        }
        self.habits = habits;
    }
}

fn empty_name() -> HabitzError {
    HabitzError::Validation("Habit name cannot be empty".into())
}
