use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder used when a habit is created or edited with a blank description.
pub const DEFAULT_DESCRIPTION: &str = "No description";

/// A single habit with its completion flag for the current day.
///
/// Field names are the persisted names; the JSON layout of a record must not change
/// without a migration since old snapshots are read back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub completed: bool,
}

impl HabitRecord {
    /// Builds a new, not-yet-completed record with a freshly generated id.
    ///
    /// Callers are expected to have validated `name` already (see [`normalize_name`]).
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: new_habit_id(),
            name: name.into(),
            description: description.into(),
            completed: false,
        }
    }
}

/// Ids are v4 UUIDs rendered as strings. The stored form stays an opaque string so
/// snapshots written by other tools (e.g. timestamp-derived ids) still load.
pub fn new_habit_id() -> String {
    Uuid::new_v4().to_string()
}

/// Returns the trimmed name, or `None` when nothing is left.
pub fn normalize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Blank (or missing) descriptions collapse to `placeholder`.
pub fn normalize_description(description: Option<&str>, placeholder: &str) -> String {
    match description.map(str::trim) {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => placeholder.to_string(),
    }
}

/// The built-in list a session starts from when nothing has been stored yet.
///
/// The ids are fixed so that a fresh session always yields exactly the same list.
pub fn default_habits() -> Vec<HabitRecord> {
    [
        ("default-1", "Drink water", "8 glasses throughout the day"),
        ("default-2", "Exercise", "30 minutes of movement"),
        ("default-3", "Read", "At least 20 pages"),
        ("default-4", "Meditate", "10 minutes of quiet breathing"),
    ]
    .into_iter()
    .map(|(id, name, description)| HabitRecord {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        completed: false,
    })
    .collect()
}
