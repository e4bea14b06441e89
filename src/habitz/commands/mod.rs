//! # Command Layer
//!
//! One module per operation. Commands take the [`Session`](crate::session::Session)
//! (or paths, for config), do the work, and describe what happened in a [`CmdResult`].
//! They never print and never prompt; confirmation is the caller's job.

use crate::index::DisplayHabit;
use crate::model::HabitRecord;
use std::path::PathBuf;

pub mod add;
pub mod clear;
pub mod config;
pub mod edit;
pub mod helpers;
pub mod list;
pub mod path;
pub mod remove;
pub mod reset;
pub mod toggle;

#[derive(Debug, Clone)]
pub struct HabitzPaths {
    /// `None` when the session runs in memory only.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// Today's completion tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_habits: Vec<HabitRecord>,
    pub listed_habits: Vec<DisplayHabit>,
    pub progress: Option<Progress>,
    pub paths: Vec<PathBuf>,
    pub config_values: Vec<(String, String)>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_habits(mut self, habits: Vec<HabitRecord>) -> Self {
        self.affected_habits = habits;
        self
    }

    pub fn with_listed_habits(mut self, habits: Vec<DisplayHabit>) -> Self {
        self.listed_habits = habits;
        self
    }

    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_config_values(mut self, values: Vec<(String, String)>) -> Self {
        self.config_values = values;
        self
    }
}
