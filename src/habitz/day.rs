//! Calendar-day stamps and the clock that produces "today".
//!
//! Snapshots carry a day stamp without a time component. Comparison is always by
//! calendar day in the local timezone: two sessions started at 00:05 and 23:55 of the
//! same day see the same stamp.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format used when writing stamps, e.g. `Mon Jun 10 2024`.
pub const STAMP_FORMAT: &str = "%a %b %d %Y";
const ISO_FORMAT: &str = "%Y-%m-%d";

/// The string form of a calendar day as stored in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayStamp(String);

impl DayStamp {
    pub fn for_day(day: NaiveDate) -> Self {
        Self(day.format(STAMP_FORMAT).to_string())
    }

    /// Wraps a raw stored value without validating it.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the stamp back into a day. Accepts the written format and ISO dates.
    pub fn day(&self) -> Option<NaiveDate> {
        let raw = self.0.trim();
        NaiveDate::parse_from_str(raw, STAMP_FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(raw, ISO_FORMAT))
            .ok()
    }

    /// An unparseable stamp never matches, so it is handled as a day change.
    pub fn is_same_day(&self, today: NaiveDate) -> bool {
        match self.day() {
            Some(day) => day == today,
            None => false,
        }
    }
}

impl fmt::Display for DayStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of "today" for the load rule and for snapshot stamps.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one day. Used by tests and by the hidden `--today` flag.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Parses a `YYYY-MM-DD` argument.
pub fn parse_iso_day(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), ISO_FORMAT).ok()
}
