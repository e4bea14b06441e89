//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry point
//! for every habitz operation, whatever UI sits on top.
//!
//! It dispatches to `commands::*`, turns raw user input (positions, ranges, names) into
//! selectors, and returns structured `Result<CmdResult>` values. It does no I/O of its
//! own and holds no business logic.
//!
//! ## Generic Over StorageBackend
//!
//! `HabitzApi<B: StorageBackend>`:
//! - Production: `HabitzApi<SessionBackend>`, a boxed `FsBackend` (or `MemBackend` when
//!   no data directory can be found)
//! - Testing: `HabitzApi<MemBackend>`
//!
//! The session inside is opened (and the daily load rule evaluated) when the API is
//! constructed, so callers cannot mutate the list before the rule has run.

use crate::commands;
use crate::error::{HabitzError, Result};
use crate::index::{parse_index_or_range, parse_selectors, HabitSelector};
use crate::session::{LoadState, Session};
use crate::store::backend::StorageBackend;
use crate::store::writer::WriteFailure;

pub struct HabitzApi<B: StorageBackend + 'static> {
    session: Session<B>,
    paths: commands::HabitzPaths,
}

impl<B: StorageBackend + 'static> HabitzApi<B> {
    pub fn new(session: Session<B>, paths: commands::HabitzPaths) -> Self {
        Self { session, paths }
    }

    pub fn list(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.session)
    }

    pub fn add(&mut self, name: &str, description: Option<&str>) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.session, name, description)
    }

    pub fn toggle<I: AsRef<str>>(&mut self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = require_selectors(inputs)?;
        commands::toggle::run(&mut self.session, &selectors)
    }

    pub fn remove<I: AsRef<str>>(&mut self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = require_selectors(inputs)?;
        commands::remove::run(&mut self.session, &selectors)
    }

    pub fn edit(
        &mut self,
        input: &str,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let selector = single_selector(input);
        commands::edit::run(&mut self.session, &selector, name, description)
    }

    pub fn reset(&mut self) -> Result<commands::CmdResult> {
        commands::reset::run(&mut self.session)
    }

    pub fn clear(&mut self) -> Result<commands::CmdResult> {
        commands::clear::run(&mut self.session)
    }

    pub fn path(&self) -> Result<commands::CmdResult> {
        commands::path::run(&self.session)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn load_state(&self) -> LoadState {
        self.session.load_state()
    }

    /// Waits for pending writes and returns every write that failed so far.
    pub fn flush(&self) -> Vec<WriteFailure> {
        self.session.flush();
        self.session.take_write_errors()
    }
}

fn require_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<HabitSelector>> {
    if inputs.iter().all(|s| s.as_ref().trim().is_empty()) {
        return Err(HabitzError::Api("No habit given".into()));
    }
    Ok(parse_selectors(inputs))
}

/// A single target: a lone position, or else an id/name term.
fn single_selector(input: &str) -> HabitSelector {
    match parse_index_or_range(input) {
        Ok(mut selectors) if selectors.len() == 1 => selectors.remove(0),
        _ => HabitSelector::Term(input.to_string()),
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, HabitzPaths, MessageLevel, Progress};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_habits;
    use crate::store::fixtures::SessionFixture;
    use crate::store::mem_backend::MemBackend;
    use chrono::NaiveDate;

    fn api(fixture: &SessionFixture) -> HabitzApi<MemBackend> {
        HabitzApi::new(fixture.open(), HabitzPaths { data_dir: None })
    }

    #[test]
    fn toggle_accepts_positions_and_names() {
        let fixture = SessionFixture::new();
        let mut api = api(&fixture);

        api.toggle(&["1-2"]).unwrap();
        api.toggle(&["Read"]).unwrap();
        let listed = api.list().unwrap();
        assert_eq!(listed.progress.unwrap().done, 3);
    }

    #[test]
    fn toggle_without_input_is_an_error() {
        let fixture = SessionFixture::new();
        let mut api = api(&fixture);
        let empty: [&str; 0] = [];
        assert!(api.toggle(&empty).is_err());
        assert!(api.remove(&[" "]).is_err());
    }

    #[test]
    fn edit_by_position_or_name() {
        let fixture = SessionFixture::new();
        let mut api = api(&fixture);

        api.edit("1", Some("Hydrate"), None).unwrap();
        api.edit("hydrate", None, Some("2 litres")).unwrap();

        let first = &api.list().unwrap().listed_habits[0].habit;
        assert_eq!(first.name, "Hydrate");
        assert_eq!(first.description, "2 litres");
    }

    #[test]
    fn stretch_scenario_through_the_api() {
        let fixture = SessionFixture::new();
        {
            let mut api = api(&fixture);
            api.add("Stretch", Some("5 min")).unwrap();
            api.toggle(&["Stretch"]).unwrap();
            assert!(api.flush().is_empty());
        }

        let next_day = fixture.on(NaiveDate::from_ymd_opt(2024, 6, 11).unwrap());
        let api = api(&next_day);
        assert_eq!(api.load_state(), LoadState::NewDay);

        let listed = api.list().unwrap();
        let stretch = &listed.listed_habits.last().unwrap().habit;
        assert_eq!(stretch.name, "Stretch");
        assert_eq!(stretch.description, "5 min");
        assert!(!stretch.completed);
    }

    #[test]
    fn flush_surfaces_write_failures() {
        let fixture = SessionFixture::new();
        let mut api = api(&fixture);
        fixture.backend.set_simulate_write_error(true);

        api.add("Floss", None).unwrap();
        let failures = api.flush();
        assert_eq!(failures.len(), 1);
        assert_eq!(api.list().unwrap().listed_habits.len(), 5);
    }

    #[test]
    fn corrupt_state_starts_from_defaults() {
        let fixture = SessionFixture::new().with_raw("{\"habits\": [");
        let api = api(&fixture);
        assert_eq!(api.load_state(), LoadState::NoStoredData);

        let listed = api.list().unwrap();
        let names: Vec<_> = listed.listed_habits.iter().map(|d| &d.habit).collect();
        assert_eq!(names, default_habits().iter().collect::<Vec<_>>());
    }
}
