use crate::commands::{CmdMessage, CmdResult, Progress};
use crate::error::Result;
use crate::session::Session;
use crate::store::backend::StorageBackend;

/// Clears today's completion flags. The habit list itself is untouched.
pub fn run<B: StorageBackend + 'static>(session: &mut Session<B>) -> Result<CmdResult> {
    let cleared = session.reset_all();

    let mut result = CmdResult::default();
    let message = match cleared {
        0 => CmdMessage::info("Nothing to reset."),
        1 => CmdMessage::success("Reset 1 completed habit."),
        n => CmdMessage::success(format!("Reset {} completed habits.", n)),
    };
    result.add_message(message);

    Ok(result.with_progress(Progress {
        done: 0,
        total: session.store().len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_habits;
    use crate::store::fixtures::SessionFixture;

    #[test]
    fn clears_flags_and_persists() {
        let mut habits = default_habits();
        habits[0].completed = true;
        habits[3].completed = true;
        let fixture = SessionFixture::new().with_stored(habits.clone(), "Mon Jun 10 2024");
        let mut session = fixture.open();
        assert_eq!(session.store().completed_count(), 2);

        let result = run(&mut session).unwrap();
        session.flush();

        assert!(result.messages[0].content.contains("2"));
        let stored = fixture.stored().unwrap();
        assert_eq!(stored.habits.len(), habits.len());
        assert!(stored.habits.iter().all(|h| !h.completed));
    }
}
