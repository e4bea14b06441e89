use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::Session;
use crate::store::backend::StorageBackend;

pub fn run<B: StorageBackend + 'static>(
    session: &mut Session<B>,
    name: &str,
    description: Option<&str>,
) -> Result<CmdResult> {
    let habit = session.add(name, description)?;
    let index = session.store().len();

    let mut result = CmdResult::default();
    let message = format!("Habit added ({}): {}", index, habit.name);
    result.add_message(CmdMessage::success(message));
    Ok(result.with_affected_habits(vec![habit]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HabitzError;
    use crate::store::fixtures::SessionFixture;

    #[test]
    fn adds_to_the_end_and_persists() {
        let fixture = SessionFixture::new();
        let mut session = fixture.open();
        let before = session.store().len();

        let result = run(&mut session, "Stretch", Some("5 min")).unwrap();
        session.flush();

        assert_eq!(session.store().len(), before + 1);
        assert_eq!(result.affected_habits[0].name, "Stretch");
        assert!(!result.affected_habits[0].completed);
        let position = format!("({})", before + 1);
        assert!(result.messages[0].content.contains(&position));

        let stored = fixture.stored().unwrap();
        assert_eq!(stored.habits.last().unwrap().name, "Stretch");
    }

    #[test]
    fn blank_name_is_a_validation_error() {
        let fixture = SessionFixture::new();
        let mut session = fixture.open();
        let before = session.store().len();

        let err = run(&mut session, "   ", None).unwrap_err();
        assert!(matches!(err, HabitzError::Validation(_)));
        assert_eq!(session.store().len(), before);
    }
}
