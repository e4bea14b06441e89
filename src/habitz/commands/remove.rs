use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::HabitSelector;
use crate::session::Session;
use crate::store::backend::StorageBackend;

use super::helpers::resolve_selectors;

pub fn run<B: StorageBackend + 'static>(
    session: &mut Session<B>,
    selectors: &[HabitSelector],
) -> Result<CmdResult> {
    let (targets, warnings) = resolve_selectors(session.store().habits(), selectors);
    let mut result = CmdResult::default();
    result.messages.extend(warnings);

    for target in targets {
        match session.remove(&target.habit.id) {
            Some(removed) => {
                let message = format!("Habit removed ({}): {}", target.index, removed.name);
                result.add_message(CmdMessage::success(message));
                result.affected_habits.push(removed);
            }
            None => {
                let message = format!("Habit {} was already removed", target.index);
                result.add_message(CmdMessage::info(message));
            }
        }
    }

    Ok(result)
}
