use crate::commands::{CmdMessage, CmdResult, Progress};
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
        match session.toggle(&target.habit.id) {
            Some(completed) => {
                let label = if completed { "Done" } else { "Not done" };
                let message = format!("{} ({}): {}", label, target.index, target.habit.name);
                result.add_message(CmdMessage::success(message));
                if let Some(habit) = session.store().get(&target.habit.id) {
                    result.affected_habits.push(habit.clone());
                }
            }
            None => {
                let message = format!("Habit {} is gone", target.index);
                result.add_message(CmdMessage::warning(message));
            }
        }
    }

    let store = session.store();
    Ok(result.with_progress(Progress {
        done: store.completed_count(),
        total: store.len(),
    }))
}
