use crate::commands::{CmdMessage, CmdResult};
use crate::error::{HabitzError, Result};
use crate::index::HabitSelector;
use crate::session::Session;
use crate::store::backend::StorageBackend;

use super::helpers::resolve_selectors;

pub fn run<B: StorageBackend + 'static>(
    session: &mut Session<B>,
    selector: &HabitSelector,
    name: Option<&str>,
    description: Option<&str>,
) -> Result<CmdResult> {
    if name.is_none() && description.is_none() {
        let reason = "Nothing to change: pass a new name and/or description";
        return Err(HabitzError::Validation(reason.into()));
    }

    let selectors = std::slice::from_ref(selector);
    let (targets, _) = resolve_selectors(session.store().habits(), selectors);
    let target = targets
        .into_iter()
        .next()
        .ok_or_else(|| HabitzError::HabitNotFound(selector.to_string()))?;

    let updated = session.update(&target.habit.id, name, description)?;

    let mut result = CmdResult::default();
    let message = format!("Habit updated ({}): {}", target.index, updated.name);
    result.add_message(CmdMessage::success(message));
    Ok(result.with_affected_habits(vec![updated]))
}
