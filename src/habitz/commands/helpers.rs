use crate::commands::CmdMessage;
use crate::index::{resolve, DisplayHabit, HabitSelector};
use crate::model::HabitRecord;
use std::collections::HashSet;

/// Resolves selectors against the current list, in input order.
///
/// Positions are captured before anything is mutated, so `remove 1 2` removes the
/// first two habits as listed rather than shifting under the caller. A habit named
/// more than once (`done 1 1`, or by position and by name) is returned once. Selectors
/// that match nothing produce a warning instead of failing the whole command.
pub fn resolve_selectors(
    habits: &[HabitRecord],
    selectors: &[HabitSelector],
) -> (Vec<DisplayHabit>, Vec<CmdMessage>) {
    let mut found = Vec::new();
    let mut seen = HashSet::new();
    let mut warnings = Vec::new();

    for selector in selectors {
        let Some(habit) = resolve(habits, selector) else {
            let message = format!("No habit matches {}", selector);
            warnings.push(CmdMessage::warning(message));
            continue;
        };
        if !seen.insert(habit.id.as_str()) {
            continue;
        }

        let index = habits
            .iter()
            .position(|h| h.id == habit.id)
            .map(|p| p + 1)
            .unwrap_or_default();
        found.push(DisplayHabit {
            index,
            habit: habit.clone(),
        });
    }

    (found, warnings)
}
