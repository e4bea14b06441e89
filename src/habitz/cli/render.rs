//! Terminal output.
//!
//! Layout math (column widths, truncation) is Unicode-aware; colors come from
//! `colored`, which turns itself off when stdout is not a terminal.

use colored::*;
use habitz::api::{CmdMessage, MessageLevel, Progress};
use habitz::index::DisplayHabit;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 80;
const MAX_NAME_WIDTH: usize = 28;
const DONE_MARKER: &str = "[x]";
const OPEN_MARKER: &str = "[ ]";

/// Renders the checklist followed by the progress line.
pub fn render_habit_list(habits: &[DisplayHabit], progress: Option<Progress>) -> String {
    if habits.is_empty() {
        return "No habits yet. Add one with `habitz add <name>`.\n".to_string();
    }

    let index_width = habits.len().to_string().len();
    let name_width = habits
        .iter()
        .map(|dh| dh.habit.name.width())
        .max()
        .unwrap_or(0)
        .min(MAX_NAME_WIDTH);

    let mut out = String::new();
    for dh in habits {
        let index = format!("{:>width$}.", dh.index, width = index_width);
        let name = truncate_to_width(&dh.habit.name, name_width);
        let padding = " ".repeat(name_width.saturating_sub(name.width()));

        let fixed = 2 + index.width() + 1 + DONE_MARKER.len() + 1 + name_width + 2;
        let budget = LINE_WIDTH.saturating_sub(fixed);
        let description = truncate_to_width(&dh.habit.description, budget);

        let (marker, name) = if dh.habit.completed {
            (DONE_MARKER.green(), name.green())
        } else {
            (OPEN_MARKER.normal(), name.normal())
        };

        out.push_str(&format!(
            "  {} {} {}{}  {}\n",
            index.yellow(),
            marker,
            name,
            padding,
            description.dimmed()
        ));
    }

    if let Some(progress) = progress {
        out.push('\n');
        out.push_str(&render_progress(progress));
    }
    out
}

pub fn render_progress(progress: Progress) -> String {
    let line = format!("{}/{} done today", progress.done, progress.total);
    if progress.total > 0 && progress.done == progress.total {
        format!("{}. All done!\n", line.green().bold())
    } else {
        format!("{}\n", line.dimmed())
    }
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let styled = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
        };
        out.push_str(&format!("{}\n", styled));
    }
    out
}

pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages));
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use habitz::index::index_habits;
    use habitz::model::default_habits;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn lists_numbered_checklist() {
        plain();
        let mut habits = default_habits();
        habits[1].completed = true;
        let progress = Progress { done: 1, total: 4 };
        let out = render_habit_list(&index_habits(&habits), Some(progress));

        assert!(out.contains("1. [ ] Drink water"));
        assert!(out.contains("2. [x] Exercise"));
        assert!(out.contains("8 glasses throughout the day"));
        assert!(out.ends_with("1/4 done today\n"));
    }

    #[test]
    fn all_done_is_celebrated() {
        plain();
        let out = render_progress(Progress { done: 2, total: 2 });
        assert_eq!(out, "2/2 done today. All done!\n");
    }

    #[test]
    fn empty_list_hint() {
        plain();
        assert!(render_habit_list(&[], None).starts_with("No habits yet"));
    }

    #[test]
    fn truncates_long_text() {
        assert_eq!(truncate_to_width("abcdef", 4), "abc…");
        assert_eq!(truncate_to_width("abc", 4), "abc");
    }

    #[test]
    fn zero_width_leaves_nothing() {
        assert_eq!(truncate_to_width("abc", 0), "");
        assert_eq!(truncate_to_width("", 0), "");
        assert_eq!(truncate_to_width("abc", 1), "…");
    }

    #[test]
    fn messages_one_per_line() {
        plain();
        let out = render_messages(&[CmdMessage::success("a"), CmdMessage::warning("b")]);
        assert_eq!(out, "a\nb\n");
    }
}
