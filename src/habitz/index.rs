//! User-facing habit addressing.
//!
//! Habits are stored under opaque ids, but people type positions. The list view numbers
//! habits from 1 in display order, and commands accept those numbers (`2`), ranges
//! (`1-3`), exact ids, or a habit name.

use crate::model::HabitRecord;
use std::fmt;
use std::str::FromStr;

/// A habit paired with its 1-based display position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayHabit {
    pub index: usize,
    pub habit: HabitRecord,
}

/// Numbers `habits` in display order.
pub fn index_habits(habits: &[HabitRecord]) -> Vec<DisplayHabit> {
    habits
        .iter()
        .enumerate()
        .map(|(i, habit)| DisplayHabit {
            index: i + 1,
            habit: habit.clone(),
        })
        .collect()
}

/// A user input that selects one habit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitSelector {
    Index(usize),
    /// Exact id, or failing that, a case-insensitive exact name.
    Term(String),
}

impl fmt::Display for HabitSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HabitSelector::Index(i) => write!(f, "{}", i),
            HabitSelector::Term(t) => write!(f, "\"{}\"", t),
        }
    }
}

impl FromStr for HabitSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<usize>() {
            Ok(0) => Err("Indexes start at 1".to_string()),
            Ok(n) => Ok(HabitSelector::Index(n)),
            Err(_) => Err(format!("Invalid index format: {}", s)),
        }
    }
}

/// Parses `"3"` or `"1-3"` into indexes.
pub fn parse_index_or_range(s: &str) -> Result<Vec<HabitSelector>, String> {
    if let Some((start, end)) = s.split_once('-') {
        if !start.is_empty() {
            let start = parse_position(start)?;
            let end = parse_position(end)?;
            if start > end {
                return Err(format!(
                    "Invalid range: start ({}) must be <= end ({})",
                    start, end
                ));
            }
            return Ok((start..=end).map(HabitSelector::Index).collect());
        }
    }
    HabitSelector::from_str(s).map(|sel| vec![sel])
}

fn parse_position(s: &str) -> Result<usize, String> {
    match HabitSelector::from_str(s)? {
        HabitSelector::Index(n) => Ok(n),
        HabitSelector::Term(_) => Err(format!("Invalid index format: {}", s)),
    }
}

/// Turns raw arguments into selectors.
///
/// If every argument is an index or range they are used as such. Otherwise the whole
/// input is one term (so `habitz done drink water` works without quotes).
pub fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Vec<HabitSelector> {
    let parsed: Result<Vec<Vec<HabitSelector>>, String> = inputs
        .iter()
        .map(|s| parse_index_or_range(s.as_ref()))
        .collect();

    match parsed {
        Ok(groups) => groups.into_iter().flatten().collect(),
        Err(_) => {
            let term = inputs
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<&str>>()
                .join(" ");
            vec![HabitSelector::Term(term)]
        }
    }
}

/// Finds the habit a selector points at.
pub fn resolve<'a>(
    habits: &'a [HabitRecord],
    selector: &HabitSelector,
) -> Option<&'a HabitRecord> {
    match selector {
        HabitSelector::Index(n) => habits.get(n.checked_sub(1)?),
        HabitSelector::Term(term) => {
            let term = term.trim();
            if let Some(habit) = habits.iter().find(|h| h.id == term) {
                return Some(habit);
            }
            let lowered = term.to_lowercase();
            habits.iter().find(|h| h.name.to_lowercase() == lowered)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_habits;

    #[test]
    fn indexes_from_one() {
        let indexed = index_habits(&default_habits());
        assert_eq!(indexed[0].index, 1);
        assert_eq!(indexed.last().unwrap().index, indexed.len());
    }

    #[test]
    fn parses_single_and_range() {
        assert_eq!(
            parse_index_or_range("2").unwrap(),
            vec![HabitSelector::Index(2)]
        );
        assert_eq!(
            parse_index_or_range("1-3").unwrap(),
            vec![
                HabitSelector::Index(1),
                HabitSelector::Index(2),
                HabitSelector::Index(3)
            ]
        );
        assert!(parse_index_or_range("3-1").is_err());
        assert!(parse_index_or_range("0").is_err());
    }

    #[test]
    fn non_index_input_becomes_one_term() {
        assert_eq!(
            parse_selectors(&["drink", "water"]),
            vec![HabitSelector::Term("drink water".into())]
        );
        assert_eq!(
            parse_selectors(&["1", "3-4"]),
            vec![
                HabitSelector::Index(1),
                HabitSelector::Index(3),
                HabitSelector::Index(4)
            ]
        );
    }

    #[test]
    fn resolves_by_index_id_and_name() {
        let habits = default_habits();
        let second = HabitSelector::Index(2);
        assert_eq!(resolve(&habits, &second).unwrap().id, habits[1].id);
        assert!(resolve(&habits, &HabitSelector::Index(99)).is_none());

        let by_id = HabitSelector::Term(habits[2].id.clone());
        assert_eq!(resolve(&habits, &by_id).unwrap().id, habits[2].id);

        let by_name = HabitSelector::Term("drink WATER".into());
        assert_eq!(resolve(&habits, &by_name).unwrap().name, "Drink water");
    }
}
