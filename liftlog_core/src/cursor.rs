//! Program cursor: which day of the active program comes next.

use crate::ledger::advance;
use crate::program::{DayProgram, ExercisePrescription, Program};
use crate::{DateKey, ProgressState};
use serde::Serialize;

/// Read a stored cursor against a program length; out-of-range reads as 0
pub fn clamp_cursor(cursor: usize, total_days: usize) -> usize {
    if cursor < total_days {
        cursor
    } else {
        0
    }
}

/// Index of the day after `current`, wrapping around
///
/// A program without days has nowhere to go, so the index stays 0.
pub fn next_index(current: usize, total_days: usize) -> usize {
    if total_days == 0 {
        return 0;
    }
    (clamp_cursor(current, total_days) + 1) % total_days
}

/// The scheduled day the cursor points at
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct TodayWorkout {
    pub program_id: String,
    pub day_index: usize,
    pub total_days: usize,
    pub title: String,
    pub focus: String,
    pub exercises: Vec<ExercisePrescription>,
}

impl TodayWorkout {
    /// Resolve today's day for a program; `None` when it has no days
    pub fn resolve(program_id: &str, program: &Program, cursor: usize) -> Option<Self> {
        let total_days = program.days.len();
        if total_days == 0 {
            return None;
        }

        let day_index = clamp_cursor(cursor, total_days);
        let DayProgram {
            title,
            focus,
            exercises,
        } = &program.days[day_index];

        let title = if title.trim().is_empty() {
            format!("Day {}", day_index + 1)
        } else {
            title.clone()
        };

        Some(Self {
            program_id: program_id.to_string(),
            day_index,
            total_days,
            title,
            focus: focus.clone(),
            exercises: exercises.clone(),
        })
    }
}

/// Apply a program-day completion: streak and cursor move together
///
/// Both fields are derived from `prev`, so the caller can write them as a
/// single update.
pub fn complete_day(prev: &ProgressState, total_days: usize, today: DateKey) -> ProgressState {
    let mut next = advance(prev, today);
    next.day_cursor = next_index(prev.day_cursor, total_days);

    tracing::info!(
        "Program day completed: cursor {} -> {} of {}, streak {}",
        prev.day_cursor,
        next.day_cursor,
        total_days,
        next.streak
    );

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate, Equipment, Experience, Goal};

    #[test]
    fn test_next_index_advances_and_wraps() {
        assert_eq!(next_index(0, 4), 1);
        assert_eq!(next_index(2, 4), 3);
        assert_eq!(next_index(3, 4), 0);
        assert_eq!(next_index(0, 1), 0);
    }

    #[test]
    fn test_next_index_with_no_days() {
        assert_eq!(next_index(0, 0), 0);
        assert_eq!(next_index(5, 0), 0);
    }

    #[test]
    fn test_out_of_range_cursor_restarts() {
        assert_eq!(clamp_cursor(7, 3), 0);
        assert_eq!(next_index(7, 3), 1);
    }

    #[test]
    fn test_today_resolves_clamped_day() {
        let program = generate(Goal::Muscle, 4, Experience::Intermediate, Equipment::Gym);

        let today = TodayWorkout::resolve("p1", &program, 1).unwrap();
        assert_eq!(today.day_index, 1);
        assert_eq!(today.total_days, 4);
        assert_eq!(today.title, "Day 2 — Lower Body");

        let stale = TodayWorkout::resolve("p1", &program, 12).unwrap();
        assert_eq!(stale.day_index, 0);
    }

    #[test]
    fn test_today_title_fallback_and_empty_program() {
        let mut program = generate(Goal::Muscle, 2, Experience::Intermediate, Equipment::Gym);
        program.days[1].title = "  ".into();
        assert_eq!(TodayWorkout::resolve("p", &program, 1).unwrap().title, "Day 2");

        program.days.clear();
        assert!(TodayWorkout::resolve("p", &program, 0).is_none());
    }

    #[test]
    fn test_complete_day_moves_streak_and_cursor_together() {
        let prev = ProgressState {
            last_event_date: Some("2024-06-09".parse().unwrap()),
            streak: 2,
            longest_streak: 4,
            active_program_id: Some("p1".into()),
            day_cursor: 2,
        };

        let next = complete_day(&prev, 3, "2024-06-10".parse().unwrap());
        assert_eq!(next.streak, 3);
        assert_eq!(next.longest_streak, 4);
        assert_eq!(next.day_cursor, 0);
        assert_eq!(next.active_program_id.as_deref(), Some("p1"));
    }

    #[test]
    fn test_completing_twice_same_day_still_advances_cursor() {
        let day: DateKey = "2024-06-10".parse().unwrap();
        let first = complete_day(&ProgressState::default(), 3, day);
        let second = complete_day(&first, 3, day);

        assert_eq!(second.streak, 1);
        assert_eq!(second.day_cursor, 2);
    }
}
