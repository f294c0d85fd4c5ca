//! Streak ledger.
//!
//! A streak counts consecutive local calendar days with at least one
//! training event. The ledger is a pure transition over [`ProgressState`]:
//!
//! | last event   | new streak              |
//! |--------------|-------------------------|
//! | none         | 1                       |
//! | today        | unchanged (at least 1)  |
//! | yesterday    | previous + 1            |
//! | anything else| 1                       |
//!
//! Only creating a log entry or completing a program day advances it.

use crate::{DateKey, ProgressState};

/// Apply a training event on `today` to the previous state
///
/// Re-applying the same day is a no-op. The program fields are carried over
/// unchanged.
pub fn advance(prev: &ProgressState, today: DateKey) -> ProgressState {
    let yesterday = today.previous();

    let streak = match prev.last_event_date {
        None => 1,
        Some(last) if last == today => prev.streak.max(1),
        Some(last) if Some(last) == yesterday => prev.streak.saturating_add(1),
        Some(_) => 1,
    };

    let longest_streak = prev.longest_streak.max(streak);

    tracing::debug!(
        "Streak {} -> {} (longest {}), last event {:?} -> {}",
        prev.streak,
        streak,
        longest_streak,
        prev.last_event_date.map(|d| d.to_string()),
        today
    );

    ProgressState {
        last_event_date: Some(today),
        streak,
        longest_streak,
        active_program_id: prev.active_program_id.clone(),
        day_cursor: prev.day_cursor,
    }
}
