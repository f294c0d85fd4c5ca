//! Dashboard analytics.
//!
//! Reduces a user's workout history into the numbers the dashboard shows.
//! Entries are sorted newest first (stable), then scanned once; every
//! "first wins" tie-break below refers to that scan order.

use crate::{Category, DateKey, LogEntry, ProfileFields};
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Length of the rolling window, in local calendar days (today included)
pub const WINDOW_DAYS: u64 = 7;

/// How many personal records the dashboard lists
pub const MAX_PERSONAL_RECORDS: usize = 5;

/// Entry count for one window day
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DayCount {
    pub date: DateKey,
    /// Short weekday name, e.g. "Mon"
    pub label: String,
    pub count: u32,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: Category,
    pub count: u32,
}

/// Heaviest logged weight for one exercise name
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PersonalRecord {
    pub exercise: String,
    pub weight: f64,
    pub achieved_at: DateTime<Utc>,
    pub entry_id: Option<String>,
}

/// Everything the dashboard renders; derived on every request
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DashboardStats {
    pub total_workouts: usize,
    pub total_volume: f64,
    pub last_workout_at: Option<DateTime<Utc>>,
    pub active_days_7d: usize,
    /// Window days, oldest first
    pub weekly: Vec<DayCount>,
    /// Window-scoped counts in first-encountered order
    pub categories: Vec<CategoryCount>,
    pub top_category: Option<CategoryCount>,
    pub todays_workouts: u32,
    pub todays_volume: f64,
    pub personal_records: Vec<PersonalRecord>,
    pub weekly_goal_days: u32,
    pub streak: u32,
    pub longest_streak: u32,
    pub weight: Option<f64>,
    pub goal_weight: Option<f64>,
}

impl DashboardStats {
    pub fn weekly_goal(&self) -> WeeklyGoalProgress {
        WeeklyGoalProgress::new(self.active_days_7d, self.weekly_goal_days)
    }

    pub fn goal_weight_status(&self) -> Option<GoalWeightStatus> {
        GoalWeightStatus::compare(self.weight, self.goal_weight)
    }
}

/// Aggregate `entries` as seen at `now` (whose time zone defines "local")
pub fn aggregate<Tz: TimeZone>(
    entries: &[LogEntry],
    profile: &ProfileFields,
    now: &DateTime<Tz>,
) -> DashboardStats {
    let tz = now.timezone();
    let today = DateKey::of(now);

    let mut weekly: Vec<DayCount> = (0..WINDOW_DAYS)
        .rev()
        .filter_map(|offset| today.days_before(offset))
        .map(|date| DayCount {
            date,
            label: date.date().format("%a").to_string(),
            count: 0,
        })
        .collect();
    let window_start = weekly.first().map(|d| d.date).unwrap_or(today);

    let mut sorted: Vec<&LogEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut total_volume = 0.0;
    let mut todays_workouts = 0;
    let mut todays_volume = 0.0;
    let mut categories: Vec<CategoryCount> = Vec::new();
    let mut records: Vec<PersonalRecord> = Vec::new();
    let mut record_index: HashMap<String, usize> = HashMap::new();

    for entry in &sorted {
        let day = DateKey::in_zone(&entry.created_at, &tz);
        let volume = entry.volume();

        total_volume += volume;
        if day == today {
            todays_workouts += 1;
            todays_volume += volume;
        }

        if day >= window_start && day <= today {
            if let Some(slot) = weekly.iter_mut().find(|d| d.date == day) {
                slot.count += 1;
            }
            match categories.iter_mut().find(|c| c.category == entry.category) {
                Some(existing) => existing.count += 1,
                None => categories.push(CategoryCount {
                    category: entry.category,
                    count: 1,
                }),
            }
        }

        let exercise = entry.exercise.trim();
        if exercise.is_empty() || entry.weight <= 0.0 {
            continue;
        }
        match record_index.get(exercise) {
            Some(&idx) => {
                let record = &mut records[idx];
                if entry.weight > record.weight {
                    record.weight = entry.weight;
                    record.achieved_at = entry.created_at;
                    record.entry_id = entry.id.clone();
                }
            }
            None => {
                record_index.insert(exercise.to_string(), records.len());
                records.push(PersonalRecord {
                    exercise: exercise.to_string(),
                    weight: entry.weight,
                    achieved_at: entry.created_at,
                    entry_id: entry.id.clone(),
                });
            }
        }
    }

    let mut top_category: Option<CategoryCount> = None;
    for candidate in &categories {
        if candidate.count > top_category.map_or(0, |c| c.count) {
            top_category = Some(*candidate);
        }
    }

    records.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    records.truncate(MAX_PERSONAL_RECORDS);

    let active_days_7d = weekly.iter().filter(|d| d.count > 0).count();

    tracing::debug!(
        "Aggregated {} entries: {} active days, {} records",
        entries.len(),
        active_days_7d,
        records.len()
    );

    DashboardStats {
        total_workouts: entries.len(),
        total_volume,
        last_workout_at: sorted.first().map(|e| e.created_at),
        active_days_7d,
        weekly,
        categories,
        top_category,
        todays_workouts,
        todays_volume,
        personal_records: records,
        weekly_goal_days: profile.weekly_goal_days,
        streak: profile.streak,
        longest_streak: profile.longest_streak,
        weight: profile.weight,
        goal_weight: profile.goal_weight,
    }
}

// ============================================================================
// Derived Insights
// ============================================================================

/// Progress toward the weekly training-days goal
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct WeeklyGoalProgress {
    pub goal_days: u32,
    pub active_days: u32,
    pub percentage: u32,
    pub remaining_days: u32,
    pub completed: bool,
}

impl WeeklyGoalProgress {
    pub fn new(active_days: usize, weekly_goal_days: u32) -> Self {
        let goal_days = weekly_goal_days.max(1);
        let active_days = u32::try_from(active_days).unwrap_or(u32::MAX);
        let ratio = (f64::from(active_days) / f64::from(goal_days)).min(1.0);

        Self {
            goal_days,
            active_days,
            percentage: (ratio * 100.0).round() as u32,
            remaining_days: goal_days.saturating_sub(active_days),
            completed: active_days >= goal_days,
        }
    }
}

/// Where the current body weight sits relative to the goal
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GoalWeightStatus {
    /// Within half a kilo of the goal
    AtGoal,
    Above { kilos: f64 },
    Below { kilos: f64 },
}

impl GoalWeightStatus {
    pub fn compare(weight: Option<f64>, goal_weight: Option<f64>) -> Option<Self> {
        let (weight, goal) = (weight?, goal_weight?);
        let diff = weight - goal;

        Some(if diff.abs() < 0.5 {
            GoalWeightStatus::AtGoal
        } else if diff > 0.0 {
            GoalWeightStatus::Above { kilos: diff }
        } else {
            GoalWeightStatus::Below { kilos: -diff }
        })
    }
}
