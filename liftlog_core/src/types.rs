//! Core domain types shared across liftlog.
//!
//! This module defines:
//! - Calendar date keys (local dates, distinct from instants)
//! - Workout categories and logged entries
//! - Per-user progress state and profile fields

use crate::{Error, Result};
use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Calendar Keys
// ============================================================================

/// A local calendar date (`YYYY-MM-DD`).
///
/// Streaks and dashboard windows compare these, never raw instants, so two
/// events on the same local day always land on the same key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Calendar date of an instant in its own time zone
    pub fn of<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self(instant.date_naive())
    }

    /// Calendar date of a stored UTC instant as seen from `tz`
    pub fn in_zone<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> Self {
        Self(instant.with_timezone(tz).date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The calendar day before this one
    pub fn previous(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    pub fn days_before(&self, days: u64) -> Option<Self> {
        self.0.checked_sub_days(Days::new(days)).map(Self)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|e| Error::Validation(format!("Invalid date key '{}': {}", s, e)))
    }
}

// ============================================================================
// Workout Log
// ============================================================================

/// Muscle-group category of a logged set
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Category {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
    Cardio,
    #[serde(alias = "Full Body")]
    FullBody,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Chest,
        Category::Back,
        Category::Legs,
        Category::Shoulders,
        Category::Arms,
        Category::Core,
        Category::Cardio,
        Category::FullBody,
        Category::Other,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Chest => "Chest",
            Category::Back => "Back",
            Category::Legs => "Legs",
            Category::Shoulders => "Shoulders",
            Category::Arms => "Arms",
            Category::Core => "Core",
            Category::Cardio => "Cardio",
            Category::FullBody => "Full Body",
            Category::Other => "Other",
        };
        f.write_str(label)
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "chest" => Ok(Category::Chest),
            "back" => Ok(Category::Back),
            "legs" => Ok(Category::Legs),
            "shoulders" => Ok(Category::Shoulders),
            "arms" => Ok(Category::Arms),
            "core" => Ok(Category::Core),
            "cardio" => Ok(Category::Cardio),
            "fullbody" => Ok(Category::FullBody),
            "other" | "" => Ok(Category::Other),
            _ => Err(Error::Validation(format!("Unknown category: {}", s))),
        }
    }
}

/// One logged exercise (sets x reps at a weight)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    /// Document id; filled in when read back from the store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    #[serde(default)]
    pub category: Category,
    pub exercise: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl LogEntry {
    /// `sets * reps * weight`
    pub fn volume(&self) -> f64 {
        f64::from(self.sets) * f64::from(self.reps) * self.weight
    }
}

/// Unvalidated workout form input
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WorkoutDraft {
    #[serde(default)]
    pub category: Option<Category>,
    pub exercise: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
    #[serde(default)]
    pub notes: String,
}

impl WorkoutDraft {
    /// Validate the form and build an entry stamped with `created_at`
    pub fn into_entry(self, user_id: &str, created_at: DateTime<Utc>) -> Result<LogEntry> {
        let exercise = self.exercise.trim().to_string();
        if exercise.is_empty() {
            return Err(Error::Validation("Exercise name is required".into()));
        }
        if self.sets < 1 {
            return Err(Error::Validation("Sets must be at least 1".into()));
        }
        if self.reps < 1 {
            return Err(Error::Validation("Reps must be at least 1".into()));
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(Error::Validation(format!(
                "Weight must be a number >= 0, got {}",
                self.weight
            )));
        }

        Ok(LogEntry {
            id: None,
            user_id: user_id.to_string(),
            category: self.category.unwrap_or_default(),
            exercise,
            sets: self.sets,
            reps: self.reps,
            weight: self.weight,
            notes: self.notes.trim().to_string(),
            created_at,
        })
    }
}

/// Record of a completed program day, stored alongside free-form entries
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlanCompletion {
    pub user_id: String,
    pub program_id: String,
    pub day_index: usize,
    #[serde(default)]
    pub completed_exercises: Vec<bool>,
    pub created_at: DateTime<Utc>,
}

impl PlanCompletion {
    /// How a completion counts on the dashboard: one `Other` workout with no
    /// volume and no exercise, so it never becomes a personal record
    pub fn as_log_entry(&self) -> LogEntry {
        LogEntry {
            id: None,
            user_id: self.user_id.clone(),
            category: Category::Other,
            exercise: String::new(),
            sets: 0,
            reps: 0,
            weight: 0.0,
            notes: String::new(),
            created_at: self.created_at,
        }
    }
}

/// Everything the `workouts` collection may hold
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkoutRecord {
    Log(LogEntry),
    Plan(PlanCompletion),
}

// ============================================================================
// Progress and Profile
// ============================================================================

/// Per-user streak ledger and program cursor
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressState {
    #[serde(default)]
    pub last_event_date: Option<DateKey>,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    pub active_program_id: Option<String>,
    #[serde(default)]
    pub day_cursor: usize,
}

/// The `profiles` document: progress plus user-entered body metrics
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    #[serde(flatten)]
    pub progress: ProgressState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_goal_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_calories: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_steps: Option<i64>,
}

impl Profile {
    /// Fields the dashboard passes through untouched
    pub fn dashboard_fields(&self, default_weekly_goal_days: u32) -> ProfileFields {
        ProfileFields {
            weekly_goal_days: self
                .weekly_goal_days
                .filter(|d| *d > 0)
                .unwrap_or(default_weekly_goal_days),
            streak: self.progress.streak,
            longest_streak: self.progress.longest_streak,
            weight: self.weight,
            goal_weight: self.goal_weight,
        }
    }
}

/// Profile values merged into dashboard statistics
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProfileFields {
    pub weekly_goal_days: u32,
    pub streak: u32,
    pub longest_streak: u32,
    pub weight: Option<f64>,
    pub goal_weight: Option<f64>,
}

impl Default for ProfileFields {
    fn default() -> Self {
        Self {
            weekly_goal_days: 4,
            streak: 0,
            longest_streak: 0,
            weight: None,
            goal_weight: None,
        }
    }
}

/// Profile form input; only the fields that are set get written
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_calories: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_steps: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_goal_days: Option<u32>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(weight) = self.weight {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(Error::Validation("Current weight must be positive".into()));
            }
        }
        if let Some(goal) = self.goal_weight {
            if !goal.is_finite() || goal <= 0.0 {
                return Err(Error::Validation("Goal weight must be positive".into()));
            }
        }
        if matches!(self.daily_calories, Some(c) if c < 0) {
            return Err(Error::Validation("Calories cannot be negative".into()));
        }
        if matches!(self.daily_steps, Some(s) if s < 0) {
            return Err(Error::Validation("Steps cannot be negative".into()));
        }
        if let Some(days) = self.weekly_goal_days {
            if !(1..=7).contains(&days) {
                return Err(Error::Validation(
                    "Weekly goal must be between 1 and 7 days".into(),
                ));
            }
        }
        Ok(())
    }
}
