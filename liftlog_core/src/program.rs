//! Training program model.
//!
//! A program is an ordered list of days; the order defines the rotation the
//! cursor walks through. Programs are either produced by the generator or
//! built by hand from a [`CustomProgramDraft`].

use crate::generator::{Equipment, Experience, Goal};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a program came from
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProgramOrigin {
    Generated,
    Custom,
}

/// Preferences a generated program was built from (as requested, unclamped)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgramSettings {
    pub goal: Goal,
    pub days_per_week: u32,
    pub experience: Experience,
    pub equipment: Equipment,
}

/// Human-readable overview of a generated program
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgramSummary {
    pub split_type: String,
    pub days_per_week: u32,
    pub rep_range: String,
    pub cardio: String,
    pub notes: Vec<String>,
}

/// One exercise line within a day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExercisePrescription {
    pub name: String,
    pub sets: u32,
    pub reps: String,
    #[serde(default)]
    pub note: String,
}

/// One day's work within a program
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayProgram {
    pub title: String,
    #[serde(default)]
    pub focus: String,
    pub exercises: Vec<ExercisePrescription>,
}

/// A generated or hand-built training plan
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Program {
    /// Document id; assigned by the store on insert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub origin: ProgramOrigin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<ProgramSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<ProgramSummary>,
    pub days: Vec<DayProgram>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Program {
    /// Check the structural invariants: at least one day, no empty day
    pub fn validate(&self) -> Result<()> {
        if self.days.is_empty() {
            return Err(Error::Validation("Program has no days".into()));
        }
        for (idx, day) in self.days.iter().enumerate() {
            if day.exercises.is_empty() {
                return Err(Error::Validation(format!(
                    "Day {} ('{}') has no exercises",
                    idx + 1,
                    day.title
                )));
            }
        }
        Ok(())
    }

    /// Display name: explicit name, else the split type, else a placeholder
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        match &self.summary {
            Some(summary) => format!("{} ({} days/week)", summary.split_type, summary.days_per_week),
            None => "Untitled plan".to_string(),
        }
    }
}

// ============================================================================
// Custom Programs
// ============================================================================

/// A hand-written exercise line, as typed by the user
///
/// `sets` defaults to 3 when left out; an explicit 0 is rejected by
/// [`CustomProgramDraft::build`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExerciseDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_draft_sets")]
    pub sets: u32,
    #[serde(default)]
    pub reps: String,
    #[serde(default)]
    pub note: String,
}

fn default_draft_sets() -> u32 {
    3
}

impl Default for ExerciseDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            sets: default_draft_sets(),
            reps: String::new(),
            note: String::new(),
        }
    }
}

/// A hand-written day
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DayDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub focus: String,
    #[serde(default)]
    pub exercises: Vec<ExerciseDraft>,
}

/// A hand-written program (the TOML import format)
///
/// ```toml
/// name = "My Split"
///
/// [[days]]
/// title = "Upper"
/// [[days.exercises]]
/// name = "Bench Press"
/// sets = 4
/// reps = "6-8"
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CustomProgramDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub days: Vec<DayDraft>,
}

impl CustomProgramDraft {
    /// Parse a draft from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Clean the draft into a custom program
    ///
    /// Blank exercise lines are dropped, days left without exercises are
    /// dropped, untitled days become `Day N` by their draft position.
    pub fn build(self) -> Result<Program> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::Validation("Give your plan a name".into()));
        }

        let zero_sets = self
            .days
            .iter()
            .flat_map(|day| &day.exercises)
            .find(|ex| ex.sets == 0 && !ex.name.trim().is_empty());
        if let Some(ex) = zero_sets {
            return Err(Error::Validation(format!(
                "'{}' needs at least one set",
                ex.name.trim()
            )));
        }

        let days: Vec<DayProgram> = self
            .days
            .into_iter()
            .enumerate()
            .filter_map(|(index, day)| {
                let exercises: Vec<ExercisePrescription> = day
                    .exercises
                    .into_iter()
                    .filter(|ex| !ex.name.trim().is_empty())
                    .map(|ex| ExercisePrescription {
                        name: ex.name.trim().to_string(),
                        sets: ex.sets,
                        reps: ex.reps.trim().to_string(),
                        note: ex.note.trim().to_string(),
                    })
                    .collect();

                if exercises.is_empty() {
                    tracing::debug!("Dropping draft day {} with no exercises", index + 1);
                    return None;
                }

                let title = match day.title.trim() {
                    "" => format!("Day {}", index + 1),
                    t => t.to_string(),
                };

                Some(DayProgram {
                    title,
                    focus: day.focus.trim().to_string(),
                    exercises,
                })
            })
            .collect();

        if days.is_empty() {
            return Err(Error::Validation(
                "Add at least one exercise in at least one day".into(),
            ));
        }

        Ok(Program {
            id: None,
            owner_id: None,
            name: Some(name),
            origin: ProgramOrigin::Custom,
            settings: None,
            summary: None,
            days,
            created_at: None,
        })
    }
}
