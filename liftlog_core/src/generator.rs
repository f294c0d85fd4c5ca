//! Rule-based program generator.
//!
//! Turns four preferences into a weekly program:
//! - Days per week picks the split (clamped to 2..=6)
//! - Goal picks the rep range, cardio guideline and one coaching note
//! - Experience picks the main-lift set count and one coaching note
//! - Equipment picks the exercise substitutions and one coaching note
//!
//! Generation is pure: the same preferences always give the same program.

use crate::catalog::{substitution_table, Slot, SubstitutionTable};
use crate::program::{
    DayProgram, ExercisePrescription, Program, ProgramOrigin, ProgramSettings, ProgramSummary,
};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_DAYS_PER_WEEK: u32 = 2;
pub const MAX_DAYS_PER_WEEK: u32 = 6;

// ============================================================================
// Preferences
// ============================================================================

/// Training goal
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    #[default]
    Muscle,
    FatLoss,
    Strength,
}

impl Goal {
    /// Parse a goal name; anything unrecognised is `Muscle`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "strength" => Goal::Strength,
            "fat-loss" => Goal::FatLoss,
            "muscle" => Goal::Muscle,
            other => {
                tracing::debug!("Unknown goal '{}', using muscle", other);
                Goal::Muscle
            }
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Goal::Muscle => "muscle",
            Goal::FatLoss => "fat-loss",
            Goal::Strength => "strength",
        })
    }
}

/// Lifting experience tier
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Experience {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl Experience {
    /// Parse an experience tier; anything unrecognised is `Intermediate`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Experience::Beginner,
            "advanced" => Experience::Advanced,
            "intermediate" => Experience::Intermediate,
            other => {
                tracing::debug!("Unknown experience '{}', using intermediate", other);
                Experience::Intermediate
            }
        }
    }

    /// Sets per main lift
    pub fn main_lift_sets(self) -> u32 {
        match self {
            Experience::Beginner => 3,
            Experience::Intermediate => 4,
            Experience::Advanced => 5,
        }
    }
}

impl fmt::Display for Experience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Experience::Beginner => "beginner",
            Experience::Intermediate => "intermediate",
            Experience::Advanced => "advanced",
        })
    }
}

/// Available equipment tier
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Equipment {
    #[default]
    Gym,
    Dumbbells,
    Home,
    /// Anything that isn't one of the named tiers: bodyweight exercises,
    /// but the gym coaching note
    Unlisted,
}

impl Equipment {
    /// Parse an equipment tier; anything unrecognised is `Unlisted`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "dumbbells" => Equipment::Dumbbells,
            "home" => Equipment::Home,
            "gym" => Equipment::Gym,
            other => {
                tracing::debug!("Unknown equipment '{}', using unlisted", other);
                Equipment::Unlisted
            }
        }
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Equipment::Gym => "gym",
            Equipment::Dumbbells => "dumbbells",
            Equipment::Home => "home",
            Equipment::Unlisted => "unlisted",
        })
    }
}

// ============================================================================
// Splits
// ============================================================================

/// Weekly split template
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitType {
    /// Push / pull / legs followed by upper / lower (five template days)
    PushPullLegsUpperLower,
    UpperLower,
    FullBody3x,
    FullBody2x,
}

impl SplitType {
    /// Split for an already clamped day count
    pub fn for_days(days: u32) -> Self {
        match days {
            d if d >= 5 => SplitType::PushPullLegsUpperLower,
            4 => SplitType::UpperLower,
            3 => SplitType::FullBody3x,
            _ => SplitType::FullBody2x,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SplitType::PushPullLegsUpperLower => "PPL+UL",
            SplitType::UpperLower => "Upper/Lower",
            SplitType::FullBody3x => "Full Body 3x",
            SplitType::FullBody2x => "Full Body 2x",
        }
    }
}

/// Clamp a requested day count into the supported range
pub fn clamp_days(days_per_week: u32) -> u32 {
    days_per_week.clamp(MIN_DAYS_PER_WEEK, MAX_DAYS_PER_WEEK)
}

/// Rep range text for a goal
pub fn rep_range(goal: Goal) -> &'static str {
    match goal {
        Goal::Strength => "4–6 reps",
        Goal::FatLoss => "10–15 reps",
        Goal::Muscle => "8–12 reps",
    }
}

/// Cardio guideline for a goal
pub fn cardio_guideline(goal: Goal) -> &'static str {
    match goal {
        Goal::FatLoss => "10–20 min brisk walk / incline treadmill",
        Goal::Muscle | Goal::Strength => "5–10 min light cardio warm-up",
    }
}

fn goal_note(goal: Goal) -> &'static str {
    match goal {
        Goal::Strength => {
            "Prioritize progressive overload on main lifts (increase weight over time with good form)."
        }
        Goal::FatLoss => {
            "Keep rest times shorter (45–75s) and add 10–20 minutes of cardio after strength work."
        }
        Goal::Muscle => {
            "Focus on controlled tempo and staying 1–3 reps away from failure on each set."
        }
    }
}

fn experience_note(experience: Experience) -> &'static str {
    match experience {
        Experience::Beginner => {
            "Since you selected beginner, keep 1–2 sets in reserve and focus on perfect technique."
        }
        Experience::Advanced => {
            "As advanced, you can use higher volume and occasional intensity techniques (drop sets, rest-pause) once consistent."
        }
        Experience::Intermediate => {
            "As an intermediate lifter, prioritize consistency and small improvements each week."
        }
    }
}

fn equipment_note(equipment: Equipment) -> &'static str {
    match equipment {
        Equipment::Home => {
            "Since you only have bodyweight, push closer to failure and slow down the negative (eccentric) phase."
        }
        Equipment::Dumbbells => {
            "With dumbbells, use unilateral work (one side at a time) to make light weights feel heavier."
        }
        Equipment::Gym | Equipment::Unlisted => {
            "With access to machines and barbells, rotate variations every 6–8 weeks to avoid plateaus."
        }
    }
}

// ============================================================================
// Generation
// ============================================================================

/// Builds exercise lines with the program's default volume and rep range
struct DayBuilder<'a> {
    table: &'a SubstitutionTable,
    volume: u32,
    rep_range: &'static str,
}

impl DayBuilder<'_> {
    /// Main lift: full volume, goal rep range
    fn main(&self, slot: Slot) -> ExercisePrescription {
        self.line(self.table.get(slot), self.volume, self.rep_range, "")
    }

    /// Accessory: one set fewer than the main lifts
    fn reduced(&self, slot: Slot) -> ExercisePrescription {
        self.line(self.table.get(slot), self.volume.saturating_sub(1), self.rep_range, "")
    }

    fn slot_with(&self, slot: Slot, sets: u32, reps: &str, note: &str) -> ExercisePrescription {
        self.line(self.table.get(slot), sets, reps, note)
    }

    fn line(&self, name: &str, sets: u32, reps: &str, note: &str) -> ExercisePrescription {
        ExercisePrescription {
            name: name.to_string(),
            sets,
            reps: reps.to_string(),
            note: note.to_string(),
        }
    }

    fn day(title: &str, focus: &str, exercises: Vec<ExercisePrescription>) -> DayProgram {
        DayProgram {
            title: title.to_string(),
            focus: focus.to_string(),
            exercises,
        }
    }

    fn push_pull_legs_upper_lower(&self) -> Vec<DayProgram> {
        let v = self.volume;
        let less = v.saturating_sub(1);
        vec![
            Self::day(
                "Day 1 — Push (Chest, Shoulders, Triceps)",
                "Push",
                vec![
                    self.main(Slot::Chest),
                    self.main(Slot::Shoulders),
                    self.reduced(Slot::Triceps),
                    self.line("Lateral Raises", less, "12–15 reps", ""),
                    self.slot_with(Slot::Core, 3, "30–45 sec", "Slow, controlled."),
                ],
            ),
            Self::day(
                "Day 2 — Pull (Back, Biceps)",
                "Pull",
                vec![
                    self.main(Slot::Back),
                    self.line("Horizontal Row (Machine or Dumbbell)", v, self.rep_range, ""),
                    self.reduced(Slot::Biceps),
                    self.line("Face Pulls or Rear Delt Raises", less, "12–15 reps", ""),
                    self.slot_with(Slot::Core, 3, "30–45 sec", ""),
                ],
            ),
            Self::day(
                "Day 3 — Legs (Quads, Hamstrings, Glutes)",
                "Legs",
                vec![
                    self.main(Slot::Legs),
                    self.main(Slot::Hinge),
                    self.reduced(Slot::Glutes),
                    self.line("Calf Raises", 3, "12–20 reps", ""),
                    self.slot_with(Slot::Core, 3, "30–45 sec", ""),
                ],
            ),
            Self::day(
                "Day 4 — Upper (All upper body)",
                "Upper",
                vec![
                    self.reduced(Slot::Chest),
                    self.reduced(Slot::Back),
                    self.reduced(Slot::Shoulders),
                    self.slot_with(Slot::Biceps, 3, self.rep_range, ""),
                    self.slot_with(Slot::Triceps, 3, self.rep_range, ""),
                ],
            ),
            Self::day(
                "Day 5 — Lower (Legs + Core)",
                "Lower",
                vec![
                    self.reduced(Slot::Legs),
                    self.reduced(Slot::Hinge),
                    self.slot_with(Slot::Glutes, 3, self.rep_range, ""),
                    self.line("Calf Raises", 3, "12–20 reps", ""),
                    self.slot_with(Slot::Core, 3, "30–60 sec", ""),
                ],
            ),
        ]
    }

    fn upper_lower(&self) -> Vec<DayProgram> {
        vec![
            Self::day(
                "Day 1 — Upper Body",
                "Upper",
                vec![
                    self.main(Slot::Chest),
                    self.main(Slot::Back),
                    self.main(Slot::Shoulders),
                    self.slot_with(Slot::Biceps, 3, self.rep_range, ""),
                    self.slot_with(Slot::Triceps, 3, self.rep_range, ""),
                    self.slot_with(Slot::Core, 3, "30–45 sec", ""),
                ],
            ),
            Self::day(
                "Day 2 — Lower Body",
                "Lower",
                vec![
                    self.main(Slot::Legs),
                    self.main(Slot::Hinge),
                    self.reduced(Slot::Glutes),
                    self.line("Calf Raises", 3, "12–20 reps", ""),
                    self.slot_with(Slot::Core, 3, "30–45 sec", ""),
                ],
            ),
            Self::day(
                "Day 3 — Upper Body (Variation)",
                "Upper",
                vec![
                    self.reduced(Slot::Chest),
                    self.reduced(Slot::Back),
                    self.reduced(Slot::Shoulders),
                    self.line("Row Variation", 3, self.rep_range, ""),
                    self.line("Chest Fly (Machine or DB)", 3, "10–15 reps", ""),
                ],
            ),
            Self::day(
                "Day 4 — Lower Body (Variation)",
                "Lower",
                vec![
                    self.reduced(Slot::Legs),
                    self.reduced(Slot::Hinge),
                    self.slot_with(Slot::Glutes, 3, self.rep_range, ""),
                    self.line("Lunge or Split Squat", 3, "8–12 reps / leg", ""),
                    self.slot_with(Slot::Core, 3, "30–60 sec", ""),
                ],
            ),
        ]
    }

    fn full_body(&self, count: u32, include_shoulders: bool) -> Vec<DayProgram> {
        (1..=count)
            .map(|i| {
                let mut exercises = vec![
                    self.main(Slot::Legs),
                    self.main(Slot::Chest),
                    self.main(Slot::Back),
                ];
                if include_shoulders {
                    exercises.push(self.reduced(Slot::Shoulders));
                }
                exercises.push(self.slot_with(Slot::Core, 3, "30–45 sec", ""));
                Self::day(&format!("Day {} — Full Body", i), "Full Body", exercises)
            })
            .collect()
    }
}

/// Generate a weekly program from the user's preferences
///
/// `days_per_week` outside 2..=6 is clamped. The split's template days are
/// truncated to the clamped count and never padded, so a six-day request
/// gets the five push/pull/legs/upper/lower days.
pub fn generate(
    goal: Goal,
    days_per_week: u32,
    experience: Experience,
    equipment: Equipment,
) -> Program {
    let days = clamp_days(days_per_week);
    let split = SplitType::for_days(days);
    let rep_range = rep_range(goal);

    let builder = DayBuilder {
        table: substitution_table(equipment),
        volume: experience.main_lift_sets(),
        rep_range,
    };

    let mut plan_days = match split {
        SplitType::PushPullLegsUpperLower => builder.push_pull_legs_upper_lower(),
        SplitType::UpperLower => builder.upper_lower(),
        SplitType::FullBody3x => builder.full_body(3, true),
        SplitType::FullBody2x => builder.full_body(2, false),
    };
    plan_days.truncate(days as usize);

    tracing::debug!(
        "Generated {} program: {} days, {} ({} / {} / {})",
        split.label(),
        plan_days.len(),
        rep_range,
        goal,
        experience,
        equipment
    );

    Program {
        id: None,
        owner_id: None,
        name: None,
        origin: ProgramOrigin::Generated,
        settings: Some(ProgramSettings {
            goal,
            days_per_week,
            experience,
            equipment,
        }),
        summary: Some(ProgramSummary {
            split_type: split.label().to_string(),
            days_per_week: days,
            rep_range: rep_range.to_string(),
            cardio: cardio_guideline(goal).to_string(),
            notes: vec![
                goal_note(goal).to_string(),
                experience_note(experience).to_string(),
                equipment_note(equipment).to_string(),
            ],
        }),
        days: plan_days,
        created_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_program(days: u32) -> Program {
        generate(Goal::Muscle, days, Experience::Intermediate, Equipment::Gym)
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate(Goal::Strength, 5, Experience::Advanced, Equipment::Dumbbells);
        let b = generate(Goal::Strength, 5, Experience::Advanced, Equipment::Dumbbells);
        assert_eq!(a, b);
    }

    #[test]
    fn test_days_per_week_is_clamped() {
        let low = default_program(1);
        assert_eq!(low.days.len(), 2);
        assert_eq!(low.summary.as_ref().unwrap().days_per_week, 2);
        assert_eq!(low.summary.as_ref().unwrap().split_type, "Full Body 2x");

        let zero = default_program(0);
        assert_eq!(zero.days.len(), 2);

        let high = default_program(9);
        let summary = high.summary.as_ref().unwrap();
        assert_eq!(summary.days_per_week, 6);
        assert_eq!(summary.split_type, "PPL+UL");
        // Template has five days; six is truncated to five, never padded
        assert_eq!(high.days.len(), 5);

        // Settings keep what was asked for
        assert_eq!(high.settings.as_ref().unwrap().days_per_week, 9);
    }

    #[test]
    fn test_split_selection_and_truncation() {
        assert_eq!(default_program(3).days.len(), 3);
        assert_eq!(default_program(4).days.len(), 4);
        assert_eq!(default_program(5).days.len(), 5);
        assert_eq!(
            default_program(4).summary.unwrap().split_type,
            "Upper/Lower"
        );
        assert_eq!(
            default_program(3).summary.unwrap().split_type,
            "Full Body 3x"
        );
    }

    #[test]
    fn test_rep_range_by_goal() {
        let reps = |goal| {
            generate(goal, 4, Experience::Intermediate, Equipment::Gym)
                .summary
                .unwrap()
                .rep_range
        };
        assert_eq!(reps(Goal::Strength), "4–6 reps");
        assert_eq!(reps(Goal::FatLoss), "10–15 reps");
        assert_eq!(reps(Goal::Muscle), "8–12 reps");
    }

    #[test]
    fn test_volume_by_experience() {
        let first_sets = |experience| {
            generate(Goal::Muscle, 4, experience, Equipment::Gym).days[0].exercises[0].sets
        };
        assert_eq!(first_sets(Experience::Beginner), 3);
        assert_eq!(first_sets(Experience::Intermediate), 4);
        assert_eq!(first_sets(Experience::Advanced), 5);
    }

    #[test]
    fn test_push_day_layout() {
        let program = generate(Goal::Strength, 5, Experience::Advanced, Equipment::Gym);
        let push = &program.days[0];

        assert_eq!(push.focus, "Push");
        let names: Vec<&str> = push.exercises.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Bench Press", "Overhead Press", "Tricep Dips", "Lateral Raises", "Plank"]
        );
        let sets: Vec<u32> = push.exercises.iter().map(|e| e.sets).collect();
        assert_eq!(sets, vec![5, 5, 4, 4, 3]);
        assert_eq!(push.exercises[0].reps, "4–6 reps");
        assert_eq!(push.exercises[3].reps, "12–15 reps");
        assert_eq!(push.exercises[4].note, "Slow, controlled.");
    }

    #[test]
    fn test_equipment_substitution_applies() {
        let home = generate(Goal::Muscle, 3, Experience::Beginner, Equipment::Home);
        let names: Vec<&str> = home.days[0].exercises.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Bodyweight Squat", "Push-Ups", "Inverted Row", "Pike Push-Up", "Plank"]
        );
        assert_eq!(home.days[2].title, "Day 3 — Full Body");

        let two_day = generate(Goal::Muscle, 2, Experience::Beginner, Equipment::Dumbbells);
        assert_eq!(two_day.days[1].exercises.len(), 4);
        assert_eq!(two_day.days[1].exercises[0].name, "Goblet Squat");
    }

    #[test]
    fn test_notes_pick_one_sentence_per_axis() {
        let program = generate(Goal::FatLoss, 4, Experience::Beginner, Equipment::Home);
        let summary = program.summary.unwrap();

        assert_eq!(summary.notes.len(), 3);
        assert!(summary.notes[0].starts_with("Keep rest times shorter"));
        assert!(summary.notes[1].starts_with("Since you selected beginner"));
        assert!(summary.notes[2].starts_with("Since you only have bodyweight"));
        assert_eq!(summary.cardio, "10–20 min brisk walk / incline treadmill");

        let other = generate(Goal::Muscle, 4, Experience::Advanced, Equipment::Gym)
            .summary
            .unwrap();
        assert!(other.notes[2].starts_with("With access to machines"));
        assert_eq!(other.cardio, "5–10 min light cardio warm-up");
    }

    #[test]
    fn test_unknown_preferences_fall_back_to_defaults() {
        assert_eq!(Goal::parse("bulk"), Goal::Muscle);
        assert_eq!(Goal::parse("Fat-Loss"), Goal::FatLoss);
        assert_eq!(Experience::parse("expert"), Experience::Intermediate);
        assert_eq!(Experience::parse("BEGINNER"), Experience::Beginner);
        assert_eq!(Equipment::parse("bands"), Equipment::Unlisted);
        assert_eq!(Equipment::parse("home"), Equipment::Home);
    }

    #[test]
    fn test_unlisted_equipment_uses_bodyweight_moves_with_gym_note() {
        let program = generate(
            Goal::Muscle,
            3,
            Experience::Intermediate,
            Equipment::parse("bands"),
        );

        let names: Vec<&str> = program.days[0]
            .exercises
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(
            names,
            ["Bodyweight Squat", "Push-Ups", "Inverted Row", "Pike Push-Up", "Plank"]
        );

        let notes = &program.summary.as_ref().unwrap().notes;
        assert_eq!(notes[2], equipment_note(Equipment::Gym));
        assert!(notes[2].starts_with("With access to machines"));

        let upper_lower = generate(Goal::Muscle, 4, Experience::Beginner, Equipment::Unlisted);
        let upper: Vec<&str> = upper_lower.days[0]
            .exercises
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert!(upper.contains(&"Bodyweight Curl Variation"));
        assert!(upper_lower.days[1]
            .exercises
            .iter()
            .any(|e| e.name == "Glute Bridge"));
    }

    #[test]
    fn test_every_generated_program_validates() {
        for days in 0..=8 {
            for goal in [Goal::Muscle, Goal::FatLoss, Goal::Strength] {
                for equipment in [
                    Equipment::Gym,
                    Equipment::Dumbbells,
                    Equipment::Home,
                    Equipment::Unlisted,
                ] {
                    let program = generate(goal, days, Experience::Beginner, equipment);
                    assert!(program.validate().is_ok());
                }
            }
        }
    }
}
