//! Equipment substitution table.
//!
//! Every equipment tier maps every muscle-group slot to exactly one exercise.
//! `gym` prefers machines and barbells, `dumbbells` prefers dumbbell and
//! unilateral variants, `home` prefers bodyweight movements. An unrecognised
//! tier (`unlisted`) gets the bodyweight column.

use crate::generator::Equipment;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A muscle-group slot the generator fills with a concrete exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Chest,
    Back,
    Legs,
    Shoulders,
    Biceps,
    Triceps,
    Hinge,
    Glutes,
    Core,
    Cardio,
}

impl Slot {
    /// All slots, in table order
    pub const ALL: [Slot; 10] = [
        Slot::Chest,
        Slot::Back,
        Slot::Legs,
        Slot::Shoulders,
        Slot::Biceps,
        Slot::Triceps,
        Slot::Hinge,
        Slot::Glutes,
        Slot::Core,
        Slot::Cardio,
    ];

    fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Slot::Chest => "chest",
            Slot::Back => "back",
            Slot::Legs => "legs",
            Slot::Shoulders => "shoulders",
            Slot::Biceps => "biceps",
            Slot::Triceps => "triceps",
            Slot::Hinge => "hinge",
            Slot::Glutes => "glutes",
            Slot::Core => "core",
            Slot::Cardio => "cardio",
        };
        f.write_str(label)
    }
}

/// One row of a substitution table
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct SlotExercise {
    pub slot: Slot,
    pub exercise: &'static str,
}

/// The slot -> exercise mapping for one equipment tier
#[derive(Clone, Debug)]
pub struct SubstitutionTable {
    pub equipment: Equipment,
    entries: Vec<SlotExercise>,
}

impl SubstitutionTable {
    fn build(equipment: Equipment) -> Self {
        let entries = Slot::ALL
            .iter()
            .map(|&slot| SlotExercise {
                slot,
                exercise: exercise_for(equipment, slot),
            })
            .collect();
        Self { equipment, entries }
    }

    /// Exercise filling `slot` for this tier
    pub fn get(&self, slot: Slot) -> &'static str {
        self.entries[slot.position()].exercise
    }

    /// Rows in slot order
    pub fn entries(&self) -> &[SlotExercise] {
        &self.entries
    }
}

static GYM_TABLE: Lazy<SubstitutionTable> = Lazy::new(|| SubstitutionTable::build(Equipment::Gym));
static DUMBBELL_TABLE: Lazy<SubstitutionTable> =
    Lazy::new(|| SubstitutionTable::build(Equipment::Dumbbells));
static HOME_TABLE: Lazy<SubstitutionTable> = Lazy::new(|| SubstitutionTable::build(Equipment::Home));
static UNLISTED_TABLE: Lazy<SubstitutionTable> =
    Lazy::new(|| SubstitutionTable::build(Equipment::Unlisted));

/// Get the cached table for an equipment tier
pub fn substitution_table(equipment: Equipment) -> &'static SubstitutionTable {
    match equipment {
        Equipment::Gym => &*GYM_TABLE,
        Equipment::Dumbbells => &*DUMBBELL_TABLE,
        Equipment::Home => &*HOME_TABLE,
        Equipment::Unlisted => &*UNLISTED_TABLE,
    }
}

fn exercise_for(equipment: Equipment, slot: Slot) -> &'static str {
    use Equipment::{Dumbbells, Gym, Home, Unlisted};

    match (slot, equipment) {
        (Slot::Chest, Gym) => "Bench Press",
        (Slot::Chest, Dumbbells) => "Dumbbell Bench Press",
        (Slot::Chest, Home | Unlisted) => "Push-Ups",

        (Slot::Back, Gym) => "Lat Pulldown",
        (Slot::Back, Dumbbells) => "One-Arm Dumbbell Row",
        (Slot::Back, Home | Unlisted) => "Inverted Row",

        (Slot::Legs, Gym) => "Barbell Squat",
        (Slot::Legs, Dumbbells) => "Goblet Squat",
        (Slot::Legs, Home | Unlisted) => "Bodyweight Squat",

        (Slot::Shoulders, Gym) => "Overhead Press",
        (Slot::Shoulders, Dumbbells) => "Dumbbell Shoulder Press",
        (Slot::Shoulders, Home | Unlisted) => "Pike Push-Up",

        (Slot::Biceps, Gym | Dumbbells) => "Dumbbell Curl",
        (Slot::Biceps, Home | Unlisted) => "Bodyweight Curl Variation",

        (Slot::Triceps, Gym | Dumbbells) => "Tricep Dips",
        (Slot::Triceps, Home | Unlisted) => "Diamond Push-Ups",

        (Slot::Hinge, Gym) => "Romanian Deadlift",
        (Slot::Hinge, Dumbbells) => "Dumbbell Romanian Deadlift",
        (Slot::Hinge, Home | Unlisted) => "Hip Hinge Good Morning",

        (Slot::Glutes, Gym | Dumbbells) => "Hip Thrust",
        (Slot::Glutes, Home | Unlisted) => "Glute Bridge",

        (Slot::Core, _) => "Plank",

        (Slot::Cardio, Gym) => "Incline Treadmill Walk",
        (Slot::Cardio, Dumbbells) => "Dumbbell Thrusters",
        (Slot::Cardio, Home | Unlisted) => "Brisk Walk",
    }
}
