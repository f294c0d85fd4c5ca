#![forbid(unsafe_code)]

//! Core domain model and business logic for liftlog.
//!
//! This crate provides:
//! - Domain types (log entries, programs, profile and progress state)
//! - Program generation from an equipment-tier exercise catalog
//! - Streak ledger and program day cursor
//! - Dashboard analytics
//! - Persistence (document store contract, JSON file store, CSV export)
//! - The `Tracker` service tying them together for one user

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod generator;
pub mod program;
pub mod ledger;
pub mod cursor;
pub mod analytics;
pub mod store;
pub mod file_store;
pub mod export;
pub mod service;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{substitution_table, Slot, SubstitutionTable};
pub use config::Config;
pub use generator::{generate, Equipment, Experience, Goal, SplitType};
pub use program::{CustomProgramDraft, DayProgram, ExercisePrescription, Program, ProgramOrigin};
pub use ledger::advance;
pub use cursor::{complete_day, next_index, TodayWorkout};
pub use analytics::{aggregate, DashboardStats, GoalWeightStatus, WeeklyGoalProgress};
pub use store::{Collection, DocumentStore, MemoryStore};
pub use file_store::JsonFileStore;
pub use export::export_csv;
pub use service::Tracker;
