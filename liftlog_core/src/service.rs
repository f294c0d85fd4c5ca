//! The tracker: one user's view of the store.
//!
//! Every operation loads what it needs, calls into the pure core
//! (`advance`, `complete_day`, `aggregate`) and writes the result back.
//! The ledger state lives on the user's `profiles` document and is always
//! written with a merge put so body metrics are left alone.

use crate::analytics::{aggregate, DashboardStats};
use crate::cursor::{complete_day, TodayWorkout};
use crate::ledger::advance;
use crate::program::Program;
use crate::store::{to_document, Collection, DocumentStore, StoredDocument};
use crate::{
    DateKey, Error, LogEntry, PlanCompletion, Profile, ProfileUpdate, ProgressState, Result,
    WorkoutDraft, WorkoutRecord,
};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

/// Tracker bound to a store and a user id
pub struct Tracker<S: DocumentStore> {
    store: S,
    user_id: String,
}

impl<S: DocumentStore> Tracker<S> {
    pub fn new(store: S, user_id: impl Into<String>) -> Self {
        Self {
            store,
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // ------------------------------------------------------------------
    // Free-form workouts
    // ------------------------------------------------------------------

    /// Validate and store a workout, then bump the streak for `now`'s day
    pub fn log_workout<Tz: TimeZone>(
        &mut self,
        draft: WorkoutDraft,
        now: &DateTime<Tz>,
    ) -> Result<LogEntry> {
        let mut entry = draft.into_entry(&self.user_id, now.with_timezone(&Utc))?;

        let fields = to_document(&WorkoutRecord::Log(entry.clone()))?;
        let id = self.store.insert(Collection::Workouts, fields)?;
        entry.id = Some(id);

        let today = DateKey::of(now);
        let prev = self.profile()?.progress;
        let next = advance(&prev, today);
        self.write_progress(&next)?;

        tracing::info!(
            "Logged {} ({}x{} @ {}) for {}, streak {}",
            entry.exercise,
            entry.sets,
            entry.reps,
            entry.weight,
            today,
            next.streak
        );
        Ok(entry)
    }

    /// Replace the fields of an existing entry; the timestamp is kept
    pub fn edit_workout(&mut self, id: &str, draft: WorkoutDraft) -> Result<LogEntry> {
        let existing = self.owned_entry(id)?;
        let entry = draft.into_entry(&self.user_id, existing.created_at)?;

        let fields = to_document(&WorkoutRecord::Log(entry.clone()))?;
        self.store.put(Collection::Workouts, id, fields, false)?;

        tracing::info!("Edited workout {}", id);
        Ok(LogEntry {
            id: Some(id.to_string()),
            ..entry
        })
    }

    pub fn delete_workout(&mut self, id: &str) -> Result<()> {
        self.owned_entry(id)?;
        self.store.delete(Collection::Workouts, id)?;
        tracing::info!("Deleted workout {}", id);
        Ok(())
    }

    /// Free-form entries, newest first
    pub fn history(&self) -> Result<Vec<LogEntry>> {
        let mut entries: Vec<LogEntry> = self
            .workout_records()?
            .into_iter()
            .filter_map(|(id, record)| match record {
                WorkoutRecord::Log(entry) => Some(LogEntry {
                    id: Some(id),
                    ..entry
                }),
                WorkoutRecord::Plan(_) => None,
            })
            .collect();

        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    /// Program-day completions, newest first
    pub fn plan_completions(&self) -> Result<Vec<PlanCompletion>> {
        let mut completions: Vec<PlanCompletion> = self
            .workout_records()?
            .into_iter()
            .filter_map(|(_, record)| match record {
                WorkoutRecord::Plan(completion) => Some(completion),
                WorkoutRecord::Log(_) => None,
            })
            .collect();

        completions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(completions)
    }

    fn workout_records(&self) -> Result<Vec<(String, WorkoutRecord)>> {
        let docs = self.store.query_equal(
            Collection::Workouts,
            "user_id",
            &Value::String(self.user_id.clone()),
        )?;

        Ok(docs
            .into_iter()
            .filter_map(|doc| match doc.decode::<WorkoutRecord>() {
                Ok(record) => Some((doc.id, record)),
                Err(e) => {
                    tracing::warn!("Skipping malformed workout {}: {}", doc.id, e);
                    None
                }
            })
            .collect())
    }

    fn owned_entry(&self, id: &str) -> Result<LogEntry> {
        let not_found = || Error::NotFound(format!("Workout {}", id));

        let fields = self
            .store
            .get(Collection::Workouts, id)?
            .ok_or_else(not_found)?;
        let doc = StoredDocument {
            id: id.to_string(),
            fields,
        };

        match doc.decode::<WorkoutRecord>() {
            Ok(WorkoutRecord::Log(entry)) if entry.user_id == self.user_id => Ok(entry),
            Ok(_) => Err(not_found()),
            Err(e) => {
                tracing::warn!("Workout {} is unreadable: {}", id, e);
                Err(not_found())
            }
        }
    }

    // ------------------------------------------------------------------
    // Programs
    // ------------------------------------------------------------------

    /// Store a program for this user; with `activate` it becomes the active
    /// program starting at day one
    pub fn save_program<Tz: TimeZone>(
        &mut self,
        mut program: Program,
        activate: bool,
        now: &DateTime<Tz>,
    ) -> Result<Program> {
        program.validate()?;
        program.id = None;
        program.owner_id = Some(self.user_id.clone());
        program.created_at = Some(now.with_timezone(&Utc));

        let id = self
            .store
            .insert(Collection::Plans, to_document(&program)?)?;
        tracing::info!("Saved program {} ({})", id, program.display_name());

        if activate {
            let mut fields = crate::store::Document::new();
            fields.insert("active_program_id".into(), json!(id));
            fields.insert("day_cursor".into(), json!(0));
            self.store
                .put(Collection::Profiles, &self.user_id, fields, true)?;
            tracing::info!("Activated program {}", id);
        }

        program.id = Some(id);
        Ok(program)
    }

    /// This user's programs, newest first
    pub fn programs(&self) -> Result<Vec<Program>> {
        let docs = self.store.query_equal(
            Collection::Plans,
            "owner_id",
            &Value::String(self.user_id.clone()),
        )?;

        let mut programs: Vec<Program> = docs
            .into_iter()
            .filter_map(|doc| match doc.decode::<Program>() {
                Ok(program) => Some(Program {
                    id: Some(doc.id),
                    ..program
                }),
                Err(e) => {
                    tracing::warn!("Skipping malformed program {}: {}", doc.id, e);
                    None
                }
            })
            .collect();

        programs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(programs)
    }

    /// Switch the active program; the day cursor is not reset
    pub fn set_active_program(&mut self, id: &str) -> Result<()> {
        self.owned_program(id)?;

        let mut fields = crate::store::Document::new();
        fields.insert("active_program_id".into(), json!(id));
        self.store
            .put(Collection::Profiles, &self.user_id, fields, true)?;

        tracing::info!("Activated program {}", id);
        Ok(())
    }

    fn owned_program(&self, id: &str) -> Result<Program> {
        let not_found = || Error::NotFound(format!("Program {}", id));

        let fields = self.store.get(Collection::Plans, id)?.ok_or_else(not_found)?;
        let doc = StoredDocument {
            id: id.to_string(),
            fields,
        };

        let program: Program = doc.decode()?;
        if program.owner_id.as_deref() != Some(self.user_id.as_str()) {
            return Err(not_found());
        }
        Ok(Program {
            id: Some(doc.id),
            ..program
        })
    }

    /// The active program's day at the cursor
    pub fn today(&self) -> Result<Option<TodayWorkout>> {
        let progress = self.profile()?.progress;
        let Some(program_id) = progress.active_program_id else {
            return Ok(None);
        };

        let program = match self.owned_program(&program_id) {
            Ok(program) => program,
            Err(Error::NotFound(_)) => {
                tracing::warn!("Active program {} no longer exists", program_id);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        Ok(TodayWorkout::resolve(&program_id, &program, progress.day_cursor))
    }

    /// Record today's program day as done and move to the next one
    ///
    /// `checked` holds one flag per exercise; it is padded or cut to the
    /// day's length. Returns `None` when there is nothing scheduled.
    pub fn complete_today<Tz: TimeZone>(
        &mut self,
        mut checked: Vec<bool>,
        now: &DateTime<Tz>,
    ) -> Result<Option<ProgressState>> {
        let Some(today) = self.today()? else {
            return Ok(None);
        };
        let prev = self.profile()?.progress;

        checked.resize(today.exercises.len(), false);
        let completion = PlanCompletion {
            user_id: self.user_id.clone(),
            program_id: today.program_id.clone(),
            day_index: today.day_index,
            completed_exercises: checked,
            created_at: now.with_timezone(&Utc),
        };
        self.store.insert(
            Collection::Workouts,
            to_document(&WorkoutRecord::Plan(completion))?,
        )?;

        let next = complete_day(&prev, today.total_days, DateKey::of(now));
        self.write_progress(&next)?;
        Ok(Some(next))
    }

    // ------------------------------------------------------------------
    // Profile and dashboard
    // ------------------------------------------------------------------

    /// The stored profile, or an empty one
    pub fn profile(&self) -> Result<Profile> {
        let Some(fields) = self.store.get(Collection::Profiles, &self.user_id)? else {
            return Ok(Profile::default());
        };

        let doc = StoredDocument {
            id: self.user_id.clone(),
            fields,
        };
        match doc.decode::<Profile>() {
            Ok(profile) => Ok(profile),
            Err(e) => {
                tracing::warn!(
                    "Profile for {} is malformed: {}. Using defaults.",
                    self.user_id,
                    e
                );
                Ok(Profile::default())
            }
        }
    }

    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<Profile> {
        update.validate()?;
        let fields = to_document(&update)?;
        if !fields.is_empty() {
            self.store
                .put(Collection::Profiles, &self.user_id, fields, true)?;
            tracing::info!("Updated profile for {}", self.user_id);
        }
        self.profile()
    }

    /// Aggregate this user's history as of `now`
    ///
    /// Program-day completions count as zero-volume `Other` workouts.
    pub fn dashboard<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
        default_weekly_goal_days: u32,
    ) -> Result<DashboardStats> {
        let entries: Vec<LogEntry> = self
            .workout_records()?
            .into_iter()
            .map(|(id, record)| match record {
                WorkoutRecord::Log(entry) => LogEntry {
                    id: Some(id),
                    ..entry
                },
                WorkoutRecord::Plan(completion) => completion.as_log_entry(),
            })
            .collect();
        let profile = self.profile()?.dashboard_fields(default_weekly_goal_days);
        Ok(aggregate(&entries, &profile, now))
    }

    fn write_progress(&mut self, progress: &ProgressState) -> Result<()> {
        let fields = to_document(progress)?;
        self.store
            .put(Collection::Profiles, &self.user_id, fields, true)
    }
}
