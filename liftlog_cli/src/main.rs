use chrono::{DateTime, Local};
use clap::{Args, Parser, Subcommand};
use liftlog_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "liftlog")]
#[command(about = "Workout log, training programs and progress dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override the user id records are stored under
    #[arg(long, global = true)]
    user: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a workout (counts toward the streak)
    Log(WorkoutArgs),

    /// Replace the fields of a logged workout
    Edit {
        id: String,

        #[command(flatten)]
        workout: WorkoutArgs,
    },

    /// Delete a logged workout
    Delete { id: String },

    /// Show logged workouts, newest first
    History {
        /// Show at most this many entries
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Generate a program from your preferences
    Generate {
        /// Goal (muscle, fat-loss, strength)
        #[arg(long)]
        goal: Option<String>,

        /// Training days per week (clamped to 2-6)
        #[arg(long)]
        days: Option<u32>,

        /// Experience (beginner, intermediate, advanced)
        #[arg(long)]
        experience: Option<String>,

        /// Equipment (gym, dumbbells, home)
        #[arg(long)]
        equipment: Option<String>,

        /// Save the program
        #[arg(long)]
        save: bool,

        /// Save and make it the active program
        #[arg(long)]
        activate: bool,
    },

    /// Custom program management
    #[command(subcommand)]
    Plan(PlanCommands),

    /// List saved programs
    Plans,

    /// Make a saved program the active one
    Activate { id: String },

    /// Show today's scheduled day from the active program
    Today,

    /// Mark today's scheduled day as done
    Complete {
        /// 1-based number of an exercise you didn't finish (repeatable)
        #[arg(long = "missed")]
        missed: Vec<usize>,
    },

    /// Show weekly activity, records and goals
    Dashboard,

    /// Profile metrics
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// List the exercise substitutions for an equipment tier
    Exercises {
        /// Equipment (gym, dumbbells, home)
        #[arg(long)]
        equipment: Option<String>,
    },

    /// Export workout history to CSV
    Export {
        /// Output file
        path: PathBuf,
    },
}

#[derive(Args)]
struct WorkoutArgs {
    /// Exercise name
    #[arg(long)]
    exercise: String,

    #[arg(long)]
    sets: u32,

    #[arg(long)]
    reps: u32,

    /// Weight in kg
    #[arg(long, default_value_t = 0.0)]
    weight: f64,

    /// Category (chest, back, legs, shoulders, arms, core, cardio, full-body, other)
    #[arg(long)]
    category: Option<String>,

    #[arg(long, default_value = "")]
    notes: String,
}

impl WorkoutArgs {
    fn into_draft(self) -> Result<WorkoutDraft> {
        let category = self
            .category
            .as_deref()
            .map(str::parse::<Category>)
            .transpose()?;

        Ok(WorkoutDraft {
            category,
            exercise: self.exercise,
            sets: self.sets,
            reps: self.reps,
            weight: self.weight,
            notes: self.notes,
        })
    }
}

#[derive(Subcommand)]
enum PlanCommands {
    /// Import a custom program from a TOML file
    Import {
        file: PathBuf,

        /// Make it the active program
        #[arg(long)]
        activate: bool,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Show the stored profile
    Show,

    /// Update profile metrics (only the given ones change)
    Set {
        /// Current weight in kg
        #[arg(long)]
        weight: Option<f64>,

        /// Goal weight in kg
        #[arg(long)]
        goal_weight: Option<f64>,

        #[arg(long)]
        calories: Option<i64>,

        #[arg(long)]
        steps: Option<i64>,

        /// Training days per week to aim for (1-7)
        #[arg(long)]
        weekly_goal: Option<u32>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    liftlog_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let user = cli.user.unwrap_or_else(|| config.user.id.clone());
    tracing::debug!("Using data dir {:?} for user {}", data_dir, user);

    let mut tracker = Tracker::new(JsonFileStore::new(&data_dir), user);
    let now = Local::now();

    match cli.command {
        Some(Commands::Log(args)) => cmd_log(&mut tracker, args, &now),
        Some(Commands::Edit { id, workout }) => cmd_edit(&mut tracker, &id, workout),
        Some(Commands::Delete { id }) => {
            tracker.delete_workout(&id)?;
            println!("✓ Deleted workout {}", id);
            Ok(())
        }
        Some(Commands::History { limit }) => cmd_history(&tracker, limit),
        Some(Commands::Generate {
            goal,
            days,
            experience,
            equipment,
            save,
            activate,
        }) => {
            let defaults = &config.generator;
            let program = generate(
                goal.as_deref().map_or(defaults.goal, Goal::parse),
                days.unwrap_or(defaults.days_per_week),
                experience
                    .as_deref()
                    .map_or(defaults.experience, Experience::parse),
                equipment
                    .as_deref()
                    .map_or(defaults.equipment, Equipment::parse),
            );
            cmd_generate(&mut tracker, program, save || activate, activate, &now)
        }
        Some(Commands::Plan(PlanCommands::Import { file, activate })) => {
            cmd_import(&mut tracker, &file, activate, &now)
        }
        Some(Commands::Plans) => cmd_plans(&tracker),
        Some(Commands::Activate { id }) => {
            tracker.set_active_program(&id)?;
            println!("✓ Active program set to {}", id);
            Ok(())
        }
        Some(Commands::Today) => cmd_today(&tracker),
        Some(Commands::Complete { missed }) => cmd_complete(&mut tracker, &missed, &now),
        Some(Commands::Dashboard) | None => {
            let stats = tracker.dashboard(&now, config.profile.weekly_goal_days)?;
            display_dashboard(&stats);
            Ok(())
        }
        Some(Commands::Profile(ProfileCommands::Show)) => cmd_profile_show(&tracker, &config),
        Some(Commands::Profile(ProfileCommands::Set {
            weight,
            goal_weight,
            calories,
            steps,
            weekly_goal,
        })) => {
            let update = ProfileUpdate {
                weight,
                goal_weight,
                daily_calories: calories,
                daily_steps: steps,
                weekly_goal_days: weekly_goal,
            };
            tracker.update_profile(update)?;
            println!("✓ Profile updated");
            cmd_profile_show(&tracker, &config)
        }
        Some(Commands::Exercises { equipment }) => {
            let equipment = equipment
                .as_deref()
                .map_or(config.generator.equipment, Equipment::parse);
            display_exercises(equipment);
            Ok(())
        }
        Some(Commands::Export { path }) => {
            let entries = tracker.history()?;
            let count = export_csv(&entries, &path)?;
            println!("✓ Exported {} workouts", count);
            println!("  CSV: {}", path.display());
            Ok(())
        }
    }
}

fn cmd_log(
    tracker: &mut Tracker<JsonFileStore>,
    args: WorkoutArgs,
    now: &DateTime<Local>,
) -> Result<()> {
    let entry = tracker.log_workout(args.into_draft()?, now)?;
    let progress = tracker.profile()?.progress;

    println!("✓ Workout logged!");
    println!(
        "  {} [{}] {}x{} @ {} kg",
        entry.exercise, entry.category, entry.sets, entry.reps, entry.weight
    );
    if let Some(id) = entry.id {
        println!("  ID: {}", id);
    }
    println!(
        "  Streak: {} day(s) (best {})",
        progress.streak, progress.longest_streak
    );
    Ok(())
}

fn cmd_edit(tracker: &mut Tracker<JsonFileStore>, id: &str, args: WorkoutArgs) -> Result<()> {
    let entry = tracker.edit_workout(id, args.into_draft()?)?;
    println!("✓ Workout updated");
    println!(
        "  {} [{}] {}x{} @ {} kg",
        entry.exercise, entry.category, entry.sets, entry.reps, entry.weight
    );
    Ok(())
}

fn cmd_history(tracker: &Tracker<JsonFileStore>, limit: Option<usize>) -> Result<()> {
    let entries = tracker.history()?;
    if entries.is_empty() {
        println!("No workouts logged yet.");
        return Ok(());
    }

    for entry in entries.iter().take(limit.unwrap_or(usize::MAX)) {
        println!(
            "{}  {:<10} {:<24} {}x{} @ {} kg  (vol {})  [{}]",
            entry.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            entry.category.to_string(),
            entry.exercise,
            entry.sets,
            entry.reps,
            entry.weight,
            entry.volume(),
            entry.id.as_deref().unwrap_or("-"),
        );
        if !entry.notes.is_empty() {
            println!("      {}", entry.notes);
        }
    }
    Ok(())
}

fn cmd_generate(
    tracker: &mut Tracker<JsonFileStore>,
    program: Program,
    save: bool,
    activate: bool,
    now: &DateTime<Local>,
) -> Result<()> {
    display_program(&program);

    if save {
        let saved = tracker.save_program(program, activate, now)?;
        println!("✓ Program saved");
        if let Some(id) = saved.id {
            println!("  ID: {}", id);
        }
        if activate {
            println!("  Active: starts at day 1");
        }
    }
    Ok(())
}

fn cmd_import(
    tracker: &mut Tracker<JsonFileStore>,
    file: &std::path::Path,
    activate: bool,
    now: &DateTime<Local>,
) -> Result<()> {
    let contents = std::fs::read_to_string(file)?;
    let program = CustomProgramDraft::from_toml(&contents)?.build()?;
    let saved = tracker.save_program(program, activate, now)?;

    println!(
        "✓ Imported {} ({} days)",
        saved.display_name(),
        saved.days.len()
    );
    if let Some(id) = saved.id {
        println!("  ID: {}", id);
    }
    Ok(())
}

fn cmd_plans(tracker: &Tracker<JsonFileStore>) -> Result<()> {
    let programs = tracker.programs()?;
    if programs.is_empty() {
        println!("No saved programs.");
        return Ok(());
    }

    let active = tracker.profile()?.progress.active_program_id;
    for program in &programs {
        let marker = if program.id.is_some() && program.id == active {
            "*"
        } else {
            " "
        };
        println!(
            "{} {}  {}  ({} days, {:?})",
            marker,
            program.id.as_deref().unwrap_or("-"),
            program.display_name(),
            program.days.len(),
            program.origin,
        );
    }
    Ok(())
}

fn cmd_today(tracker: &Tracker<JsonFileStore>) -> Result<()> {
    let Some(today) = tracker.today()? else {
        println!("No active program. Generate one with `liftlog generate --activate`.");
        return Ok(());
    };

    println!(
        "\nDay {} of {}: {}",
        today.day_index + 1,
        today.total_days,
        today.title
    );
    if !today.focus.is_empty() {
        println!("  Focus: {}", today.focus);
    }
    println!();
    for (n, exercise) in today.exercises.iter().enumerate() {
        print_exercise(n + 1, exercise);
    }
    println!();
    Ok(())
}

fn cmd_complete(
    tracker: &mut Tracker<JsonFileStore>,
    missed: &[usize],
    now: &DateTime<Local>,
) -> Result<()> {
    let Some(today) = tracker.today()? else {
        println!("No active program. Nothing to complete.");
        return Ok(());
    };

    let checked: Vec<bool> = (1..=today.exercises.len())
        .map(|n| !missed.contains(&n))
        .collect();

    match tracker.complete_today(checked, now)? {
        Some(progress) => {
            println!("✓ {} completed!", today.title);
            println!(
                "  Next: day {} of {}",
                progress.day_cursor + 1,
                today.total_days
            );
            println!(
                "  Streak: {} day(s) (best {})",
                progress.streak, progress.longest_streak
            );
        }
        None => println!("No active program. Nothing to complete."),
    }
    Ok(())
}

fn cmd_profile_show(tracker: &Tracker<JsonFileStore>, config: &Config) -> Result<()> {
    let profile = tracker.profile()?;
    let fields = profile.dashboard_fields(config.profile.weekly_goal_days);

    println!("User: {}", tracker.user_id());
    println!("  Weekly goal: {} days", fields.weekly_goal_days);
    println!(
        "  Streak: {} day(s) (best {})",
        fields.streak, fields.longest_streak
    );
    if let Some(date) = profile.progress.last_event_date {
        println!("  Last active: {}", date);
    }
    print_optional("Weight", profile.weight.map(|w| format!("{} kg", w)));
    print_optional("Goal weight", profile.goal_weight.map(|w| format!("{} kg", w)));
    print_optional("Calories", profile.daily_calories.map(|c| c.to_string()));
    print_optional("Steps", profile.daily_steps.map(|s| s.to_string()));
    Ok(())
}

fn print_optional(label: &str, value: Option<String>) {
    println!("  {}: {}", label, value.as_deref().unwrap_or("-"));
}

fn print_exercise(n: usize, exercise: &ExercisePrescription) {
    println!(
        "  {}. {} - {} x {}",
        n, exercise.name, exercise.sets, exercise.reps
    );
    if !exercise.note.is_empty() {
        println!("     {}", exercise.note);
    }
}

fn display_program(program: &Program) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", program.display_name());
    println!("╰─────────────────────────────────────────╯");

    if let Some(summary) = &program.summary {
        println!();
        println!("  Split: {}", summary.split_type);
        println!("  Reps: {}", summary.rep_range);
        println!("  Cardio: {}", summary.cardio);
        for note in &summary.notes {
            println!("  ℹ {}", note);
        }
    }

    for day in &program.days {
        println!();
        println!("  {} ({})", day.title, day.focus);
        for (n, exercise) in day.exercises.iter().enumerate() {
            print_exercise(n + 1, exercise);
        }
    }
    println!();
}

fn display_dashboard(stats: &DashboardStats) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  DASHBOARD");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Total workouts: {}", stats.total_workouts);
    println!("  Total volume: {}", stats.total_volume);
    match stats.last_workout_at {
        Some(at) => println!(
            "  Last workout: {}",
            at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        ),
        None => println!("  No workouts yet"),
    }
    println!(
        "  Today: {} workout(s), volume {}",
        stats.todays_workouts, stats.todays_volume
    );
    println!(
        "  Streak: {} day(s) (best {})",
        stats.streak, stats.longest_streak
    );

    let goal = stats.weekly_goal();
    println!(
        "  Weekly goal: {}/{} days ({}%){}",
        goal.active_days,
        goal.goal_days,
        goal.percentage,
        if goal.completed { " ✓" } else { "" }
    );

    println!();
    println!("  Last 7 days:");
    for day in &stats.weekly {
        println!(
            "    {} {}  {}",
            day.label,
            day.date,
            "█".repeat(day.count as usize)
        );
    }

    if let Some(top) = stats.top_category {
        println!();
        println!("  Top category: {} ({})", top.category, top.count);
        println!("  Categories (7 days):");
        for entry in &stats.categories {
            println!("    {:<10} {}", entry.category.to_string(), entry.count);
        }
    }

    if !stats.personal_records.is_empty() {
        println!();
        println!("  Personal records:");
        for record in &stats.personal_records {
            println!(
                "    {:<24} {} kg  ({})",
                record.exercise,
                record.weight,
                record.achieved_at.with_timezone(&Local).format("%Y-%m-%d")
            );
        }
    }

    if let Some(status) = stats.goal_weight_status() {
        println!();
        match status {
            GoalWeightStatus::AtGoal => println!("  Goal weight: reached"),
            GoalWeightStatus::Above { kilos } => {
                println!("  Goal weight: {:.1} kg to lose", kilos)
            }
            GoalWeightStatus::Below { kilos } => {
                println!("  Goal weight: {:.1} kg to gain", kilos)
            }
        }
    }
    println!();
}

fn display_exercises(equipment: Equipment) {
    println!("Exercises for {} equipment:", equipment);
    for entry in substitution_table(equipment).entries() {
        println!("  {:<10} {}", entry.slot.to_string(), entry.exercise);
    }
}
