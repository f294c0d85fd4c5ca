//! Integration tests for the liftlog binary.
//!
//! These tests verify end-to-end behavior including:
//! - Workout logging, editing and history
//! - Program generation, activation and day completion
//! - Dashboard output and CSV export
//! - Data persistence across invocations

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("liftlog"))
}

/// Run a command against `data_dir` and return its stdout
fn run(data_dir: &Path, args: &[&str]) -> String {
    let output = cli()
        .args(args)
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).expect("stdout is not UTF-8")
}

/// Pull the value of the first `ID: ...` line out of command output
fn printed_id(stdout: &str) -> String {
    stdout
        .lines()
        .find_map(|line| line.trim().strip_prefix("ID: "))
        .expect("no ID in output")
        .to_string()
}

fn log_squat(data_dir: &Path, weight: &str) -> String {
    run(
        data_dir,
        &[
            "log",
            "--exercise",
            "Back Squat",
            "--sets",
            "3",
            "--reps",
            "5",
            "--weight",
            weight,
            "--category",
            "legs",
        ],
    )
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Workout log, training programs and progress dashboard",
        ));
}

#[test]
fn test_log_creates_workout_document() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    let stdout = log_squat(data_dir, "100");
    assert!(stdout.contains("Workout logged"));
    assert!(stdout.contains("Streak: 1 day(s)"));

    let id = printed_id(&stdout);
    let doc_path = data_dir.join("workouts").join(format!("{}.json", id));
    let doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(doc_path).unwrap()).unwrap();
    assert_eq!(doc["type"], "log");
    assert_eq!(doc["exercise"], "Back Squat");
    assert_eq!(doc["category"], "Legs");

    // Progress lands on the profile document
    let profile_path = fs::read_dir(data_dir.join("profiles"))
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .next()
        .expect("no profile written");
    let profile: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(profile_path).unwrap()).unwrap();
    assert_eq!(profile["streak"], 1);
}

#[test]
fn test_history_and_dashboard_totals() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    log_squat(data_dir, "100");
    log_squat(data_dir, "120");

    let history = run(data_dir, &["history"]);
    assert_eq!(history.matches("Back Squat").count(), 2);

    let dashboard = run(data_dir, &["dashboard"]);
    assert!(dashboard.contains("Total workouts: 2"));
    assert!(dashboard.contains("Total volume: 3300"));
    assert!(dashboard.contains("Today: 2 workout(s)"));
    assert!(dashboard.contains("Top category: Legs (2)"));
    assert!(dashboard.contains("Categories (7 days):"));
    assert!(dashboard
        .lines()
        .any(|line| line.split_whitespace().eq(["Legs", "2"])));
    assert!(dashboard.contains("Last workout: "));
    assert!(dashboard.contains("Weekly goal: 1/4 days (25%)"));
}

#[test]
fn test_empty_history() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts logged yet"));
}

#[test]
fn test_empty_dashboard() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("dashboard")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts yet"))
        .stdout(predicate::str::contains("Categories").not());
}

#[test]
fn test_invalid_workout_rejected() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["log", "--exercise", "  ", "--sets", "3", "--reps", "5"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Exercise name is required"));

    cli()
        .args(["log", "--exercise", "Row", "--sets", "0", "--reps", "5"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .failure();

    assert!(!data_dir.join("workouts").exists());
}

#[test]
fn test_edit_and_delete_workout() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    let id = printed_id(&log_squat(data_dir, "100"));

    run(
        data_dir,
        &[
            "edit",
            &id,
            "--exercise",
            "Front Squat",
            "--sets",
            "4",
            "--reps",
            "6",
            "--weight",
            "80",
        ],
    );
    let history = run(data_dir, &["history"]);
    assert!(history.contains("Front Squat"));
    assert!(!history.contains("Back Squat"));

    run(data_dir, &["delete", &id]);
    assert!(run(data_dir, &["history"]).contains("No workouts logged yet"));

    // Second delete has nothing to find
    cli()
        .args(["delete", &id])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .failure();
}

#[test]
fn test_generate_without_save_writes_nothing() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    let stdout = run(
        data_dir,
        &["generate", "--goal", "strength", "--days", "3", "--equipment", "home"],
    );
    assert!(stdout.contains("Split: Full Body 3x"));
    assert!(stdout.contains("Reps: 4–6 reps"));
    assert!(!data_dir.join("plans").exists());
}

#[test]
fn test_program_day_cycle() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    let stdout = run(data_dir, &["generate", "--days", "2", "--activate"]);
    assert!(stdout.contains("Program saved"));
    let program_id = printed_id(&stdout);

    let plans = run(data_dir, &["plans"]);
    assert!(plans.contains(&format!("* {}", program_id)));

    assert!(run(data_dir, &["today"]).contains("Day 1 of 2"));

    let done = run(data_dir, &["complete", "--missed", "2"]);
    assert!(done.contains("Next: day 2 of 2"));
    assert!(run(data_dir, &["today"]).contains("Day 2 of 2"));

    let done = run(data_dir, &["complete"]);
    assert!(done.contains("Next: day 1 of 2"));

    // Completions count as workouts without adding volume or records
    let dashboard = run(data_dir, &["dashboard"]);
    assert!(dashboard.contains("Total workouts: 2"));
    assert!(dashboard.contains("Top category: Other (2)"));
    assert!(run(data_dir, &["history"]).contains("No workouts logged yet"));
    let records = fs::read_dir(data_dir.join("workouts")).unwrap().count();
    assert_eq!(records, 2);
}

#[test]
fn test_today_without_program() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("today")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No active program"));
}

#[test]
fn test_plan_import_and_activate() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    let plan_path = data_dir.join("plan.toml");
    fs::write(
        &plan_path,
        r#"
name = "  Home Split  "

[[days]]
title = ""
[[days.exercises]]
name = "Push-up"
sets = 3
reps = "AMRAP"
[[days.exercises]]
name = "  "

[[days]]
title = "Empty"

[[days]]
title = "Legs"
[[days.exercises]]
name = "Split Squat"
sets = 3
reps = "10"
"#,
    )
    .unwrap();

    let stdout = run(
        data_dir,
        &["plan", "import", plan_path.to_str().unwrap()],
    );
    assert!(stdout.contains("Imported Home Split (2 days)"));
    let id = printed_id(&stdout);

    run(data_dir, &["activate", &id]);
    let today = run(data_dir, &["today"]);
    assert!(today.contains("Day 1 of 2: Day 1"));
    assert!(today.contains("Push-up"));
}

#[test]
fn test_plan_import_rejects_blank_name() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    let plan_path = data_dir.join("plan.toml");
    fs::write(&plan_path, "name = \" \"\n").unwrap();

    cli()
        .args(["plan", "import"])
        .arg(&plan_path)
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .failure();
}

#[test]
fn test_activate_unknown_program_fails() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["activate", "nope"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn test_profile_set_and_show() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    run(
        data_dir,
        &["profile", "set", "--weight", "82", "--goal-weight", "78"],
    );
    let shown = run(data_dir, &["profile", "show"]);
    assert!(shown.contains("Weight: 82 kg"));
    assert!(shown.contains("Goal weight: 78 kg"));

    assert!(run(data_dir, &["dashboard"]).contains("4.0 kg to lose"));

    cli()
        .args(["profile", "set", "--weekly-goal", "9"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .failure();
}

#[test]
fn test_exercises_for_equipment() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["exercises", "--equipment", "home"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exercises for home equipment"))
        .stdout(predicate::str::contains("Brisk Walk"));
}

#[test]
fn test_export_creates_csv() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    log_squat(data_dir, "100");
    let csv_path = data_dir.join("export").join("workouts.csv");

    cli()
        .arg("export")
        .arg(&csv_path)
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 workouts"));

    let csv_content = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert!(csv_content.starts_with("id,created_at,category,exercise"));
    assert!(csv_content.contains("Back Squat"));
}

#[test]
fn test_users_are_isolated() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    log_squat(data_dir, "100");

    cli()
        .args(["history", "--user", "someone-else"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts logged yet"));
}
