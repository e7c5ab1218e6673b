//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against an isolated data
//! directory (HOME is pointed at a tempdir, STUDYFLOW_ENV=dev).

use std::path::Path;
use std::process::Command;

fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "studyflow-cli", "--quiet", "--"])
        .args(args)
        .env("HOME", home)
        .env("STUDYFLOW_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn task_add_list_complete() {
    let home = tempfile::tempdir().unwrap();

    let (stdout, stderr, code) = run_cli(
        home.path(),
        &["task", "add", "Read chapter 4", "--due", "+2h", "--priority", "2"],
    );
    assert_eq!(code, 0, "task add failed: {stderr}");
    assert!(stdout.contains("Task created: 1"));

    let (stdout, _, code) = run_cli(home.path(), &["task", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Read chapter 4"));

    let (_, _, code) = run_cli(home.path(), &["task", "complete", "1"]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(home.path(), &["task", "list", "--json"]);
    assert_eq!(code, 0);
    let tasks: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(tasks[0]["is_completed"], true);
}

#[test]
fn task_add_rejects_bad_priority() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        home.path(),
        &["task", "add", "Bad", "--due", "+1h", "--priority", "9"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("out of range"));
}

#[test]
fn session_add_and_recommend() {
    let home = tempfile::tempdir().unwrap();

    let (stdout, stderr, code) =
        run_cli(home.path(), &["session", "add", "mon", "09:00", "10:00"]);
    assert_eq!(code, 0, "session add failed: {stderr}");
    assert!(stdout.contains("Session created: 1"));

    let (_, stderr, code) = run_cli(home.path(), &["session", "add", "mon", "10:00", "09:00"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid session window"));

    let (stdout, _, code) = run_cli(home.path(), &["recommend", "show", "--json"]);
    assert_eq!(code, 0);
    let state: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(state["is_study_time"].is_boolean());
}

#[test]
fn timer_round_trip_via_kv() {
    let home = tempfile::tempdir().unwrap();

    run_cli(
        home.path(),
        &["subject", "add", "Maths", "--goal-hours", "2"],
    );
    run_cli(
        home.path(),
        &[
            "task", "add", "Drill", "--due", "+1d", "--subject", "1", "--duration", "25",
        ],
    );

    let (stdout, stderr, code) = run_cli(home.path(), &["timer", "start", "1"]);
    assert_eq!(code, 0, "timer start failed: {stderr}");
    assert!(stdout.contains("TimerStarted"));

    let (stdout, _, code) = run_cli(home.path(), &["timer", "status"]);
    assert_eq!(code, 0);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["state"], "running");
    assert_eq!(snapshot["task_id"], 1);

    let (stdout, _, code) = run_cli(home.path(), &["timer", "finish"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("SessionFinished"));

    let (stdout, _, _) = run_cli(home.path(), &["task", "list", "--json"]);
    let tasks: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(tasks[0]["is_completed"], true);
}

#[test]
fn config_rejects_zero_refresh() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "set-refresh", "0"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("must be at least 1"));

    // Nothing was persisted; the default cadence survives.
    let (stdout, _, code) = run_cli(home.path(), &["config", "show", "--json"]);
    assert_eq!(code, 0);
    let config: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(config["recommendation"]["refresh_secs"], 60);
}

#[test]
fn config_show_has_defaults() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "show", "--json"]);
    assert_eq!(code, 0);
    let config: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(config["timer"]["default_focus_minutes"], 60);
    assert_eq!(config["recommendation"]["refresh_secs"], 60);
}
