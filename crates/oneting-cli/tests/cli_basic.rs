//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with ONETING_HOME pointed at a temp dir
//! and verify outputs.

use std::path::Path;
use std::process::Command;

use chrono::{Duration, Utc};
use oneting_core::history::{HistoryEntry, HistoryStore};
use oneting_core::Database;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_oneting"))
        .env("ONETING_HOME", home)
        .env_remove("ONETING_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn seed_history(home: &Path, entries: Vec<HistoryEntry>) {
    let db = Database::open_at(&home.join("oneting.db")).unwrap();
    let mut history = HistoryStore::open(db);
    for entry in entries.into_iter().rev() {
        history.append(entry).unwrap();
    }
}

#[test]
fn test_config_get() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "session.default_minutes"]);
    assert_eq!(code, 0, "Config get failed");
    assert_eq!(stdout.trim(), "25");
    assert!(home.path().join("config.toml").exists());
}

#[test]
fn test_config_set_then_get() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(home.path(), &["config", "set", "ui.dark_mode", "true"]);
    assert_eq!(code, 0, "Config set failed");
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "ui.dark_mode"]);
    assert_eq!(stdout.trim(), "true");
}

#[test]
fn test_config_unknown_key_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "ui.nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_history_list_empty() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["history", "list"]);
    assert_eq!(code, 0, "History list failed");
    assert!(stdout.contains("No sessions yet"));
}

#[test]
fn test_history_list_json_newest_first() {
    let home = tempfile::tempdir().unwrap();
    let now = Utc::now();
    seed_history(
        home.path(),
        vec![
            HistoryEntry::new("Newer", 25, now),
            HistoryEntry::new("Older", 10, now - Duration::days(2)),
        ],
    );

    let (stdout, _, code) = run_cli(home.path(), &["history", "list", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["task"], "Newer");
    assert_eq!(items[1]["minutes"], 10);

    let (stdout, _, _) = run_cli(home.path(), &["history", "list", "--grouped", "--json"]);
    let groups: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(groups.as_array().unwrap().len(), 2);
}

#[test]
fn test_history_clear() {
    let home = tempfile::tempdir().unwrap();
    seed_history(home.path(), vec![HistoryEntry::new("Gone", 5, Utc::now())]);
    let (_, _, code) = run_cli(home.path(), &["history", "clear"]);
    assert_eq!(code, 0, "History clear failed");
    let (stdout, _, _) = run_cli(home.path(), &["history", "list", "--json"]);
    assert_eq!(stdout.trim(), "[]");
}

#[test]
fn test_stats_json() {
    let home = tempfile::tempdir().unwrap();
    let now = Utc::now();
    seed_history(
        home.path(),
        vec![
            HistoryEntry::new("Today", 10, now),
            HistoryEntry::new("Earlier", 20, now - Duration::days(3)),
            HistoryEntry::new("Old", 5, now - Duration::days(10)),
        ],
    );

    let (stdout, _, code) = run_cli(home.path(), &["stats", "--json"]);
    assert_eq!(code, 0, "Stats failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["streak"], 1);
    assert_eq!(parsed["weekly"]["totalMinutes"], 30);
    assert_eq!(parsed["weekly"]["totalSessions"], 2);
    assert_eq!(parsed["days"].as_array().unwrap().len(), 7);
}

#[test]
fn test_start_rejects_blank_task() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["start", "   "]);
    assert_ne!(code, 0);
    assert!(stderr.contains("task must not be blank"));
}
