use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("reminders-{nanos}-{file_name}"))
}

fn run(db_path: &PathBuf, args: &[&str]) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_reminders");
    Command::new(exe)
        .args(args)
        .env("REMINDERS_DB_PATH", db_path)
        .env("REMINDERS_CONFIG_PATH", temp_path("no-config.json"))
        .env("REMINDERS_DISABLE_NOTIFICATIONS", "1")
        .output()
        .expect("failed to run reminders command")
}

#[test]
fn edit_replaces_fields_and_preserves_completion() {
    let db_path = temp_path("cli-edit.db");

    assert!(run(&db_path, &["add", "Buy milk"]).status.success());
    assert!(run(&db_path, &["done", "1"]).status.success());

    let output = run(
        &db_path,
        &[
            "--json",
            "edit",
            "1",
            "Buy oat milk",
            "--due",
            "2026-09-02 10:00",
        ],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("json output");
    assert_eq!(parsed["title"], "Buy oat milk");
    assert_eq!(parsed["due_date"], "2026-09-02 10:00");
    assert_eq!(parsed["completed"], true);

    std::fs::remove_file(&db_path).ok();
}

#[test]
fn edit_missing_task_fails() {
    let db_path = temp_path("cli-edit-missing.db");

    let output = run(&db_path, &["edit", "42", "ghost"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not_found"));

    std::fs::remove_file(&db_path).ok();
}

#[test]
fn delete_removes_the_task() {
    let db_path = temp_path("cli-delete.db");

    assert!(run(&db_path, &["add", "Buy milk"]).status.success());
    assert!(run(&db_path, &["delete", "1"]).status.success());

    let list = run(&db_path, &["--json", "list"]);
    let stdout = String::from_utf8_lossy(&list.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("json output");
    assert_eq!(parsed.as_array().unwrap().len(), 0);

    std::fs::remove_file(&db_path).ok();
}

#[test]
fn delete_missing_task_fails() {
    let db_path = temp_path("cli-delete-missing.db");

    let output = run(&db_path, &["delete", "42"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not_found"));

    std::fs::remove_file(&db_path).ok();
}

#[test]
fn done_twice_succeeds() {
    let db_path = temp_path("cli-done-twice.db");

    assert!(run(&db_path, &["add", "Buy milk"]).status.success());
    assert!(run(&db_path, &["done", "1"]).status.success());

    let second = run(&db_path, &["--json", "done", "1"]);
    assert!(second.status.success());
    let stdout = String::from_utf8_lossy(&second.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("json output");
    assert_eq!(parsed["completed"], true);

    std::fs::remove_file(&db_path).ok();
}
