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
fn add_creates_a_pending_task() {
    let db_path = temp_path("cli-add.db");

    let output = run(
        &db_path,
        &[
            "--json",
            "add",
            "Buy milk",
            "--description",
            "2 liters",
            "--due",
            "2026-09-01 09:00",
            "--remind",
            "2026-09-01 08:45",
        ],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("json output");
    assert!(parsed["id"].as_i64().unwrap() > 0);
    assert_eq!(parsed["title"], "Buy milk");
    assert_eq!(parsed["description"], "2 liters");
    assert_eq!(parsed["due_date"], "2026-09-01 09:00");
    assert_eq!(parsed["reminder_time"], "2026-09-01 08:45");
    assert_eq!(parsed["completed"], false);

    std::fs::remove_file(&db_path).ok();
}

#[test]
fn add_requires_a_title() {
    let db_path = temp_path("cli-add-no-title.db");

    let output = run(&db_path, &["add", "   "]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("title is required"));

    std::fs::remove_file(&db_path).ok();
}

#[test]
fn add_rejects_malformed_reminder_time_and_stores_nothing() {
    let db_path = temp_path("cli-add-bad-time.db");

    let output = run(&db_path, &["add", "Buy milk", "--remind", "not-a-date"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("validation_error"));

    let list = run(&db_path, &["--json", "list"]);
    assert!(list.status.success());
    let stdout = String::from_utf8_lossy(&list.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("json output");
    assert_eq!(parsed.as_array().unwrap().len(), 0);

    std::fs::remove_file(&db_path).ok();
}
