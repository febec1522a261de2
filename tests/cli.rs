//! End-to-end tests driving the compiled binary against a temporary
//! backing file.

use anyhow::Result;
use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// A backing file in the wire format, written without going through the
/// binary, so the tests do not depend on it for their own fixtures.
const SEEDED_TASKS: &str = r#"[
  {"id":1,"description":"first","status":"todo","createdAt":"09:00:00 01-15-2026","updatedAt":"09:00:00 01-15-2026"},
  {"id":3,"description":"third","status":"in-progress","createdAt":"09:05:00 01-15-2026","updatedAt":"10:30:00 01-16-2026"}
]"#;

fn task_cli(dir: &TempDir) -> Result<Command> {
    let mut cmd = Command::cargo_bin("task-cli")?;
    cmd.arg("--file").arg(dir.child("tasks.json").path());
    Ok(cmd)
}

#[test]
fn add_to_missing_file_creates_it_and_reports_id_one() -> Result<()> {
    let dir = TempDir::new()?;

    task_cli(&dir)?
        .args(["add", "buy milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No data file found."))
        .stdout(predicate::str::contains("Task added successfully (ID: 1)"));

    dir.child("tasks.json")
        .assert(predicate::str::contains(r#""description":"buy milk""#))
        .assert(predicate::str::contains(r#""status":"todo""#));
    Ok(())
}

#[test]
fn add_assigns_max_id_plus_one() -> Result<()> {
    let dir = TempDir::new()?;
    dir.child("tasks.json").write_str(SEEDED_TASKS)?;

    task_cli(&dir)?
        .args(["add", "fourth"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(ID: 4)"));
    Ok(())
}

#[test]
fn update_replaces_the_description() -> Result<()> {
    let dir = TempDir::new()?;
    dir.child("tasks.json").write_str(SEEDED_TASKS)?;

    task_cli(&dir)?
        .args(["update", "1", "first, revised"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully updated description"));

    task_cli(&dir)?
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("first, revised"));
    Ok(())
}

#[test]
fn mark_done_changes_the_status() -> Result<()> {
    let dir = TempDir::new()?;
    dir.child("tasks.json").write_str(SEEDED_TASKS)?;

    task_cli(&dir)?
        .args(["mark-done", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully updated status"));

    task_cli(&dir)?
        .args(["list", "done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("third"))
        .stdout(predicate::str::contains("first").not());
    Ok(())
}

#[test]
fn delete_removes_the_task() -> Result<()> {
    let dir = TempDir::new()?;
    dir.child("tasks.json").write_str(SEEDED_TASKS)?;

    task_cli(&dir)?
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully deleted task"));

    task_cli(&dir)?
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("first").not())
        .stdout(predicate::str::contains("third"));
    Ok(())
}

#[test]
fn delete_with_unknown_id_reports_not_found_and_exits_zero() -> Result<()> {
    let dir = TempDir::new()?;
    dir.child("tasks.json").write_str(SEEDED_TASKS)?;

    task_cli(&dir)?
        .args(["delete", "99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task not found (ID: 99)"));

    // No write happened: the seeded content is byte-for-byte intact.
    dir.child("tasks.json").assert(SEEDED_TASKS);
    Ok(())
}

#[test]
fn list_filters_by_exact_status() -> Result<()> {
    let dir = TempDir::new()?;
    dir.child("tasks.json").write_str(SEEDED_TASKS)?;

    task_cli(&dir)?
        .args(["list", "in-progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("third"))
        .stdout(predicate::str::contains("first").not());
    Ok(())
}

#[test]
fn list_all_is_the_default() -> Result<()> {
    let dir = TempDir::new()?;
    dir.child("tasks.json").write_str(SEEDED_TASKS)?;

    task_cli(&dir)?
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("first"))
        .stdout(predicate::str::contains("third"));
    Ok(())
}

#[test]
fn list_rejects_an_unrecognized_filter_without_failing_the_process() -> Result<()> {
    let dir = TempDir::new()?;
    dir.child("tasks.json").write_str(SEEDED_TASKS)?;

    task_cli(&dir)?
        .args(["list", "urgent"])
        .assert()
        .code(0)
        .stderr(predicate::str::contains("is not a valid status"));
    Ok(())
}

#[test]
fn unreadable_file_is_reported_and_treated_as_empty() -> Result<()> {
    let dir = TempDir::new()?;
    dir.child("tasks.json").write_str("{{ not json")?;

    task_cli(&dir)?
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No data in file"));
    Ok(())
}

#[test]
fn no_command_prints_a_message_and_exits_one() -> Result<()> {
    Command::cargo_bin("task-cli")?
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Please enter a command"));
    Ok(())
}

#[test]
fn mutating_an_empty_collection_reports_not_found() -> Result<()> {
    let dir = TempDir::new()?;
    dir.child("tasks.json").write_str("[]")?;

    task_cli(&dir)?
        .args(["mark-done", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task not found (ID: 1)"));
    Ok(())
}
