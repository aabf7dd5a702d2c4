//! End-to-end tests for the `verbalingo` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command with config and sessions isolated in `dir`.
fn verbalingo(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("verbalingo").unwrap();
    cmd.env("VERBALINGO_CONFIG_DIR", dir.path())
        .env_remove("VERBALINGO_LOG");
    cmd
}

// ============================================================================
// Help
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    verbalingo(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("sessions"));
}

#[test]
fn search_without_query_is_usage_error() {
    let dir = TempDir::new().unwrap();
    verbalingo(&dir)
        .arg("search")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("required"));
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn config_show_prints_defaults() {
    let dir = TempDir::new().unwrap();
    verbalingo(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("base_url"))
        .stdout(predicate::str::contains("lookahead_offset_secs"));
}

#[test]
fn config_migrate_yes_writes_file() {
    let dir = TempDir::new().unwrap();
    verbalingo(&dir)
        .args(["config", "migrate", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config updated"));

    let written = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(written.contains("[sessions]"));

    verbalingo(&dir)
        .args(["config", "migrate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already up to date"));
}

// ============================================================================
// Sessions
// ============================================================================

#[test]
fn sessions_record_list_delete() {
    let dir = TempDir::new().unwrap();

    verbalingo(&dir)
        .args(["sessions", "record", "Hello ", "what does it mean?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("'hello'"));

    verbalingo(&dir)
        .args(["sessions", "record", "hello", "hi", "--role", "assistant"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 total"));

    verbalingo(&dir)
        .args(["sessions", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello"))
        .stdout(predicate::str::contains("2 message(s)"));

    verbalingo(&dir)
        .args(["sessions", "delete", "HELLO"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted session"));

    verbalingo(&dir)
        .args(["sessions", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No chat sessions"));
}

#[test]
fn sessions_prune_on_empty_store() {
    let dir = TempDir::new().unwrap();
    verbalingo(&dir)
        .args(["sessions", "prune"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 0 expired session(s)"));
}

// ============================================================================
// Backend errors
// ============================================================================

#[test]
fn search_reports_unreachable_backend() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[api]\nbase_url = \"http://127.0.0.1:9\"\ntimeout_secs = 2\n",
    )
    .unwrap();

    verbalingo(&dir).args(["search", "run"]).assert().failure();
}

#[test]
fn completions_generate_script() {
    let dir = TempDir::new().unwrap();
    verbalingo(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("verbalingo"));
}
