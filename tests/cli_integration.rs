//! Binary-level CLI tests
//!
//! Drives the compiled binary with an isolated storage directory and
//! checks the non-interactive surfaces.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn jarvis(storage_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("jarvis-chat").expect("binary exists");
    cmd.env("JARVIS_STORAGE_DIR", storage_dir);
    cmd
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("jarvis-chat")
        .expect("binary exists")
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("chat")
                .and(predicate::str::contains("history"))
                .and(predicate::str::contains("settings"))
                .and(predicate::str::contains("health")),
        );
}

#[test]
fn test_unknown_command_fails() {
    Command::cargo_bin("jarvis-chat")
        .expect("binary exists")
        .arg("frobnicate")
        .assert()
        .failure();
}

#[test]
fn test_settings_show_prints_defaults() {
    let dir = tempdir().expect("tempdir");
    jarvis(dir.path())
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("api_url")
                .and(predicate::str::contains("http://localhost:8000"))
                .and(predicate::str::contains("dark")),
        );
}

#[test]
fn test_settings_set_then_show_roundtrip() {
    let dir = tempdir().expect("tempdir");
    jarvis(dir.path())
        .args(["settings", "set", "theme", "light"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings saved"));

    jarvis(dir.path())
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("light"));
}

#[test]
fn test_settings_set_invalid_key_fails() {
    let dir = tempdir().expect("tempdir");
    jarvis(dir.path())
        .args(["settings", "set", "wallpaper", "stars"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown settings key"));
}

#[test]
fn test_stats_shows_default_profile() {
    let dir = tempdir().expect("tempdir");
    jarvis(dir.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Tony Stark")
                .and(predicate::str::contains("Level 1"))
                .and(predicate::str::contains("Last login: never")),
        );
}

#[test]
fn test_settings_reset_forced_restores_defaults() {
    let dir = tempdir().expect("tempdir");
    jarvis(dir.path())
        .args(["settings", "set", "theme", "light"])
        .assert()
        .success();

    jarvis(dir.path())
        .args(["settings", "reset", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All stored data cleared"));

    jarvis(dir.path())
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dark"));
}
