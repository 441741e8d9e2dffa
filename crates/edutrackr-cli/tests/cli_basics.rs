//! Integration tests for help output and config commands.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn help_lists_the_study_commands() {
    Command::cargo_bin("edutrackr")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("flashcards"))
        .stdout(predicate::str::contains("quiz"))
        .stdout(predicate::str::contains("tutor"));
}

#[test]
fn config_path_respects_the_home_override() {
    let temp = tempdir().unwrap();
    Command::cargo_bin("edutrackr")
        .unwrap()
        .env("EDUTRACKR_HOME", temp.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_show_redacts_the_api_key() {
    let temp = tempdir().unwrap();
    std::fs::write(
        temp.path().join("config.toml"),
        "[providers.gemini]\napi_key = \"sk-secret-value\"\n",
    )
    .unwrap();

    Command::cargo_bin("edutrackr")
        .unwrap()
        .env("EDUTRACKR_HOME", temp.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<redacted>"))
        .stdout(predicate::str::contains("sk-secret-value").not());
}

#[test]
fn malformed_config_fails_loudly() {
    let temp = tempdir().unwrap();
    std::fs::write(temp.path().join("config.toml"), "providers = 3").unwrap();

    Command::cargo_bin("edutrackr")
        .unwrap()
        .env("EDUTRACKR_HOME", temp.path())
        .args(["config", "path"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}
