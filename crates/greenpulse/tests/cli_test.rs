//! Integration tests for the `greenpulse` CLI binary.
//!
//! These cover argument parsing, config commands, completions and startup
//! failures without binding a port or reaching the network.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `greenpulse` binary with env isolation.
fn greenpulse_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("greenpulse");
    cmd.env("HOME", "/tmp/greenpulse-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/greenpulse-cli-test-nonexistent")
        .env_remove("GREENPULSE_CONFIG")
        .env_remove("GREENPULSE_VISION_API_KEY")
        .env_remove("PORT")
        .env_remove("GREENPULSE_LOG_JSON")
        .env_remove("RUST_LOG");
    cmd
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = greenpulse_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(text.contains("Usage"), "Expected 'Usage' in:\n{text}");
}

#[test]
fn test_help_lists_commands() {
    greenpulse_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("serve")
            .and(predicate::str::contains("config"))
            .and(predicate::str::contains("completions")),
    );
}

#[test]
fn test_version_flag() {
    greenpulse_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("greenpulse"));
}

#[test]
fn test_completions_bash() {
    greenpulse_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honours_flag() {
    greenpulse_cmd()
        .args(["config", "path", "--config", "/tmp/gp/custom.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/tmp/gp/custom.toml"));
}

#[test]
fn test_config_init_then_refuses_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let path_str = path.to_str().unwrap();

    greenpulse_cmd()
        .args(["config", "init", "--config", path_str])
        .assert()
        .success();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("[server]"));
    assert!(written.contains("port = 5000"));

    greenpulse_cmd()
        .args(["config", "init", "--config", path_str])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    greenpulse_cmd()
        .args(["config", "init", "--force", "--config", path_str])
        .assert()
        .success();
}

#[test]
fn test_config_show_redacts_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[vision]\napi_key = \"super-secret\"\n").unwrap();

    greenpulse_cmd()
        .args(["config", "show", "--config", path.to_str().unwrap()])
        .env("PORT", "6123")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("port = 6123")
                .and(predicate::str::contains("super-secret").not())
                .and(predicate::str::contains("********")),
        );
}

#[test]
fn test_config_show_missing_file() {
    greenpulse_cmd()
        .args(["config", "show", "--config", "/tmp/greenpulse-nope/none.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("file not found"));
}

// ── Serve ───────────────────────────────────────────────────────────

#[test]
fn test_serve_without_key_fails_with_auth_code() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[server]\nport = 0\n").unwrap();

    greenpulse_cmd()
        .args(["serve", "--config", path.to_str().unwrap()])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No vision API key"));
}

#[test]
fn test_serve_rejects_bad_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[vision]\napi_key = \"k\"\nendpoint = \"not a url\"\n",
    )
    .unwrap();

    greenpulse_cmd()
        .args(["serve", "--config", path.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("vision.endpoint"));
}
