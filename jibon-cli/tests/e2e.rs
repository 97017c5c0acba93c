//! End-to-end integration tests for jibon-cli
//!
//! These tests build and run the binary, so they are gated behind the
//! `integration` feature flag. Run with:
//!
//! ```sh
//! cargo test -p jibon-cli --features integration
//! ```

#![cfg(feature = "integration")]

use std::process::Command;

use tempfile::TempDir;

fn jibon(args: &[&str], project_dir: &TempDir) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "-q", "-p", "jibon-cli", "--"])
        .args(args)
        .env("JIBON_PROJECT_CONFIG_DIR", project_dir.path())
        .env_remove("JIBON_ADMIN_PASSWORD")
        .env_remove("JIBON_HISTORY_PATH")
        .env_remove("PORT")
        .output()
        .expect("Failed to run jibon")
}

/// Test that jibon --help lists the commands
#[test]
fn jibon_help_works() {
    let dir = TempDir::new().unwrap();
    let output = jibon(&["--help"], &dir);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Clinical assessment ledger"));
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("stats"));
    assert!(stdout.contains("logs"));
}

/// Test that jibon config masks the admin password
#[test]
fn jibon_config_masks_password() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[admin]\npassword = \"do-not-print\"\n",
    )
    .unwrap();

    let output = jibon(&["config"], &dir);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[server]"));
    assert!(stdout.contains("port = 3000"));
    assert!(!stdout.contains("do-not-print"));
}

/// Test that stats over a missing history prints zero counts
#[test]
fn jibon_stats_on_empty_history() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history.csv");

    let output = jibon(&["stats", "--history", history.to_str().unwrap()], &dir);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total assessments"));
}

/// Test that logs over a missing history says so
#[test]
fn jibon_logs_on_empty_history() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history.csv");

    let output = jibon(&["logs", "--history", history.to_str().unwrap()], &dir);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No assessments recorded."));
}
