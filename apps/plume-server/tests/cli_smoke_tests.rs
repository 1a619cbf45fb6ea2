//! CLI smoke tests for the plume-server binary: help/version output,
//! configuration validation, and the check subcommand.

use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Helper to run the plume-server binary with given arguments
fn run_plume_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_plume-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute plume-server")
}

fn write_config(dir: &TempDir) -> std::path::PathBuf {
    let home = dir.path().join("home");
    let config_path = dir.path().join("config.yaml");
    let yaml = format!(
        r#"
server:
  home_dir: "{}"
  host: "127.0.0.1"
  port: 9187

database:
  url: "sqlite://database/plume.db?mode=rwc"

logging:
  console_level: error
"#,
        home.display()
    );
    std::fs::write(&config_path, yaml).expect("Failed to write config");
    config_path
}

#[test]
fn test_cli_help_command() {
    let output = run_plume_server(&["--help"]);
    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("plume-server"), "Should contain binary name");
    assert!(
        stdout.contains("Usage:") || stdout.contains("USAGE:"),
        "Should contain usage information"
    );
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
}

#[test]
fn test_cli_version_command() {
    let output = run_plume_server(&["--version"]);
    assert!(output.status.success(), "Version command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0.1.0"), "Should contain version");
}

#[test]
fn test_check_command_with_valid_config() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&dir);

    let output = run_plume_server(&["--config", &config_path.to_string_lossy(), "check"]);
    assert!(
        output.status.success(),
        "Check should succeed for a valid config, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration check passed"));
}

#[test]
fn test_check_command_with_invalid_config() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = dir.path().join("bad.yaml");
    std::fs::write(&config_path, "server:\n  port: \"not a number\"\n")
        .expect("Failed to write config");

    let output = run_plume_server(&["--config", &config_path.to_string_lossy(), "check"]);
    assert!(!output.status.success(), "Check should fail for a bad config");
}

#[test]
fn test_print_config() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&dir);

    let output = run_plume_server(&["--config", &config_path.to_string_lossy(), "--print-config"]);
    assert!(output.status.success(), "print-config should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("port: 9187"), "Should echo configured port");
}
