//! CLI smoke tests for the jsonapi-server binary
//!
//! These tests run the compiled binary and check help output, configuration
//! validation and `--print-config`. None of them start the HTTP server.

use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Helper to run the jsonapi-server binary with given arguments
fn run_jsonapi_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_jsonapi-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute jsonapi-server")
}

/// Config whose log file lands inside `dir`
fn write_config(dir: &Path, extra: &str) -> String {
    let home = dir.to_string_lossy().replace('\\', "/");
    let path = dir.join("config.yaml");
    let content = format!(
        r#"
server:
  home_dir: "{home}"
  host: "127.0.0.1"
  port: 8080
{extra}"#
    );
    std::fs::write(&path, content).expect("Failed to write config file");
    path.to_string_lossy().to_string()
}

#[test]
fn test_cli_help_command() {
    let output = run_jsonapi_server(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
}

#[test]
fn test_cli_version_command() {
    let output = run_jsonapi_server(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("jsonapi-server"), "Should contain binary name");
}

#[test]
fn test_cli_invalid_command() {
    let output = run_jsonapi_server(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_jsonapi_server(&["--config", "/nonexistent/config.yaml", "check"]);

    assert!(!output.status.success(), "Should fail with missing config");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Config file not found"),
        "Should mention config file issue: {}",
        stderr
    );
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("invalid.yaml");
    std::fs::write(&config_path, "invalid: yaml: content: [unclosed")
        .expect("Failed to write file");

    let output = run_jsonapi_server(&["--config", config_path.to_str().unwrap(), "check"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");
}

#[test]
fn test_cli_config_validation_invalid_module_section() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        temp_dir.path(),
        "modules:\n  users:\n    seed_users: \"lots\"\n",
    );

    let output = run_jsonapi_server(&["--config", &config_path, "check"]);

    assert!(!output.status.success(), "Should reject a bad users section");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("users"), "Should name the module: {}", stderr);
}

#[test]
fn test_cli_config_validation_valid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        temp_dir.path(),
        r#"
logging:
  console_level: warn
  file: "logs/jsonapi-server.log"
  file_level: info

modules:
  users:
    seed_users: 3
"#,
    );

    let output = run_jsonapi_server(&["--config", &config_path, "check"]);

    if !output.status.success() {
        eprintln!("STDERR: {}", String::from_utf8_lossy(&output.stderr));
    }
    assert!(output.status.success(), "Should succeed with valid config");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration check passed"));
    assert!(stdout.contains("seed_users: 3"));
}

#[test]
fn test_cli_print_config_applies_port_override() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path(), "");

    let output = run_jsonapi_server(&["--config", &config_path, "--port", "9191", "--print-config"]);

    assert!(output.status.success(), "print-config should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("port: 9191"), "Should print overridden port: {}", stdout);
}
