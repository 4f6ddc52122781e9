//! CLI integration tests
//!
//! Runs the built binary. Every command here stays offline: credentials are
//! blanked in the child environment and `analyze` runs with `--offline`.

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn overseer() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_overseer"));
    cmd.env("OVERSEER_API_KEY", "")
        .env("API_KEY", "")
        .env("GEMINI_API_KEY", "")
        .env("OVERSEER_LOG_LEVEL", "error")
        .env_remove("RUST_LOG");
    cmd
}

fn run(args: &[&str]) -> Output {
    overseer().args(args).output().expect("Failed to execute overseer")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_cli_help() {
    let output = run(&["--help"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("overseer"));
    assert!(text.contains("scan"));
    assert!(text.contains("analyze"));
    assert!(text.contains("intel"));
    assert!(text.contains("health"));
}

#[test]
fn test_scan_file_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("package.json");
    fs::write(
        &path,
        r#"{"dependencies": {"react": "^18.3.0"}, "devDependencies": {"mongodb": "~6.5.0"}}"#,
    )
    .unwrap();

    let output = run(&["scan", path.to_str().unwrap(), "--format", "json", "--locale", "en-US"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["stack"][0]["name"], "react");
    assert_eq!(value["stack"][0]["version"], "v18.3.0");
    assert_eq!(value["stack"][1]["category"], "Database");
    assert_eq!(value["summary"]["total"], 2);
}

#[test]
fn test_scan_stdin() {
    let mut child = overseer()
        .args(["scan", "-", "-f", "json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn overseer");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(br#"{"dependencies": {"express": "^4.18.2"}}"#)
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["stack"][0]["category"], "Backend");
}

#[test]
fn test_scan_malformed_manifest_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("package.json");
    fs::write(&path, "not json").unwrap();

    let output = run(&["scan", path.to_str().unwrap(), "-f", "json"]);

    assert_eq!(output.status.code(), Some(1));
    // the untouched boot stack and the error log line are still printed
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["stack"].as_array().unwrap().len(), 4);
    let last_log = value["logs"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(last_log["type"], "error");
}

#[test]
fn test_scan_missing_file_fails() {
    let output = run(&["scan", "/nonexistent/package.json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read manifest"));
}

#[test]
fn test_scan_demo() {
    let output = run(&["scan", "--demo", "--locale", "en-US"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Simulation Environment Loaded."));
    assert!(text.contains("socket.io"));
}

#[test]
fn test_analyze_offline_json() {
    let output = run(&["analyze", "TypeScript", "--demo", "--offline", "-f", "json", "--locale", "en-US"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let results = value["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "typescript");
    assert_eq!(results[0]["isOffline"], true);
    assert!(!results[0]["text"].as_str().unwrap().is_empty());
}

#[test]
fn test_analyze_unknown_component_fails() {
    let output = run(&["analyze", "Kubernetes", "--offline"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_intel_lookup() {
    let output = run(&["intel", "Kubernetes", "--locale", "en-US"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Link severed. Signal lost."));
}

#[test]
fn test_health_without_credentials() {
    let output = run(&["health", "-f", "json"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert!(value["health_status"]["backend"].is_null());
    assert_eq!(value["configuration"]["credential"], "not set");
}
