//! CLI tests for the `headerkit emit` subcommand.

use std::fs;
use std::process::Command;

use assert_cmd::cargo;

fn headerkit_cmd() -> Command {
    Command::new(cargo::cargo_bin!("headerkit"))
}

fn write_temp_policy(content: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("policy.json");
    fs::write(&path, content).expect("write temp policy");
    (dir, path.to_string_lossy().to_string())
}

#[test]
fn emit_without_policy_prints_baseline() {
    let output = headerkit_cmd()
        .args(["emit", "--output", "pretty"])
        .output()
        .expect("run emit command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "Strict-Transport-Security: max-age=31536000; includeSubDomains\n\
         X-Frame-Options: DENY\n\
         X-XSS-Protection: 1; mode=block\n\
         X-Content-Type-Options: nosniff\n"
    );
}

#[test]
fn emit_policy_file_json() {
    let (_dir, path) = write_temp_policy(
        r#"{ "xss_protection": null, "cors": { "allow_origin": "*", "allow_methods": ["GET"] } }"#,
    );
    let output = headerkit_cmd()
        .args(["emit", "--policy", &path, "--output", "json"])
        .output()
        .expect("run emit command");

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).expect("valid json");
    let names: Vec<&str> = json["headers"]
        .as_array()
        .expect("headers array")
        .iter()
        .map(|h| h["name"].as_str().unwrap())
        .collect();
    assert!(!names.contains(&"X-XSS-Protection"));
    assert!(names.contains(&"Access-Control-Allow-Origin"));
    assert!(names.contains(&"Access-Control-Allow-Methods"));
}

#[test]
fn emit_invalid_policy_emits_json_error_envelope() {
    let (_dir, path) =
        write_temp_policy(r#"{ "cors": { "allow_origin": "*", "allow_credentials": true } }"#);
    let output = headerkit_cmd()
        .args(["emit", "--policy", &path, "--output", "json"])
        .output()
        .expect("run emit command");

    assert!(!output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).expect("valid json envelope");
    assert_eq!(json["success"], false);
    assert!(
        json["message"]
            .as_str()
            .is_some_and(|m| m.contains("cors.allow_credentials")),
        "unexpected message: {}",
        json["message"]
    );
}

#[test]
fn emit_missing_policy_file_fails() {
    let output = headerkit_cmd()
        .args(["emit", "--policy", "nope-does-not-exist.json", "--output", "json"])
        .output()
        .expect("run emit command");

    assert!(!output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).expect("valid json envelope");
    assert!(
        json["message"]
            .as_str()
            .is_some_and(|m| m.contains("failed to read policy file")),
        "unexpected message: {}",
        json["message"]
    );
}
