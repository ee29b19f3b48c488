#![cfg(feature = "cli")]

use std::path::PathBuf;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_authcontracts"))
        .args(["--log-level", "error", "--format", "json"])
        .args(args)
        .env_remove("AUTHCONTRACTS_STRICT")
        .output()
        .expect("authcontracts should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn unique_temp_file(tag: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "authcontracts-{tag}-{}-{}.json",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::write(&path, contents).expect("temp file should be writable");
    path
}

#[test]
fn list_reports_both_endpoints() {
    let output = run(&["list"]);
    assert!(output.status.success());

    let listed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("list output should be JSON");
    assert_eq!(listed[0]["endpoint"], "login");
    assert_eq!(listed[1]["endpoint"], "register");
    assert_eq!(listed[1]["statuses"], serde_json::json!([200, 409]));
}

#[test]
fn show_prints_contract_schema() {
    let output = run(&["show", "login"]);
    assert!(output.status.success());

    let schema: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("show output should be JSON");
    assert_eq!(schema["body"]["properties"]["password"]["type"], "string");
    assert_eq!(
        schema["response"]["401"]["example"]["name"],
        "AuthenticationError"
    );
}

#[test]
fn show_unknown_endpoint_is_usage_error() {
    let output = run(&["show", "logout"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn validate_accepts_documented_body() {
    let output = run(&[
        "validate",
        "register",
        "--json",
        r#"{"email":"a@b.c","password":"pw","username":"ada"}"#,
    ]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("\"valid\":true"));
}

#[test]
fn validate_rejects_wrong_kind_with_60() {
    let output = run(&["validate", "login", "--json", r#"{"email":42}"#]);
    assert_eq!(output.status.code(), Some(60));
    assert!(stdout(&output).contains("\"valid\":false"));
}

#[test]
fn strict_flag_rejects_undeclared_fields() {
    let body = r#"{"email":"a@b.c","password":"pw","username":"ada"}"#;

    let permissive = run(&["validate", "login", "--json", body]);
    assert!(permissive.status.success());

    let strict = run(&["--strict", "validate", "login", "--json", body]);
    assert_eq!(strict.status.code(), Some(60));
}

#[test]
fn strict_env_var_accepts_numeric_flag() {
    let body = r#"{"email":"a@b.c","password":"pw","username":"ada"}"#;

    let strict = Command::new(env!("CARGO_BIN_EXE_authcontracts"))
        .args(["--log-level", "error", "--format", "json"])
        .args(["validate", "login", "--json", body])
        .env("AUTHCONTRACTS_STRICT", "1")
        .output()
        .expect("authcontracts should run");
    assert_eq!(strict.status.code(), Some(60));
    assert!(stdout(&strict).contains("\"valid\":false"));

    let off = Command::new(env!("CARGO_BIN_EXE_authcontracts"))
        .args(["--log-level", "error", "--format", "json"])
        .args(["validate", "login", "--json", body])
        .env("AUTHCONTRACTS_STRICT", "0")
        .output()
        .expect("authcontracts should run");
    assert!(off.status.success());
}

#[test]
fn validate_error_example_from_file() {
    let path = unique_temp_file(
        "conflict",
        r#"{"name":"UsernameExistsError","message":"Username already exists","statusCode":409}"#,
    );
    let output = run(&[
        "validate",
        "register",
        "--status",
        "409",
        "--file",
        path.to_str().expect("temp path should be UTF-8"),
    ]);
    let _ = std::fs::remove_file(&path);

    assert!(output.status.success());
    assert!(stdout(&output).contains("\"target\":\"response 409\""));
}

#[test]
fn validate_undeclared_status_is_usage_error() {
    let output = run(&["validate", "login", "--status", "409", "--json", "{}"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn validate_malformed_json_is_data_error() {
    let output = run(&["validate", "login", "--json", "not-json"]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn examples_lists_documented_errors() {
    let output = run(&["examples", "login"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        r#"[{"status":401,"example":{"name":"AuthenticationError","message":"Invalid password or email","statusCode":401}}]"#
    );
}

#[test]
fn openapi_document_covers_contracts() {
    let output = run(&["openapi", "--title", "Auth API"]);
    assert!(output.status.success());

    let doc: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("openapi output should be JSON");
    assert_eq!(doc["openapi"], "3.1.0");
    assert_eq!(doc["info"]["title"], "Auth API");
    assert!(doc["x-contracts"]["register"]["responses"]["409"].is_object());
}

#[test]
fn version_prints_package_version() {
    let output = run(&["version"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("authcontracts "));
}
