//! End-to-end tests for the `jss-config` binary: exit status and output file.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn jss_config(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jss-config"))
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap()
}

fn write_project(root: &Path) {
    fs::write(
        root.join("scjssconfig.json"),
        r#"{"sitecore": {"apiKey": "ABC123", "layoutServiceHost": "https://cm.example.com"}}"#,
    )
    .unwrap();
    fs::write(
        root.join("package.json"),
        r#"{"config": {"appName": "my-app", "graphQLEndpointPath": "/sitecore/api/graph/edge"}}"#,
    )
    .unwrap();
    fs::create_dir_all(root.join("src/environments")).unwrap();
}

#[test]
fn test_generate_writes_default_location() {
    let dir = tempdir().unwrap();
    write_project(dir.path());

    let output = jss_config(dir.path(), &["generate"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Writing runtime config to"));
    assert!(stderr.contains("environment.ts"));

    let text = fs::read_to_string(dir.path().join("src/environments/environment.ts")).unwrap();
    assert!(text.contains(
        "\"graphQLEndpoint\": \"https://cm.example.com/sitecore/api/graph/edge?sc_apikey=ABC123\""
    ));
}

#[test]
fn test_generate_missing_inputs_exits_nonzero() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src/environments")).unwrap();

    let output = jss_config(dir.path(), &["generate"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("You may need to run `jss setup`"));
    assert!(!dir.path().join("src/environments/environment.ts").exists());
}

#[test]
fn test_generate_set_override_wins() {
    let dir = tempdir().unwrap();
    write_project(dir.path());

    let output = jss_config(
        dir.path(),
        &["generate", "--set", "sitecoreApiKey=OVERRIDE", "--production"],
    );

    assert!(output.status.success());
    let text = fs::read_to_string(dir.path().join("src/environments/environment.ts")).unwrap();
    assert!(text.contains("\"sitecoreApiKey\": \"OVERRIDE\""));
    assert!(text.contains("\"production\": true"));
}

#[test]
fn test_dry_run_prints_without_writing() {
    let dir = tempdir().unwrap();
    write_project(dir.path());

    let output = jss_config(dir.path(), &["generate", "--dry-run"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("/* tslint:disable */"));
    assert!(!dir.path().join("src/environments/environment.ts").exists());
}

#[test]
fn test_verify_json() {
    let dir = tempdir().unwrap();
    write_project(dir.path());

    let output = jss_config(dir.path(), &["verify", "--json"]);

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["config"]["jssAppName"], "my-app");
    assert_eq!(report["sources"][0]["origin"], "builtin");
    assert_eq!(report["sources"][1]["origin"], "setup");
    assert_eq!(report["sources"][2]["origin"], "package");
}

#[test]
fn test_invalid_set_exits_nonzero() {
    let dir = tempdir().unwrap();
    write_project(dir.path());

    let output = jss_config(dir.path(), &["generate", "--set", "novalue"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid override"));
}
