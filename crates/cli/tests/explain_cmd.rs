//! CLI tests for the `ladder explain` subcommand.

use std::process::Command;

use assert_cmd::cargo;

fn ladder_cmd() -> Command {
    Command::new(cargo::cargo_bin!("ladder"))
}

#[test]
fn explain_known_code_json() {
    let output = ladder_cmd()
        .args(["explain", "LL1003", "--output", "json"])
        .output()
        .expect("run explain");

    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(v["id"], "LL1003");
    assert!(
        v["explanation"].as_str().unwrap().contains("right rail"),
        "explanation={}",
        v["explanation"]
    );
}

#[test]
fn explain_unknown_code_json_is_null() {
    let output = ladder_cmd()
        .args(["explain", "LL9999", "--output", "json"])
        .output()
        .expect("run explain");

    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert!(v["explanation"].is_null());
}

#[test]
fn explain_unknown_code_pretty() {
    let output = ladder_cmd()
        .args(["explain", "LL9999", "--output", "pretty"])
        .output()
        .expect("run explain");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("no explanation available"));
}
