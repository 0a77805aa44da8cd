//! CLI tests for the `ladder format` subcommand.

use std::fs;
use std::process::Command;

use assert_cmd::cargo;

const CANONICAL: &str = "||              ||\n||--[A]----(B)--||\n||              ||\n";
const HAND_DRAWN: &str = "!! a note !!\n||--[A]-------(B)---||\n";

fn ladder_cmd() -> Command {
    Command::new(cargo::cargo_bin!("ladder"))
}

fn write_temp(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("rung.ladder");
    fs::write(&path, content).expect("write temp file");
    (dir, path)
}

#[test]
fn format_help_shows_flags() {
    let output = ladder_cmd()
        .args(["format", "--help"])
        .output()
        .expect("failed to run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--write"), "missing --write");
    assert!(stdout.contains("--check"), "missing --check");
    assert!(stdout.contains("--width"), "missing --width");
}

#[test]
fn format_prints_the_redrawn_schematic() {
    let (_dir, path) = write_temp(HAND_DRAWN);
    let output = ladder_cmd()
        .args(["format", path.to_str().unwrap()])
        .output()
        .expect("run format");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), CANONICAL);
}

#[test]
fn check_passes_on_canonical_input() {
    let (_dir, path) = write_temp(CANONICAL);
    let output = ladder_cmd()
        .args(["format", path.to_str().unwrap(), "--check", "--output", "json"])
        .output()
        .expect("run format --check");

    assert!(
        output.status.success(),
        "canonical input should pass, stdout={}",
        String::from_utf8_lossy(&output.stdout)
    );
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(v["status"], "already formatted");
}

#[test]
fn check_fails_on_hand_drawn_input() {
    let (_dir, path) = write_temp(HAND_DRAWN);
    let output = ladder_cmd()
        .args(["format", path.to_str().unwrap(), "--check", "--output", "pretty"])
        .output()
        .expect("run format --check");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not formatted"));
}

#[test]
fn write_rewrites_the_file_in_place() {
    let (_dir, path) = write_temp(HAND_DRAWN);
    let output = ladder_cmd()
        .args(["format", path.to_str().unwrap(), "--write", "--output", "json"])
        .output()
        .expect("run format --write");

    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(v["status"], "formatted");
    assert_eq!(fs::read_to_string(&path).unwrap(), CANONICAL);
}

#[test]
fn write_and_check_conflict() {
    let (_dir, path) = write_temp(CANONICAL);
    let output = ladder_cmd()
        .args(["format", path.to_str().unwrap(), "--write", "--check"])
        .output()
        .expect("run format");

    assert!(!output.status.success());
}

#[test]
fn format_refuses_malformed_input() {
    let (_dir, path) = write_temp("||--[A--(B)--||\n");
    let output = ladder_cmd()
        .args(["format", path.to_str().unwrap(), "--write", "--output", "json"])
        .output()
        .expect("run format");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(fs::read_to_string(&path).unwrap(), "||--[A--(B)--||\n");
}

#[test]
fn format_refuses_contacts_after_the_last_coil() {
    let input = "||--[A]--(X)--[B]--||\n";
    let (_dir, path) = write_temp(input);
    let output = ladder_cmd()
        .args(["format", path.to_str().unwrap(), "--write", "--output", "json"])
        .output()
        .expect("run format");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("LL2003"), "stdout={stdout}");
    assert_eq!(fs::read_to_string(&path).unwrap(), input);
}
