//! CLI dispatch through the compiled binary.

use std::process::Command;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_mirkit")
}

#[test]
fn list_command_prints_every_dataset() {
    let output = Command::new(bin()).arg("list").output().expect("list should run");
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let names: Vec<&str> = stdout.lines().collect();
    assert!(names.contains(&"beatles"));
    assert!(names.contains(&"orchset"));
    assert!(names.contains(&"ikala"));
    assert!(names.contains(&"giantsteps_key"));
}

#[test]
fn missing_command_prints_usage() {
    let output = Command::new(bin()).output().expect("bare run");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage:"));
}

#[test]
fn info_command_reports_index_shape() {
    let output = Command::new(bin())
        .args(["info", "beatles"])
        .output()
        .expect("info should run");
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("dataset: beatles"));
    assert!(stdout.contains("tracks: 3"));
    assert!(stdout.contains("chords"));
}

#[test]
fn validate_against_an_empty_root_finds_everything_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = Command::new(bin())
        .args([
            "validate",
            "beatles",
            "--data-home",
            dir.path().to_str().expect("utf-8 tempdir"),
            "--json",
        ])
        .output()
        .expect("validate should run");
    assert_eq!(output.status.code(), Some(1), "findings should exit nonzero");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("json report");
    let missing = report["missing"].as_object().expect("missing map");
    assert_eq!(missing.len(), 3, "all three tracks have missing files");
    assert!(report["mismatched"].as_object().expect("map").is_empty());
}

#[test]
fn download_rejects_an_unknown_resource_name() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = Command::new(bin())
        .args([
            "download",
            "beatles",
            "--data-home",
            dir.path().to_str().expect("utf-8 tempdir"),
            "--resource",
            "no-such-resource",
        ])
        .output()
        .expect("download should run");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown remote resource"));
}
