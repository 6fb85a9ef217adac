//! Integration tests for the readalong binary

use assert_cmd::Command;

use super::helpers::{fixtures_dir, temp_fixture};

fn readalong() -> Command {
    let mut cmd = Command::cargo_bin("readalong").expect("binary builds");
    // Keep tests independent of any user config
    cmd.env("READALONG_CONFIG", "/nonexistent/readalong/config.toml");
    cmd
}

#[test]
fn resolve_prints_positions() {
    let output = readalong()
        .arg("resolve")
        .arg(fixtures_dir().join("lesson.json"))
        .args(["0.5", "2.75", "3.5"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("\"Hello\""));
    assert!(lines[1].trim_end().ends_with('-'));
    assert!(lines[2].contains("\"cat\""));
}

#[test]
fn resolve_json_output() {
    let output = readalong()
        .arg("resolve")
        .arg(fixtures_dir().join("lesson.json"))
        .args(["--json", "--", "-1", "1.4"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let values: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert!(values[0]["sentence"].is_null());
    assert_eq!(values[1]["sentence"], 0);
    assert!(values[1]["word"].is_null());
}

#[test]
fn validate_accepts_clean_index() {
    let (_temp_dir, path) = temp_fixture("lesson.json");
    let output = readalong().arg("validate").arg(&path).output().unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("2 sentence(s), 5 word(s)"));
}

#[test]
fn validate_rejects_overlapping_index() {
    let output = readalong()
        .arg("validate")
        .arg(fixtures_dir().join("overlapping.json"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("overlaps"));
}

#[test]
fn strict_resolve_fails_on_overlapping_index() {
    readalong()
        .arg("resolve")
        .arg("--strict")
        .arg(fixtures_dir().join("overlapping.json"))
        .arg("1.0")
        .assert()
        .failure();
}

#[test]
fn play_runs_to_completion_in_json_mode() {
    let output = readalong()
        .arg("play")
        .arg(fixtures_dir().join("lesson.json"))
        .args(["--json", "--rate", "16", "--start", "4.5"])
        .timeout(std::time::Duration::from_secs(10))
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"event\":\"sentence\""));
    assert!(stdout.lines().last().unwrap().contains("ended"));
}

#[test]
fn config_path_honours_environment_override() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("custom.toml");
    let output = readalong()
        .env("READALONG_CONFIG", &path)
        .args(["config", "path"])
        .output()
        .unwrap();
    assert!(String::from_utf8_lossy(&output.stdout).contains("custom.toml"));
}

#[test]
fn config_init_writes_defaults_once() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("config.toml");

    readalong()
        .env("READALONG_CONFIG", &path)
        .args(["config", "init"])
        .assert()
        .success();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("snap_threshold = 0.3"));

    readalong()
        .env("READALONG_CONFIG", &path)
        .args(["config", "init"])
        .assert()
        .failure();
}
