//! Command-line tests for the submutator binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn submutator() -> Command {
    let mut cmd = Command::cargo_bin("submutator").expect("binary should build");
    // keep the caller's environment from leaking into flag defaults
    for var in [
        "SUBMUTATOR_INPUT",
        "SUBMUTATOR_VERBOSE",
        "SUBMUTATOR_MAX_VARIATIONS",
        "SUBMUTATOR_OUTPUT_DIR",
        "SUBMUTATOR_CONCURRENCY",
        "SUBMUTATOR_JSON",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn write_input(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("subdomains.txt");
    fs::write(&path, content).expect("Failed to write input");
    path
}

fn files_with_prefix(dir: &Path, prefix: &str) -> Vec<std::path::PathBuf> {
    fs::read_dir(dir)
        .expect("output dir should exist")
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(prefix))
        })
        .collect()
}

#[test]
fn test_cli_help() {
    submutator()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--input-list"))
        .stdout(predicate::str::contains("--max-variations"));
}

#[test]
fn test_cli_version() {
    submutator()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_requires_input() {
    let dir = TempDir::new().unwrap();
    submutator()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input-list"));
}

#[test]
fn test_cli_missing_input_file() {
    let dir = TempDir::new().unwrap();
    submutator()
        .current_dir(dir.path())
        .args(["-i", "does-not-exist.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_cli_rejects_zero_ceiling() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "server5.example.com\n");
    submutator()
        .current_dir(dir.path())
        .arg("-i")
        .arg(&input)
        .args(["--max-variations", "0"])
        .assert()
        .failure();
}

#[test]
fn test_cli_writes_reports() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "server5.example.com\nwww.example.com\n");
    let out = dir.path().join("results");

    submutator()
        .current_dir(dir.path())
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("Analysis complete"))
        .stdout(predicate::str::contains("Variations generated: 10"));

    let variations = files_with_prefix(&out, "variations_");
    assert_eq!(variations.len(), 1);
    let content = fs::read_to_string(&variations[0]).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[0], "server0.example.com");
    assert_eq!(lines[9], "server9.example.com");

    assert_eq!(files_with_prefix(&out, "pattern_analysis_").len(), 1);
    assert_eq!(files_with_prefix(&out, "summary_").len(), 1);
}

#[test]
fn test_cli_respects_max_variations() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "host42.example.com\n");
    let out = dir.path().join("results");

    submutator()
        .current_dir(dir.path())
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .args(["--max-variations", "7", "-c", "1"])
        .assert()
        .success();

    let variations = files_with_prefix(&out, "variations_");
    let content = fs::read_to_string(&variations[0]).unwrap();
    assert_eq!(content.lines().count(), 7);
    assert_eq!(content.lines().next(), Some("host10.example.com"));
}

#[test]
fn test_cli_env_overrides_default() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "host42.example.com\n");
    let out = dir.path().join("from-env");

    submutator()
        .current_dir(dir.path())
        .arg("-i")
        .arg(&input)
        .env("SUBMUTATOR_OUTPUT_DIR", &out)
        .env("SUBMUTATOR_MAX_VARIATIONS", "3")
        .assert()
        .success();

    let variations = files_with_prefix(&out, "variations_");
    assert_eq!(fs::read_to_string(&variations[0]).unwrap().lines().count(), 3);
}
