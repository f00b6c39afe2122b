// e2e/cli_integration.rs — CLI integration tests for `dedup-bench`.
//
// Runs the binary as a black box with std::process::Command. Covers result
// output, variant selection, file input, exit codes and verbosity. Every run
// passes `--min-time-ms 0` so each variant is timed for a single pass.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Locate the `dedup-bench` binary produced by Cargo.
fn bench_bin() -> PathBuf {
    // CARGO_BIN_EXE_<name> is set by Cargo when running integration tests.
    // Fall back to walking up from the test binary location.
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_dedup-bench") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop(); // remove test binary filename
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("dedup-bench");
    p
}

fn run(args: &[&str]) -> Output {
    Command::new(bench_bin())
        .args(["--min-time-ms", "0"])
        .args(args)
        .env_remove("DEDUP_BENCH_SEED")
        .output()
        .expect("failed to run dedup-bench")
}

fn stdout_lines(out: &Output) -> Vec<String> {
    String::from_utf8_lossy(&out.stdout)
        .lines()
        .map(str::to_owned)
        .collect()
}

/// `size=` field of a report line.
fn size_of(line: &str) -> usize {
    line.split_whitespace()
        .find_map(|f| f.strip_prefix("size="))
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| panic!("no size in {line:?}"))
}

// ── 1. Synthetic workloads ───────────────────────────────────────────────────

#[test]
fn test_cli_baselines_one_workload() {
    let out = run(&["-u", "64", "--cache", "none"]);
    assert!(out.status.success(), "status: {}", out.status);
    let lines = stdout_lines(&out);
    assert_eq!(lines.len(), 1, "{lines:?}");
    assert!(lines[0].starts_with("unique=64"), "{}", lines[0]);
    assert!(lines[0].contains("no-dedup"), "{}", lines[0]);

    let out = run(&["-u", "64", "--cache", "exact"]);
    let exact = stdout_lines(&out);
    assert!(size_of(&exact[0]) <= size_of(&lines[0]));
}

#[test]
fn test_cli_one_line_per_variant_and_workload() {
    let out = run(&["-u", "8", "-u", "512", "-c", "lossy", "--hasher", "fnv1a", "-s", "4", "-s", "1024"]);
    assert!(out.status.success());
    let lines = stdout_lines(&out);
    assert_eq!(lines.len(), 4, "{lines:?}");
    assert!(lines[0].contains("lossy<fnv1a, 4>"));
    assert!(lines[1].contains("lossy<fnv1a, 1024>"));
    assert!(lines[2].starts_with("unique=512"));
}

#[test]
fn test_cli_same_seed_same_sizes() {
    let a = run(&["-u", "512", "-c", "exact", "--seed", "5"]);
    let b = run(&["-u", "512", "-c", "exact", "--seed", "5"]);
    assert_eq!(size_of(&stdout_lines(&a)[0]), size_of(&stdout_lines(&b)[0]));
}

#[test]
fn test_cli_seed_from_environment() {
    let flag = run(&["-u", "512", "-c", "none", "--seed", "9"]);
    let env = Command::new(bench_bin())
        .args(["--min-time-ms", "0", "-u", "512", "-c", "none"])
        .env("DEDUP_BENCH_SEED", "9")
        .output()
        .unwrap();
    assert!(env.status.success());
    assert_eq!(size_of(&stdout_lines(&flag)[0]), size_of(&stdout_lines(&env)[0]));
}

// ── 2. File input ────────────────────────────────────────────────────────────

#[test]
fn test_cli_input_file_content_keys() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("lines.txt");
    fs::write(&input, "alpha\nbeta\nalpha\nbeta\nalpha\n").unwrap();

    let out = run(&["-i", input.to_str().unwrap(), "--content", "-c", "exact"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let lines = stdout_lines(&out);
    assert!(lines[0].starts_with("lines.txt"), "{}", lines[0]);
    assert_eq!(size_of(&lines[0]), 9);

    let out = run(&["-i", input.to_str().unwrap(), "-c", "exact"]);
    assert_eq!(size_of(&stdout_lines(&out)[0]), 23);
    assert!(
        String::from_utf8_lossy(&out.stderr).contains("--content"),
        "address keys on a file should warn"
    );
}

#[test]
fn test_cli_empty_input_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty.txt");
    fs::write(&input, "").unwrap();
    let out = run(&["-q", "-i", input.to_str().unwrap()]);
    assert!(out.status.success());
    assert!(stdout_lines(&out).is_empty(), "-q suppresses results");
}

#[test]
fn test_cli_nonexistent_input() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.txt");
    let out = run(&["-i", missing.to_str().unwrap()]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("dedup-bench:"), "{stderr}");
    assert!(stderr.contains("nope.txt"), "{stderr}");
}

// ── 3. Usage errors ──────────────────────────────────────────────────────────

#[test]
fn test_cli_bad_slot_count() {
    let out = run(&["-s", "6"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("bad usage"));
}

#[test]
fn test_cli_huge_unique_count() {
    let out = run(&["-u", "18446744073709551615", "-c", "none"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("bad usage: unique count"));
    assert!(out.stdout.is_empty());
}

#[test]
fn test_cli_unknown_hasher() {
    let out = run(&["--hasher", "sha1"]);
    assert!(!out.status.success());
}

// ── 4. --help / --version ────────────────────────────────────────────────────

#[test]
fn test_cli_version() {
    let output = Command::new(bench_bin()).arg("--version").output().unwrap();
    assert!(output.status.success(), "--version should exit 0; status: {}", output.status);
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains(env!("CARGO_PKG_VERSION")), "{text}");
}

#[test]
fn test_cli_help() {
    let output = Command::new(bench_bin()).arg("--help").output().unwrap();
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    for flag in ["--unique", "--cache", "--hasher", "--slots", "--content", "--cold"] {
        assert!(text.contains(flag), "help should mention {flag}");
    }
}

// ── 5. Verbosity ─────────────────────────────────────────────────────────────

#[test]
fn test_cli_verbose_progress_on_stderr() {
    let out = run(&["-vv", "-u", "8", "-c", "exact", "--cold"]);
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("workload unique=8"), "{stderr}");
}
