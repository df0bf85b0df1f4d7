use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("passlab").unwrap();
    cmd.env_remove("PASSLAB_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).expect("stdout is JSON")
}

#[test]
fn analyze_entropy_engine_json() {
    let report = stdout_json(cmd().args([
        "analyze",
        "--engine",
        "entropy",
        "--json",
        "-p",
        "Tr0ub4dor&3",
    ]));

    assert_eq!(report["engine"], "entropy_fallback");
    assert_eq!(report["score"], 3);
    let bits = report["entropy_bits"].as_f64().unwrap();
    assert!((bits - 11.0 * 94f64.log2()).abs() < 1e-9);
    assert!(report.get("password").is_none());
}

#[test]
fn analyze_default_engine_json() {
    let report = stdout_json(cmd().args(["analyze", "--json", "-p", "Tr0ub4dor&3"]));

    assert!(report["score"].as_u64().unwrap() <= 4);
    assert!(report["entropy_bits"].is_number());
    assert!(report["engine"].is_string());
}

#[test]
fn analyze_text_output() {
    cmd()
        .args(["analyze", "--engine", "entropy", "-p", "hunter2"])
        .assert()
        .success()
        .stdout(contains("Out[0]:"))
        .stdout(contains("entropy_fallback"))
        .stdout(contains("Use at least 8 characters."))
        .stdout(contains("hunter2").not());
}

#[test]
fn analyze_file_skips_blank_lines() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("passwords.txt");
    fs::write(&path, "password\n\nCorrectHorseBatteryStaple\n").unwrap();

    let results = stdout_json(cmd().args([
        "analyze",
        "--engine",
        "entropy",
        "--json",
        "-f",
        path.to_str().unwrap(),
    ]));

    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["line"], 1);
    assert_eq!(results[1]["line"], 3);
    assert_eq!(results[1]["analysis"]["engine"], "entropy_fallback");
}

#[test]
fn analyze_out_writes_json_file() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("report.json");

    cmd()
        .args([
            "analyze",
            "--engine",
            "entropy",
            "-p",
            "Tr0ub4dor&3",
            "-o",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(contains("Report written to"));

    let report: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(report["engine"], "entropy_fallback");
    assert_eq!(report["score"], 3);
}

#[test]
fn analyze_file_with_out() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("passwords.txt");
    let out = tmp.path().join("results.json");
    fs::write(&input, "hunter2\nCorrectHorseBatteryStaple\n").unwrap();

    cmd()
        .args([
            "-q",
            "analyze",
            "-f",
            input.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let results: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(results.as_array().unwrap().len(), 2);
    assert_eq!(results[1]["line"], 2);
}

#[test]
fn analyze_interactive_reads_until_blank_line() {
    let results = stdout_json(
        cmd()
            .args(["analyze", "-i", "--engine", "entropy", "--json"])
            .write_stdin("hunter2\nTr0ub4dor&3\n\nnever-read\n"),
    );

    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["line"], 1);
    assert_eq!(results[1]["analysis"]["score"], 3);
}

#[test]
fn analyze_interactive_conflicts_with_password() {
    cmd()
        .args(["analyze", "-i", "-p", "hunter2"])
        .assert()
        .failure();
}

#[test]
fn analyze_default_engine_attaches_entropy_comparison() {
    let report = stdout_json(cmd().args(["analyze", "--json", "-p", "p4ssw0rd"]));

    if report["engine"] == "zxcvbn" {
        assert!(report["fallback_entropy_bits"].is_number());
        assert!(report["fallback_crack_time"].is_string());
        assert!(report["matched_patterns"].is_array());
    } else {
        assert!(report.get("fallback_entropy_bits").is_none());
    }
}

#[test]
fn analyze_missing_file_fails() {
    cmd()
        .args(["analyze", "-f", "/definitely/not/here.txt"])
        .assert()
        .failure()
        .stderr(contains("Failed to read password file"));
}

#[test]
fn generate_to_stdout() {
    let out = cmd()
        .args(["-q", "generate", "--seeds", "dog,2020", "-n", "50"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();
    let words: Vec<&str> = text.lines().collect();

    assert_eq!(words.len(), 50);
    assert_eq!(&words[..2], ["dog", "2020"]);
    assert!(words.contains(&"Dog"));
    assert!(words.contains(&"dog2020"));
    assert_eq!(words.iter().filter(|w| **w == "Dog").count(), 1);
}

#[test]
fn generate_is_deterministic() {
    let run = || {
        cmd()
            .args(["-q", "generate", "--seeds", "alice,toby", "--year", "1997", "-n", "500"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };
    assert_eq!(run(), run());
}

#[test]
fn generate_to_file_with_named_seeds() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("wordlist.txt");

    cmd()
        .args([
            "generate",
            "--seeds",
            "alice",
            "--pet",
            "toby",
            "--year",
            "1997",
            "-n",
            "200",
            "-o",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(contains("Stats:"));

    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), 200);
    assert!(text.starts_with("alice\ntoby\n1997\n"));
}

#[test]
fn generate_seeds_from_file_json() {
    let tmp = TempDir::new().unwrap();
    let seeds = tmp.path().join("seeds.txt");
    fs::write(&seeds, "  rex \n\nberlin\n").unwrap();

    let words = stdout_json(cmd().args([
        "-q",
        "generate",
        "--from-file",
        seeds.to_str().unwrap(),
        "-n",
        "10",
        "--json",
    ]));

    let words = words.as_array().unwrap();
    assert_eq!(words.len(), 10);
    assert_eq!(words[0], "rex");
    assert_eq!(words[1], "berlin");
}

#[test]
fn generate_respects_length_bounds() {
    let out = cmd()
        .args([
            "-q",
            "generate",
            "--seeds",
            "alice,toby",
            "--min-length",
            "6",
            "--max-length",
            "8",
            "-n",
            "300",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();

    assert!(text.lines().count() > 0);
    assert!(text.lines().all(|w| (6..=8).contains(&w.chars().count())));
}

#[test]
fn generate_without_seeds_fails() {
    cmd()
        .args(["generate", "-n", "10"])
        .assert()
        .failure()
        .stderr(contains("at least one seed is required"));
}

#[test]
fn generate_includes_reversals_and_prefixes() {
    let out = cmd()
        .args(["-q", "generate", "--seeds", "dog,2020", "-n", "1000"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();
    let words: Vec<&str> = text.lines().collect();

    for expected in ["god", "!dog", "2020dog", "dog!2020", "!dog2020"] {
        assert!(words.contains(&expected), "Missing \"{}\"", expected);
    }
}

#[test]
fn generate_seed_longer_than_max_length_fails() {
    cmd()
        .args(["generate", "--seeds", "dog,abcdefghij", "--max-length", "8"])
        .assert()
        .failure()
        .stderr(contains("seed 2 has 10 characters"));
}

#[test]
fn generate_zero_target_fails() {
    cmd()
        .args(["generate", "--seeds", "dog", "-n", "0"])
        .assert()
        .failure()
        .stderr(contains("target size must be a positive integer"));
}

#[test]
fn seeds_and_from_file_conflict() {
    cmd()
        .args(["generate", "--seeds", "dog", "--from-file", "seeds.txt"])
        .assert()
        .failure();
}
