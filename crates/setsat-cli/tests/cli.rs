use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn setsat() -> Command {
    Command::cargo_bin("setsat").expect("binary built")
}

#[test]
fn solve_prints_the_set_indices() {
    setsat()
        .args(["solve", "clg1", "clg1", "clg1", "wdr2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 2 3: clg1 clg1 clg1"));
}

#[test]
fn solve_reports_missing_set() {
    setsat()
        .args(["solve", "clg1", "clg1", "clg2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no set found (unsatisfiable)"));
}

#[test]
fn solve_all_lists_only_the_sample_set() {
    setsat()
        .args(["solve", "--all", "clg1", "clg3", "clg3", "rdv3", "wgr2"])
        .assert()
        .success()
        .stdout(predicate::eq("1 4 5: clg1 rdv3 wgr2\n"));
}

#[test]
fn solve_json_report() {
    let output = setsat()
        .args(["solve", "--json", "clg1", "rgr2", "wdv3"])
        .output()
        .expect("runs");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["outcome"], "found");
    assert_eq!(value["variables"], 15);
    assert_eq!(value["sets"][0]["indices"], serde_json::json!([1, 2, 3]));
}

#[test]
fn solve_dimacs_prints_header() {
    setsat()
        .args(["solve", "--dimacs", "clg1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("p cnf 13 33"));
}

#[test]
fn malformed_descriptor_fails() {
    setsat()
        .args(["solve", "clg1", "xlg1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("xlg1"));
}

#[test]
fn colour_in_fill_position_fails_before_solving() {
    setsat()
        .args(["solve", "crg1", "crg1", "crg1", "wld2"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("malformed descriptor #1 'crg1'"));
}

#[test]
fn bench_validate_only_skips_run() {
    let dir = tempdir().expect("temp dir");
    let config_path = dir.path().join("bench.yaml");
    let yaml = format!(
        r#"
run_id: "cli"
deals:
  rounds: 2
outputs:
  jsonl: "{jsonl}"
  summary_md: "{summary}"
"#,
        jsonl = dir.path().join("deals.jsonl").display(),
        summary = dir.path().join("summary.md").display(),
    );
    fs::write(&config_path, yaml).expect("write config");

    setsat()
        .args(["bench", "--validate-only", "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation-only mode"));
    assert!(!dir.path().join("deals.jsonl").exists());

    setsat()
        .args(["bench", "--seed", "9", "--cards", "9", "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Batch complete for 'cli': 2 rounds"));
    assert!(dir.path().join("deals.jsonl").exists());
}

#[test]
fn bench_rejects_oversized_deal() {
    let dir = tempdir().expect("temp dir");
    let config_path = dir.path().join("bench.yaml");
    fs::write(
        &config_path,
        "run_id: \"cli\"\ndeals:\n  rounds: 1\n  cards_per_deal: 90\noutputs:\n  jsonl: \"a.jsonl\"\n  summary_md: \"a.md\"\n",
    )
    .expect("write config");

    setsat()
        .args(["bench", "--config"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("deals.cards_per_deal"));
}
