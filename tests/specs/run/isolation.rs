// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run specs: isolation, fault containment, handoff and modes

use crate::prelude::*;
use crate::prelude::assert_eq;

const THREE_JOBS: &str = r#"
[[job]]
name = "first"
engine = "record"

[[job]]
name = "second"
engine = "not_registered"

[[job]]
name = "third"
engine = "record"
"#;

#[test]
fn every_job_gets_its_own_run_directory() {
    let temp = Project::empty();
    temp.file("scan.toml", SCAN_JOB);
    temp.pj().args(&["run", "scan.toml"]).passes();

    let dirs = temp.run_dirs();
    assert_eq!(dirs.len(), 2);
    assert!(dirs[0] != dirs[1]);
    for dir in &dirs {
        assert!(dir.join("snapshot.json").is_file());
    }
}

#[test]
fn middle_failure_does_not_stop_the_rest() {
    let temp = Project::empty();
    temp.file("jobs.toml", THREE_JOBS);
    temp.pj()
        .args(&["run", "jobs.toml"])
        .exits(1)
        .stdout_has("3 job(s): 2 succeeded, 1 failed");

    temp.record_of("first");
    temp.record_of("third");
    assert_eq!(temp.run_dirs().len(), 2);
}

#[test]
fn fail_fast_reports_the_rest_as_skipped() {
    let temp = Project::empty();
    temp.file("jobs.toml", THREE_JOBS);
    temp.pj()
        .args(&["run", "--fail-fast", "jobs.toml"])
        .exits(1)
        .stdout_has("3 job(s): 1 succeeded, 1 failed, 1 skipped");
    assert_eq!(temp.run_dirs().len(), 1);
}

#[test]
fn fail_fast_from_config() {
    let temp = Project::empty();
    temp.file("pj.toml", "[run]\nfail_fast = true\n");
    temp.file("jobs.toml", THREE_JOBS);
    temp.pj().args(&["run", "jobs.toml"]).exits(1).stdout_has("1 skipped");
}

#[test]
fn dry_run_validates_without_side_effects() {
    let temp = Project::empty();
    temp.file("jobs.toml", THREE_JOBS);
    temp.pj()
        .args(&["run", "--dry-run", "jobs.toml"])
        .exits(1)
        .stdout_has("dry run: 3 job(s): 2 succeeded, 1 failed");
    assert!(!temp.path().join("runs").exists());
}

#[test]
fn output_alias_hands_data_to_a_later_job() {
    let temp = Project::empty();
    temp.file(
        "chain.toml",
        r#"
[[job]]
name = "produce"
output = "field"
[job.engine.record]
temperature = 300

[[job]]
name = "consume"
engine = "record"
input = "field"
"#,
    );
    temp.pj().args(&["run", "chain.toml"]).passes();

    let consumed = temp.record_of("consume");
    assert_eq!(consumed["input"]["job"], "produce");
    assert_eq!(consumed["input"]["params"]["temperature"], 300);
}

#[test]
fn system_defaults_fill_engine_settings() {
    let temp = Project::empty();
    temp.file(
        "pj.toml",
        r#"
[defaults.engine.record]
dt = 0.5
grid = { n = 8, periodic = true }
"#,
    );
    temp.file(
        "job.toml",
        r#"
name = "tuned"
[engine.record]
grid = { n = 16 }
"#,
    );
    temp.pj().args(&["run", "job.toml"]).passes();

    let params = &temp.record_of("tuned")["params"];
    assert_eq!(params["dt"], 0.5);
    assert_eq!(params["grid"]["n"], 16);
    assert_eq!(params["grid"]["periodic"], true);
}

#[test]
fn ledger_and_history_record_every_result() {
    let temp = Project::empty();
    temp.file("jobs.toml", THREE_JOBS);
    temp.pj().args(&["run", "jobs.toml"]).exits(1);

    assert_eq!(temp.read("runs/ledger.jsonl").lines().count(), 3);
    temp.pj()
        .args(&["history", "--failed"])
        .passes()
        .stdout_has("second")
        .stdout_lacks("first");
}

#[test]
fn replay_reproduces_the_snapshot_digest() {
    let temp = Project::empty();
    temp.file("scan.toml", SCAN_JOB);
    temp.pj().args(&["run", "scan.toml"]).passes();
    let original = temp.run_dirs().remove(0);
    let before: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(original.join("snapshot.json")).unwrap()).unwrap();

    temp.pj()
        .args(&["replay", original.to_str().unwrap()])
        .passes();

    let replayed: Vec<serde_json::Value> = temp
        .run_dirs()
        .into_iter()
        .filter(|dir| dir != &original)
        .map(|dir| serde_json::from_str(&std::fs::read_to_string(dir.join("snapshot.json")).unwrap()).unwrap())
        .filter(|snapshot: &serde_json::Value| snapshot["job_name"] == before["job_name"])
        .collect();
    assert_eq!(replayed.len(), 1);
    assert_eq!(replayed[0]["digest"], before["digest"]);
    assert!(replayed[0]["run_id"] != before["run_id"]);
}
