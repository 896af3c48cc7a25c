// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI error specs: invocation errors exit 2, job failures exit 1

use crate::prelude::*;

#[test]
fn missing_job_file() {
    let temp = Project::empty();
    temp.pj()
        .args(&["run", "absent.toml"])
        .exits(2)
        .stderr_has("absent.toml");
}

#[test]
fn malformed_system_config() {
    let temp = Project::empty();
    temp.file("pj.toml", "[run]\nfail_fast = \"sometimes\"\n");
    temp.file("scan.toml", SCAN_JOB);
    temp.pj()
        .args(&["run", "scan.toml"])
        .exits(2)
        .stderr_has("pj.toml");
}

#[test]
fn unknown_config_key_is_rejected() {
    let temp = Project::empty();
    temp.file("pj.toml", "[paths]\noutputs = \"x\"\n");
    temp.pj().args(&["list"]).exits(2).stderr_has("outputs");
}

#[test]
fn bad_sweep_expression() {
    let temp = Project::empty();
    temp.file(
        "sweep.toml",
        r#"
[engine.record]
dt = { linear = [0.0, 1.0] }
"#,
    );
    temp.pj()
        .args(&["run", "sweep.toml"])
        .exits(2)
        .stderr_has("invalid sweep expression at engine.dt");
    assert!(temp.run_dirs().is_empty());
}

#[test]
fn failed_job_exits_one() {
    let temp = Project::empty();
    temp.file("job.toml", "engine = \"missing\"\n");
    temp.pj()
        .args(&["run", "job.toml"])
        .exits(1)
        .stdout_has("failed")
        .stdout_has("engine/missing");
}
