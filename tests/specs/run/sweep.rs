// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sweep specs: what `pj expand` and `pj run` produce for swept job files

use crate::prelude::*;
use crate::prelude::assert_eq;

fn row(name: &str, sweep: &str) -> String {
    format!("{name:<24} {sweep}\n")
}

#[test]
fn unswept_job_expands_to_itself() {
    let temp = Project::empty();
    temp.file("plain.toml", "engine = \"record\"\n");
    temp.pj()
        .args(&["expand", "plain.toml"])
        .passes()
        .stdout_eq(&format!("{:<24}\n", "plain"));
}

#[test]
fn cartesian_first_field_is_outermost() {
    let temp = Project::empty();
    temp.file(
        "grid.toml",
        r#"
name = "grid"

[engine.record]
dt = { values = [0.1, 0.2] }

[components.model]
name = "wave"
params = { kappa = { values = [1, 2, 3] } }
"#,
    );
    let expected: String = [
        ("grid_0", "0.1", "1"),
        ("grid_1", "0.1", "2"),
        ("grid_2", "0.1", "3"),
        ("grid_3", "0.2", "1"),
        ("grid_4", "0.2", "2"),
        ("grid_5", "0.2", "3"),
    ]
    .iter()
    .map(|(name, dt, kappa)| row(name, &format!("components.model.kappa={kappa} engine.dt={dt}")))
    .collect();

    temp.pj().args(&["expand", "grid.toml"]).passes().stdout_eq(&expected);
}

#[test]
fn zipped_pairs_positionally() {
    let temp = Project::empty();
    temp.file(
        "zip.toml",
        r#"
name = "zip"
combine = "zipped"

[engine.record]
a = { values = [1, 2, 3] }
b = { values = ["x", "y", "z"] }
"#,
    );
    let expected: String = [("zip_0", "1", "x"), ("zip_1", "2", "y"), ("zip_2", "3", "z")]
        .iter()
        .map(|(name, a, b)| row(name, &format!("engine.a={a} engine.b=\"{b}\"")))
        .collect();

    temp.pj().args(&["expand", "zip.toml"]).passes().stdout_eq(&expected);
}

#[test]
fn zipped_length_mismatch_is_rejected() {
    let temp = Project::empty();
    temp.file(
        "zip.toml",
        r#"
combine = "zipped"

[engine.record]
a = { values = [1, 2] }
b = { values = [1, 2, 3] }
"#,
    );
    temp.pj()
        .args(&["expand", "zip.toml"])
        .exits(2)
        .stderr_has("zipped fields differ in length");
}

#[test]
fn scan_can_be_disabled_in_config() {
    let temp = Project::empty();
    temp.file("pj.toml", "[scan]\nenabled = false\n");
    temp.file("scan.toml", SCAN_JOB);
    temp.pj()
        .args(&["expand", "scan.toml"])
        .passes()
        .stdout_eq(&format!("{:<24}\n", "scan"));
}

#[test]
fn linear_sweep_runs_every_point() {
    let temp = Project::empty();
    temp.file(
        "lin.toml",
        r#"
name = "lin"

[engine.record]
t = { linear = [0.0, 1.0, 3] }
"#,
    );
    temp.pj()
        .args(&["run", "lin.toml"])
        .passes()
        .stdout_has("3 job(s): 3 succeeded, 0 failed");

    let ts: Vec<f64> = ["lin_0", "lin_1", "lin_2"]
        .iter()
        .map(|job| temp.record_of(job)["params"]["t"].as_f64().unwrap())
        .collect();
    assert_eq!(ts, vec![0.0, 0.5, 1.0]);
}
