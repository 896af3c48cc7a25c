// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Expansion properties

use crate::prelude::assert_eq;
use pj_core::{CombineMode, ComponentSelection, EngineSelection, JobDescription};
use pj_runbook::{Expander, SweepError};
use serde_json::json;
use std::collections::HashSet;

fn base() -> JobDescription {
    JobDescription::new("scan", EngineSelection::new("heat").with_setting("steps", 100))
        .with_component("model", ComponentSelection::new("wave").with_param("kappa", 0.5))
}

#[test]
fn no_swept_fields_yield_one_identical_job() {
    let job = base();
    let jobs = Expander::new().expand(&job).unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].job, job);
    assert_eq!(jobs[0].name(), "scan");
    assert_eq!(jobs[0].variant, None);
}

#[test]
fn cartesian_two_by_three() {
    let mut job = base();
    job.engine.settings.insert("dt".into(), json!({"values": [0.1, 0.2]}));
    job.components
        .get_mut("model")
        .unwrap()
        .params
        .insert("kappa".into(), json!({"values": [1, 2, 3]}));

    let jobs = Expander::new().expand(&job).unwrap();
    let names: Vec<&str> = jobs.iter().map(|j| j.name()).collect();
    assert_eq!(names, vec!["scan_0", "scan_1", "scan_2", "scan_3", "scan_4", "scan_5"]);

    let combos: HashSet<String> = jobs
        .iter()
        .map(|j| {
            format!(
                "{}/{}",
                j.job.engine.settings["dt"],
                j.job.components["model"].params["kappa"]
            )
        })
        .collect();
    assert_eq!(combos.len(), 6);
    // first swept field is outermost
    assert_eq!(jobs[2].job.engine.settings["dt"], json!(0.1));
    assert_eq!(jobs[3].job.engine.settings["dt"], json!(0.2));
    assert_eq!(jobs[3].job.components["model"].params["kappa"], json!(1));
}

#[test]
fn zipped_three_and_three() {
    let job = JobDescription::new(
        "zip",
        EngineSelection::new("heat")
            .with_setting("a", json!({"values": [1, 2, 3]}))
            .with_setting("b", json!({"values": [4, 5, 6]})),
    )
    .with_combine(CombineMode::Zipped);

    let jobs = Expander::new().expand(&job).unwrap();
    let pairs: Vec<(i64, i64)> = jobs
        .iter()
        .map(|j| {
            (
                j.job.engine.settings["a"].as_i64().unwrap(),
                j.job.engine.settings["b"].as_i64().unwrap(),
            )
        })
        .collect();
    assert_eq!(pairs, vec![(1, 4), (2, 5), (3, 6)]);
}

#[test]
fn zipped_length_mismatch() {
    let job = JobDescription::new(
        "zip",
        EngineSelection::new("heat")
            .with_setting("a", json!({"values": [1, 2]}))
            .with_setting("b", json!({"values": [4, 5, 6]})),
    )
    .with_combine(CombineMode::Zipped);

    let err = Expander::new().expand(&job).unwrap_err();
    assert!(matches!(err, SweepError::Shape { .. }));
}
