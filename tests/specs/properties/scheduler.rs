// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduler properties, driven with fake engines

use crate::prelude::assert_eq;
use pj_adapters::{FakeComponents, FakeEngine};
use pj_catalog::{Catalog, DependencyManifest};
use pj_core::{
    ComponentSelection, EngineSelection, FakeClock, IdGen, JobDescription, RunIdGen, SequentialIdGen, SystemConfig,
};
use pj_engine::Scheduler;
use pj_runbook::Expander;
use pj_storage::Snapshot;
use serde_json::json;
use std::collections::HashSet;

struct Setup {
    dir: tempfile::TempDir,
    catalog: Catalog,
    engine: FakeEngine,
}

fn setup() -> Setup {
    let engine = FakeEngine::new();
    let components = FakeComponents::new();
    let mut catalog = Catalog::new();
    catalog.register("engine", "fake", engine.plugin()).unwrap();
    catalog
        .register(
            "engine",
            "needs_model",
            engine
                .clone()
                .with_manifest(DependencyManifest::new().require("model"))
                .plugin(),
        )
        .unwrap();
    catalog.register("model", "wave", components.plugin("wave")).unwrap();
    Setup {
        dir: tempfile::tempdir().unwrap(),
        catalog,
        engine,
    }
}

impl Setup {
    fn scheduler(&self) -> Scheduler<'_, FakeClock, SequentialIdGen> {
        self.scheduler_with_ids("run")
    }

    fn scheduler_with_ids(&self, prefix: &str) -> Scheduler<'_, FakeClock, SequentialIdGen> {
        let mut config = SystemConfig::default();
        config.paths.output_dir = self.dir.path().join("runs");
        Scheduler::with_deps(&self.catalog, config, FakeClock::new(), SequentialIdGen::new(prefix))
    }
}

fn job(name: &str) -> JobDescription {
    JobDescription::new(name, EngineSelection::new("fake"))
}

#[test]
fn failure_in_the_middle_is_isolated() {
    let s = setup();
    let failing = JobDescription::new("two", EngineSelection::new("fake").with_setting("fail", "solver diverged"));
    let results = s.scheduler().run(&[job("one"), failing, job("three")]).unwrap();

    let ok: Vec<bool> = results.iter().map(|r| r.success()).collect();
    assert_eq!(ok, vec![true, false, true]);
    assert!(results[1].error().unwrap().contains("solver diverged"));
}

#[test]
fn missing_required_model_names_it() {
    let s = setup();
    let job = JobDescription::new("needy", EngineSelection::new("needs_model"));
    let results = s.scheduler().run(&[job]).unwrap();

    assert!(!results[0].success());
    assert!(results[0].error().unwrap().contains("model"));
    assert!(s.engine.calls().is_empty());

    let satisfied = JobDescription::new("needy", EngineSelection::new("needs_model"))
        .with_component("model", ComponentSelection::new("wave"));
    assert!(s.scheduler().run(&[satisfied]).unwrap()[0].success());
}

#[test]
fn run_ids_from_one_tick_never_collide() {
    let clock = FakeClock::new();
    let ids = RunIdGen::new(clock);
    let minted: HashSet<String> = (0..1000).map(|_| ids.next().as_str().to_string()).collect();
    assert_eq!(minted.len(), 1000);
}

#[test]
fn replaying_a_snapshot_reproduces_the_job_and_digest() {
    let s = setup();
    let source = JobDescription::new(
        "scan",
        EngineSelection::new("fake").with_setting("dt", json!({"values": [0.1, 0.2, 0.3]})),
    );
    let results = s.scheduler().run(&[source.clone()]).unwrap();
    let snapshot = Snapshot::read(results[2].run_dir.as_ref().unwrap()).unwrap();

    let replayed = snapshot
        .replay_job(|src, scan| Expander::from_config(scan).expand(src))
        .unwrap();
    let original = Expander::new().expand(&source).unwrap().swap_remove(2);
    assert_eq!(replayed, original);

    let rerun = s.scheduler_with_ids("replay").replay(&snapshot).unwrap();
    let again = Snapshot::read(rerun[0].run_dir.as_ref().unwrap()).unwrap();
    assert_eq!(again.digest, snapshot.digest);
    assert!(again.run_id != snapshot.run_id);
}
