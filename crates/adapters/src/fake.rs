// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake engine, component and loader for testing
//!
//! The fake engine is steered per job through its settings:
//! - `fail = "msg"` returns an error
//! - `panic = "msg"` panics
//! - `progress = [..]` reports each percentage in turn
//! - `output = <value>` becomes the output (default `{"job": <name>}`)
//! - `persist = true` makes the output persistent
#![cfg_attr(coverage_nightly, coverage(off))]

use pj_catalog::{BoxError, Companions, DependencyManifest, Engine, Instance, Loader, Plugin};
use pj_core::{ExecutionContext, Output, RunId};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Recorded engine execution
#[derive(Debug, Clone)]
pub struct EngineCall {
    pub job_name: String,
    pub job_index: usize,
    pub run_id: RunId,
    pub run_dir: PathBuf,
    pub settings: Value,
    /// The input, when it was a JSON value
    pub input: Option<Value>,
    pub had_input: bool,
    pub companions: Vec<String>,
    /// The job-level params block, `Null` when none was supplied
    pub job_params: Value,
}

/// Fake engine plugin for testing
#[derive(Clone, Default)]
pub struct FakeEngine {
    calls: Arc<Mutex<Vec<EngineCall>>>,
    built: Arc<Mutex<Vec<Value>>>,
    manifest: Option<DependencyManifest>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_manifest(mut self, manifest: DependencyManifest) -> Self {
        self.manifest = Some(manifest);
        self
    }

    /// Get all recorded executions
    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Settings of every engine built, executed or not
    pub fn built(&self) -> Vec<Value> {
        self.built.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn plugin(&self) -> Plugin {
        let calls = Arc::clone(&self.calls);
        let built = Arc::clone(&self.built);
        let plugin = Plugin::new(
            move |settings: Value, companions: &Companions| -> Result<Instance, BoxError> {
                built
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .push(settings.clone());
                Ok(Instance::engine(FakeEngineInstance {
                    settings,
                    companions: companions.namespaces().map(str::to_string).collect(),
                    calls: Arc::clone(&calls),
                }))
            },
        )
        .with_description("fake engine");
        match &self.manifest {
            Some(manifest) => plugin.with_manifest(manifest.clone()),
            None => plugin,
        }
    }
}

struct FakeEngineInstance {
    settings: Value,
    companions: Vec<String>,
    calls: Arc<Mutex<Vec<EngineCall>>>,
}

impl Engine for FakeEngineInstance {
    #[allow(clippy::panic)]
    fn execute(
        &mut self,
        input: Option<Output>,
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<Output, BoxError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(EngineCall {
                job_name: ctx.job_name().to_string(),
                job_index: ctx.job_index(),
                run_id: ctx.run_id().clone(),
                run_dir: ctx.run_dir().to_path_buf(),
                settings: self.settings.clone(),
                input: input.as_ref().and_then(|o| o.downcast_ref::<Value>()).cloned(),
                had_input: input.is_some(),
                companions: self.companions.clone(),
                job_params: ctx.params().cloned().map(Value::Object).unwrap_or(Value::Null),
            });

        if let Some(percents) = self.settings.get("progress").and_then(Value::as_array) {
            for p in percents.iter().filter_map(Value::as_f64) {
                ctx.report(p, format!("{p}%"));
            }
        }
        if let Some(message) = self.settings.get("panic").and_then(Value::as_str) {
            panic!("{}", message);
        }
        if let Some(message) = self.settings.get("fail").and_then(Value::as_str) {
            return Err(message.to_string().into());
        }
        let output = self
            .settings
            .get("output")
            .cloned()
            .unwrap_or_else(|| json!({ "job": ctx.job_name() }));
        if self.settings.get("persist") == Some(&Value::Bool(true)) {
            return Ok(Output::persistent(output));
        }
        Ok(Output::new(output))
    }
}

/// Recorded component construction
#[derive(Debug, Clone)]
pub struct ComponentCall {
    pub name: String,
    pub params: Value,
    pub companions: Vec<String>,
}

/// Value built by [`FakeComponents`]
#[derive(Debug, Clone, PartialEq)]
pub struct FakeComponent {
    pub name: String,
    pub params: Value,
}

/// Fake component plugins; `fail = "msg"` in params makes construction fail
#[derive(Clone, Default)]
pub struct FakeComponents {
    calls: Arc<Mutex<Vec<ComponentCall>>>,
}

impl FakeComponents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded constructions, in order
    pub fn calls(&self) -> Vec<ComponentCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn plugin(&self, name: &str) -> Plugin {
        let calls = Arc::clone(&self.calls);
        let name = name.to_string();
        Plugin::new(
            move |params: Value, companions: &Companions| -> Result<Instance, BoxError> {
                calls
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .push(ComponentCall {
                        name: name.clone(),
                        params: params.clone(),
                        companions: companions.namespaces().map(str::to_string).collect(),
                    });
                if let Some(message) = params.get("fail").and_then(Value::as_str) {
                    return Err(message.to_string().into());
                }
                Ok(Instance::component(FakeComponent {
                    name: name.clone(),
                    params,
                }))
            },
        )
    }
}

/// Fake loader returning a fixed value and recording locations
#[derive(Clone)]
pub struct FakeLoader {
    value: Value,
    locations: Arc<Mutex<Vec<String>>>,
}

impl FakeLoader {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            locations: Arc::default(),
        }
    }

    /// Get all requested locations
    pub fn locations(&self) -> Vec<String> {
        self.locations.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn plugin(&self) -> Plugin {
        let loader = self.clone();
        Plugin::new(move |_: Value, _: &Companions| -> Result<Instance, BoxError> {
            Ok(Instance::loader(loader.clone()))
        })
    }
}

impl Loader for FakeLoader {
    fn load(&self, location: &str) -> Result<Output, BoxError> {
        self.locations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(location.to_string());
        if location.contains("missing") {
            return Err(format!("no such input: {location}").into());
        }
        Ok(Output::new(self.value.clone()))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
