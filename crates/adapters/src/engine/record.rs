// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! An engine that records what it was given
//!
//! Writes its parameters, companion namespaces and JSON input into the run
//! directory and returns the same record as its output. Useful for checking
//! sweeps and job wiring before a real solver is plugged in.

use pj_catalog::{BoxError, Companions, Engine, Instance, Plugin};
use pj_core::{ExecutionContext, Output, Params};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::{Component, Path};

fn default_steps() -> u32 {
    1
}

fn default_file() -> String {
    "output.json".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordConfig {
    /// Number of progress reports emitted while "running"
    #[serde(default = "default_steps")]
    pub steps: u32,
    /// File written inside the run directory; must stay inside it
    #[serde(default = "default_file")]
    pub file: String,
    /// Everything else is recorded verbatim
    #[serde(flatten)]
    pub params: Params,
}

pub struct RecordEngine {
    config: RecordConfig,
    companions: Vec<String>,
}

impl RecordEngine {
    pub fn new(config: RecordConfig, companions: &Companions) -> Self {
        Self {
            config,
            companions: companions.namespaces().map(str::to_string).collect(),
        }
    }

    pub fn plugin() -> Plugin {
        Plugin::typed(|config: RecordConfig, companions: &Companions| {
            check_relative(&config.file)?;
            Ok(Instance::engine(RecordEngine::new(config, companions)))
        })
        .with_description("record parameters and input to the run directory")
    }
}

impl Engine for RecordEngine {
    fn execute(
        &mut self,
        input: Option<Output>,
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<Output, BoxError> {
        let steps = self.config.steps.max(1);
        for step in 1..=steps {
            ctx.report(
                f64::from(step) * 100.0 / f64::from(steps),
                format!("step {step}/{steps}"),
            );
        }

        let input = input
            .as_ref()
            .and_then(|o| o.downcast_ref::<Value>())
            .cloned()
            .unwrap_or(Value::Null);
        let record = json!({
            "job": ctx.job_name(),
            "run_id": ctx.run_id().as_str(),
            "params": self.config.params,
            "companions": self.companions,
            "input": input,
            "job_params": ctx.params(),
        });
        let path = ctx.run_dir().join(check_relative(&self.config.file)?);
        std::fs::write(&path, serde_json::to_string_pretty(&record)?)?;
        Ok(Output::new(record))
    }
}

/// Only plain relative paths; `..`, roots and prefixes could leave the run dir
fn check_relative(file: &str) -> Result<&Path, BoxError> {
    let path = Path::new(file);
    let plain = path.components().all(|c| matches!(c, Component::Normal(_)));
    if file.is_empty() || !plain {
        return Err(format!("file '{file}' must be a relative path inside the run directory").into());
    }
    Ok(path)
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
