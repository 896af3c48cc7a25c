// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job descriptions and concrete jobs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Free-form parameter block
pub type Params = Map<String, Value>;

/// How multiple swept fields are combined into concrete jobs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombineMode {
    /// Every combination of every swept field
    #[default]
    Cartesian,
    /// Element-wise pairing of equally long swept fields
    Zipped,
}

impl fmt::Display for CombineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombineMode::Cartesian => f.write_str("cartesian"),
            CombineMode::Zipped => f.write_str("zipped"),
        }
    }
}

/// The single engine a job runs, with its settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSelection {
    pub name: String,
    #[serde(default)]
    pub settings: Params,
}

impl EngineSelection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: Params::new(),
        }
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }
}

/// A named component choice plus its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSelection {
    pub name: String,
    #[serde(default)]
    pub params: Params,
}

impl ComponentSelection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Params::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// User-authored job, possibly containing swept (multi-valued) fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    pub name: String,
    pub engine: EngineSelection,
    /// Companion components keyed by namespace
    #[serde(default)]
    pub components: BTreeMap<String, ComponentSelection>,
    #[serde(default)]
    pub params: Params,
    /// Upstream job name, or an external location read by `input_loader`
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub input_loader: Option<ComponentSelection>,
    /// Extra name under which this job's output is handed to later jobs
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Advisory only; execution order is the expansion order
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub combine: Option<CombineMode>,
}

impl JobDescription {
    pub fn new(name: impl Into<String>, engine: EngineSelection) -> Self {
        Self {
            name: name.into(),
            engine,
            components: BTreeMap::new(),
            params: Params::new(),
            input: None,
            input_loader: None,
            output: None,
            tags: Vec::new(),
            depends_on: Vec::new(),
            combine: None,
        }
    }

    pub fn with_component(mut self, namespace: impl Into<String>, selection: ComponentSelection) -> Self {
        self.components.insert(namespace.into(), selection);
        self
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn with_input_loader(mut self, loader: ComponentSelection) -> Self {
        self.input_loader = Some(loader);
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_combine(mut self, mode: CombineMode) -> Self {
        self.combine = Some(mode);
        self
    }

    pub fn engine_name(&self) -> &str {
        &self.engine.name
    }
}

/// A fully resolved, single-valued job produced by expansion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcreteJob {
    pub job: JobDescription,
    /// Name of the description this job was expanded from
    pub origin: String,
    /// Ordinal within the expansion; `None` when nothing was swept
    #[serde(default)]
    pub variant: Option<usize>,
    /// Chosen value per swept field path
    #[serde(default)]
    pub sweep: BTreeMap<String, Value>,
}

impl ConcreteJob {
    /// Wrap a description that needed no expansion
    pub fn single(job: JobDescription) -> Self {
        Self {
            origin: job.name.clone(),
            job,
            variant: None,
            sweep: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.job.name
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
