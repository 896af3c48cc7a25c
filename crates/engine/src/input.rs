// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Input resolution: in-memory handoff first, then an external loader

use crate::error::{contain, JobError};
use pj_adapters::TracedLoader;
use pj_catalog::{BoxError, Catalog, CatalogError, Companions, Loader, LOADER_NAMESPACE};
use pj_core::{JobDescription, Output};
use serde_json::Value;
use std::collections::HashMap;

/// Outputs of succeeded jobs in this invocation, keyed by job name and alias
#[derive(Debug, Default)]
pub(crate) struct OutputCache {
    outputs: HashMap<String, Output>,
}

impl OutputCache {
    /// Store under the job's name and, if set, its output alias
    pub(crate) fn insert(&mut self, job: &JobDescription, output: Output) {
        if let Some(alias) = &job.output {
            self.outputs.insert(alias.clone(), output.clone());
        }
        self.outputs.insert(job.name.clone(), output);
    }

    pub(crate) fn get(&self, key: &str) -> Option<&Output> {
        self.outputs.get(key)
    }
}

/// Resolve a job's input
///
/// `None` when the job names no input. A name found in `cache` wins; any
/// other name is treated as an external location and read through the job's
/// `input_loader`. With `dry_run` the loader is validated but never built.
pub(crate) fn resolve(
    job: &JobDescription,
    cache: &OutputCache,
    catalog: &Catalog,
    dry_run: bool,
) -> Result<Option<Output>, JobError> {
    let Some(location) = job.input.as_deref() else {
        return Ok(None);
    };
    if let Some(output) = cache.get(location) {
        tracing::debug!(input = location, "input from earlier job");
        return Ok(Some(output.clone()));
    }

    let Some(selection) = &job.input_loader else {
        return Err(JobError::Config(format!(
            "job '{}': input '{location}' is not produced by an earlier job and no input_loader is configured",
            job.name
        )));
    };
    let raw = Value::Object(selection.params.clone());
    let component_err = |source| JobError::Component {
        namespace: LOADER_NAMESPACE.to_string(),
        source,
    };

    if dry_run {
        catalog
            .validate_config(LOADER_NAMESPACE, &selection.name, &raw)
            .map_err(component_err)?;
        return Ok(Some(Output::new(())));
    }

    let instance = contain(|| catalog.create(LOADER_NAMESPACE, &selection.name, &raw, &Companions::new()))
        .map_err(|message| {
            component_err(CatalogError::ComponentConstruct {
                namespace: LOADER_NAMESPACE.to_string(),
                name: selection.name.clone(),
                source: message.into(),
            })
        })?
        .map_err(component_err)?;
    let loader = instance.into_loader().map_err(|other| {
        JobError::Config(format!(
            "loader '{}' built a {}, not a loader",
            selection.name,
            other.kind()
        ))
    })?;

    let input_err = |source: BoxError| JobError::Input {
        location: location.to_string(),
        source,
    };
    let loader = TracedLoader::new(loader, selection.name.clone());
    let output = contain(|| loader.load(location))
        .map_err(|message| input_err(message.into()))?
        .map_err(input_err)?;
    Ok(Some(output))
}
