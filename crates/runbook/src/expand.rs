// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parameter-sweep expansion
//!
//! Swept fields are collected from the engine settings, then from each
//! component's params in namespace order, keys sorted and nested tables
//! recursed. That walk order fixes the nesting of the cartesian product
//! (first field outermost) and therefore the variant ordinals.

use crate::sweep::{SweepError, SweepExpr, MAX_SWEEP_JOBS};
use pj_core::config::ScanConfig;
use pj_core::{CombineMode, ConcreteJob, JobDescription, Params};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Location of a swept field within a job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    /// `None` for the engine settings, else the component namespace
    pub namespace: Option<String>,
    pub keys: Vec<String>,
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            None => f.write_str("engine")?,
            Some(ns) => write!(f, "components.{ns}")?,
        }
        for key in &self.keys {
            write!(f, ".{key}")?;
        }
        Ok(())
    }
}

struct Axis {
    path: FieldPath,
    values: Vec<Value>,
}

/// Turns job descriptions into concrete jobs
#[derive(Debug, Clone, Copy)]
pub struct Expander {
    enabled: bool,
    default_mode: CombineMode,
}

impl Default for Expander {
    fn default() -> Self {
        Self {
            enabled: true,
            default_mode: CombineMode::Cartesian,
        }
    }
}

impl Expander {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(scan: &ScanConfig) -> Self {
        Self {
            enabled: scan.enabled,
            default_mode: scan.method,
        }
    }

    /// With scanning disabled, jobs pass through exactly as written
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn default_mode(mut self, mode: CombineMode) -> Self {
        self.default_mode = mode;
        self
    }

    /// Expand every job, preserving input order
    pub fn expand_all(&self, jobs: &[JobDescription]) -> Result<Vec<ConcreteJob>, SweepError> {
        let mut out = Vec::new();
        for job in jobs {
            out.extend(self.expand(job)?);
        }
        Ok(out)
    }

    pub fn expand(&self, job: &JobDescription) -> Result<Vec<ConcreteJob>, SweepError> {
        if !self.enabled {
            return Ok(vec![ConcreteJob::single(job.clone())]);
        }

        let mut base = job.clone();
        let mut axes = Vec::new();
        let mut keys = Vec::new();
        collect(&job.name, None, &mut base.engine.settings, &mut keys, &mut axes)?;
        for (ns, selection) in base.components.iter_mut() {
            collect(&job.name, Some(ns.as_str()), &mut selection.params, &mut keys, &mut axes)?;
        }

        if axes.is_empty() {
            return Ok(vec![ConcreteJob::single(base)]);
        }

        let mode = job.combine.unwrap_or(self.default_mode);
        let combos = match mode {
            CombineMode::Cartesian => {
                let count = axes
                    .iter()
                    .fold(1u128, |n, a| n.saturating_mul(a.values.len() as u128));
                if count > MAX_SWEEP_JOBS as u128 {
                    return Err(SweepError::TooLarge {
                        job: job.name.clone(),
                        count,
                        limit: MAX_SWEEP_JOBS,
                    });
                }
                cartesian(&axes)
            }
            CombineMode::Zipped => zipped(&job.name, &axes)?,
        };
        tracing::debug!(
            job = %job.name,
            fields = axes.len(),
            jobs = combos.len(),
            %mode,
            "expanded sweep"
        );

        let suffixed = combos.len() > 1;
        let jobs = combos
            .into_iter()
            .enumerate()
            .map(|(variant, combo)| {
                let mut concrete = base.clone();
                let mut sweep = BTreeMap::new();
                for (axis, &i) in axes.iter().zip(&combo) {
                    let value = axis.values[i].clone();
                    substitute(&mut concrete, &axis.path, value.clone());
                    sweep.insert(axis.path.to_string(), value);
                }
                if suffixed {
                    concrete.name = format!("{}_{}", job.name, variant);
                    concrete.output = job.output.as_ref().map(|o| format!("{o}_{variant}"));
                }
                ConcreteJob {
                    job: concrete,
                    origin: job.name.clone(),
                    variant: Some(variant),
                    sweep,
                }
            })
            .collect();
        Ok(jobs)
    }
}

/// Record swept fields under `params`, unwrapping literals in place
fn collect(
    job: &str,
    namespace: Option<&str>,
    params: &mut Params,
    keys: &mut Vec<String>,
    axes: &mut Vec<Axis>,
) -> Result<(), SweepError> {
    for (key, value) in params.iter_mut() {
        keys.push(key.clone());
        match value {
            Value::Array(items) => axes.push(Axis {
                path: field_path(namespace, keys),
                values: items.clone(),
            }),
            Value::Object(table) => match SweepExpr::parse(table) {
                Ok(Some(SweepExpr::Literal(inner))) => *value = inner,
                Ok(Some(expr)) => axes.push(Axis {
                    path: field_path(namespace, keys),
                    values: expr.values().unwrap_or_default(),
                }),
                Ok(None) => collect(job, namespace, table, keys, axes)?,
                Err(message) => {
                    return Err(SweepError::Expression {
                        job: job.to_string(),
                        path: field_path(namespace, keys).to_string(),
                        message,
                    })
                }
            },
            _ => {}
        }
        keys.pop();
    }
    Ok(())
}

fn field_path(namespace: Option<&str>, keys: &[String]) -> FieldPath {
    FieldPath {
        namespace: namespace.map(str::to_string),
        keys: keys.to_vec(),
    }
}

/// Index tuples with the first axis outermost
fn cartesian(axes: &[Axis]) -> Vec<Vec<usize>> {
    if axes.iter().any(|a| a.values.is_empty()) {
        return Vec::new();
    }
    let mut combos = vec![Vec::with_capacity(axes.len())];
    for axis in axes {
        combos = combos
            .into_iter()
            .flat_map(|prefix| {
                (0..axis.values.len()).map(move |i| {
                    let mut next = prefix.clone();
                    next.push(i);
                    next
                })
            })
            .collect();
    }
    combos
}

fn zipped(job: &str, axes: &[Axis]) -> Result<Vec<Vec<usize>>, SweepError> {
    let len = axes[0].values.len();
    if axes.iter().any(|a| a.values.len() != len) {
        return Err(SweepError::Shape {
            job: job.to_string(),
            fields: axes
                .iter()
                .map(|a| (a.path.to_string(), a.values.len()))
                .collect(),
        });
    }
    Ok((0..len).map(|i| vec![i; axes.len()]).collect())
}

fn substitute(job: &mut JobDescription, path: &FieldPath, value: Value) {
    let params = match &path.namespace {
        None => &mut job.engine.settings,
        Some(ns) => match job.components.get_mut(ns) {
            Some(selection) => &mut selection.params,
            None => return,
        },
    };
    let Some((last, parents)) = path.keys.split_last() else {
        return;
    };
    let mut table = params;
    for key in parents {
        match table.get_mut(key) {
            Some(Value::Object(inner)) => table = inner,
            _ => return,
        }
    }
    table.insert(last.clone(), value);
}

#[cfg(test)]
#[path = "expand_tests.rs"]
mod tests;
