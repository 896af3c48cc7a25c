// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sweep expressions
//!
//! A single-key table whose key is `linear`, `logarithmic`, `values` or
//! `literal` is an expression rather than a nested parameter table.

use serde_json::{Map, Value};
use thiserror::Error;

/// Upper bound on the values of one range expression and on the jobs one
/// description may expand to
pub const MAX_SWEEP_JOBS: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SweepError {
    #[error("job '{job}': invalid sweep expression at {path}: {message}")]
    Expression {
        job: String,
        path: String,
        message: String,
    },
    #[error("job '{job}': zipped fields differ in length: {}", describe_shape(.fields))]
    Shape {
        job: String,
        /// Every swept field with its length, in walk order
        fields: Vec<(String, usize)>,
    },
    #[error("job '{job}': sweep would produce {count} jobs, more than the limit of {limit}")]
    TooLarge { job: String, count: u128, limit: usize },
}

fn describe_shape(fields: &[(String, usize)]) -> String {
    let parts: Vec<String> = fields.iter().map(|(f, n)| format!("{f}={n}")).collect();
    parts.join(", ")
}

#[derive(Debug, Clone, PartialEq)]
pub enum SweepExpr {
    /// Inclusive, evenly spaced
    Linear { start: f64, stop: f64, count: usize },
    /// Inclusive, `10^e` for evenly spaced exponents `e` from `start` to `stop`
    Logarithmic { start: f64, stop: f64, count: usize },
    Values(Vec<Value>),
    /// Substituted as-is; never swept
    Literal(Value),
}

impl SweepExpr {
    /// Recognise an expression table; `Ok(None)` for ordinary tables
    pub fn parse(table: &Map<String, Value>) -> Result<Option<Self>, String> {
        if table.len() != 1 {
            return Ok(None);
        }
        let Some((key, arg)) = table.iter().next() else {
            return Ok(None);
        };
        let expr = match key.as_str() {
            "linear" => {
                let (start, stop, count) = range_args(arg)?;
                SweepExpr::Linear { start, stop, count }
            }
            "logarithmic" => {
                let (start, stop, count) = range_args(arg)?;
                SweepExpr::Logarithmic { start, stop, count }
            }
            "values" => match arg {
                Value::Array(items) => SweepExpr::Values(items.clone()),
                _ => return Err("values expects a list".to_string()),
            },
            "literal" => SweepExpr::Literal(arg.clone()),
            _ => return Ok(None),
        };
        Ok(Some(expr))
    }

    /// The values this expression sweeps over; `None` for a literal
    pub fn values(&self) -> Option<Vec<Value>> {
        match self {
            SweepExpr::Linear { start, stop, count } => {
                Some(linspace(*start, *stop, *count).into_iter().map(Value::from).collect())
            }
            SweepExpr::Logarithmic { start, stop, count } => Some(
                linspace(*start, *stop, *count)
                    .into_iter()
                    .map(|e| Value::from(10f64.powf(e)))
                    .collect(),
            ),
            SweepExpr::Values(items) => Some(items.clone()),
            SweepExpr::Literal(_) => None,
        }
    }
}

fn range_args(arg: &Value) -> Result<(f64, f64, usize), String> {
    let usage = "expects [start, stop, count]";
    let Value::Array(items) = arg else {
        return Err(usage.to_string());
    };
    let [start, stop, count] = items.as_slice() else {
        return Err(usage.to_string());
    };
    let start = start.as_f64().ok_or_else(|| format!("start must be a number; {usage}"))?;
    let stop = stop.as_f64().ok_or_else(|| format!("stop must be a number; {usage}"))?;
    let count = count
        .as_u64()
        .ok_or_else(|| format!("count must be a non-negative integer; {usage}"))?;
    if !start.is_finite() || !stop.is_finite() {
        return Err("start and stop must be finite".to_string());
    }
    if count > MAX_SWEEP_JOBS as u64 {
        return Err(format!("count {count} exceeds the limit of {MAX_SWEEP_JOBS}"));
    }
    Ok((start, stop, count as usize))
}

fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

#[cfg(test)]
#[path = "sweep_tests.rs"]
mod tests;
