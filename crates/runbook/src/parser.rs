// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job file TOML parsing
//!
//! A file holds either several `[[job]]` tables or a single job at the root,
//! whose name defaults to the file stem.

use pj_core::{CombineMode, ComponentSelection, EngineSelection, JobDescription, Params};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during job file parsing
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("missing required field: {0}")]
    MissingField(String),
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

const JOB_KEYS: &[&str] = &[
    "name",
    "engine",
    "components",
    "params",
    "input",
    "input_loader",
    "output",
    "tags",
    "depends_on",
    "combine",
];

/// Read and parse a job file
pub fn load_job_file(path: &Path) -> Result<Vec<JobDescription>, ParseError> {
    let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("job");
    parse_jobs(&content, stem)
}

/// Parse job descriptions from TOML content
///
/// `default_name` names a root-level job that has no `name` key.
pub fn parse_jobs(content: &str, default_name: &str) -> Result<Vec<JobDescription>, ParseError> {
    let raw: toml::Value = toml::from_str(content)?;
    let table = raw
        .as_table()
        .ok_or_else(|| ParseError::InvalidFormat("root must be a table".to_string()))?;

    match table.get("job") {
        Some(jobs) => {
            if table.len() > 1 {
                let others: Vec<&str> = table
                    .keys()
                    .filter(|k| k.as_str() != "job")
                    .map(String::as_str)
                    .collect();
                return Err(ParseError::InvalidFormat(format!(
                    "keys outside [[job]] tables: {}",
                    others.join(", ")
                )));
            }
            let jobs = jobs.as_array().ok_or_else(|| {
                ParseError::InvalidFormat("job must be an array of tables ([[job]])".to_string())
            })?;
            jobs.iter()
                .enumerate()
                .map(|(i, value)| {
                    let table = value.as_table().ok_or_else(|| {
                        ParseError::InvalidFormat(format!("job[{}] must be a table", i))
                    })?;
                    let name = table
                        .get("name")
                        .and_then(|v| v.as_str())
                        .ok_or_else(|| ParseError::MissingField(format!("job[{}].name", i)))?;
                    parse_job(name, table)
                })
                .collect()
        }
        None => {
            let name = match table.get("name") {
                Some(v) => v
                    .as_str()
                    .ok_or_else(|| ParseError::InvalidFormat("name must be a string".to_string()))?,
                None => default_name,
            };
            Ok(vec![parse_job(name, table)?])
        }
    }
}

fn parse_job(name: &str, table: &toml::Table) -> Result<JobDescription, ParseError> {
    if let Some(key) = table.keys().find(|k| !JOB_KEYS.contains(&k.as_str())) {
        return Err(ParseError::InvalidFormat(format!(
            "job.{}: unknown key '{}'",
            name, key
        )));
    }

    let engine_value = table
        .get("engine")
        .ok_or_else(|| ParseError::MissingField(format!("job.{}.engine", name)))?;
    let engine = parse_engine(name, engine_value)?;

    let components = match table.get("components") {
        Some(value) => {
            let components = value.as_table().ok_or_else(|| {
                ParseError::InvalidFormat(format!("job.{}.components must be a table", name))
            })?;
            components
                .iter()
                .map(|(ns, v)| {
                    let field = format!("job.{}.components.{}", name, ns);
                    Ok((ns.clone(), parse_selection(&field, v)?))
                })
                .collect::<Result<BTreeMap<_, _>, ParseError>>()?
        }
        None => BTreeMap::new(),
    };

    let params = match table.get("params") {
        Some(v) => to_params(&format!("job.{}.params", name), v)?,
        None => Params::new(),
    };

    let input_loader = table
        .get("input_loader")
        .map(|v| parse_selection(&format!("job.{}.input_loader", name), v))
        .transpose()?;

    let combine = table
        .get("combine")
        .map(|v| {
            v.clone().try_into::<CombineMode>().map_err(|_| {
                ParseError::InvalidFormat(format!(
                    "job.{}.combine: expected \"cartesian\" or \"zipped\"",
                    name
                ))
            })
        })
        .transpose()?;

    Ok(JobDescription {
        name: name.to_string(),
        engine,
        components,
        params,
        input: optional_str(name, table, "input")?,
        input_loader,
        output: optional_str(name, table, "output")?,
        tags: str_list(name, table, "tags")?,
        depends_on: str_list(name, table, "depends_on")?,
        combine,
    })
}

/// `engine = "heat"` or `[engine.heat]` with settings; exactly one engine
fn parse_engine(job: &str, value: &toml::Value) -> Result<EngineSelection, ParseError> {
    match value {
        toml::Value::String(name) => Ok(EngineSelection::new(name.as_str())),
        toml::Value::Table(t) if t.len() == 1 => {
            let (name, settings) = t.iter().next().ok_or_else(|| {
                ParseError::InvalidFormat(format!("job.{}.engine is empty", job))
            })?;
            Ok(EngineSelection {
                name: name.clone(),
                settings: to_params(&format!("job.{}.engine.{}", job, name), settings)?,
            })
        }
        toml::Value::Table(t) => Err(ParseError::InvalidFormat(format!(
            "job.{}.engine must name exactly one engine, found {}",
            job,
            t.len()
        ))),
        _ => Err(ParseError::InvalidFormat(format!(
            "job.{}.engine must be a string or a table",
            job
        ))),
    }
}

/// A component choice in one of three forms:
/// `"name"`, `{ name = "x", params = {..} }`, or `{ x = {..} }`
fn parse_selection(field: &str, value: &toml::Value) -> Result<ComponentSelection, ParseError> {
    match value {
        toml::Value::String(name) => Ok(ComponentSelection::new(name.as_str())),
        toml::Value::Table(t) if t.contains_key("name") => {
            if let Some(key) = t.keys().find(|k| *k != "name" && *k != "params") {
                return Err(ParseError::InvalidFormat(format!(
                    "{}: unknown key '{}'",
                    field, key
                )));
            }
            let name = t
                .get("name")
                .and_then(|v| v.as_str())
                .ok_or_else(|| ParseError::InvalidFormat(format!("{}.name must be a string", field)))?;
            let params = match t.get("params") {
                Some(p) => to_params(&format!("{}.params", field), p)?,
                None => Params::new(),
            };
            Ok(ComponentSelection {
                name: name.to_string(),
                params,
            })
        }
        toml::Value::Table(t) if t.len() == 1 => {
            let (name, params) = t
                .iter()
                .next()
                .ok_or_else(|| ParseError::InvalidFormat(format!("{} is empty", field)))?;
            Ok(ComponentSelection {
                name: name.clone(),
                params: to_params(&format!("{}.{}", field, name), params)?,
            })
        }
        _ => Err(ParseError::InvalidFormat(format!(
            "{} must be a name, {{ name, params }}, or a single-key table",
            field
        ))),
    }
}

fn to_params(field: &str, value: &toml::Value) -> Result<Params, ParseError> {
    if !value.is_table() {
        return Err(ParseError::InvalidFormat(format!("{} must be a table", field)));
    }
    value
        .clone()
        .try_into::<Params>()
        .map_err(|e| ParseError::InvalidFormat(format!("{}: {}", field, e)))
}

fn optional_str(job: &str, table: &toml::Table, key: &str) -> Result<Option<String>, ParseError> {
    match table.get(key) {
        None => Ok(None),
        Some(toml::Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ParseError::InvalidFormat(format!(
            "job.{}.{} must be a string",
            job, key
        ))),
    }
}

fn str_list(job: &str, table: &toml::Table, key: &str) -> Result<Vec<String>, ParseError> {
    let Some(value) = table.get(key) else {
        return Ok(Vec::new());
    };
    let invalid = || ParseError::InvalidFormat(format!("job.{}.{} must be a list of strings", job, key));
    value
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|v| v.as_str().map(String::from).ok_or_else(invalid))
        .collect()
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
