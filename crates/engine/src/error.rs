// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the scheduler

use pj_catalog::{BoxError, CatalogError};
use pj_runbook::SweepError;
use pj_storage::{LedgerError, SnapshotError};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use thiserror::Error;

/// Why a single job failed; recorded in its result, never propagated
#[derive(Debug, Error)]
pub enum JobError {
    /// Ambiguous or invalid job wiring
    #[error("invalid job configuration: {0}")]
    Config(String),

    #[error("component '{namespace}': {source}")]
    Component {
        namespace: String,
        #[source]
        source: CatalogError,
    },

    #[error("job '{job}' is missing required components: {}", .missing.join(", "))]
    MissingDependency { job: String, missing: Vec<String> },

    #[error("failed to load input '{location}': {source}")]
    Input {
        location: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to create run directory {path}: {source}")]
    RunContext {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Engine construction or execution returned an error or panicked
    #[error("execution failed: {0}")]
    Execution(String),

    #[error("failed to save output to {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that abort a whole invocation before any job runs
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error(transparent)]
    Sweep(#[from] SweepError),
    #[error("failed to open result ledger: {0}")]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Replay(#[from] SnapshotError),
}

/// Run plugin code, turning a panic into its message
pub(crate) fn contain<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    catch_unwind(AssertUnwindSafe(f)).map_err(panic_message)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}
