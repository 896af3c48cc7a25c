// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job outcome records

use crate::RunId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Terminal state of one concrete job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Succeeded,
    Failed { error: String },
    /// Not attempted because fail-fast halted the run
    Skipped { reason: String },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Succeeded => f.write_str("succeeded"),
            Outcome::Failed { .. } => f.write_str("failed"),
            Outcome::Skipped { .. } => f.write_str("skipped"),
        }
    }
}

/// Result of one concrete job, created once when the job finishes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    pub job_index: usize,
    pub job_name: String,
    /// `None` when the job never reached run context provisioning
    pub run_dir: Option<PathBuf>,
    pub run_id: Option<RunId>,
    #[serde(flatten)]
    pub outcome: Outcome,
    #[serde(default, with = "humantime_serde")]
    pub elapsed: Option<Duration>,
}

impl JobResult {
    pub fn success(&self) -> bool {
        matches!(self.outcome, Outcome::Succeeded)
    }

    /// Failure or skip reason; always non-empty when `success()` is false
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Succeeded => None,
            Outcome::Failed { error } => Some(error),
            Outcome::Skipped { reason } => Some(reason),
        }
    }

    pub fn skipped(job_index: usize, job_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            job_index,
            job_name: job_name.into(),
            run_dir: None,
            run_id: None,
            outcome: Outcome::Skipped {
                reason: reason.into(),
            },
            elapsed: None,
        }
    }
}
