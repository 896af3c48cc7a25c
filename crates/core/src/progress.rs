// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job stages, progress records, and the context handed to engines

use crate::{Params, RunId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

/// Where a job is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStage {
    Pending,
    InputResolved,
    ComponentsBuilt,
    ManifestValidated,
    EngineInstantiated,
    Executing,
    Succeeded,
    Failed,
}

impl JobStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStage::Succeeded | JobStage::Failed)
    }
}

impl fmt::Display for JobStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobStage::Pending => "pending",
            JobStage::InputResolved => "input-resolved",
            JobStage::ComponentsBuilt => "components-built",
            JobStage::ManifestValidated => "manifest-validated",
            JobStage::EngineInstantiated => "engine-instantiated",
            JobStage::Executing => "executing",
            JobStage::Succeeded => "succeeded",
            JobStage::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// A progress notification for one job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub job_name: String,
    pub job_index: usize,
    pub total_jobs: usize,
    /// 0 to 100
    pub percent: Option<f64>,
    pub message: String,
    pub stage: Option<JobStage>,
}

/// What an engine sees of the run it executes in
pub struct ExecutionContext<'a> {
    run_id: &'a RunId,
    run_dir: &'a Path,
    job_name: &'a str,
    job_index: usize,
    total_jobs: usize,
    params: Option<&'a Params>,
    sink: Option<&'a mut dyn FnMut(&ProgressUpdate)>,
    throttle: Throttle<'a>,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(run_id: &'a RunId, run_dir: &'a Path, job_name: &'a str, job_index: usize, total_jobs: usize) -> Self {
        Self {
            run_id,
            run_dir,
            job_name,
            job_index,
            total_jobs,
            params: None,
            sink: None,
            throttle: Throttle::disabled(),
        }
    }

    /// Forward engine progress to `sink`, at most once per `interval`
    pub fn with_progress(
        mut self,
        sink: &'a mut dyn FnMut(&ProgressUpdate),
        interval: Duration,
        now: &'a dyn Fn() -> Instant,
    ) -> Self {
        self.sink = Some(sink);
        self.throttle = Throttle::new(interval, now);
        self
    }

    /// Expose the job's free-form `params` block
    pub fn with_params(mut self, params: &'a Params) -> Self {
        self.params = Some(params);
        self
    }

    pub fn run_id(&self) -> &RunId {
        self.run_id
    }

    /// Isolated directory the engine may write artifacts into
    pub fn run_dir(&self) -> &Path {
        self.run_dir
    }

    pub fn job_name(&self) -> &str {
        self.job_name
    }

    pub fn job_index(&self) -> usize {
        self.job_index
    }

    /// The job-level `params` block, when the scheduler supplied one
    pub fn params(&self) -> Option<&'a Params> {
        self.params
    }

    /// One job-level parameter
    pub fn param(&self, key: &str) -> Option<&'a serde_json::Value> {
        self.params?.get(key)
    }

    /// Report progress; updates below 100% may be dropped by the throttle
    pub fn report(&mut self, percent: f64, message: impl Into<String>) {
        let percent = percent.clamp(0.0, 100.0);
        if !self.throttle.admit(percent >= 100.0) {
            return;
        }
        if let Some(sink) = self.sink.as_mut() {
            sink(&ProgressUpdate {
                job_name: self.job_name.to_string(),
                job_index: self.job_index,
                total_jobs: self.total_jobs,
                percent: Some(percent),
                message: message.into(),
                stage: Some(JobStage::Executing),
            });
        }
    }
}

struct Throttle<'a> {
    interval: Duration,
    now: Option<&'a dyn Fn() -> Instant>,
    last: Option<Instant>,
}

impl<'a> Throttle<'a> {
    fn disabled() -> Self {
        Self {
            interval: Duration::ZERO,
            now: None,
            last: None,
        }
    }

    fn new(interval: Duration, now: &'a dyn Fn() -> Instant) -> Self {
        Self {
            interval,
            now: Some(now),
            last: None,
        }
    }

    fn admit(&mut self, force: bool) -> bool {
        let Some(now) = self.now else {
            return true;
        };
        let t = now();
        match self.last {
            Some(last) if !force && t.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(t);
                true
            }
        }
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
