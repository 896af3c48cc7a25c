// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-run configuration snapshots
//!
//! `snapshot.json` in a run directory records everything needed to rerun
//! the job: the description as written, the expansion settings, which sweep
//! variant ran, and the concrete job after defaults were merged. The digest
//! covers only those four, so a replay of the same job yields the same digest.

use chrono::{DateTime, Utc};
use pj_core::config::ScanConfig;
use pj_core::{ConcreteJob, JobDescription, RunId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the snapshot inside a run directory
pub const SNAPSHOT_FILE: &str = "snapshot.json";
/// Current snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported snapshot version {0}")]
    Version(u32),
    #[error("cannot replay job '{job}': {reason}")]
    Replay { job: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub run_id: RunId,
    pub job_index: usize,
    pub job_name: String,
    pub created_at: DateTime<Utc>,
    /// The description this job was expanded from, if known
    pub source: Option<JobDescription>,
    /// Scan settings `source` was expanded with
    #[serde(default)]
    pub expansion: ScanConfig,
    pub variant: Option<usize>,
    /// Chosen value per swept field
    pub sweep: BTreeMap<String, Value>,
    /// Concrete job with system defaults merged in
    pub job: JobDescription,
    /// `namespace/name` -> how the implementation was registered
    #[serde(default)]
    pub provenance: BTreeMap<String, String>,
    /// Hex SHA-256 over `source`, `expansion`, `variant` and `job`
    pub digest: String,
}

#[derive(Serialize)]
struct Digested<'a> {
    source: &'a Option<JobDescription>,
    expansion: &'a ScanConfig,
    variant: Option<usize>,
    job: &'a JobDescription,
}

impl Snapshot {
    pub fn new(
        run_id: RunId,
        job_index: usize,
        created_at: DateTime<Utc>,
        concrete: &ConcreteJob,
        source: Option<&JobDescription>,
        expansion: &ScanConfig,
        merged: JobDescription,
    ) -> Result<Self, SnapshotError> {
        let source = source.cloned();
        let digest = digest(&source, expansion, concrete.variant, &merged)?;
        Ok(Self {
            version: SNAPSHOT_VERSION,
            run_id,
            job_index,
            job_name: concrete.name().to_string(),
            created_at,
            source,
            expansion: expansion.clone(),
            variant: concrete.variant,
            sweep: concrete.sweep.clone(),
            job: merged,
            provenance: BTreeMap::new(),
            digest,
        })
    }

    pub fn with_provenance(mut self, provenance: BTreeMap<String, String>) -> Self {
        self.provenance = provenance;
        self
    }

    /// Write `snapshot.json` into `run_dir`
    pub fn write(&self, run_dir: &Path) -> Result<PathBuf, SnapshotError> {
        let path = run_dir.join(SNAPSHOT_FILE);
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content).map_err(|source| SnapshotError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Read `snapshot.json` from `run_dir`
    pub fn read(run_dir: &Path) -> Result<Self, SnapshotError> {
        let path = run_dir.join(SNAPSHOT_FILE);
        let content = std::fs::read_to_string(&path).map_err(|source| SnapshotError::Read {
            path: path.clone(),
            source,
        })?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::Version(snapshot.version));
        }
        Ok(snapshot)
    }

    /// True when the stored digest matches the stored content
    pub fn verify(&self) -> Result<bool, SnapshotError> {
        Ok(digest(&self.source, &self.expansion, self.variant, &self.job)? == self.digest)
    }

    /// The concrete job to rerun, as it was before defaults were merged
    ///
    /// Re-expands `source` with the recorded expansion settings and picks the
    /// recorded variant. The pick must carry the recorded name and sweep
    /// values; anything else is a [`SnapshotError::Replay`]. Without a source
    /// the stored job runs as is.
    pub fn replay_job<E: fmt::Display>(
        &self,
        expand: impl FnOnce(&JobDescription, &ScanConfig) -> Result<Vec<ConcreteJob>, E>,
    ) -> Result<ConcreteJob, SnapshotError> {
        let Some(source) = &self.source else {
            return Ok(ConcreteJob::single(self.job.clone()));
        };
        let replay_error = |reason: String| SnapshotError::Replay {
            job: self.job_name.clone(),
            reason,
        };

        let mut jobs = expand(source, &self.expansion).map_err(|e| replay_error(e.to_string()))?;
        let index = self.variant.unwrap_or(0);
        if index >= jobs.len() {
            return Err(replay_error(format!(
                "variant {index} not produced; re-expansion yields {} job(s)",
                jobs.len()
            )));
        }
        let job = jobs.swap_remove(index);
        if job.name() != self.job_name || job.variant != self.variant || job.sweep != self.sweep {
            return Err(replay_error(format!(
                "re-expansion produced '{}' with different sweep values",
                job.name()
            )));
        }
        Ok(job)
    }
}

fn digest(
    source: &Option<JobDescription>,
    expansion: &ScanConfig,
    variant: Option<usize>,
    job: &JobDescription,
) -> Result<String, SnapshotError> {
    let canonical = serde_json::to_vec(&Digested {
        source,
        expansion,
        variant,
        job,
    })?;
    let hash = Sha256::digest(&canonical);
    Ok(hex::encode(hash))
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
