// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-run identity and directory

use crate::error::JobError;
use pj_core::{IdGen, JobDescription, RunId};
use std::io;
use std::path::{Path, PathBuf};

/// Attempts before giving up on an id that keeps colliding
const MAX_ATTEMPTS: usize = 3;

/// Identity, directory and merged configuration of one job run
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: RunId,
    pub run_dir: PathBuf,
    /// Job after system defaults were merged; what gets snapshotted
    pub merged: JobDescription,
}

impl RunContext {
    /// Create `<output_root>/<run_id>`; an existing directory is never reused
    pub fn provision(
        output_root: &Path,
        id_gen: &impl IdGen,
        merged: JobDescription,
    ) -> Result<Self, JobError> {
        std::fs::create_dir_all(output_root).map_err(|source| JobError::RunContext {
            path: output_root.to_path_buf(),
            source,
        })?;

        let mut last_err = None;
        for _ in 0..MAX_ATTEMPTS {
            let run_id = id_gen.next();
            let run_dir = output_root.join(run_id.as_str());
            match std::fs::create_dir(&run_dir) {
                Ok(()) => {
                    tracing::debug!(%run_id, run_dir = %run_dir.display(), "provisioned run directory");
                    return Ok(Self {
                        run_id,
                        run_dir,
                        merged,
                    });
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    tracing::warn!(%run_id, "run directory already exists, drawing a new id");
                    last_err = Some((run_dir, e));
                }
                Err(source) => return Err(JobError::RunContext { path: run_dir, source }),
            }
        }
        let (path, source) = last_err.unwrap_or_else(|| {
            (
                output_root.to_path_buf(),
                io::Error::new(io::ErrorKind::AlreadyExists, "no run id attempted"),
            )
        });
        Err(JobError::RunContext { path, source })
    }
}
