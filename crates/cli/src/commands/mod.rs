// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod expand;
pub mod history;
pub mod list;
pub mod replay;
pub mod run;

use pj_core::JobResult;
use serde::Serialize;
use std::fmt;
use std::process::ExitCode;

/// Exit status when at least one job did not succeed
const EXIT_JOB_FAILED: u8 = 1;

/// One job result as printed by `run` and `replay`
#[derive(Serialize)]
#[serde(transparent)]
pub(crate) struct ResultRow<'a>(pub &'a JobResult);

impl fmt::Display for ResultRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        let detail = match (r.error(), &r.run_dir) {
            (Some(error), _) => error.to_string(),
            (None, Some(dir)) => dir.display().to_string(),
            (None, None) => "-".to_string(),
        };
        write!(
            f,
            "{:>3}  {:<24} {:<9} {}",
            r.job_index,
            crate::output::clip(&r.job_name, 24),
            r.outcome,
            detail
        )
    }
}

pub(crate) fn exit_code(results: &[JobResult]) -> ExitCode {
    if results.iter().all(JobResult::success) {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_JOB_FAILED)
    }
}

pub(crate) fn summary(results: &[JobResult]) -> String {
    let succeeded = results.iter().filter(|r| r.success()).count();
    let skipped = results
        .iter()
        .filter(|r| matches!(r.outcome, pj_core::Outcome::Skipped { .. }))
        .count();
    let failed = results.len() - succeeded - skipped;
    let mut line = format!("{} job(s): {succeeded} succeeded, {failed} failed", results.len());
    if skipped > 0 {
        line.push_str(&format!(", {skipped} skipped"));
    }
    line
}
