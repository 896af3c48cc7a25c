// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pj history` - Show results recorded in the ledger

use crate::output::{clip, print_list, OutputFormat};
use crate::project::Project;
use anyhow::Result;
use clap::Args;
use pj_storage::{Ledger, LedgerEntry};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Args)]
pub struct HistoryArgs {
    /// Directory holding the ledger
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Only show jobs that did not succeed
    #[arg(long)]
    pub failed: bool,

    /// Show at most this many of the latest entries
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
#[serde(transparent)]
struct HistoryRow(LedgerEntry);

impl fmt::Display for HistoryRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.0.result;
        let run_id = r.run_id.as_ref().map(|id| id.as_str()).unwrap_or("-");
        write!(
            f,
            "{:>5}  {:<24} {:<9} {}",
            self.0.seq,
            clip(&r.job_name, 24),
            r.outcome,
            run_id
        )?;
        if let Some(error) = r.error() {
            write!(f, "  {error}")?;
        }
        Ok(())
    }
}

pub fn handle(args: HistoryArgs, project: &Project) -> Result<ExitCode> {
    let path = project.ledger_path(args.output_dir.as_deref());
    let mut entries = Ledger::replay(&path)?;
    if args.failed {
        entries.retain(|e| !e.result.success());
    }
    if let Some(limit) = args.limit {
        let skip = entries.len().saturating_sub(limit);
        entries.drain(..skip);
    }

    if entries.is_empty() && matches!(args.format, OutputFormat::Text) {
        println!("No recorded jobs");
        return Ok(ExitCode::SUCCESS);
    }
    let rows: Vec<HistoryRow> = entries.into_iter().map(HistoryRow).collect();
    print_list(&rows, args.format);
    Ok(ExitCode::SUCCESS)
}
