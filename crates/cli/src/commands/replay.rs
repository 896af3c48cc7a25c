// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pj replay <run_dir>` - Rerun a recorded job from its snapshot

use super::{exit_code, ResultRow};
use crate::output::{print_list, OutputFormat};
use crate::project::Project;
use anyhow::{bail, Result};
use clap::Args;
use pj_engine::Scheduler;
use pj_storage::Snapshot;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Args)]
pub struct ReplayArgs {
    /// Run directory containing snapshot.json
    pub run_dir: PathBuf,

    /// Directory receiving the new run directory
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Only verify the snapshot digest
    #[arg(long)]
    pub check: bool,

    /// Replay even if the digest does not match
    #[arg(long)]
    pub force: bool,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

pub fn handle(args: ReplayArgs, project: &Project) -> Result<ExitCode> {
    let snapshot = Snapshot::read(&args.run_dir)?;
    let intact = snapshot.verify()?;
    if args.check {
        if !intact {
            bail!("snapshot in {} does not match its digest", args.run_dir.display());
        }
        println!("{} ({}) ok", snapshot.job_name, snapshot.run_id);
        return Ok(ExitCode::SUCCESS);
    }
    if !intact {
        if !args.force {
            bail!(
                "snapshot in {} does not match its digest; use --force to replay anyway",
                args.run_dir.display()
            );
        }
        tracing::warn!(run_dir = %args.run_dir.display(), "replaying a modified snapshot");
    }

    let catalog = project.catalog()?;
    let mut config = project.config.clone();
    config.paths.output_dir = project.output_dir(args.output_dir.as_deref());

    let results = Scheduler::new(&catalog, config).replay(&snapshot)?;
    let rows: Vec<ResultRow<'_>> = results.iter().map(ResultRow).collect();
    print_list(&rows, args.format);
    Ok(exit_code(&results))
}
