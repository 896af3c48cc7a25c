// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pj run <files>` - Expand and run job files

use super::{exit_code, summary, ResultRow};
use crate::output::{print_list, OutputFormat};
use crate::project::Project;
use anyhow::Result;
use clap::Args;
use pj_core::ProgressUpdate;
use pj_engine::Scheduler;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Args)]
pub struct RunArgs {
    /// Job files (TOML)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Directory receiving run directories and the ledger
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Stop after the first failed job; the rest are reported as skipped
    #[arg(long)]
    pub fail_fast: bool,

    /// Check wiring, configs and dependencies without running anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print progress updates to stderr
    #[arg(long)]
    pub progress: bool,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

pub fn handle(args: RunArgs, project: &Project) -> Result<ExitCode> {
    let jobs = project.load_jobs(&args.files)?;
    let catalog = project.catalog()?;

    let mut config = project.config.clone();
    config.paths.output_dir = project.output_dir(args.output_dir.as_deref());
    if args.fail_fast {
        config.run.fail_fast = true;
    }

    let mut scheduler = Scheduler::new(&catalog, config).dry_run(args.dry_run);
    if args.progress {
        scheduler = scheduler.on_progress(print_progress);
    }
    let results = scheduler.run(&jobs)?;

    let rows: Vec<ResultRow<'_>> = results.iter().map(ResultRow).collect();
    print_list(&rows, args.format);
    if matches!(args.format, OutputFormat::Text) {
        let prefix = if args.dry_run { "dry run: " } else { "" };
        println!("{prefix}{}", summary(&results));
    }
    Ok(exit_code(&results))
}

fn print_progress(update: &ProgressUpdate) {
    let percent = update
        .percent
        .map(|p| format!("{p:>5.1}%"))
        .unwrap_or_else(|| "     -".to_string());
    eprintln!(
        "[{}/{}] {} {} {}",
        update.job_index + 1,
        update.total_jobs,
        update.job_name,
        percent,
        update.message
    );
}
