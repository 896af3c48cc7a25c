// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pj expand <files>` - Show concrete jobs without running them

use crate::output::{print_list, OutputFormat};
use crate::project::Project;
use anyhow::Result;
use clap::Args;
use pj_core::ConcreteJob;
use pj_runbook::Expander;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Args)]
pub struct ExpandArgs {
    /// Job files (TOML)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct ExpandedJob<'a> {
    name: &'a str,
    origin: &'a str,
    variant: Option<usize>,
    sweep: &'a BTreeMap<String, Value>,
}

impl<'a> From<&'a ConcreteJob> for ExpandedJob<'a> {
    fn from(job: &'a ConcreteJob) -> Self {
        Self {
            name: job.name(),
            origin: &job.origin,
            variant: job.variant,
            sweep: &job.sweep,
        }
    }
}

impl fmt::Display for ExpandedJob<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<24}", self.name)?;
        for (path, value) in self.sweep {
            write!(f, " {path}={value}")?;
        }
        Ok(())
    }
}

pub fn handle(args: ExpandArgs, project: &Project) -> Result<ExitCode> {
    let jobs = project.load_jobs(&args.files)?;
    let concrete = Expander::from_config(&project.config.scan).expand_all(&jobs)?;
    for finding in pj_runbook::lint(&concrete) {
        eprintln!("warning: {finding}");
    }
    let rows: Vec<ExpandedJob<'_>> = concrete.iter().map(ExpandedJob::from).collect();
    print_list(&rows, args.format);
    Ok(ExitCode::SUCCESS)
}
