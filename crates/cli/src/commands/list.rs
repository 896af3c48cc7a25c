// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pj list [namespace]` - List catalog entries

use crate::output::{print_list, OutputFormat};
use crate::project::Project;
use anyhow::Result;
use clap::Args;
use pj_catalog::{EntryInfo, EntryKind, Resolution};
use serde::Serialize;
use std::fmt;
use std::process::ExitCode;

#[derive(Args)]
pub struct ListArgs {
    /// Only show this namespace
    pub namespace: Option<String>,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
#[serde(transparent)]
struct EntryRow(EntryInfo);

impl fmt::Display for EntryRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = &self.0;
        let kind = match (e.kind, &e.resolution) {
            (EntryKind::Immediate, _) => "immediate",
            (EntryKind::Deferred, Resolution::Pending) => "deferred",
            (EntryKind::Deferred, Resolution::Ready) => "loaded",
            (EntryKind::Deferred, Resolution::Failed(_)) => "failed",
        };
        let detail = e
            .reference
            .as_deref()
            .or(e.description.as_deref())
            .unwrap_or("");
        write!(f, "{:<28} {:<9} {}", format!("{}/{}", e.namespace, e.name), kind, detail)
    }
}

pub fn handle(args: ListArgs, project: &Project) -> Result<ExitCode> {
    let catalog = project.catalog()?;
    let rows: Vec<EntryRow> = catalog
        .list(args.namespace.as_deref())
        .into_iter()
        .map(EntryRow)
        .collect();
    if rows.is_empty() && matches!(args.format, OutputFormat::Text) {
        println!("No components");
        return Ok(ExitCode::SUCCESS);
    }
    print_list(&rows, args.format);
    Ok(ExitCode::SUCCESS)
}
