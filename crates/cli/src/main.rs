// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! pj - Phase Jobs CLI

mod commands;
mod logging;
mod output;
mod project;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{expand, history, list, replay, run};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::project::Project;

#[derive(Parser)]
#[command(
    name = "pj",
    version,
    about = "pj runs parameter-swept simulation jobs against pluggable engines"
)]
struct Cli {
    /// Project root holding pj.toml; relative config paths resolve against it
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// System config file [default: <root>/pj.toml, then the user config dir]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand and run job files
    Run(run::RunArgs),
    /// Show the concrete jobs a job file expands to
    Expand(expand::ExpandArgs),
    /// List catalog entries
    List(list::ListArgs),
    /// Rerun the job recorded in a run directory
    Replay(replay::ReplayArgs),
    /// Show recorded job results
    History(history::HistoryArgs),
}

/// Exit status when the invocation itself failed, as opposed to a job
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn try_main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.log_file.as_deref())?;
    let project = Project::load(cli.root, cli.config.as_deref())?;

    match cli.command {
        Commands::Run(args) => run::handle(args, &project),
        Commands::Expand(args) => expand::handle(args, &project),
        Commands::List(args) => list::handle(args, &project),
        Commands::Replay(args) => replay::handle(args, &project),
        Commands::History(args) => history::handle(args, &project),
    }
}
