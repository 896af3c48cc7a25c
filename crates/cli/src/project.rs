// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project root, system config and the catalog built from them

use anyhow::{Context, Result};
use pj_adapters::{builtin_symbols, discover, register_builtins};
use pj_catalog::Catalog;
use pj_core::{JobDescription, SystemConfig};
use pj_storage::LEDGER_FILE;
use std::path::{Path, PathBuf};

pub struct Project {
    pub root: PathBuf,
    pub config: SystemConfig,
}

impl Project {
    pub fn load(root: Option<PathBuf>, config: Option<&Path>) -> Result<Self> {
        let root = match root {
            Some(root) => root,
            None => std::env::current_dir().context("reading current directory")?,
        };
        let config = match config {
            Some(path) => SystemConfig::load(path)?,
            None => SystemConfig::discover(&root)?,
        };
        tracing::debug!(root = %root.display(), "loaded project");
        Ok(Self { root, config })
    }

    /// Output root, `override_dir` winning over `[paths] output_dir`
    pub fn output_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        let dir = override_dir.unwrap_or(&self.config.paths.output_dir);
        self.root.join(dir)
    }

    pub fn ledger_path(&self, override_dir: Option<&Path>) -> PathBuf {
        self.output_dir(override_dir).join(LEDGER_FILE)
    }

    /// Built-ins plus every declaration found under `[paths] plugin_dirs`
    pub fn catalog(&self) -> Result<Catalog> {
        let mut catalog = Catalog::with_resolver(builtin_symbols());
        register_builtins(&mut catalog)?;

        let dirs: Vec<PathBuf> = self
            .config
            .paths
            .plugin_dirs
            .iter()
            .map(|dir| self.root.join(dir))
            .collect();
        let declarations = discover(&dirs)?;
        let count = catalog.ingest(declarations)?;
        tracing::debug!(count, entries = catalog.len(), "catalog ready");
        Ok(catalog)
    }

    pub fn load_jobs(&self, files: &[PathBuf]) -> Result<Vec<JobDescription>> {
        let mut jobs = Vec::new();
        for file in files {
            let loaded = pj_runbook::load_job_file(file)
                .with_context(|| format!("loading job file {}", file.display()))?;
            jobs.extend(loaded);
        }
        Ok(jobs)
    }
}
