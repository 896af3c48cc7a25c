// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plugin declaration files
//!
//! Each `*.plugins.toml` file in a plugin directory declares deferred
//! entries:
//!
//! ```toml
//! [[plugin]]
//! namespace = "engine"
//! name = "heat"
//! reference = "solvers:Heat"
//! overwrite = false
//! ```

use pj_catalog::{Declaration, Declared};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SUFFIX: &str = ".plugins.toml";

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid declaration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// One `[[plugin]]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginDecl {
    pub namespace: String,
    pub name: String,
    pub reference: String,
    #[serde(default)]
    pub overwrite: bool,
}

impl From<PluginDecl> for Declaration {
    fn from(decl: PluginDecl) -> Self {
        Declaration {
            namespace: decl.namespace,
            name: decl.name,
            target: Declared::Deferred(decl.reference),
            overwrite: decl.overwrite,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DeclFile {
    #[serde(default)]
    plugin: Vec<PluginDecl>,
}

/// Parse the content of one declaration file
pub fn parse_declarations(content: &str, path: &Path) -> Result<Vec<PluginDecl>, DiscoveryError> {
    let file: DeclFile = toml::from_str(content).map_err(|source| DiscoveryError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(file.plugin)
}

/// Collect declarations from every directory, in directory order then file name order
///
/// Directories that do not exist are skipped.
pub fn discover(dirs: &[PathBuf]) -> Result<Vec<Declaration>, DiscoveryError> {
    let mut declarations = Vec::new();
    for dir in dirs {
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "plugin directory not found, skipping");
            continue;
        }
        let io_err = |source: std::io::Error| DiscoveryError::Io {
            path: dir.clone(),
            source,
        };
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(io_err)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(SUFFIX))
            })
            .collect();
        files.sort();

        for path in files {
            let content = std::fs::read_to_string(&path).map_err(|source| DiscoveryError::Io {
                path: path.clone(),
                source,
            })?;
            let decls = parse_declarations(&content, &path)?;
            tracing::debug!(path = %path.display(), count = decls.len(), "read plugin declarations");
            declarations.extend(decls.into_iter().map(Declaration::from));
        }
    }
    Ok(declarations)
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
