// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! System configuration (`pj.toml`)
//!
//! Looked up in the project root first, then in the user config directory.
//! A missing file means defaults; a present but malformed file is an error.

use crate::job::{CombineMode, Params};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// File name searched for in the project root and the user config dir
pub const CONFIG_FILE: &str = "pj.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SystemConfig {
    pub paths: PathsConfig,
    pub scan: ScanConfig,
    pub run: RunConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Root under which every run directory and the ledger are created
    pub output_dir: PathBuf,
    /// Directories scanned for `*.plugins.toml` declaration files
    pub plugin_dirs: Vec<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./runs"),
            plugin_dirs: vec![PathBuf::from("./plugins")],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// When false, job descriptions run exactly as written
    pub enabled: bool,
    /// Combine mode for jobs that do not set one
    pub method: CombineMode,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            method: CombineMode::Cartesian,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub fail_fast: bool,
    /// Minimum spacing between forwarded engine progress updates
    #[serde(with = "humantime_serde")]
    pub progress_interval: Duration,
    /// Append every job result to `<output_dir>/ledger.jsonl`
    pub ledger: bool,
    /// Save persistent outputs of succeeded jobs as `<run_dir>/<output or name>`
    pub save_outputs: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            progress_interval: Duration::from_millis(100),
            ledger: true,
            save_outputs: true,
        }
    }
}

/// Parameter defaults merged underneath job-supplied values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Engine name -> settings
    pub engine: BTreeMap<String, Params>,
    /// Namespace -> component name -> params
    pub components: BTreeMap<String, BTreeMap<String, Params>>,
}

impl DefaultsConfig {
    pub fn engine(&self, name: &str) -> Option<&Params> {
        self.engine.get(name)
    }

    pub fn component(&self, namespace: &str, name: &str) -> Option<&Params> {
        self.components.get(namespace)?.get(name)
    }
}

impl SystemConfig {
    /// Parse a config document
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a config file that must exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Find the first config file in `project_root`, then the user config dir
    pub fn locate(project_root: &Path) -> Option<PathBuf> {
        std::iter::once(project_root.join(CONFIG_FILE))
            .chain(dirs::config_dir().map(|d| d.join("pj").join(CONFIG_FILE)))
            .find(|p| p.is_file())
    }

    /// Load the first config found, or defaults when there is none
    pub fn discover(project_root: &Path) -> Result<Self, ConfigError> {
        match Self::locate(project_root) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading system config");
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod tests;
