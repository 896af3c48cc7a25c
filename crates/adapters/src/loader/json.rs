// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loads a JSON document as job input

use pj_catalog::{BoxError, Companions, Instance, Loader, Plugin};
use pj_core::Output;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonLoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path} has nothing at {pointer}")]
    Pointer { path: PathBuf, pointer: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonLoaderConfig {
    /// JSON pointer selecting part of the document, e.g. `/state`
    #[serde(default)]
    pub pointer: Option<String>,
    /// Directory relative locations are resolved against
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
}

/// Reads a file and yields its content as a `serde_json::Value` output
#[derive(Debug, Clone, Default)]
pub struct JsonLoader {
    config: JsonLoaderConfig,
}

impl JsonLoader {
    pub fn new(config: JsonLoaderConfig) -> Self {
        Self { config }
    }

    pub fn plugin() -> Plugin {
        Plugin::typed(|config: JsonLoaderConfig, _: &Companions| {
            Ok(Instance::loader(JsonLoader::new(config)))
        })
        .with_description("read job input from a JSON file")
    }

    fn read(&self, location: &str) -> Result<Value, JsonLoadError> {
        let path = match &self.config.base_dir {
            Some(base) => base.join(location),
            None => PathBuf::from(location),
        };
        let content = std::fs::read_to_string(&path).map_err(|source| JsonLoadError::Read {
            path: path.clone(),
            source,
        })?;
        let document: Value = serde_json::from_str(&content).map_err(|source| JsonLoadError::Parse {
            path: path.clone(),
            source,
        })?;
        match &self.config.pointer {
            None => Ok(document),
            Some(pointer) => document
                .pointer(pointer)
                .cloned()
                .ok_or_else(|| JsonLoadError::Pointer {
                    path,
                    pointer: pointer.clone(),
                }),
        }
    }
}

impl Loader for JsonLoader {
    fn load(&self, location: &str) -> Result<Output, BoxError> {
        Ok(Output::new(self.read(location)?))
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
