// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration modules

mod system;

pub use system::{
    ConfigError, DefaultsConfig, PathsConfig, RunConfig, ScanConfig, SystemConfig, CONFIG_FILE,
};
