// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Empty project directory; the user config dir is pointed inside it so a
/// developer's own pj.toml never leaks into tests.
pub fn setup_project() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    fs::create_dir_all(temp.path().join("xdg")).expect("Failed to create config dir");
    temp
}

/// `pj` command rooted at `project`
pub fn pj(project: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("pj").expect("pj binary");
    cmd.current_dir(project)
        .env("XDG_CONFIG_HOME", project.join("xdg"))
        .env("HOME", project)
        .env_remove("PJ_LOG");
    cmd
}

pub fn write(project: &Path, name: &str, content: &str) -> PathBuf {
    let path = project.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    fs::write(&path, content).expect("Failed to write file");
    path
}

/// Run directories under `<project>/runs`, sorted by run id
pub fn run_dirs(project: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(project.join("runs")) else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    dirs
}

pub const SCAN_JOB: &str = r#"
[[job]]
name = "scan"

[job.engine.record]
dt = { values = [0.1, 0.2] }
"#;
