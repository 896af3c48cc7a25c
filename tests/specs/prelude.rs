// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for specs

#![allow(dead_code)]

pub use similar_asserts::assert_eq;

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A scan over one engine setting, used across specs
pub const SCAN_JOB: &str = r#"
[[job]]
name = "scan"

[job.engine.record]
dt = { values = [0.1, 0.2] }
"#;

/// Temporary project directory
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("xdg")).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root
    pub fn file(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path().join(rel)).unwrap()
    }

    /// `pj` invocation inside this project
    pub fn pj(&self) -> CliBuilder {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin("pj"));
        cmd.current_dir(self.path())
            .env("XDG_CONFIG_HOME", self.path().join("xdg"))
            .env("HOME", self.path())
            .env_remove("PJ_LOG");
        CliBuilder { cmd }
    }

    /// Run directories under `runs/`, sorted by name
    pub fn run_dirs(&self) -> Vec<PathBuf> {
        let Ok(entries) = std::fs::read_dir(self.path().join("runs")) else {
            return Vec::new();
        };
        let mut dirs: Vec<PathBuf> = entries.flatten().map(|e| e.path()).filter(|p| p.is_dir()).collect();
        dirs.sort();
        dirs
    }

    /// The `output.json` record written by the run of `job`
    pub fn record_of(&self, job: &str) -> serde_json::Value {
        self.run_dirs()
            .into_iter()
            .filter_map(|dir| std::fs::read_to_string(dir.join("output.json")).ok())
            .filter_map(|s| serde_json::from_str::<serde_json::Value>(&s).ok())
            .find(|record| record["job"] == job)
            .unwrap_or_else(|| panic!("no record for job {job}"))
    }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    /// Run and require exit status 0
    pub fn passes(self) -> RunAssert {
        self.exits(0)
    }

    /// Run and require the given exit status
    pub fn exits(mut self, code: i32) -> RunAssert {
        let run = RunAssert {
            output: self.cmd.output().unwrap(),
        };
        assert!(
            run.output.status.code() == Some(code),
            "expected exit {code}, got {:?}\nstdout:\n{}\nstderr:\n{}",
            run.output.status.code(),
            run.stdout(),
            run.stderr()
        );
        run
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(&self, needle: &str) -> &Self {
        let stdout = self.stdout();
        assert!(stdout.contains(needle), "stdout missing {needle:?}:\n{stdout}");
        self
    }

    pub fn stdout_lacks(&self, needle: &str) -> &Self {
        let stdout = self.stdout();
        assert!(!stdout.contains(needle), "stdout has {needle:?}:\n{stdout}");
        self
    }

    pub fn stderr_has(&self, needle: &str) -> &Self {
        let stderr = self.stderr();
        assert!(stderr.contains(needle), "stderr missing {needle:?}:\n{stderr}");
        self
    }

    /// Whole stdout, compared with a readable diff
    pub fn stdout_eq(&self, expected: &str) -> &Self {
        assert_eq!(self.stdout(), expected);
        self
    }
}
