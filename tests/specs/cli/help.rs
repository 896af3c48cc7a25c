// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help specs

use crate::prelude::*;

#[test]
fn help_lists_every_command() {
    let temp = Project::empty();
    let run = temp.pj().args(&["--help"]).passes();
    for command in ["run", "expand", "list", "replay", "history"] {
        run.stdout_has(command);
    }
}

#[test]
fn run_help_documents_modes() {
    let temp = Project::empty();
    temp.pj()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("--fail-fast")
        .stdout_has("--dry-run")
        .stdout_has("--output-dir");
}

#[test]
fn version_flag() {
    let temp = Project::empty();
    temp.pj().args(&["--version"]).passes().stdout_has("pj");
}
