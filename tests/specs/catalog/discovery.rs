// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Catalog specs: built-ins, declaration files and deferred entries

use crate::prelude::*;

#[test]
fn builtins_are_always_listed() {
    let temp = Project::empty();
    temp.pj()
        .args(&["list"])
        .passes()
        .stdout_has("engine/record")
        .stdout_has("loader/json")
        .stdout_has("immediate");
}

#[test]
fn declared_entries_stay_deferred_until_used() {
    let temp = Project::empty();
    temp.file(
        "plugins/aliases.plugins.toml",
        r#"
[[plugin]]
namespace = "engine"
name = "recorder"
reference = "pj.builtin:RecordEngine"
"#,
    );
    temp.pj()
        .args(&["list", "engine"])
        .passes()
        .stdout_has("engine/recorder")
        .stdout_has("deferred")
        .stdout_has("pj.builtin:RecordEngine");

    temp.file("job.toml", "engine = \"recorder\"\n");
    temp.pj().args(&["run", "job.toml"]).passes();
    temp.record_of("job");
}

#[test]
fn unresolvable_reference_fails_only_its_jobs() {
    let temp = Project::empty();
    temp.file(
        "plugins/legacy.plugins.toml",
        r#"
[[plugin]]
namespace = "engine"
name = "legacy"
reference = "solvers.legacy:Fortran"
"#,
    );
    temp.file(
        "jobs.toml",
        r#"
[[job]]
name = "old"
engine = "legacy"

[[job]]
name = "new"
engine = "record"
"#,
    );
    temp.pj()
        .args(&["run", "jobs.toml"])
        .exits(1)
        .stdout_has("failed to load engine/legacy")
        .stdout_has("2 job(s): 1 succeeded, 1 failed");
}

#[test]
fn duplicate_declaration_needs_overwrite() {
    let temp = Project::empty();
    temp.file(
        "plugins/dup.plugins.toml",
        r#"
[[plugin]]
namespace = "engine"
name = "record"
reference = "pj.builtin:RecordEngine"
"#,
    );
    temp.pj()
        .args(&["list"])
        .exits(2)
        .stderr_has("engine/record is already registered");

    temp.file(
        "plugins/dup.plugins.toml",
        r#"
[[plugin]]
namespace = "engine"
name = "record"
reference = "pj.builtin:RecordEngine"
overwrite = true
"#,
    );
    temp.pj()
        .args(&["list", "engine"])
        .passes()
        .stdout_has("pj.builtin:RecordEngine");
}

#[test]
fn plugin_dirs_come_from_config() {
    let temp = Project::empty();
    temp.file("pj.toml", "[paths]\nplugin_dirs = [\"vendor/pj\"]\n");
    temp.file(
        "vendor/pj/extra.plugins.toml",
        r#"
[[plugin]]
namespace = "loader"
name = "state"
reference = "pj.builtin:JsonLoader"
"#,
    );
    temp.pj().args(&["list", "loader"]).passes().stdout_has("loader/state");
}
