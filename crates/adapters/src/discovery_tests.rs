// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::builtin_symbols;
use pj_catalog::{Catalog, Companions, EntryKind};
use serde_json::Value;

const SOLVERS: &str = r#"
[[plugin]]
namespace = "engine"
name = "recorder"
reference = "pj.builtin:RecordEngine"

[[plugin]]
namespace = "loader"
name = "json2"
reference = "pj.builtin:JsonLoader"
overwrite = true
"#;

#[test]
fn parses_plugin_tables() {
    let decls = parse_declarations(SOLVERS, Path::new("solvers.plugins.toml")).unwrap();
    assert_eq!(decls.len(), 2);
    assert_eq!(decls[0].reference, "pj.builtin:RecordEngine");
    assert!(!decls[0].overwrite);
    assert!(decls[1].overwrite);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = parse_declarations(
        "[[plugin]]\nnamespace = \"a\"\nname = \"b\"\nreference = \"m:S\"\nlazy = true\n",
        Path::new("x.plugins.toml"),
    )
    .unwrap_err();
    assert!(err.to_string().contains("x.plugins.toml"));
}

#[test]
fn discover_reads_matching_files_in_order() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("b.plugins.toml"), SOLVERS).unwrap();
    std::fs::write(
        dir.path().join("a.plugins.toml"),
        "[[plugin]]\nnamespace = \"model\"\nname = \"wave\"\nreference = \"models:Wave\"\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("notes.toml"), "not = [valid").unwrap();

    let dirs = vec![dir.path().to_path_buf(), dir.path().join("absent")];
    let decls = discover(&dirs).unwrap();
    let names: Vec<&str> = decls.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["wave", "recorder", "json2"]);
}

#[test]
fn discovered_entries_resolve_through_builtin_symbols() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("solvers.plugins.toml"), SOLVERS).unwrap();

    let mut catalog = Catalog::with_resolver(builtin_symbols());
    let count = catalog.ingest(discover(&[dir.path().to_path_buf()]).unwrap()).unwrap();
    assert_eq!(count, 2);
    assert_eq!(catalog.list(None)[0].kind, EntryKind::Deferred);

    let engine = catalog
        .create("engine", "recorder", &Value::Null, &Companions::new())
        .unwrap();
    assert!(engine.into_engine().is_ok());
}
