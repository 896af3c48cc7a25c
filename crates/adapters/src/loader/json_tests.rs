// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

fn write_doc(dir: &std::path::Path) -> PathBuf {
    let path = dir.join("initial.json");
    std::fs::write(&path, r#"{"state": {"u": [1, 2, 3]}, "meta": "x"}"#).unwrap();
    path
}

#[test]
fn loads_whole_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(dir.path());
    let output = JsonLoader::default().load(path.to_str().unwrap()).unwrap();
    assert_eq!(output.downcast_ref::<Value>().unwrap()["meta"], json!("x"));
}

#[test]
fn pointer_and_base_dir() {
    let dir = tempfile::tempdir().unwrap();
    write_doc(dir.path());
    let loader = JsonLoader::new(JsonLoaderConfig {
        pointer: Some("/state/u".to_string()),
        base_dir: Some(dir.path().to_path_buf()),
    });
    let output = loader.load("initial.json").unwrap();
    assert_eq!(output.downcast_ref::<Value>(), Some(&json!([1, 2, 3])));

    let missing = JsonLoader::new(JsonLoaderConfig {
        pointer: Some("/nope".to_string()),
        base_dir: Some(dir.path().to_path_buf()),
    });
    let err = missing.load("initial.json").unwrap_err();
    assert!(err.to_string().contains("nothing at /nope"));
}

#[test]
fn missing_and_malformed_files() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{").unwrap();
    assert!(JsonLoader::default().load(bad.to_str().unwrap()).is_err());
    assert!(JsonLoader::default()
        .load(dir.path().join("absent.json").to_str().unwrap())
        .is_err());
}

#[test]
fn plugin_builds_a_loader() {
    let plugin = JsonLoader::plugin();
    let config = plugin.schema().unwrap().validate(&json!({"pointer": "/a"})).unwrap();
    let instance = plugin.factory().build(config, &Companions::new()).unwrap();
    assert!(instance.into_loader().is_ok());
}
