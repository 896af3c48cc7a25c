// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde::Deserialize;
use serde_json::json;
use yare::parameterized;

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SolverConfig {
    dt: f64,
    #[serde(default)]
    steps: u32,
}

#[test]
fn fills_defaults() {
    let schema = SerdeSchema::<SolverConfig>::new();
    assert_eq!(
        schema.validate(&json!({"dt": 0.5})).unwrap(),
        json!({"dt": 0.5, "steps": 0})
    );
}

#[parameterized(
    missing = { json!({}), "dt" },
    unknown = { json!({"dt": 0.1, "stepz": 3}), "stepz" },
    wrong_type = { json!({"dt": "fast"}), "$" },
)]
fn reports_offending_field(raw: Value, field: &str) {
    let schema = SerdeSchema::<SolverConfig>::new();
    let err = schema.validate(&raw).unwrap_err();
    assert_eq!(err.errors.len(), 1);
    assert_eq!(err.errors[0].field, field);
    assert!(!err.errors[0].message.is_empty());
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct AllDefaults {
    #[serde(default)]
    verbose: bool,
}

#[test]
fn null_config_means_all_defaults() {
    let schema = SerdeSchema::<AllDefaults>::new();
    assert_eq!(schema.validate(&Value::Null).unwrap(), json!({"verbose": false}));
}
