// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parameter map helpers

use serde_json::{Map, Value};

/// Deep-merge `overrides` into `base`
///
/// Nested objects merge key by key; any other value in `overrides`
/// replaces the one in `base`.
pub fn deep_merge(base: &mut Map<String, Value>, overrides: &Map<String, Value>) {
    for (key, value) in overrides {
        match (base.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                deep_merge(existing, incoming);
            }
            _ => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Return `defaults` with `overrides` deep-merged on top
pub fn merged(defaults: &Map<String, Value>, overrides: &Map<String, Value>) -> Map<String, Value> {
    let mut out = defaults.clone();
    deep_merge(&mut out, overrides);
    out
}
