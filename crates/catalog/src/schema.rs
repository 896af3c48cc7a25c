// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config validation for plugins

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

/// One problem with one field of a component config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name, or `$` when the problem is not tied to a field
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Config rejected by a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub errors: Vec<FieldError>,
}

impl SchemaViolation {
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field: field.into(),
                message: message.into(),
            }],
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for SchemaViolation {}

/// Validates raw config and returns it in normalised form
pub trait ConfigSchema: Send + Sync {
    fn validate(&self, raw: &Value) -> Result<Value, SchemaViolation>;
}

/// Schema derived from a serde config struct
///
/// Validation deserializes into `C` and serializes it back, so defaults
/// declared on `C` show up in the normalised config.
pub struct SerdeSchema<C>(PhantomData<fn() -> C>);

impl<C> SerdeSchema<C> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<C> Default for SerdeSchema<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ConfigSchema for SerdeSchema<C>
where
    C: DeserializeOwned + Serialize,
{
    fn validate(&self, raw: &Value) -> Result<Value, SchemaViolation> {
        // Absent config means "all defaults"
        let raw = match raw {
            Value::Null => Value::Object(Default::default()),
            other => other.clone(),
        };
        let typed: C = serde_json::from_value(raw).map_err(|e| violation_from(&e))?;
        serde_json::to_value(&typed).map_err(|e| SchemaViolation::field("$", e.to_string()))
    }
}

/// Pull the field name out of serde's `missing field` / `unknown field` messages
fn violation_from(err: &serde_json::Error) -> SchemaViolation {
    let message = err.to_string();
    let field = ["missing field `", "unknown field `", "duplicate field `"]
        .iter()
        .find_map(|prefix| {
            let rest = message.strip_prefix(prefix)?;
            rest.split('`').next()
        })
        .unwrap_or("$");
    SchemaViolation::field(field, message.clone())
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
