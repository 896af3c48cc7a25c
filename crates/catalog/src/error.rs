// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Catalog error types

use crate::component::BoxError;
use crate::resolver::ResolveError;
use crate::schema::SchemaViolation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid {what} '{value}': expected [a-z0-9_][a-z0-9_.-]*")]
    InvalidIdentity { what: &'static str, value: String },

    #[error("{namespace}/{name} is already registered")]
    DuplicateEntry { namespace: String, name: String },

    #[error("unknown component {namespace}/{name}")]
    UnknownComponent { namespace: String, name: String },

    #[error("failed to load {namespace}/{name}: {source}")]
    ComponentLoad {
        namespace: String,
        name: String,
        #[source]
        source: ResolveError,
    },

    #[error("invalid config for {namespace}/{name}: {source}")]
    ComponentConfig {
        namespace: String,
        name: String,
        #[source]
        source: SchemaViolation,
    },

    #[error("failed to construct {namespace}/{name}: {source}")]
    ComponentConstruct {
        namespace: String,
        name: String,
        #[source]
        source: BoxError,
    },
}
