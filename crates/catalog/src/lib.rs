// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Component catalog and dependency manifests
//!
//! The catalog maps `(namespace, name)` to a plugin that can build an
//! engine, a loader, or any other companion component. Entries are either
//! registered directly or deferred behind a `module:Symbol` reference that
//! is resolved on first use.

mod catalog;
mod component;
mod entry;
mod error;
mod manifest;
mod resolver;
mod schema;

pub use catalog::{Catalog, Declaration, Declared};
pub use component::{BoxError, Companions, Engine, Factory, Instance, Loader, Plugin};
pub use entry::{EntryInfo, EntryKind, Resolution};
pub use error::CatalogError;
pub use manifest::{DependencyManifest, ManifestError, MissingDependencies};
pub use resolver::{Reference, ResolveError, Resolver, SymbolTable};
pub use schema::{ConfigSchema, FieldError, SchemaViolation, SerdeSchema};

/// Namespace the scheduler builds engines from
pub const ENGINE_NAMESPACE: &str = "engine";
/// Namespace the scheduler builds input loaders from
pub const LOADER_NAMESPACE: &str = "loader";
