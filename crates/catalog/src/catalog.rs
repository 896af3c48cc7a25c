// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The component catalog

use crate::component::{Companions, Instance, Plugin};
use crate::entry::{Entry, EntryInfo};
use crate::error::CatalogError;
use crate::manifest::DependencyManifest;
use crate::resolver::{Resolver, SymbolTable};
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

// Identity pattern for namespaces and names - this is a constant valid pattern
#[allow(clippy::expect_used)]
static IDENTITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_][a-z0-9_.-]*$").expect("constant regex pattern is valid"));

/// What a declaration registers
pub enum Declared {
    Immediate(Plugin),
    /// A `module:Symbol` reference, resolved on first use
    Deferred(String),
}

/// One entry to bulk-load with [`Catalog::ingest`]
pub struct Declaration {
    pub namespace: String,
    pub name: String,
    pub target: Declared,
    pub overwrite: bool,
}

/// Namespace-partitioned registry of component implementations
///
/// Built once by the entry point and passed by reference. Lookups and
/// deferred resolution only need `&self`.
pub struct Catalog {
    entries: BTreeMap<(String, String), Entry>,
    resolver: Arc<dyn Resolver>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// An empty catalog whose deferred entries resolve against nothing
    pub fn new() -> Self {
        Self::with_resolver(SymbolTable::new())
    }

    pub fn with_resolver(resolver: impl Resolver + 'static) -> Self {
        Self {
            entries: BTreeMap::new(),
            resolver: Arc::new(resolver),
        }
    }

    pub fn register(&mut self, namespace: &str, name: &str, plugin: Plugin) -> Result<(), CatalogError> {
        self.insert(namespace, name, Entry::Immediate(plugin), false)
    }

    /// Register, replacing any existing entry
    pub fn replace(&mut self, namespace: &str, name: &str, plugin: Plugin) -> Result<(), CatalogError> {
        self.insert(namespace, name, Entry::Immediate(plugin), true)
    }

    /// Register a reference that is resolved on first use
    pub fn register_deferred(
        &mut self,
        namespace: &str,
        name: &str,
        reference: &str,
    ) -> Result<(), CatalogError> {
        self.insert(namespace, name, Entry::deferred(reference), false)
    }

    pub fn replace_deferred(
        &mut self,
        namespace: &str,
        name: &str,
        reference: &str,
    ) -> Result<(), CatalogError> {
        self.insert(namespace, name, Entry::deferred(reference), true)
    }

    /// Bulk-load declarations; returns how many were registered
    ///
    /// Stops at the first declaration that fails; earlier ones stay.
    pub fn ingest(
        &mut self,
        declarations: impl IntoIterator<Item = Declaration>,
    ) -> Result<usize, CatalogError> {
        let mut count = 0;
        for decl in declarations {
            let entry = match decl.target {
                Declared::Immediate(plugin) => Entry::Immediate(plugin),
                Declared::Deferred(reference) => Entry::deferred(reference),
            };
            self.insert(&decl.namespace, &decl.name, entry, decl.overwrite)?;
            count += 1;
        }
        Ok(count)
    }

    fn insert(
        &mut self,
        namespace: &str,
        name: &str,
        entry: Entry,
        overwrite: bool,
    ) -> Result<(), CatalogError> {
        let key = identity(namespace, name)?;
        if !overwrite && self.entries.contains_key(&key) {
            return Err(CatalogError::DuplicateEntry {
                namespace: key.0,
                name: key.1,
            });
        }
        tracing::debug!(
            namespace = %key.0,
            name = %key.1,
            kind = %entry.kind(),
            overwrite,
            "registered component"
        );
        self.entries.insert(key, entry);
        Ok(())
    }

    pub fn contains(&self, namespace: &str, name: &str) -> bool {
        identity(namespace, name).is_ok_and(|key| self.entries.contains_key(&key))
    }

    /// Distinct namespaces, sorted
    pub fn namespaces(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for (ns, _) in self.entries.keys() {
            if out.last() != Some(ns) {
                out.push(ns.clone());
            }
        }
        out
    }

    /// Entry metadata sorted by namespace then name
    ///
    /// Never resolves deferred entries or builds anything.
    pub fn list(&self, namespace: Option<&str>) -> Vec<EntryInfo> {
        let filter = namespace.map(normalize);
        self.entries
            .iter()
            .filter(|((ns, _), _)| filter.as_deref().map_or(true, |f| f == ns))
            .map(|((ns, name), entry)| entry.info(ns, name))
            .collect()
    }

    /// Metadata for one entry, without resolving it
    pub fn info(&self, namespace: &str, name: &str) -> Option<EntryInfo> {
        let key = identity(namespace, name).ok()?;
        self.entries.get(&key).map(|entry| entry.info(&key.0, &key.1))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Manifest attached to an entry, resolving it if deferred
    pub fn manifest(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<&DependencyManifest>, CatalogError> {
        let (_, plugin) = self.plugin(namespace, name)?;
        Ok(plugin.manifest())
    }

    /// Look up, resolve and validate without constructing anything
    ///
    /// Returns the normalised config the factory would receive.
    pub fn validate_config(&self, namespace: &str, name: &str, raw: &Value) -> Result<Value, CatalogError> {
        let (key, plugin) = self.plugin(namespace, name)?;
        validated(&key, plugin, raw)
    }

    /// Build a component
    ///
    /// Look up, resolve (deferred entries, once), validate `raw` against the
    /// plugin's schema, then call its factory with `companions`.
    pub fn create(
        &self,
        namespace: &str,
        name: &str,
        raw: &Value,
        companions: &Companions,
    ) -> Result<Instance, CatalogError> {
        let (key, plugin) = self.plugin(namespace, name)?;
        let config = validated(&key, plugin, raw)?;
        let instance = plugin
            .factory()
            .build(config, companions)
            .map_err(|source| CatalogError::ComponentConstruct {
                namespace: key.0.clone(),
                name: key.1.clone(),
                source,
            })?;
        tracing::debug!(namespace = %key.0, name = %key.1, kind = instance.kind(), "built component");
        Ok(instance)
    }

    fn plugin(&self, namespace: &str, name: &str) -> Result<((String, String), &Plugin), CatalogError> {
        let key = identity(namespace, name)?;
        let Some(entry) = self.entries.get(&key) else {
            return Err(CatalogError::UnknownComponent {
                namespace: key.0,
                name: key.1,
            });
        };
        match entry.plugin(self.resolver.as_ref()) {
            Ok(plugin) => Ok((key, plugin)),
            Err(source) => Err(CatalogError::ComponentLoad {
                namespace: key.0,
                name: key.1,
                source,
            }),
        }
    }
}

fn validated(key: &(String, String), plugin: &Plugin, raw: &Value) -> Result<Value, CatalogError> {
    match plugin.schema() {
        Some(schema) => schema.validate(raw).map_err(|source| CatalogError::ComponentConfig {
            namespace: key.0.clone(),
            name: key.1.clone(),
            source,
        }),
        None => Ok(raw.clone()),
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

fn identity(namespace: &str, name: &str) -> Result<(String, String), CatalogError> {
    let check = |what: &'static str, raw: &str| {
        let value = normalize(raw);
        if IDENTITY_PATTERN.is_match(&value) {
            Ok(value)
        } else {
            Err(CatalogError::InvalidIdentity { what, value })
        }
    };
    Ok((check("namespace", namespace)?, check("name", name)?))
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
