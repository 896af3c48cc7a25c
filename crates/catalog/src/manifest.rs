// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Companion namespaces an engine requires

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    #[error("namespaces both required and optional: {}", .0.join(", "))]
    Overlap(Vec<String>),
}

/// Required namespaces absent from a job
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required components: {}", .missing.join(", "))]
pub struct MissingDependencies {
    /// Sorted
    pub missing: Vec<String>,
}

/// Declares which companion namespaces an engine needs
///
/// `required` and `optional` never overlap. `defaults` names the component
/// used for a namespace when the job does not pick one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawManifest")]
pub struct DependencyManifest {
    required: BTreeSet<String>,
    optional: BTreeSet<String>,
    defaults: BTreeMap<String, String>,
}

impl DependencyManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from explicit sets, rejecting overlap
    pub fn from_parts(
        required: impl IntoIterator<Item = impl Into<String>>,
        optional: impl IntoIterator<Item = impl Into<String>>,
        defaults: BTreeMap<String, String>,
    ) -> Result<Self, ManifestError> {
        let required: BTreeSet<String> = required.into_iter().map(Into::into).collect();
        let optional: BTreeSet<String> = optional.into_iter().map(Into::into).collect();
        let overlap: Vec<String> = required.intersection(&optional).cloned().collect();
        if !overlap.is_empty() {
            return Err(ManifestError::Overlap(overlap));
        }
        Ok(Self {
            required,
            optional,
            defaults,
        })
    }

    /// Mark `namespace` required, removing it from the optional set
    pub fn require(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        self.optional.remove(&namespace);
        self.required.insert(namespace);
        self
    }

    /// Mark `namespace` optional; ignored if already required
    pub fn optional(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        if !self.required.contains(&namespace) {
            self.optional.insert(namespace);
        }
        self
    }

    pub fn with_default(mut self, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        self.defaults.insert(namespace.into(), name.into());
        self
    }

    pub fn required(&self) -> &BTreeSet<String> {
        &self.required
    }

    pub fn optional_namespaces(&self) -> &BTreeSet<String> {
        &self.optional
    }

    pub fn defaults(&self) -> &BTreeMap<String, String> {
        &self.defaults
    }

    pub fn default_for(&self, namespace: &str) -> Option<&str> {
        self.defaults.get(namespace).map(String::as_str)
    }

    /// Check that every required namespace is among `present`
    pub fn check<'a>(
        &self,
        present: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), MissingDependencies> {
        let present: BTreeSet<&str> = present.into_iter().collect();
        let missing: Vec<String> = self
            .required
            .iter()
            .filter(|ns| !present.contains(ns.as_str()))
            .cloned()
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(MissingDependencies { missing })
        }
    }
}

/// Deserialized form, checked through [`DependencyManifest::from_parts`]
#[derive(Deserialize)]
struct RawManifest {
    #[serde(default)]
    required: BTreeSet<String>,
    #[serde(default)]
    optional: BTreeSet<String>,
    #[serde(default)]
    defaults: BTreeMap<String, String>,
}

impl TryFrom<RawManifest> for DependencyManifest {
    type Error = ManifestError;

    fn try_from(raw: RawManifest) -> Result<Self, Self::Error> {
        Self::from_parts(raw.required, raw.optional, raw.defaults)
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
