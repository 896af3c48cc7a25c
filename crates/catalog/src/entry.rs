// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Catalog entries and their introspection records

use crate::component::Plugin;
use crate::resolver::{ResolveError, Resolver};
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Immediate,
    Deferred,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Immediate => f.write_str("immediate"),
            EntryKind::Deferred => f.write_str("deferred"),
        }
    }
}

/// Whether an entry's plugin is available yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "error", rename_all = "lowercase")]
pub enum Resolution {
    /// Immediate entry, or deferred entry resolved successfully
    Ready,
    /// Deferred entry not used yet
    Pending,
    /// Deferred entry whose resolution failed; not retried
    Failed(String),
}

/// Metadata for one entry, as returned by `Catalog::list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryInfo {
    pub namespace: String,
    pub name: String,
    pub kind: EntryKind,
    /// Deferred reference, if any
    pub reference: Option<String>,
    pub description: Option<String>,
    pub resolution: Resolution,
}

pub(crate) enum Entry {
    Immediate(Plugin),
    Deferred {
        reference: String,
        resolved: OnceLock<Result<Plugin, ResolveError>>,
    },
}

impl Entry {
    pub(crate) fn deferred(reference: impl Into<String>) -> Self {
        Entry::Deferred {
            reference: reference.into(),
            resolved: OnceLock::new(),
        }
    }

    pub(crate) fn kind(&self) -> EntryKind {
        match self {
            Entry::Immediate(_) => EntryKind::Immediate,
            Entry::Deferred { .. } => EntryKind::Deferred,
        }
    }

    /// The plugin, resolving a deferred entry on first call
    ///
    /// The first outcome is kept, so a failed reference is reported on
    /// every later call without asking the resolver again.
    pub(crate) fn plugin(&self, resolver: &dyn Resolver) -> Result<&Plugin, ResolveError> {
        match self {
            Entry::Immediate(plugin) => Ok(plugin),
            Entry::Deferred {
                reference,
                resolved,
            } => resolved
                .get_or_init(|| {
                    tracing::debug!(reference = %reference, "resolving deferred component");
                    resolver.resolve(reference)
                })
                .as_ref()
                .map_err(Clone::clone),
        }
    }

    pub(crate) fn info(&self, namespace: &str, name: &str) -> EntryInfo {
        let (reference, description, resolution) = match self {
            Entry::Immediate(plugin) => (
                None,
                plugin.description().map(str::to_string),
                Resolution::Ready,
            ),
            Entry::Deferred {
                reference,
                resolved,
            } => match resolved.get() {
                None => (Some(reference.clone()), None, Resolution::Pending),
                Some(Ok(plugin)) => (
                    Some(reference.clone()),
                    plugin.description().map(str::to_string),
                    Resolution::Ready,
                ),
                Some(Err(e)) => (
                    Some(reference.clone()),
                    None,
                    Resolution::Failed(e.to_string()),
                ),
            },
        };
        EntryInfo {
            namespace: namespace.to_string(),
            name: name.to_string(),
            kind: self.kind(),
            reference,
            description,
            resolution,
        }
    }
}
