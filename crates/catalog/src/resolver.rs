// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolution of deferred `module:Symbol` references

use crate::component::Plugin;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("malformed reference '{0}': expected 'module:Symbol'")]
    Malformed(String),
    #[error("no symbol '{symbol}' in module '{module}'")]
    UnknownSymbol { module: String, symbol: String },
    /// The implementing module exists but was not built into this binary
    #[error("'{reference}' is unavailable: {reason}")]
    Unavailable { reference: String, reason: String },
}

/// A parsed `module:Symbol` reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'a> {
    pub module: &'a str,
    pub symbol: &'a str,
}

impl<'a> Reference<'a> {
    pub fn parse(reference: &'a str) -> Result<Self, ResolveError> {
        let malformed = || ResolveError::Malformed(reference.to_string());
        let (module, symbol) = reference.split_once(':').ok_or_else(malformed)?;
        let (module, symbol) = (module.trim(), symbol.trim());
        if module.is_empty() || symbol.is_empty() || symbol.contains(':') {
            return Err(malformed());
        }
        Ok(Self { module, symbol })
    }
}

/// Turns a deferred reference into a plugin
pub trait Resolver: Send + Sync {
    fn resolve(&self, reference: &str) -> Result<Plugin, ResolveError>;
}

#[derive(Clone)]
enum Symbol {
    Linked(Plugin),
    Unavailable(String),
}

/// Resolver over plugins compiled into the binary
///
/// Keys are `(module, symbol)`. A symbol may be marked unavailable when its
/// implementation was left out of the build, so the reference still resolves
/// to a descriptive error instead of an unknown-symbol one.
#[derive(Clone, Default)]
pub struct SymbolTable {
    symbols: HashMap<(String, String), Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link(&mut self, module: &str, symbol: &str, plugin: Plugin) -> &mut Self {
        self.symbols
            .insert((module.to_string(), symbol.to_string()), Symbol::Linked(plugin));
        self
    }

    pub fn mark_unavailable(&mut self, module: &str, symbol: &str, reason: impl Into<String>) -> &mut Self {
        self.symbols.insert(
            (module.to_string(), symbol.to_string()),
            Symbol::Unavailable(reason.into()),
        );
        self
    }

    /// Add every symbol of `other`, replacing clashes
    pub fn extend(&mut self, other: SymbolTable) -> &mut Self {
        self.symbols.extend(other.symbols);
        self
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Resolver for SymbolTable {
    fn resolve(&self, reference: &str) -> Result<Plugin, ResolveError> {
        let parsed = Reference::parse(reference)?;
        let key = (parsed.module.to_string(), parsed.symbol.to_string());
        match self.symbols.get(&key) {
            Some(Symbol::Linked(plugin)) => Ok(plugin.clone()),
            Some(Symbol::Unavailable(reason)) => Err(ResolveError::Unavailable {
                reference: reference.to_string(),
                reason: reason.clone(),
            }),
            None => Err(ResolveError::UnknownSymbol {
                module: parsed.module.to_string(),
                symbol: parsed.symbol.to_string(),
            }),
        }
    }
}

impl<R: Resolver + ?Sized> Resolver for std::sync::Arc<R> {
    fn resolve(&self, reference: &str) -> Result<Plugin, ResolveError> {
        (**self).resolve(reference)
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
