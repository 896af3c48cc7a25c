// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Components compiled into every binary

use crate::engine::RecordEngine;
use crate::loader::JsonLoader;
use pj_catalog::{Catalog, CatalogError, SymbolTable, ENGINE_NAMESPACE, LOADER_NAMESPACE};

/// Module name under which built-ins are exposed to declaration files
pub const BUILTIN_MODULE: &str = "pj.builtin";

/// Register the built-in engine and loader
pub fn register_builtins(catalog: &mut Catalog) -> Result<(), CatalogError> {
    catalog.register(ENGINE_NAMESPACE, "record", RecordEngine::plugin())?;
    catalog.register(LOADER_NAMESPACE, "json", JsonLoader::plugin())?;
    Ok(())
}

/// Resolver table for `pj.builtin:<Symbol>` references
pub fn builtin_symbols() -> SymbolTable {
    let mut table = SymbolTable::new();
    table
        .link(BUILTIN_MODULE, "RecordEngine", RecordEngine::plugin())
        .link(BUILTIN_MODULE, "JsonLoader", JsonLoader::plugin());
    table
}
