// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Built-in components, tracing wrappers and plugin discovery

pub mod builtin;
pub mod discovery;
pub mod engine;
pub mod loader;
pub mod traced;

pub use builtin::{builtin_symbols, register_builtins};
pub use discovery::{discover, parse_declarations, DiscoveryError, PluginDecl};
pub use engine::RecordEngine;
pub use loader::JsonLoader;
pub use traced::{TracedEngine, TracedLoader};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ComponentCall, EngineCall, FakeComponent, FakeComponents, FakeEngine, FakeLoader};
