// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run identifier generation

use crate::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Identifier of one job run; also the name of its run directory
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generates unique run identifiers
pub trait IdGen: Clone + Send + Sync {
    fn next(&self) -> RunId;
}

/// Time-ordered IDs with a random suffix for production use
///
/// Format: `20260117T093012123456Z-1f3a9c0e`. The timestamp prefix sorts
/// lexicographically by creation time; the suffix keeps IDs minted within
/// the same clock tick distinct.
#[derive(Clone, Default)]
pub struct RunIdGen<C> {
    clock: C,
}

impl<C: Clock> RunIdGen<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGen for RunIdGen<C> {
    fn next(&self) -> RunId {
        let stamp = self.clock.utc().format("%Y%m%dT%H%M%S%6fZ");
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        RunId(format!("{}-{}", stamp, &suffix[..8]))
    }
}

/// Sequential ID generator for testing
#[derive(Clone)]
pub struct SequentialIdGen {
    prefix: String,
    counter: Arc<AtomicU64>,
}

impl SequentialIdGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialIdGen {
    fn default() -> Self {
        Self::new("run")
    }
}

impl IdGen for SequentialIdGen {
    fn next(&self) -> RunId {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        RunId(format!("{}-{}", self.prefix, n))
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
