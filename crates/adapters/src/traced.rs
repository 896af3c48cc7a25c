// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced wrappers for consistent observability

use pj_catalog::{BoxError, Engine, Loader};
use pj_core::{ExecutionContext, Output};

/// Wrapper that adds tracing to any Engine
pub struct TracedEngine {
    inner: Box<dyn Engine>,
    name: String,
}

impl TracedEngine {
    pub fn new(inner: Box<dyn Engine>, name: impl Into<String>) -> Self {
        Self {
            inner,
            name: name.into(),
        }
    }
}

impl Engine for TracedEngine {
    fn execute(
        &mut self,
        input: Option<Output>,
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<Output, BoxError> {
        let span = tracing::info_span!(
            "engine.execute",
            engine = %self.name,
            job = ctx.job_name(),
            run_id = %ctx.run_id(),
        );
        let _guard = span.enter();

        tracing::info!(
            run_dir = %ctx.run_dir().display(),
            has_input = input.is_some(),
            "starting"
        );

        let start = std::time::Instant::now();
        let result = self.inner.execute(input, ctx);
        let elapsed = start.elapsed();

        match &result {
            Ok(_) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "engine finished"),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "engine failed"
            ),
        }

        result
    }
}

/// Wrapper that adds tracing to any Loader
pub struct TracedLoader {
    inner: Box<dyn Loader>,
    name: String,
}

impl TracedLoader {
    pub fn new(inner: Box<dyn Loader>, name: impl Into<String>) -> Self {
        Self {
            inner,
            name: name.into(),
        }
    }
}

impl Loader for TracedLoader {
    fn load(&self, location: &str) -> Result<Output, BoxError> {
        let span = tracing::info_span!("loader.load", loader = %self.name, location);
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.load(location);
        let elapsed = start.elapsed();

        match &result {
            Ok(_) => tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, "loaded"),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "load failed"
            ),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
