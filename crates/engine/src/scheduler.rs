// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Serial job scheduler
//!
//! Runs concrete jobs one after another in expansion order. A failing job
//! becomes a failed [`JobResult`]; it never aborts the jobs after it unless
//! fail-fast is on.

use crate::error::{contain, JobError, SchedulerError};
use crate::input::{self, OutputCache};
use crate::run_context::RunContext;
use pj_adapters::TracedEngine;
use pj_catalog::{
    Catalog, CatalogError, Companions, DependencyManifest, Engine, EntryInfo, EntryKind, ENGINE_NAMESPACE,
    LOADER_NAMESPACE,
};
use pj_core::config::ScanConfig;
use pj_core::{
    value, Clock, ComponentSelection, ConcreteJob, ExecutionContext, IdGen, JobDescription, JobResult, JobStage,
    Outcome, Output, ProgressUpdate, RunIdGen, SystemClock, SystemConfig,
};
use pj_runbook::Expander;
use pj_storage::{Ledger, Snapshot, LEDGER_FILE};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

type ProgressFn<'c> = Box<dyn FnMut(&ProgressUpdate) + 'c>;
type RunDirFn<'c> = Box<dyn FnMut(&Path, &JobResult) + 'c>;

/// Executes job lists against a catalog
pub struct Scheduler<'c, C: Clock = SystemClock, I: IdGen = RunIdGen<SystemClock>> {
    catalog: &'c Catalog,
    config: SystemConfig,
    clock: C,
    id_gen: I,
    dry_run: bool,
    on_progress: Option<ProgressFn<'c>>,
    on_run_dir: Option<RunDirFn<'c>>,
}

impl<'c> Scheduler<'c> {
    pub fn new(catalog: &'c Catalog, config: SystemConfig) -> Self {
        Self::with_deps(catalog, config, SystemClock, RunIdGen::new(SystemClock))
    }
}

impl<'c, C: Clock, I: IdGen> Scheduler<'c, C, I> {
    pub fn with_deps(catalog: &'c Catalog, config: SystemConfig, clock: C, id_gen: I) -> Self {
        Self {
            catalog,
            config,
            clock,
            id_gen,
            dry_run: false,
            on_progress: None,
            on_run_dir: None,
        }
    }

    /// Validate wiring, schemas and manifests without building or writing anything
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.config.run.fail_fast = fail_fast;
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.paths.output_dir = dir.into();
        self
    }

    /// Called inline for job start, throttled engine progress and job finish
    pub fn on_progress(mut self, f: impl FnMut(&ProgressUpdate) + 'c) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    /// Called once per job that got a run directory
    pub fn on_run_dir(mut self, f: impl FnMut(&Path, &JobResult) + 'c) -> Self {
        self.on_run_dir = Some(Box::new(f));
        self
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Expand `jobs` and run every concrete job
    ///
    /// Only sweep errors abort the call; each job's own failure is in its result.
    pub fn run(&mut self, jobs: &[JobDescription]) -> Result<Vec<JobResult>, SchedulerError> {
        let scan = self.config.scan.clone();
        let expander = Expander::from_config(&scan);
        let mut concrete = Vec::new();
        let mut sources = Vec::new();
        for job in jobs {
            for expanded in expander.expand(job)? {
                concrete.push(expanded);
                sources.push(Some(job));
            }
        }
        self.execute(&concrete, &sources, &scan)
    }

    /// Run already-expanded jobs; their snapshots carry no source
    pub fn run_concrete(&mut self, jobs: &[ConcreteJob]) -> Result<Vec<JobResult>, SchedulerError> {
        let scan = self.config.scan.clone();
        self.execute(jobs, &vec![None; jobs.len()], &scan)
    }

    /// Rerun the job a snapshot recorded
    ///
    /// The source is re-expanded with the scan settings stored in the
    /// snapshot, not the current ones, and must yield the recorded job.
    pub fn replay(&mut self, snapshot: &Snapshot) -> Result<Vec<JobResult>, SchedulerError> {
        let job = snapshot.replay_job(|source, scan| Expander::from_config(scan).expand(source))?;
        tracing::info!(run_id = %snapshot.run_id, job = job.name(), "replaying snapshot");
        self.execute(
            std::slice::from_ref(&job),
            &[snapshot.source.as_ref()],
            &snapshot.expansion,
        )
    }

    /// `sources[i]` is the description `jobs[i]` was expanded from
    fn execute(
        &mut self,
        jobs: &[ConcreteJob],
        sources: &[Option<&JobDescription>],
        scan: &ScanConfig,
    ) -> Result<Vec<JobResult>, SchedulerError> {
        for finding in pj_runbook::lint(jobs) {
            tracing::warn!(%finding, "job list");
        }

        let mut ledger = if self.config.run.ledger && !self.dry_run {
            Some(Ledger::open(&self.config.paths.output_dir.join(LEDGER_FILE))?)
        } else {
            None
        };

        let total = jobs.len();
        tracing::info!(jobs = total, dry_run = self.dry_run, "starting run");

        let mut cache = OutputCache::default();
        let mut halted_by: Option<String> = None;
        let mut results = Vec::with_capacity(total);
        for (index, concrete) in jobs.iter().enumerate() {
            let result = match &halted_by {
                Some(failed) => JobResult::skipped(
                    index,
                    concrete.name(),
                    format!("not attempted: fail-fast halted the run after job '{failed}' failed"),
                ),
                None => {
                    let origin = Origin {
                        source: sources.get(index).copied().flatten(),
                        scan,
                    };
                    self.run_job(index, total, concrete, origin, &mut cache)
                }
            };

            if halted_by.is_none() && self.config.run.fail_fast && !result.success() {
                halted_by = Some(result.job_name.clone());
            }
            if let Some(ledger) = ledger.as_mut() {
                if let Err(e) = ledger.append(&result) {
                    tracing::warn!(error = %e, job = %result.job_name, "failed to append to ledger");
                }
            }
            if let (Some(callback), Some(dir)) = (self.on_run_dir.as_mut(), result.run_dir.as_deref()) {
                callback(dir, &result);
            }
            results.push(result);
        }

        let failed = results.iter().filter(|r| !r.success()).count();
        tracing::info!(succeeded = total - failed, failed, "run finished");
        Ok(results)
    }

    fn run_job(
        &mut self,
        index: usize,
        total: usize,
        concrete: &ConcreteJob,
        origin: Origin<'_>,
        cache: &mut OutputCache,
    ) -> JobResult {
        let name = concrete.name();
        let span = tracing::info_span!("job", job = name, index);
        let _guard = span.enter();

        let start = self.clock.now();
        self.notify(index, total, name, Some(0.0), "started", JobStage::Pending);

        let mut run = None;
        let attempt = self.attempt(index, total, concrete, origin, cache, &mut run);
        let elapsed = self.clock.now().saturating_duration_since(start);
        let elapsed_ms = elapsed.as_millis() as u64;

        let outcome = match attempt {
            Ok(output) => {
                cache.insert(&concrete.job, output);
                tracing::info!(elapsed_ms, "job succeeded");
                self.notify(index, total, name, Some(100.0), "succeeded", JobStage::Succeeded);
                Outcome::Succeeded
            }
            Err(e) => {
                let error = e.to_string();
                tracing::error!(elapsed_ms, error = %error, "job failed");
                self.notify(index, total, name, None, error.clone(), JobStage::Failed);
                Outcome::Failed { error }
            }
        };

        let (run_dir, run_id) = match run {
            Some(ctx) => (Some(ctx.run_dir), Some(ctx.run_id)),
            None => (None, None),
        };
        JobResult {
            job_index: index,
            job_name: name.to_string(),
            run_dir,
            run_id,
            outcome,
            elapsed: Some(elapsed),
        }
    }

    /// Steps 1 to 7 of a job; `run` is set once a run directory exists
    fn attempt(
        &mut self,
        index: usize,
        total: usize,
        concrete: &ConcreteJob,
        origin: Origin<'_>,
        cache: &OutputCache,
        run: &mut Option<RunContext>,
    ) -> Result<Output, JobError> {
        let job = &concrete.job;

        let input = input::resolve(job, cache, self.catalog, self.dry_run)?;
        stage(JobStage::InputResolved);

        let manifest = self
            .catalog
            .manifest(ENGINE_NAMESPACE, job.engine_name())
            .map_err(engine_error)?
            .cloned();
        let merged = self.merge(job, manifest.as_ref());

        let companions = self.build_companions(&merged)?;
        stage(JobStage::ComponentsBuilt);

        if let Some(manifest) = &manifest {
            manifest
                .check(merged.components.keys().map(String::as_str))
                .map_err(|e| JobError::MissingDependency {
                    job: job.name.clone(),
                    missing: e.missing,
                })?;
        }
        stage(JobStage::ManifestValidated);

        let settings = Value::Object(merged.engine.settings.clone());
        if self.dry_run {
            self.catalog
                .validate_config(ENGINE_NAMESPACE, &merged.engine.name, &settings)
                .map_err(engine_error)?;
            return Ok(Output::new(()));
        }

        let ctx = RunContext::provision(&self.config.paths.output_dir, &self.id_gen, merged)?;
        let result = self
            .execute_engine(index, total, &ctx, &settings, &companions, input)
            .and_then(|output| self.save_output(&ctx, output));
        self.write_snapshot(index, concrete, origin, &ctx);
        *run = Some(ctx);
        result
    }

    /// System defaults under job values; manifest defaults fill unselected namespaces
    fn merge(&self, job: &JobDescription, manifest: Option<&DependencyManifest>) -> JobDescription {
        let defaults = &self.config.defaults;
        let mut merged = job.clone();

        if let Some(manifest) = manifest {
            for (namespace, name) in manifest.defaults() {
                merged
                    .components
                    .entry(namespace.clone())
                    .or_insert_with(|| ComponentSelection::new(name.clone()));
            }
        }
        if let Some(base) = defaults.engine(&merged.engine.name) {
            merged.engine.settings = value::merged(base, &merged.engine.settings);
        }
        for (namespace, selection) in merged.components.iter_mut() {
            if let Some(base) = defaults.component(namespace, &selection.name) {
                selection.params = value::merged(base, &selection.params);
            }
        }
        merged
    }

    /// Build companions in namespace order; each sees the ones built before it
    fn build_companions(&self, job: &JobDescription) -> Result<Companions, JobError> {
        let mut companions = Companions::new();
        for (namespace, selection) in &job.components {
            let raw = Value::Object(selection.params.clone());
            let component_error = |source| JobError::Component {
                namespace: namespace.clone(),
                source,
            };
            if self.dry_run {
                self.catalog
                    .validate_config(namespace, &selection.name, &raw)
                    .map_err(component_error)?;
                continue;
            }
            let instance = contain(|| self.catalog.create(namespace, &selection.name, &raw, &companions))
                .map_err(|message| {
                    component_error(CatalogError::ComponentConstruct {
                        namespace: namespace.clone(),
                        name: selection.name.clone(),
                        source: message.into(),
                    })
                })?
                .map_err(component_error)?;
            companions.insert(namespace.clone(), instance.into_shared());
        }
        Ok(companions)
    }

    fn execute_engine(
        &mut self,
        index: usize,
        total: usize,
        ctx: &RunContext,
        settings: &Value,
        companions: &Companions,
        input: Option<Output>,
    ) -> Result<Output, JobError> {
        let catalog = self.catalog;
        let engine_name = ctx.merged.engine.name.as_str();

        let instance = contain(|| catalog.create(ENGINE_NAMESPACE, engine_name, settings, companions))
            .map_err(JobError::Execution)?
            .map_err(engine_error)?;
        let engine = instance.into_engine().map_err(|other| {
            JobError::Config(format!("engine '{engine_name}' built a {}, not an engine", other.kind()))
        })?;
        let mut engine = TracedEngine::new(engine, engine_name);
        stage(JobStage::EngineInstantiated);

        let clock = self.clock.clone();
        let now = move || clock.now();
        let interval = self.config.run.progress_interval;
        let mut exec = ExecutionContext::new(&ctx.run_id, &ctx.run_dir, &ctx.merged.name, index, total)
            .with_params(&ctx.merged.params);
        if let Some(sink) = self.on_progress.as_mut() {
            exec = exec.with_progress(&mut **sink, interval, &now);
        }

        stage(JobStage::Executing);
        contain(|| engine.execute(input, &mut exec))
            .map_err(JobError::Execution)?
            .map_err(|e| JobError::Execution(e.to_string()))
    }

    /// Write a persistent output to `<run_dir>/<output alias or job name>`
    fn save_output(&self, ctx: &RunContext, output: Output) -> Result<Output, JobError> {
        if !self.config.run.save_outputs {
            return Ok(output);
        }
        let stem = ctx.merged.output.as_deref().unwrap_or(&ctx.merged.name);
        let path = ctx.run_dir.join(stem);
        let saved = contain(|| output.save(&path)).map_err(|message| JobError::Save {
            path: path.clone(),
            source: std::io::Error::other(message),
        })?;
        match saved {
            Some(Ok(written)) => tracing::debug!(path = %written.display(), "saved output"),
            Some(Err(source)) => return Err(JobError::Save { path, source }),
            None => tracing::debug!("output is not persistent; nothing saved"),
        }
        Ok(output)
    }

    /// Best effort; a failed write is logged and never changes the outcome
    fn write_snapshot(
        &self,
        index: usize,
        concrete: &ConcreteJob,
        origin: Origin<'_>,
        ctx: &RunContext,
    ) {
        let provenance = self.provenance(&ctx.merged);
        let written = Snapshot::new(
            ctx.run_id.clone(),
            index,
            self.clock.utc(),
            concrete,
            origin.source,
            origin.scan,
            ctx.merged.clone(),
        )
        .and_then(|snapshot| snapshot.with_provenance(provenance).write(&ctx.run_dir));
        match written {
            Ok(path) => tracing::debug!(path = %path.display(), "wrote snapshot"),
            Err(e) => tracing::warn!(
                error = %e,
                run_dir = %ctx.run_dir.display(),
                "failed to write snapshot"
            ),
        }
    }

    /// Where each selected implementation came from
    fn provenance(&self, job: &JobDescription) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        let engine = &job.engine.name;
        out.insert(
            ENGINE_NAMESPACE.to_string(),
            describe(self.catalog.info(ENGINE_NAMESPACE, engine), engine),
        );
        for (namespace, selection) in &job.components {
            out.insert(
                namespace.clone(),
                describe(self.catalog.info(namespace, &selection.name), &selection.name),
            );
        }
        if let Some(loader) = &job.input_loader {
            out.entry(LOADER_NAMESPACE.to_string())
                .or_insert_with(|| describe(self.catalog.info(LOADER_NAMESPACE, &loader.name), &loader.name));
        }
        out
    }

    fn notify(
        &mut self,
        index: usize,
        total: usize,
        name: &str,
        percent: Option<f64>,
        message: impl Into<String>,
        stage: JobStage,
    ) {
        if let Some(sink) = self.on_progress.as_mut() {
            sink(&ProgressUpdate {
                job_name: name.to_string(),
                job_index: index,
                total_jobs: total,
                percent,
                message: message.into(),
                stage: Some(stage),
            });
        }
    }
}

/// Where a concrete job came from, for its snapshot
#[derive(Clone, Copy)]
struct Origin<'a> {
    source: Option<&'a JobDescription>,
    scan: &'a ScanConfig,
}

fn stage(stage: JobStage) {
    tracing::debug!(%stage, "job stage");
}

fn engine_error(source: CatalogError) -> JobError {
    JobError::Component {
        namespace: ENGINE_NAMESPACE.to_string(),
        source,
    }
}

fn describe(info: Option<EntryInfo>, name: &str) -> String {
    match info {
        Some(EntryInfo {
            kind: EntryKind::Deferred,
            reference: Some(reference),
            ..
        }) => format!("{name} (deferred: {reference})"),
        Some(_) => format!("{name} (immediate)"),
        None => name.to_string(),
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
