// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pj-core: data model shared by every Phase Jobs crate
//!
//! This crate provides:
//! - Job descriptions, concrete (expanded) jobs and job results
//! - Run identifiers and a testable clock
//! - Progress records and the execution context handed to engines
//! - System configuration (`pj.toml`)

pub mod clock;
pub mod config;
pub mod id;
pub mod job;
pub mod output;
pub mod progress;
pub mod result;
pub mod value;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, SystemConfig};
pub use id::{IdGen, RunId, RunIdGen, SequentialIdGen};
pub use job::{CombineMode, ComponentSelection, ConcreteJob, EngineSelection, JobDescription, Params};
pub use output::{Output, Persist};
pub use progress::{ExecutionContext, JobStage, ProgressUpdate};
pub use result::{JobResult, Outcome};
