// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Phase Jobs scheduler: runs expanded jobs against a component catalog

mod error;
mod input;
mod run_context;
mod scheduler;

pub use error::{JobError, SchedulerError};
pub use run_context::RunContext;
pub use scheduler::Scheduler;
