// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Job file parsing and parameter-sweep expansion

mod expand;
mod lint;
mod parser;
mod sweep;

pub use expand::{Expander, FieldPath};
pub use lint::{lint, Finding};
pub use parser::{load_job_file, parse_jobs, ParseError};
pub use sweep::{SweepError, SweepExpr, MAX_SWEEP_JOBS};
