// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in engines

mod record;

pub use record::{RecordConfig, RecordEngine};
