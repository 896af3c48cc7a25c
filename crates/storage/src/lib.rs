// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Run snapshots and the job result ledger

mod ledger;
mod snapshot;

pub use ledger::{Ledger, LedgerEntry, LedgerError, LEDGER_FILE};
pub use snapshot::{Snapshot, SnapshotError, SNAPSHOT_FILE, SNAPSHOT_VERSION};
