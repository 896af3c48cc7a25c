// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Input loaders

mod json;

pub use json::{JsonLoader, JsonLoaderConfig};
