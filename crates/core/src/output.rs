// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Opaque job output handed between jobs in memory

use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A value that can write itself into a run directory
pub trait Persist: Send + Sync {
    /// `path` carries no extension; implementations append their own
    /// and return the file actually written.
    fn save(&self, path: &Path) -> io::Result<PathBuf>;
}

/// JSON values persist as pretty-printed `<path>.json`
impl Persist for Value {
    fn save(&self, path: &Path) -> io::Result<PathBuf> {
        let mut file = path.as_os_str().to_owned();
        file.push(".json");
        let path = PathBuf::from(file);
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(path)
    }
}

/// An engine or loader result
///
/// The scheduler never inspects it; consumers downcast to the type the
/// producing engine documents. Cloning is cheap and shares the value.
#[derive(Clone)]
pub struct Output {
    value: Arc<dyn Any + Send + Sync>,
    persist: Option<Arc<dyn Persist>>,
}

impl Output {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            persist: None,
        }
    }

    /// An output the scheduler saves into the run directory on success
    pub fn persistent<T: Persist + Any>(value: T) -> Self {
        let shared = Arc::new(value);
        Self {
            value: Arc::clone(&shared) as Arc<dyn Any + Send + Sync>,
            persist: Some(shared),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.as_ref().downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.as_ref().is::<T>()
    }

    pub fn is_persistent(&self) -> bool {
        self.persist.is_some()
    }

    /// Save to `path` (without extension); `None` for outputs that cannot persist
    pub fn save(&self, path: &Path) -> Option<io::Result<PathBuf>> {
        self.persist.as_ref().map(|p| p.save(path))
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("persistent", &self.is_persistent())
            .finish_non_exhaustive()
    }
}
