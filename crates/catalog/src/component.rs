// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capability traits and the plugin record stored in the catalog

use crate::manifest::DependencyManifest;
use crate::schema::{ConfigSchema, SerdeSchema};
use pj_core::{ExecutionContext, Output};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Error type returned by plugin code
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Runs one concrete job
pub trait Engine: Send {
    fn execute(
        &mut self,
        input: Option<Output>,
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<Output, BoxError>;
}

/// Reads external input for a job
pub trait Loader: Send + Sync {
    fn load(&self, location: &str) -> Result<Output, BoxError>;
}

/// A constructed component
pub enum Instance {
    Engine(Box<dyn Engine>),
    Loader(Box<dyn Loader>),
    /// Any other companion, shared read-only with the engine
    Component(Arc<dyn Any + Send + Sync>),
}

impl Instance {
    pub fn engine(engine: impl Engine + 'static) -> Self {
        Instance::Engine(Box::new(engine))
    }

    pub fn loader(loader: impl Loader + 'static) -> Self {
        Instance::Loader(Box::new(loader))
    }

    pub fn component<T: Any + Send + Sync>(value: T) -> Self {
        Instance::Component(Arc::new(value))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Instance::Engine(_) => "engine",
            Instance::Loader(_) => "loader",
            Instance::Component(_) => "component",
        }
    }

    /// Returns `self` unchanged when it is not an engine
    pub fn into_engine(self) -> Result<Box<dyn Engine>, Self> {
        match self {
            Instance::Engine(engine) => Ok(engine),
            other => Err(other),
        }
    }

    /// Returns `self` unchanged when it is not a loader
    pub fn into_loader(self) -> Result<Box<dyn Loader>, Self> {
        match self {
            Instance::Loader(loader) => Ok(loader),
            other => Err(other),
        }
    }

    /// Convert to the form stored in [`Companions`]
    ///
    /// Components are stored as-is. Loaders become `Arc<dyn Loader>` and
    /// engines `Mutex<Box<dyn Engine>>`, so consumers downcast to those.
    pub fn into_shared(self) -> Arc<dyn Any + Send + Sync> {
        match self {
            Instance::Component(value) => value,
            Instance::Loader(loader) => Arc::new(Arc::<dyn Loader>::from(loader)),
            Instance::Engine(engine) => Arc::new(Mutex::new(engine)),
        }
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instance::{}(..)", self.kind())
    }
}

/// Constructed companions keyed by namespace, injected into factories
#[derive(Clone, Default)]
pub struct Companions {
    by_namespace: BTreeMap<String, Arc<dyn Any + Send + Sync>>,
}

impl Companions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, namespace: impl Into<String>, value: Arc<dyn Any + Send + Sync>) {
        self.by_namespace.insert(namespace.into(), value);
    }

    pub fn with(mut self, namespace: impl Into<String>, instance: Instance) -> Self {
        self.insert(namespace, instance.into_shared());
        self
    }

    /// Typed access; `None` when absent or of another type
    pub fn get<T: Any>(&self, namespace: &str) -> Option<&T> {
        self.by_namespace.get(namespace)?.as_ref().downcast_ref::<T>()
    }

    pub fn get_shared(&self, namespace: &str) -> Option<Arc<dyn Any + Send + Sync>> {
        self.by_namespace.get(namespace).cloned()
    }

    /// A companion built from a loader plugin
    pub fn loader(&self, namespace: &str) -> Option<&Arc<dyn Loader>> {
        self.get::<Arc<dyn Loader>>(namespace)
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.by_namespace.contains_key(namespace)
    }

    /// Sorted namespace names
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.by_namespace.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_namespace.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_namespace.is_empty()
    }
}

impl fmt::Debug for Companions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.by_namespace.keys()).finish()
    }
}

/// Builds an instance from validated config and injected companions
pub trait Factory: Send + Sync {
    fn build(&self, config: Value, companions: &Companions) -> Result<Instance, BoxError>;
}

impl<F> Factory for F
where
    F: Fn(Value, &Companions) -> Result<Instance, BoxError> + Send + Sync,
{
    fn build(&self, config: Value, companions: &Companions) -> Result<Instance, BoxError> {
        self(config, companions)
    }
}

/// Everything the catalog knows about one implementation
#[derive(Clone)]
pub struct Plugin {
    factory: Arc<dyn Factory>,
    schema: Option<Arc<dyn ConfigSchema>>,
    manifest: Option<DependencyManifest>,
    description: Option<String>,
}

impl Plugin {
    /// A plugin whose factory receives raw, unvalidated config
    pub fn new(factory: impl Factory + 'static) -> Self {
        Self {
            factory: Arc::new(factory),
            schema: None,
            manifest: None,
            description: None,
        }
    }

    /// A plugin with a typed config struct
    ///
    /// Raw config is validated (and defaults filled in) by deserializing into
    /// `C`; the build function receives the typed value.
    pub fn typed<C, F>(build: F) -> Self
    where
        C: DeserializeOwned + Serialize + 'static,
        F: Fn(C, &Companions) -> Result<Instance, BoxError> + Send + Sync + 'static,
    {
        let factory = move |config: Value, companions: &Companions| -> Result<Instance, BoxError> {
            let config: C = serde_json::from_value(config)?;
            build(config, companions)
        };
        Self::new(factory).with_schema(SerdeSchema::<C>::new())
    }

    pub fn with_schema(mut self, schema: impl ConfigSchema + 'static) -> Self {
        self.schema = Some(Arc::new(schema));
        self
    }

    pub fn with_manifest(mut self, manifest: DependencyManifest) -> Self {
        self.manifest = Some(manifest);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn schema(&self) -> Option<&dyn ConfigSchema> {
        self.schema.as_deref()
    }

    pub fn manifest(&self) -> Option<&DependencyManifest> {
        self.manifest.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn factory(&self) -> &dyn Factory {
        self.factory.as_ref()
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("schema", &self.schema.is_some())
            .field("manifest", &self.manifest)
            .field("description", &self.description)
            .finish()
    }
}

#[cfg(test)]
#[path = "component_tests.rs"]
mod tests;
