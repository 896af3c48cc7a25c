// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Catalog properties

use pj_catalog::{
    BoxError, Catalog, CatalogError, Companions, Instance, Plugin, Reference, ResolveError, Resolver,
};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn tagged(tag: &'static str) -> Plugin {
    Plugin::new(move |_: Value, _: &Companions| -> Result<Instance, BoxError> {
        Ok(Instance::component(tag))
    })
}

fn tag_of(instance: Instance) -> &'static str {
    match instance {
        Instance::Component(value) => *value.downcast_ref::<&'static str>().unwrap(),
        _ => panic!("expected a component"),
    }
}

#[test]
fn duplicate_without_overwrite_is_rejected() {
    let mut catalog = Catalog::new();
    catalog.register("model", "wave", tagged("first")).unwrap();
    let err = catalog.register("model", "wave", tagged("second")).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateEntry { .. }));

    let built = catalog.create("model", "wave", &Value::Null, &Companions::new()).unwrap();
    assert_eq!(tag_of(built), "first");
}

#[test]
fn overwrite_uses_the_second_factory() {
    let mut catalog = Catalog::new();
    catalog.register("model", "wave", tagged("first")).unwrap();
    catalog.replace("model", "wave", tagged("second")).unwrap();

    let built = catalog.create("model", "wave", &Value::Null, &Companions::new()).unwrap();
    assert_eq!(tag_of(built), "second");
}

struct Unavailable {
    calls: Arc<AtomicUsize>,
}

impl Resolver for Unavailable {
    fn resolve(&self, reference: &str) -> Result<Plugin, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let parsed = Reference::parse(reference)?;
        Err(ResolveError::Unavailable {
            reference: format!("{}:{}", parsed.module, parsed.symbol),
            reason: "optional dependency not installed".to_string(),
        })
    }
}

#[test]
fn unresolvable_deferred_entry_fails_every_time_but_resolves_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut catalog = Catalog::with_resolver(Unavailable {
        calls: Arc::clone(&calls),
    });
    catalog.register_deferred("solver", "gpu", "solvers.gpu:Cuda").unwrap();

    for _ in 0..3 {
        let err = catalog.create("solver", "gpu", &Value::Null, &Companions::new()).unwrap_err();
        assert!(matches!(err, CatalogError::ComponentLoad { .. }), "{err}");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
