// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde::Deserialize;
use serde_json::json;

struct Constant(&'static str);

impl Loader for Constant {
    fn load(&self, location: &str) -> Result<Output, BoxError> {
        Ok(Output::new(format!("{}:{location}", self.0)))
    }
}

#[derive(Debug, PartialEq)]
struct Grid {
    n: u32,
}

#[test]
fn instance_conversions_check_kind() {
    let loader = Instance::loader(Constant("x"));
    assert_eq!(loader.kind(), "loader");
    let Err(back) = loader.into_engine() else {
        panic!("called `Result::unwrap_err()` on an `Ok` value");
    };
    assert!(back.into_loader().is_ok());

    let component = Instance::component(Grid { n: 4 });
    assert!(component.into_loader().is_err());
}

#[test]
fn companions_downcast_by_namespace() {
    let companions = Companions::new()
        .with("grid", Instance::component(Grid { n: 8 }))
        .with("reader", Instance::loader(Constant("r")));

    assert_eq!(companions.get::<Grid>("grid"), Some(&Grid { n: 8 }));
    assert!(companions.get::<String>("grid").is_none());
    assert!(companions.get::<Grid>("missing").is_none());

    let loader = companions.loader("reader").unwrap();
    let out = loader.load("a.json").unwrap();
    assert_eq!(out.downcast_ref::<String>().unwrap(), "r:a.json");

    let names: Vec<&str> = companions.namespaces().collect();
    assert_eq!(names, vec!["grid", "reader"]);
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct GridConfig {
    n: u32,
    #[serde(default = "default_spacing")]
    spacing: f64,
}

fn default_spacing() -> f64 {
    1.0
}

#[test]
fn typed_plugin_validates_and_builds() {
    let plugin = Plugin::typed(|config: GridConfig, _: &Companions| {
        Ok(Instance::component(Grid { n: config.n }))
    })
    .with_description("uniform grid");

    let schema = plugin.schema().unwrap();
    assert_eq!(
        schema.validate(&json!({"n": 3})).unwrap(),
        json!({"n": 3, "spacing": 1.0})
    );

    let instance = plugin
        .factory()
        .build(json!({"n": 3}), &Companions::new())
        .unwrap();
    let Instance::Component(value) = instance else {
        panic!("expected a component");
    };
    assert_eq!(value.downcast_ref::<Grid>(), Some(&Grid { n: 3 }));
    assert_eq!(plugin.description(), Some("uniform grid"));
}

#[test]
fn closure_factory_sees_companions() {
    let plugin = Plugin::new(|_: Value, companions: &Companions| -> Result<Instance, BoxError> {
        let grid = companions.get::<Grid>("grid").ok_or("grid companion missing")?;
        Ok(Instance::component(grid.n * 2))
    });

    let err = plugin.factory().build(Value::Null, &Companions::new()).unwrap_err();
    assert_eq!(err.to_string(), "grid companion missing");

    let companions = Companions::new().with("grid", Instance::component(Grid { n: 5 }));
    let Instance::Component(value) = plugin.factory().build(Value::Null, &companions).unwrap() else {
        panic!("expected a component");
    };
    assert_eq!(value.downcast_ref::<u32>(), Some(&10));
}
