use std::path::PathBuf;

use indexmap::IndexMap;

use super::super::{DanglingReference, Module, ModuleGraph, ModuleId};

fn module(key: &str, id: u32, mapping: &[(&str, ModuleId)]) -> Module {
    let mut module = Module::new(
        PathBuf::from(key),
        ModuleId::Index(id),
        String::new(),
        mapping.iter().map(|(spec, _)| spec.to_string()).collect(),
    );
    module.mapping = mapping
        .iter()
        .map(|(spec, id)| (spec.to_string(), id.clone()))
        .collect();
    module
}

fn graph(modules: Vec<Module>) -> ModuleGraph {
    let entry = modules[0].key.clone();
    let modules: IndexMap<PathBuf, Module> =
        modules.into_iter().map(|m| (m.key.clone(), m)).collect();
    ModuleGraph::from_modules(entry, modules)
}

#[test]
fn closed_graph_validates() {
    let graph = graph(vec![
        module("/p/entry.js", 0, &[("./a.js", ModuleId::Index(1))]),
        module("/p/a.js", 1, &[("./entry.js", ModuleId::Index(0))]),
    ]);

    assert!(graph.validate().is_ok());
    assert_eq!(graph.entry_id(), Some(&ModuleId::Index(0)));
    assert!(graph.contains_id(&ModuleId::Index(1)));
    assert!(!graph.contains_id(&ModuleId::Index(2)));
}

#[test]
fn dangling_mapping_is_reported() {
    let graph = graph(vec![
        module("/p/entry.js", 0, &[("./a.js", ModuleId::Index(1))]),
        module("/p/a.js", 1, &[("./gone.js", ModuleId::Index(7))]),
    ]);

    let err = graph.validate().unwrap_err();
    assert_eq!(
        err,
        DanglingReference {
            from: ModuleId::Index(1),
            specifier: "./gone.js".to_string(),
            id: ModuleId::Index(7),
        }
    );
    assert!(err.to_string().contains("./gone.js"));
}

#[test]
fn serializes_without_code() {
    let mut entry = module("/p/entry.js", 0, &[]);
    entry.code = "console.log(1);".to_string();
    let graph = graph(vec![entry]);

    let json = serde_json::to_value(&graph).unwrap();
    let module = &json["modules"]["/p/entry.js"];
    assert_eq!(module["id"], 0);
    assert!(module.get("code").is_none());
    assert_eq!(json["entry"], "/p/entry.js");
}
