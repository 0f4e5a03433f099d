use std::path::PathBuf;
use std::sync::Arc;

use knit::{GraphBuilder, GraphError, ModuleId, ModuleIdStrategy, NativeRuntime, ResolveError};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn builder(name: &str) -> GraphBuilder {
    GraphBuilder::new(Arc::new(NativeRuntime::new())).cwd(fixture(name))
}

#[tokio::test]
async fn test_greeting_graph() {
    let graph = builder("greeting").build("src/entry.js").await.unwrap();

    let keys: Vec<_> = graph
        .iter()
        .map(|m| m.key.strip_prefix(fixture("greeting")).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        keys,
        vec![
            PathBuf::from("src/entry.js"),
            PathBuf::from("src/message.js"),
            PathBuf::from("src/name.js"),
        ]
    );

    let message = graph.iter().nth(1).unwrap();
    assert_eq!(message.id, ModuleId::Index(1));
    assert_eq!(message.mapping.get("./name.js"), Some(&ModuleId::Index(2)));
    assert!(message.code.contains("exports[\"default\"] = `hello ${name}!`;"));
    assert!(graph.validate().is_ok());
}

#[tokio::test]
async fn test_greeting_graph_with_path_ids() {
    let graph = builder("greeting")
        .id_strategy(ModuleIdStrategy::Path)
        .build("src/entry.js")
        .await
        .unwrap();

    let ids: Vec<_> = graph.iter().map(|m| m.id.to_string()).collect();
    assert_eq!(ids, vec!["src/entry.js", "src/message.js", "src/name.js"]);
}

#[tokio::test]
async fn test_cycle_graph_is_closed() {
    let graph = builder("cycle").build("a.js").await.unwrap();

    assert_eq!(graph.len(), 2);
    assert!(graph.validate().is_ok());
    for module in graph.iter() {
        assert_eq!(module.mapping.len(), 1);
    }
}

#[tokio::test]
async fn test_missing_dependency() {
    let err = builder("missing").build("entry.js").await.unwrap_err();

    match err {
        GraphError::Resolve(ResolveError::NotFound { specifier, from, .. }) => {
            assert_eq!(specifier, "./does-not-exist.js");
            assert_eq!(from, fixture("missing").join("entry.js"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
