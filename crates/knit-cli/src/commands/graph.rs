//! `knit graph`: print the module graph reachable from an entry.

use crate::cli::GraphArgs;
use crate::commands::utils;
use crate::config::KnitConfig;
use crate::error::Result;
use knit_bundler::{GraphBuilder, ModuleGraph, NativeRuntime};
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

/// Execute the graph command.
///
/// Text output goes to stdout, one module per line followed by its
/// mapping. `--json` prints the serialized graph instead.
pub async fn execute(args: GraphArgs) -> Result<()> {
    let base_dir = utils::get_cwd()?;
    let config = KnitConfig::load_project(&args.project, &base_dir)?;
    config.validate()?;

    let root = config.project_root(&base_dir);
    let graph = graph(&config, &base_dir).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&graph)?);
    } else {
        print!("{}", render_text(&graph, &root));
    }

    Ok(())
}

/// Build the module graph for `config` without generating a bundle.
pub async fn graph(config: &KnitConfig, base_dir: &Path) -> Result<ModuleGraph> {
    let root = config.project_root(base_dir);
    utils::validate_entry(&utils::resolve_path(Path::new(&config.entry), &root))?;

    let mut builder = GraphBuilder::new(Arc::new(NativeRuntime::new()))
        .cwd(root)
        .id_strategy(config.module_ids.into());
    if let Some(extensions) = &config.extensions {
        builder = builder.extensions(extensions.iter().cloned());
    }

    Ok(builder.build(&config.entry).await?)
}

/// ```text
/// 0  src/entry.js
///     ./message.js -> 1
/// 1  src/message.js
/// ```
pub fn render_text(graph: &ModuleGraph, root: &Path) -> String {
    let mut out = String::new();

    for module in graph.iter() {
        let _ = writeln!(
            out,
            "{}  {}",
            module.id,
            utils::display_path(&module.key, root)
        );
        for (specifier, id) in &module.mapping {
            let _ = writeln!(out, "    {} -> {}", specifier, id);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModuleIds;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(
            temp.path().join("src/entry.js"),
            "import message from './message.js';\nconsole.log(message);\n",
        )
        .unwrap();
        fs::write(
            temp.path().join("src/message.js"),
            "export default 'hi';\n",
        )
        .unwrap();
        temp
    }

    #[tokio::test]
    async fn test_graph_text_output() {
        let temp = project();
        let graph = graph(&KnitConfig::default(), temp.path()).await.unwrap();

        let text = render_text(&graph, temp.path());
        assert_eq!(
            text,
            "0  src/entry.js\n    ./message.js -> 1\n1  src/message.js\n"
        );
    }

    #[tokio::test]
    async fn test_graph_path_ids() {
        let temp = project();
        let config = KnitConfig {
            module_ids: ModuleIds::Path,
            ..KnitConfig::default()
        };
        let graph = graph(&config, temp.path()).await.unwrap();

        let text = render_text(&graph, temp.path());
        assert!(text.starts_with("src/entry.js  src/entry.js\n"));
        assert!(text.contains("    ./message.js -> src/message.js\n"));
    }

    #[tokio::test]
    async fn test_graph_missing_entry() {
        let temp = TempDir::new().unwrap();
        assert!(graph(&KnitConfig::default(), temp.path()).await.is_err());
    }
}
