//! Module dependency graph.
//!
//! A [`ModuleGraph`] holds every module reachable from one entry, keyed by
//! canonical path and numbered in first-discovery order. It is produced by
//! [`GraphBuilder`] and consumed by the bundle code generator.
//!
//! ```no_run
//! use std::sync::Arc;
//! use knit::{build_graph, NativeRuntime};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = build_graph("src/entry.js", Arc::new(NativeRuntime::new())).await?;
//! for module in graph.iter() {
//!     println!("{} {}", module.id, module.key.display());
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
mod module_id;

#[cfg(test)]
mod tests;

pub use builder::{GraphBuilder, GraphError, build_graph};
pub use module_id::{ModuleId, ModuleIdStrategy};

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

/// One source file's compiled representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// Canonical absolute location.
    pub key: PathBuf,
    pub id: ModuleId,
    /// Transformed body run inside the `(require, module, exports)` wrapper.
    #[serde(skip)]
    pub code: String,
    /// Import strings as written, in source order, duplicates included.
    pub dependencies: Vec<String>,
    /// Distinct import string to the id it resolved to.
    pub mapping: IndexMap<String, ModuleId>,
}

impl Module {
    /// A module with an empty mapping.
    pub fn new(key: PathBuf, id: ModuleId, code: String, dependencies: Vec<String>) -> Self {
        Self {
            key,
            id,
            code,
            dependencies,
            mapping: IndexMap::new(),
        }
    }
}

/// A mapping entry points at an id the graph does not contain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Module {from} maps '{specifier}' to id {id}, which is not in the module table")]
pub struct DanglingReference {
    /// Id of the module holding the mapping.
    pub from: ModuleId,
    pub specifier: String,
    pub id: ModuleId,
}

/// Every module reachable from one entry.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleGraph {
    entry: PathBuf,
    modules: IndexMap<PathBuf, Module>,
}

impl ModuleGraph {
    /// Assemble a graph from already numbered modules.
    ///
    /// `modules` must iterate in id order. The graph is not checked; call
    /// [`ModuleGraph::validate`] before generating code from it.
    pub fn from_modules(entry: PathBuf, modules: IndexMap<PathBuf, Module>) -> Self {
        Self { entry, modules }
    }

    /// Canonical key of the entry module.
    pub fn entry(&self) -> &Path {
        &self.entry
    }

    /// Id of the entry module.
    pub fn entry_id(&self) -> Option<&ModuleId> {
        self.modules.get(&self.entry).map(|module| &module.id)
    }

    /// Look up a module by canonical key.
    pub fn get(&self, key: &Path) -> Option<&Module> {
        self.modules.get(key)
    }

    /// Modules in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn contains_id(&self, id: &ModuleId) -> bool {
        self.modules.values().any(|module| &module.id == id)
    }

    /// Check that the graph is closed: every mapped id names a module.
    pub fn validate(&self) -> Result<(), DanglingReference> {
        let ids: rustc_hash::FxHashSet<&ModuleId> =
            self.modules.values().map(|module| &module.id).collect();

        for module in self.modules.values() {
            for (specifier, id) in &module.mapping {
                if !ids.contains(id) {
                    return Err(DanglingReference {
                        from: module.id.clone(),
                        specifier: specifier.clone(),
                        id: id.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
