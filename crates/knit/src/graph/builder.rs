//! Breadth-first graph discovery.
//!
//! Modules are transformed and registered the first time their canonical
//! key is reached, before they are queued, so a key that shows up again
//! (through a diamond or a cycle) always reuses the id it already has.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use path_clean::PathClean;
use tracing::{debug, info};

use super::module_id::{IdAllocator, ModuleIdStrategy};
use super::{Module, ModuleGraph};
use crate::resolver::{ModuleResolver, ResolveError};
use crate::runtime::{Runtime, RuntimeError};
use crate::transform::{EsmTransformer, SourceTransformer, TransformError};

/// Errors that abort graph construction.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Entry module '{}' does not exist", .0.display())]
    EntryNotFound(PathBuf),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("Module path '{}' is not valid UTF-8 and cannot be used as a path id", .0.display())]
    NonUtf8Path(PathBuf),
}

/// Builds a [`ModuleGraph`] from one entry module.
///
/// Each call to [`GraphBuilder::build`] starts from an empty discovered
/// table, so one builder can serve any number of builds.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    runtime: Arc<dyn Runtime>,
    transformer: Arc<dyn SourceTransformer>,
    resolver: ModuleResolver,
    id_strategy: ModuleIdStrategy,
    cwd: Option<PathBuf>,
}

impl GraphBuilder {
    /// Builder reading through `runtime` with the default [`EsmTransformer`].
    pub fn new(runtime: Arc<dyn Runtime>) -> Self {
        let transformer = Arc::new(EsmTransformer::new(Arc::clone(&runtime)));
        Self {
            runtime,
            transformer,
            resolver: ModuleResolver::default(),
            id_strategy: ModuleIdStrategy::default(),
            cwd: None,
        }
    }

    /// Replace the source transformer.
    pub fn transformer(mut self, transformer: Arc<dyn SourceTransformer>) -> Self {
        self.transformer = transformer;
        self
    }

    /// Extensions probed when an import omits one.
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resolver = ModuleResolver::new(extensions.into_iter().map(Into::into));
        self
    }

    pub fn id_strategy(mut self, strategy: ModuleIdStrategy) -> Self {
        self.id_strategy = strategy;
        self
    }

    /// Directory that relative entries and path ids are anchored to.
    /// Defaults to the runtime's working directory.
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Discover every module reachable from `entry`.
    ///
    /// The first resolver or transformer failure aborts the build.
    pub async fn build(&self, entry: impl AsRef<Path>) -> Result<ModuleGraph, GraphError> {
        let cwd = match &self.cwd {
            Some(cwd) => cwd.clone(),
            None => self.runtime.get_cwd()?,
        };
        let entry_key = cwd.join(entry.as_ref()).clean();

        if !self.runtime.exists(&entry_key) {
            return Err(GraphError::EntryNotFound(entry_key));
        }

        let mut ids = IdAllocator::new(self.id_strategy, &cwd);
        let mut discovered: IndexMap<PathBuf, Module> = IndexMap::new();
        let mut queue: VecDeque<usize> = VecDeque::new();

        let index = self.discover(&entry_key, &mut ids, &mut discovered).await?;
        queue.push_back(index);

        while let Some(index) = queue.pop_front() {
            let Some((key, module)) = discovered.get_index(index) else {
                continue;
            };
            let key = key.clone();
            let dependencies = module.dependencies.clone();

            let mut mapping = IndexMap::new();
            for specifier in dependencies {
                if mapping.contains_key(&specifier) {
                    continue;
                }

                let target = self
                    .resolver
                    .resolve(&key, &specifier, self.runtime.as_ref())
                    .await?;

                let id = match discovered.get(&target) {
                    Some(existing) => existing.id.clone(),
                    None => {
                        let new_index = self.discover(&target, &mut ids, &mut discovered).await?;
                        queue.push_back(new_index);
                        discovered[new_index].id.clone()
                    }
                };

                mapping.insert(specifier, id);
            }

            if let Some((_, module)) = discovered.get_index_mut(index) {
                module.mapping = mapping;
            }
        }

        info!(
            entry = %entry_key.display(),
            modules = discovered.len(),
            "module graph built"
        );

        Ok(ModuleGraph::from_modules(entry_key, discovered))
    }

    /// Transform the module at `key` and register it under a fresh id.
    /// Returns its index in the discovered table.
    async fn discover(
        &self,
        key: &Path,
        ids: &mut IdAllocator<'_>,
        discovered: &mut IndexMap<PathBuf, Module>,
    ) -> Result<usize, GraphError> {
        let transformed = self.transformer.transform(key).await?;
        let id = ids.allocate(key)?;

        debug!(
            id = %id,
            path = %key.display(),
            imports = transformed.imports.len(),
            "discovered module"
        );

        let module = Module::new(key.to_path_buf(), id, transformed.code, transformed.imports);
        let (index, _) = discovered.insert_full(key.to_path_buf(), module);
        Ok(index)
    }
}

/// Build the graph for `entry` with default settings.
pub async fn build_graph(
    entry: impl AsRef<Path>,
    runtime: Arc<dyn Runtime>,
) -> Result<ModuleGraph, GraphError> {
    GraphBuilder::new(runtime).build(entry).await
}
