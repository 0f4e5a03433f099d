use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use knit::{GraphBuilder, ModuleGraph, ModuleIdStrategy, NativeRuntime, Runtime};
use tracing::info;

use crate::codegen::{RuntimeOptions, generate};
use crate::output::write_bundle;
use crate::{Error, Result};

/// Configuration options for a build operation.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Entry module, relative to `cwd` unless absolute.
    pub entry: PathBuf,

    /// Working directory for the entry and path ids (default: runtime cwd).
    pub cwd: Option<PathBuf>,

    /// Runtime for filesystem operations (default: [`NativeRuntime`]).
    pub runtime: Option<Arc<dyn Runtime>>,

    /// How module ids are assigned (default: numeric).
    pub module_ids: ModuleIdStrategy,

    /// Evaluate each module once at runtime (default: false).
    pub cache_modules: bool,

    /// Extensions probed for extensionless imports (default:
    /// [`knit::DEFAULT_EXTENSIONS`]).
    pub extensions: Option<Vec<String>>,
}

impl BuildOptions {
    /// Create a new BuildOptions for a single entry module.
    ///
    /// ```no_run
    /// use knit_bundler::BuildOptions;
    ///
    /// let options = BuildOptions::new("src/entry.js");
    /// ```
    pub fn new(entry: impl AsRef<Path>) -> Self {
        Self {
            entry: entry.as_ref().to_path_buf(),
            cwd: None,
            runtime: None,
            module_ids: ModuleIdStrategy::default(),
            cache_modules: false,
            extensions: None,
        }
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn runtime(mut self, runtime: Arc<dyn Runtime>) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn module_ids(mut self, strategy: ModuleIdStrategy) -> Self {
        self.module_ids = strategy;
        self
    }

    pub fn cache_modules(mut self, enabled: bool) -> Self {
        self.cache_modules = enabled;
        self
    }

    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = Some(extensions.into_iter().map(Into::into).collect());
        self
    }

    /// Check the options before any file is read.
    pub fn validate(&self) -> Result<()> {
        if self.entry.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("Entry path is empty".to_string()));
        }

        if let Some(extensions) = &self.extensions {
            for ext in extensions {
                if ext.is_empty() || ext.starts_with('.') {
                    return Err(Error::InvalidConfig(format!(
                        "Extension '{}' must be non-empty and written without a leading dot",
                        ext
                    )));
                }
            }
        }

        Ok(())
    }

    /// Run the build.
    pub async fn build(self) -> Result<BuildResult> {
        build(self).await
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// The module graph the bundle was generated from.
    pub graph: ModuleGraph,

    /// The generated bundle text.
    pub code: String,

    /// Time spent building the graph and generating code.
    pub duration: Duration,

    runtime: Arc<dyn Runtime>,
}

impl BuildResult {
    pub fn module_count(&self) -> usize {
        self.graph.len()
    }

    /// Bundle size in bytes.
    pub fn size(&self) -> usize {
        self.code.len()
    }

    /// Write the bundle to `dir/filename`, replacing any existing file.
    pub async fn write_to(&self, dir: impl AsRef<Path>, filename: &str) -> Result<PathBuf> {
        write_bundle(self.runtime.as_ref(), dir.as_ref(), filename, &self.code).await
    }
}

/// Execute a build with the given options.
///
/// Nothing is written to disk; call [`BuildResult::write_to`] once the
/// build has succeeded.
pub async fn build(options: BuildOptions) -> Result<BuildResult> {
    options.validate()?;

    let started = Instant::now();
    let runtime: Arc<dyn Runtime> = match options.runtime {
        Some(runtime) => runtime,
        None => Arc::new(NativeRuntime::new()),
    };

    let mut builder = GraphBuilder::new(Arc::clone(&runtime)).id_strategy(options.module_ids);
    if let Some(cwd) = options.cwd {
        builder = builder.cwd(cwd);
    }
    if let Some(extensions) = options.extensions {
        builder = builder.extensions(extensions);
    }

    let graph = builder.build(&options.entry).await?;
    let code = generate(
        &graph,
        &RuntimeOptions {
            cache_modules: options.cache_modules,
        },
    )?;

    let duration = started.elapsed();
    info!(
        modules = graph.len(),
        bytes = code.len(),
        elapsed_ms = duration.as_millis() as u64,
        "bundle generated"
    );

    Ok(BuildResult {
        graph,
        code,
        duration,
        runtime,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_dotted_extension() {
        let err = BuildOptions::new("src/entry.js")
            .extensions([".js"])
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_rejects_empty_entry() {
        assert!(BuildOptions::new("").validate().is_err());
    }

    #[test]
    fn test_defaults() {
        let options = BuildOptions::new("src/entry.js");
        assert_eq!(options.module_ids, ModuleIdStrategy::Numeric);
        assert!(!options.cache_modules);
        assert!(options.extensions.is_none());
        assert!(options.validate().is_ok());
    }
}
