//! Source transformation.
//!
//! A [`SourceTransformer`] turns one module location into the body text that
//! runs inside the bundle's `(require, module, exports)` wrapper, together
//! with the import strings that body will `require` at runtime.
//!
//! [`EsmTransformer`] is the default implementation: it reads through a
//! [`Runtime`], rewrites ES module syntax to the CommonJS convention with
//! oxc, and wraps `.json` files as modules.

mod esm;
mod json;

pub use esm::transform_source;
pub use json::transform_json;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use crate::runtime::{Runtime, RuntimeError};

/// Output of transforming one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedModule {
    /// Body text executed inside the module wrapper.
    pub code: String,
    /// Import strings in source order, duplicates included.
    pub imports: Vec<String>,
}

/// Errors produced while transforming a module.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// The file could not be read.
    #[error("Failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },

    /// The file is not valid UTF-8.
    #[error("'{}' is not valid UTF-8", .path.display())]
    InvalidUtf8 { path: PathBuf },

    /// The source failed to parse.
    #[error("Syntax error in '{}': {message}", .path.display())]
    Syntax { path: PathBuf, message: String },

    /// The source uses syntax the bundler cannot lower.
    #[error("Unsupported source in '{}': {reason}", .path.display())]
    Unsupported { path: PathBuf, reason: String },

    /// A `.json` module is not valid JSON.
    #[error("Invalid JSON in '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl TransformError {
    /// Location of the module that failed.
    pub fn path(&self) -> &Path {
        match self {
            TransformError::Read { path, .. }
            | TransformError::InvalidUtf8 { path }
            | TransformError::Syntax { path, .. }
            | TransformError::Unsupported { path, .. }
            | TransformError::Json { path, .. } => path,
        }
    }
}

/// Turns a module location into wrapper-ready code and its imports.
///
/// Implementations must be deterministic: the same file contents always give
/// the same [`TransformedModule`].
#[async_trait]
pub trait SourceTransformer: Send + Sync + std::fmt::Debug {
    /// Transform the module stored at `path`.
    async fn transform(&self, path: &Path) -> Result<TransformedModule, TransformError>;
}

/// Default transformer: ES modules and CommonJS through oxc, JSON as data.
#[derive(Debug, Clone)]
pub struct EsmTransformer {
    runtime: Arc<dyn Runtime>,
}

impl EsmTransformer {
    pub fn new(runtime: Arc<dyn Runtime>) -> Self {
        Self { runtime }
    }
}

#[async_trait]
impl SourceTransformer for EsmTransformer {
    async fn transform(&self, path: &Path) -> Result<TransformedModule, TransformError> {
        let bytes = self
            .runtime
            .read_file(path)
            .await
            .map_err(|source| TransformError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let source = String::from_utf8(bytes).map_err(|_| TransformError::InvalidUtf8 {
            path: path.to_path_buf(),
        })?;

        if is_json(path) {
            transform_json(path, &source)
        } else {
            transform_source(path, &source)
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TestRuntime, write_files};
    use tempfile::TempDir;

    fn transformer(temp: &TempDir) -> EsmTransformer {
        EsmTransformer::new(Arc::new(TestRuntime::new(temp.path().to_path_buf())))
    }

    #[tokio::test]
    async fn test_transforms_javascript_file() {
        let temp = TempDir::new().unwrap();
        write_files(
            temp.path(),
            &[("entry.js", "import message from './message.js';\nconsole.log(message);\n")],
        );

        let module = transformer(&temp)
            .transform(&temp.path().join("entry.js"))
            .await
            .unwrap();

        assert_eq!(module.imports, vec!["./message.js"]);
        assert!(module.code.contains("require(\"./message.js\")"));
        assert!(module.code.contains("console.log(message);"));
    }

    #[tokio::test]
    async fn test_wraps_json_file() {
        let temp = TempDir::new().unwrap();
        write_files(temp.path(), &[("data.json", "{ \"b\": 1, \"a\": [2] }\n")]);

        let module = transformer(&temp)
            .transform(&temp.path().join("data.json"))
            .await
            .unwrap();

        assert!(module.imports.is_empty());
        assert_eq!(module.code, "module.exports = { \"b\": 1, \"a\": [2] };");
    }

    #[tokio::test]
    async fn test_unreadable_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.js");

        let err = transformer(&temp).transform(&path).await.unwrap_err();
        assert!(matches!(err, TransformError::Read { .. }));
        assert_eq!(err.path(), path);
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("binary.js");
        std::fs::write(&path, [0x66, 0x6f, 0xff, 0xfe]).unwrap();

        let err = transformer(&temp).transform(&path).await.unwrap_err();
        assert!(matches!(err, TransformError::InvalidUtf8 { .. }));
    }

    #[tokio::test]
    async fn test_syntax_error_is_reported() {
        let temp = TempDir::new().unwrap();
        write_files(temp.path(), &[("broken.js", "const = ;\n")]);

        let err = transformer(&temp)
            .transform(&temp.path().join("broken.js"))
            .await
            .unwrap_err();
        assert!(matches!(err, TransformError::Syntax { .. }));
        assert!(err.to_string().contains("broken.js"));
    }
}
