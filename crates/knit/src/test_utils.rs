//! Test utilities for knit.
//!
//! Shared test infrastructure for this crate and, through the `test-utils`
//! feature, for the integration tests of dependent crates.
//!
//! - `TestRuntime`: a filesystem runtime rooted at a fixed working directory
//! - `write_files`: lays out a source tree inside a temporary directory

use crate::{FileMetadata, Runtime, RuntimeError, RuntimeResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Simple test runtime that wraps `std::fs` and reports a fixed cwd.
///
/// Tests use real files in a `tempfile::TempDir` rather than mocks, so path
/// normalization and extension probing run against a real filesystem.
///
/// ```rust
/// use tempfile::TempDir;
/// use knit::test_utils::TestRuntime;
///
/// let temp = TempDir::new().unwrap();
/// let runtime = TestRuntime::new(temp.path().to_path_buf());
/// ```
#[derive(Debug)]
pub struct TestRuntime {
    cwd: PathBuf,
}

impl TestRuntime {
    /// Create a new test runtime with the specified working directory.
    pub fn new(cwd: PathBuf) -> Self {
        Self { cwd }
    }
}

fn io_error(e: std::io::Error, path: &Path) -> RuntimeError {
    if e.kind() == std::io::ErrorKind::NotFound {
        RuntimeError::FileNotFound(path.to_path_buf())
    } else {
        RuntimeError::Io(e.to_string())
    }
}

#[async_trait]
impl Runtime for TestRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| io_error(e, path))
    }

    async fn write_file(&self, path: &Path, content: &[u8]) -> RuntimeResult<()> {
        std::fs::write(path, content).map_err(|e| io_error(e, path))
    }

    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
        let metadata = std::fs::metadata(path).map_err(|e| io_error(e, path))?;
        Ok(FileMetadata {
            size: metadata.len(),
            is_file: metadata.is_file(),
            is_dir: metadata.is_dir(),
            modified: metadata
                .modified()
                .ok()
                .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
                .map(|d| d.as_millis() as u64),
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    async fn create_dir(&self, path: &Path, recursive: bool) -> RuntimeResult<()> {
        if recursive {
            std::fs::create_dir_all(path).map_err(|e| io_error(e, path))
        } else {
            std::fs::create_dir(path).map_err(|e| io_error(e, path))
        }
    }

    async fn rename(&self, from: &Path, to: &Path) -> RuntimeResult<()> {
        std::fs::rename(from, to).map_err(|e| io_error(e, from))
    }

    async fn remove_file(&self, path: &Path) -> RuntimeResult<()> {
        std::fs::remove_file(path).map_err(|e| io_error(e, path))
    }

    fn get_cwd(&self) -> RuntimeResult<PathBuf> {
        Ok(self.cwd.clone())
    }
}

/// Write `(relative path, contents)` pairs under `root`, creating parent
/// directories as needed.
///
/// # Panics
///
/// Panics if any file cannot be written. Intended for test setup only.
pub fn write_files(root: &Path, files: &[(&str, &str)]) {
    for (relative, contents) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create fixture directory");
        }
        std::fs::write(&path, contents).expect("write fixture file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_runtime_reports_fixed_cwd() {
        let temp = TempDir::new().unwrap();
        let runtime = TestRuntime::new(temp.path().to_path_buf());

        assert_eq!(runtime.get_cwd().unwrap(), temp.path());
    }

    #[tokio::test]
    async fn test_write_files_creates_nested_tree() {
        let temp = TempDir::new().unwrap();
        write_files(
            temp.path(),
            &[("src/entry.js", "import './lib/a.js';"), ("src/lib/a.js", "")],
        );

        let runtime = TestRuntime::new(temp.path().to_path_buf());
        let content = runtime
            .read_file(&temp.path().join("src/entry.js"))
            .await
            .unwrap();
        assert_eq!(content, b"import './lib/a.js';");
        assert!(runtime.exists(&temp.path().join("src/lib/a.js")));
    }

    #[tokio::test]
    async fn test_missing_file_maps_to_not_found() {
        let temp = TempDir::new().unwrap();
        let runtime = TestRuntime::new(temp.path().to_path_buf());

        let err = runtime
            .metadata(&temp.path().join("nope.js"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
