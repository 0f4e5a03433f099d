//! Error types for the knit CLI.
//!
//! - [`CliError`] is what every command returns.
//! - [`ConfigError`] covers config file loading and validation.
//! - [`BuildError`] wraps bundler failures and output directory problems.
//!
//! `main` turns a [`CliError`] into a miette report via
//! [`cli_error_to_miette`].

mod miette;

pub use self::miette::cli_error_to_miette;

use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Build process errors
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `--config` points at a file that doesn't exist
    #[error("Config file not found: {}\n\nHint: Create knit.config.json or drop --config", .0.display())]
    NotFound(PathBuf),

    /// Missing required configuration field
    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField { field: String, hint: String },

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        field: String,
        value: String,
        hint: String,
    },
}

/// Build process errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Entry module doesn't exist
    #[error("Entry module not found: {}\n\nHint: Check the 'entry' field in knit.config.json or the ENTRY argument", .0.display())]
    EntryNotFound(PathBuf),

    /// Output path exists but is not a directory
    #[error("Output path is not a directory: {}\n\nHint: Choose another --out-dir", .0.display())]
    OutputNotDirectory(PathBuf),

    /// Resolution, transform, codegen or write failure
    #[error(transparent)]
    Bundler(#[from] knit_bundler::Error),
}

impl From<knit_bundler::GraphError> for BuildError {
    fn from(err: knit_bundler::GraphError) -> Self {
        BuildError::Bundler(err.into())
    }
}

impl From<knit_bundler::Error> for CliError {
    fn from(err: knit_bundler::Error) -> Self {
        CliError::Build(err.into())
    }
}

impl From<knit_bundler::GraphError> for CliError {
    fn from(err: knit_bundler::GraphError) -> Self {
        CliError::Build(err.into())
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Append a hint line to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}\n\nHint: {}", err, hint))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_not_found() {
        let msg = ConfigError::NotFound(PathBuf::from("knit.config.json")).to_string();
        assert!(msg.contains("Config file not found"));
        assert!(msg.contains("knit.config.json"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn test_build_error_entry_not_found() {
        let msg = BuildError::EntryNotFound(PathBuf::from("src/entry.js")).to_string();
        assert!(msg.contains("Entry module not found"));
        assert!(msg.contains("src/entry.js"));
    }

    #[test]
    fn test_bundler_error_is_transparent() {
        let err: CliError =
            knit_bundler::Error::InvalidConfig("Entry path is empty".to_string()).into();
        assert!(matches!(err, CliError::Build(BuildError::Bundler(_))));
        assert!(err.to_string().contains("Entry path is empty"));
    }

    #[test]
    fn test_graph_error_converts() {
        let err: CliError =
            knit_bundler::GraphError::EntryNotFound(PathBuf::from("/p/a.js")).into();
        assert!(matches!(
            err,
            CliError::Build(BuildError::Bundler(knit_bundler::Error::Graph(_)))
        ));
    }

    #[test]
    fn test_result_ext_with_path() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));

        let err = result.with_path("/test/path.txt").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_result_ext_with_hint() {
        let result: std::result::Result<(), ConfigError> =
            Err(ConfigError::NotFound(PathBuf::from("test.json")));

        let msg = result.with_hint("Try creating the file").unwrap_err().to_string();
        assert!(msg.contains("Hint: Try creating the file"));
    }

    #[test]
    fn test_result_ext_context() {
        let result: std::result::Result<(), ConfigError> =
            Err(ConfigError::NotFound(PathBuf::from("test.json")));

        let msg = result.context("Failed to load").unwrap_err().to_string();
        assert!(msg.starts_with("Failed to load: "));
    }
}
