//! # knit-bundler
//!
//! Turns a [`knit::ModuleGraph`] into one self-contained JavaScript file.
//!
//! The bundle is a single immediately-invoked function. Its argument is the
//! module table, mapping each module id to a wrapper function and the
//! module's import mapping. The function body is a small `require` runtime
//! that evaluates the entry module.
//!
//! ```no_run
//! use knit_bundler::BuildOptions;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let result = BuildOptions::new("src/entry.js").build().await?;
//! let written = result.write_to("dist", "bundle.js").await?;
//! println!("wrote {} ({} modules)", written.display(), result.module_count());
//! # Ok(()) }
//! ```

// Re-export everything from foundation crate
pub use knit::*;

pub mod builder;
pub mod codegen;
pub mod output;

pub use builder::{BuildOptions, BuildResult, build};
pub use codegen::{ModuleTable, RuntimeOptions, generate};

/// Error types for knit-bundler operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Graph construction failed.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A module mapping names an id that is not in the module table.
    #[error(transparent)]
    DanglingReference(#[from] DanglingReference),

    /// The graph does not contain its own entry module.
    #[error("Module graph has no entry module '{}'", .0.display())]
    MissingEntry(std::path::PathBuf),

    /// Invalid build options.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid output path (e.g., directory traversal attempt).
    #[error("Invalid output path: {0}")]
    InvalidOutputPath(String),

    /// File write operation failed.
    #[error("Write failure: {0}")]
    WriteFailure(String),

    /// Filesystem error from the runtime.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Result type alias for knit-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::Graph(GraphError::EntryNotFound(_)) => "ENTRY_NOT_FOUND",
            Error::Graph(GraphError::Resolve(_)) => "RESOLUTION_ERROR",
            Error::Graph(GraphError::Transform(_)) => "TRANSFORM_ERROR",
            Error::Graph(GraphError::Runtime(_)) => "IO_ERROR",
            Error::Graph(GraphError::NonUtf8Path(_)) => "INVALID_MODULE_PATH",
            Error::DanglingReference(_) => "DANGLING_REFERENCE",
            Error::MissingEntry(_) => "MISSING_ENTRY",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::InvalidOutputPath(_) => "INVALID_OUTPUT_PATH",
            Error::WriteFailure(_) => "WRITE_FAILURE",
            Error::Runtime(_) => "IO_ERROR",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::Graph(GraphError::Resolve(ResolveError::BareSpecifier { .. })) => Some(
                Box::new("Only relative ('./', '../') and absolute imports can be bundled."),
            ),
            Error::Graph(GraphError::Resolve(ResolveError::NotFound { .. })) => Some(Box::new(
                "Check that the file exists and the import path is spelled correctly.",
            )),
            Error::Graph(GraphError::Transform(TransformError::Syntax { .. })) => {
                Some(Box::new("Fix the syntax error and run the build again."))
            }
            Error::Graph(GraphError::Transform(TransformError::Unsupported { .. })) => Some(
                Box::new(
                    "Compile TypeScript and JSX to plain JavaScript and move top-level await into an async function before bundling.",
                ),
            ),
            Error::Graph(GraphError::NonUtf8Path(_)) => Some(Box::new(
                "Rename the file to a UTF-8 path or use numeric module ids.",
            )),
            Error::DanglingReference(_) | Error::MissingEntry(_) => Some(Box::new(
                "This is a bug in knit. Please report it with the project that triggered it.",
            )),
            Error::InvalidOutputPath(path) => Some(Box::new(format!(
                "The output path '{}' is invalid. Ensure it stays inside the output directory.",
                path
            ))),
            Error::WriteFailure(msg) => Some(Box::new(format!(
                "Failed to write file. Check disk space and permissions.\nError: {}",
                msg
            ))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Diagnostic;
    use std::path::PathBuf;

    #[test]
    fn test_error_codes() {
        let err = Error::Graph(GraphError::EntryNotFound(PathBuf::from("/p/entry.js")));
        assert_eq!(err.code().unwrap().to_string(), "ENTRY_NOT_FOUND");

        let err = Error::DanglingReference(DanglingReference {
            from: ModuleId::Index(0),
            specifier: "./a.js".to_string(),
            id: ModuleId::Index(9),
        });
        assert_eq!(err.code().unwrap().to_string(), "DANGLING_REFERENCE");
        assert!(err.help().is_some());
    }

    #[test]
    fn test_resolution_errors_have_help() {
        let err = Error::Graph(GraphError::Resolve(ResolveError::BareSpecifier {
            specifier: "react".to_string(),
            from: PathBuf::from("/p/entry.js"),
        }));
        assert!(err.help().unwrap().to_string().contains("relative"));
        assert!(err.to_string().contains("react"));
    }

    #[test]
    fn test_non_utf8_path_error_code() {
        let err = Error::Graph(GraphError::NonUtf8Path(PathBuf::from("/p/a.js")));
        assert_eq!(err.code().unwrap().to_string(), "INVALID_MODULE_PATH");
        assert!(err.help().unwrap().to_string().contains("numeric"));
    }
}
