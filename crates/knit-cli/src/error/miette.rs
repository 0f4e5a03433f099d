//! Miette report conversion for CLI errors.

use crate::error::{BuildError, CliError};
use miette::Report;

/// Convert a CliError to a miette Report.
///
/// Bundler errors keep their diagnostic code and help text.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(BuildError::Bundler(e)) => Report::new(e),
        CliError::Build(e) => miette::miette!("{}", e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}
