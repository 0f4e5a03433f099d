//! knit CLI - bundle a JavaScript module graph into a single file.
//!
//! The binary is a thin shell over `knit-bundler`:
//!
//! - [`cli`] - argument definitions (clap derive)
//! - [`config`] - `knit.config.json` loading and validation
//! - [`commands`] - `build`, `graph` and `schema`
//! - [`error`] - CLI error types and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status lines, spinner and build summary
//!
//! ```rust,no_run
//! use knit_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{BuildError, CliError, ConfigError, Result, ResultExt};
