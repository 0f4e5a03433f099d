//! Command-line interface definition.
//!
//! - `knit build [ENTRY]` - bundle an entry module into one file
//! - `knit graph [ENTRY]` - print the module graph
//! - `knit schema` - print the JSON schema of `knit.config.json`

mod commands;
pub mod enums;
mod validation;

use clap::Parser;

pub use commands::{BuildArgs, Command, GraphArgs, ProjectArgs};
pub use enums::*;
pub use validation::parse_extension;

/// knit - bundle a JavaScript module graph into a single file
#[derive(Parser, Debug)]
#[command(
    name = "knit",
    version,
    about = "Bundle a JavaScript module graph into a single file",
    long_about = "knit follows relative imports from one entry module, wraps every module\n\
                  in a function, and writes a single self-contained script that runs the\n\
                  entry module when loaded."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
