use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::ModuleIds;
use crate::cli::validation::parse_extension;

/// Available knit subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Bundle an entry module and everything it imports
    ///
    /// Writes one script to the output directory. Nothing is written when
    /// any module fails to resolve or parse.
    Build(BuildArgs),

    /// Print the module graph reachable from an entry module
    ///
    /// Lists every module with its id and the ids its imports map to.
    Graph(GraphArgs),

    /// Print the JSON schema for knit.config.json
    Schema,
}

/// Options shared by every command that walks a project.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Entry module (default: src/entry.js, or `entry` from the config file)
    #[arg(value_name = "ENTRY")]
    pub entry: Option<String>,

    /// Project directory; the entry, output directory and config file are
    /// resolved against it
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Config file to load instead of <cwd>/knit.config.json
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How modules are identified in the bundle
    ///
    /// - numeric: 0, 1, 2... in discovery order
    /// - path: project-relative file paths
    #[arg(long, value_enum, value_name = "KIND")]
    pub module_ids: Option<ModuleIds>,

    /// Extensions probed for imports written without one (comma separated)
    ///
    /// Example: --extensions js,mjs,json
    #[arg(long, value_delimiter = ',', value_parser = parse_extension, value_name = "EXT")]
    pub extensions: Option<Vec<String>>,
}

/// Arguments for the build command
#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Output directory (default: dist)
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Bundle file name inside the output directory (default: bundle.js)
    #[arg(short = 'o', long, value_name = "NAME")]
    pub filename: Option<String>,

    /// Evaluate each module at most once at runtime
    ///
    /// By default every `require` re-runs the module body.
    #[arg(long)]
    pub cache_modules: bool,

    /// Empty the output directory before writing the bundle
    #[arg(long)]
    pub clean: bool,
}

/// Arguments for the graph command
#[derive(Args, Debug, Clone, Default)]
pub struct GraphArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Print the graph as JSON on stdout
    #[arg(long)]
    pub json: bool,
}
