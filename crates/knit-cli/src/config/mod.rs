//! `knit.config.json` loading.
//!
//! Merges settings from CLI args, environment variables, and the config file.
//! Priority: CLI > Environment (`KNIT_*`) > File > Defaults

mod conversions;
mod defaults;
mod loading;
mod types;
mod validation;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use defaults::*;
pub use loading::{CONFIG_FILE_NAME, ENV_PREFIX};
pub use types::*;
pub use validation::*;

/// knit configuration - loaded from knit.config.json, `KNIT_*` or CLI args.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct KnitConfig {
    /// Entry module, relative to `cwd`
    #[serde(default = "default_entry")]
    pub entry: String,

    /// Output directory, relative to `cwd`
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Bundle file name inside `outDir`
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Module id strategy (numeric, path)
    #[serde(default)]
    pub module_ids: ModuleIds,

    /// Evaluate each module at most once at runtime
    #[serde(default)]
    pub cache_modules: bool,

    /// Extensions probed for extensionless imports, without the leading dot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,

    /// Project directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,

    /// Empty `outDir` before writing
    #[serde(default)]
    pub clean: bool,
}

impl KnitConfig {
    /// JSON schema of the config file.
    pub fn json_schema() -> serde_json::Value {
        serde_json::to_value(schemars::schema_for!(KnitConfig)).unwrap_or_default()
    }
}
