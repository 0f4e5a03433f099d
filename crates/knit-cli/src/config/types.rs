use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Module id strategy as written in the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ModuleIds {
    #[default]
    Numeric,
    Path,
}
