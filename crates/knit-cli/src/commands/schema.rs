//! `knit schema`: print the JSON schema of `knit.config.json`.

use crate::config::KnitConfig;
use crate::error::Result;

pub fn execute() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&KnitConfig::json_schema())?);
    Ok(())
}
