use crate::config::KnitConfig;
use crate::error::{ConfigError, Result};

/// Check that `filename` names a file directly inside the output directory.
pub fn validate_filename(filename: &str) -> Result<()> {
    let hint = match filename {
        "" => Some("Filename cannot be empty"),
        "." | ".." => Some("Filename must name a file, not a directory"),
        _ if filename.contains(['/', '\\']) => {
            Some("Filename cannot contain path separators; use outDir for directories")
        }
        _ if filename.contains('\0') => Some("Filename cannot contain a null byte"),
        _ => None,
    };

    match hint {
        Some(hint) => Err(ConfigError::InvalidValue {
            field: "filename".to_string(),
            value: filename.to_string(),
            hint: hint.to_string(),
        }
        .into()),
        None => Ok(()),
    }
}

impl KnitConfig {
    /// Validate configuration for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.entry.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "entry".to_string(),
                hint: "Pass an entry module or set 'entry' in knit.config.json".to_string(),
            }
            .into());
        }

        validate_filename(&self.filename)?;

        if let Some(extensions) = &self.extensions {
            for ext in extensions {
                if ext.is_empty() || ext.starts_with('.') {
                    return Err(ConfigError::InvalidValue {
                        field: "extensions".to_string(),
                        value: ext.clone(),
                        hint: "Write extensions without a leading dot, e.g. \"js\"".to_string(),
                    }
                    .into());
                }
            }
        }

        Ok(())
    }
}
