use crate::cli::{BuildArgs, ProjectArgs};
use crate::commands::utils::resolve_path;
use crate::config::{KnitConfig, ModuleIds};
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
    value::Uncased,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = "knit.config.json";

/// Prefix of configuration environment variables (`KNIT_OUT_DIR`, ...).
pub const ENV_PREFIX: &str = "KNIT_";

/// Values given on the command line. Unset fields leave lower layers alone.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    entry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    out_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    module_ids: Option<ModuleIds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cache_modules: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extensions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cwd: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    clean: Option<bool>,
}

impl From<&ProjectArgs> for CliOverrides {
    fn from(args: &ProjectArgs) -> Self {
        Self {
            entry: args.entry.clone(),
            module_ids: args.module_ids.map(Into::into),
            extensions: args.extensions.clone(),
            cwd: args.cwd.clone(),
            ..Self::default()
        }
    }
}

impl From<&BuildArgs> for CliOverrides {
    fn from(args: &BuildArgs) -> Self {
        Self {
            out_dir: args.out_dir.clone(),
            filename: args.filename.clone(),
            // Flags can only switch these on.
            cache_modules: args.cache_modules.then_some(true),
            clean: args.clean.then_some(true),
            ..Self::from(&args.project)
        }
    }
}

impl KnitConfig {
    /// Load the configuration for `knit build`.
    ///
    /// Relative `--cwd` and `--config` paths resolve against `base_dir`.
    pub fn load(args: &BuildArgs, base_dir: &Path) -> Result<Self> {
        Self::load_layers(&args.project, CliOverrides::from(args), base_dir)
    }

    /// Load the configuration for commands that only walk the graph.
    pub fn load_project(args: &ProjectArgs, base_dir: &Path) -> Result<Self> {
        Self::load_layers(args, CliOverrides::from(args), base_dir)
    }

    fn load_layers(args: &ProjectArgs, overrides: CliOverrides, base_dir: &Path) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = Self::config_file(args, base_dir)? {
            tracing::debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Json::file(path));
        }

        figment = figment
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .map(|key| Uncased::from(env_key_to_field(key.as_str())))
                    .lowercase(false),
            )
            .merge(Serialized::defaults(overrides));

        figment.extract().map_err(|e| {
            let field = if e.path.is_empty() {
                "configuration".to_string()
            } else {
                e.path.join(".")
            };
            ConfigError::InvalidValue {
                field,
                value: e.to_string(),
                hint: format!(
                    "Check {} and {}* environment variables for typos and field types",
                    CONFIG_FILE_NAME, ENV_PREFIX
                ),
            }
            .into()
        })
    }

    /// `--config` if given (it must exist), else `knit.config.json` in the
    /// project directory if present.
    fn config_file(args: &ProjectArgs, base_dir: &Path) -> Result<Option<PathBuf>> {
        if let Some(explicit) = &args.config {
            let path = resolve_path(explicit, base_dir);
            if !path.is_file() {
                return Err(ConfigError::NotFound(path).into());
            }
            return Ok(Some(path));
        }

        let project_dir = match &args.cwd {
            Some(cwd) => resolve_path(cwd, base_dir),
            None => base_dir.to_path_buf(),
        };
        let path = project_dir.join(CONFIG_FILE_NAME);
        Ok(path.is_file().then_some(path))
    }

    /// Directory the entry and output paths are relative to.
    pub fn project_root(&self, base_dir: &Path) -> PathBuf {
        match &self.cwd {
            Some(cwd) => resolve_path(cwd, base_dir),
            None => base_dir.to_path_buf(),
        }
    }
}

/// `OUT_DIR` -> `outDir`.
pub(crate) fn env_key_to_field(key: &str) -> String {
    let mut field = String::with_capacity(key.len());
    let mut upper_next = false;

    for c in key.chars() {
        if c == '_' {
            upper_next = !field.is_empty();
        } else if upper_next {
            field.extend(c.to_uppercase());
            upper_next = false;
        } else {
            field.extend(c.to_lowercase());
        }
    }

    field
}
