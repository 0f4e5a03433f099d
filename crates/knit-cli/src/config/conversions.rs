use std::path::Path;

use knit_bundler::{BuildOptions, ModuleIdStrategy};

use crate::config::KnitConfig;
use crate::config::types::ModuleIds;

impl From<crate::cli::ModuleIds> for ModuleIds {
    fn from(ids: crate::cli::ModuleIds) -> Self {
        match ids {
            crate::cli::ModuleIds::Numeric => ModuleIds::Numeric,
            crate::cli::ModuleIds::Path => ModuleIds::Path,
        }
    }
}

impl From<ModuleIds> for ModuleIdStrategy {
    fn from(ids: ModuleIds) -> Self {
        match ids {
            ModuleIds::Numeric => ModuleIdStrategy::Numeric,
            ModuleIds::Path => ModuleIdStrategy::Path,
        }
    }
}

impl KnitConfig {
    /// Build options for a project rooted at `cwd`.
    pub fn to_build_options(&self, cwd: &Path) -> BuildOptions {
        let mut options = BuildOptions::new(&self.entry)
            .cwd(cwd)
            .module_ids(self.module_ids.into())
            .cache_modules(self.cache_modules);

        if let Some(extensions) = &self.extensions {
            options = options.extensions(extensions.iter().cloned());
        }

        options
    }
}
