use std::path::PathBuf;

pub fn default_entry() -> String {
    "src/entry.js".to_string()
}

pub fn default_out_dir() -> PathBuf {
    PathBuf::from("dist")
}

pub fn default_filename() -> String {
    "bundle.js".to_string()
}

impl Default for crate::config::KnitConfig {
    fn default() -> Self {
        Self {
            entry: default_entry(),
            out_dir: default_out_dir(),
            filename: default_filename(),
            module_ids: crate::config::ModuleIds::default(),
            cache_modules: false,
            extensions: None,
            cwd: None,
            clean: false,
        }
    }
}
