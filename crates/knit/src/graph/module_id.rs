use std::fmt;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use super::builder::GraphError;

/// Bundle-local identity of a module.
///
/// Ids key the module table in the generated bundle. Numeric ids are dense
/// and start at `0` for the entry; path ids are the module's location
/// relative to the build's working directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModuleId {
    Index(u32),
    Path(String),
}

impl ModuleId {
    /// Render the id as a JavaScript literal: `3` or `"src/entry.js"`.
    pub fn to_js_literal(&self) -> String {
        match self {
            ModuleId::Index(index) => index.to_string(),
            ModuleId::Path(path) => serde_json::Value::String(path.clone()).to_string(),
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleId::Index(index) => write!(f, "{index}"),
            ModuleId::Path(path) => f.write_str(path),
        }
    }
}

/// How module ids are assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleIdStrategy {
    /// Dense integers in discovery order.
    #[default]
    Numeric,
    /// Paths relative to the working directory.
    Path,
}

/// Hands out ids in discovery order for one build.
#[derive(Debug)]
pub(crate) struct IdAllocator<'a> {
    strategy: ModuleIdStrategy,
    cwd: &'a Path,
    next: u32,
}

impl<'a> IdAllocator<'a> {
    pub(crate) fn new(strategy: ModuleIdStrategy, cwd: &'a Path) -> Self {
        Self {
            strategy,
            cwd,
            next: 0,
        }
    }

    /// Id for the next newly discovered module at `key`.
    ///
    /// Called exactly once per distinct key. Path ids stay unique because
    /// keys are unique and the relative rendering is injective for a fixed
    /// `cwd`. Path ids need UTF-8 keys.
    pub(crate) fn allocate(&mut self, key: &Path) -> Result<ModuleId, GraphError> {
        match self.strategy {
            ModuleIdStrategy::Numeric => {
                let id = ModuleId::Index(self.next);
                self.next += 1;
                Ok(id)
            }
            ModuleIdStrategy::Path => relative_key(key, self.cwd)
                .map(ModuleId::Path)
                .ok_or_else(|| GraphError::NonUtf8Path(key.to_path_buf())),
        }
    }
}

/// `key` relative to `cwd`, with `/` separators. Keys outside `cwd` are
/// walked up to with `..` segments. `None` when a segment of `key` is not
/// valid UTF-8.
pub(crate) fn relative_key(key: &Path, cwd: &Path) -> Option<String> {
    let key_parts: Vec<Component<'_>> = key.components().collect();
    let cwd_parts: Vec<Component<'_>> = cwd.components().collect();

    let common = key_parts
        .iter()
        .zip(cwd_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    // Different roots or prefixes; nothing to share.
    if common == 0 && !cwd_parts.is_empty() {
        return key.to_str().map(|key| key.replace('\\', "/"));
    }

    let mut segments: Vec<String> = Vec::new();
    for _ in common..cwd_parts.len() {
        segments.push("..".to_string());
    }
    for part in &key_parts[common..] {
        segments.push(part.as_os_str().to_str()?.to_string());
    }

    Some(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_ids_are_dense() {
        let cwd = Path::new("/project");
        let mut ids = IdAllocator::new(ModuleIdStrategy::Numeric, cwd);
        assert_eq!(ids.allocate(Path::new("/project/a.js")).unwrap(), ModuleId::Index(0));
        assert_eq!(ids.allocate(Path::new("/project/b.js")).unwrap(), ModuleId::Index(1));
        assert_eq!(ids.allocate(Path::new("/project/c.js")).unwrap(), ModuleId::Index(2));
    }

    #[test]
    fn test_path_ids_are_cwd_relative() {
        let cwd = Path::new("/project");
        let mut ids = IdAllocator::new(ModuleIdStrategy::Path, cwd);
        assert_eq!(
            ids.allocate(Path::new("/project/src/entry.js")).unwrap(),
            ModuleId::Path("src/entry.js".to_string())
        );
        assert_eq!(
            ids.allocate(Path::new("/shared/util.js")).unwrap(),
            ModuleId::Path("../shared/util.js".to_string())
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_ids_are_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let cwd = Path::new("/project");
        // Two keys that differ only in bytes a lossy rendering would merge.
        let first = cwd.join(OsStr::from_bytes(b"a\xff.js"));
        let second = cwd.join(OsStr::from_bytes(b"a\xfe.js"));
        assert_eq!(relative_key(&first, cwd), None);

        let mut ids = IdAllocator::new(ModuleIdStrategy::Path, cwd);
        assert!(matches!(
            ids.allocate(&first),
            Err(GraphError::NonUtf8Path(path)) if path == first
        ));
        assert!(matches!(
            ids.allocate(&second),
            Err(GraphError::NonUtf8Path(path)) if path == second
        ));

        let mut numeric = IdAllocator::new(ModuleIdStrategy::Numeric, cwd);
        assert_eq!(numeric.allocate(&first).unwrap(), ModuleId::Index(0));
    }

    #[test]
    fn test_js_literal() {
        assert_eq!(ModuleId::Index(4).to_js_literal(), "4");
        assert_eq!(
            ModuleId::Path("src/a \"b\".js".to_string()).to_js_literal(),
            "\"src/a \\\"b\\\".js\""
        );
    }

    #[test]
    fn test_serde_forms() {
        assert_eq!(serde_json::to_string(&ModuleId::Index(1)).unwrap(), "1");
        assert_eq!(
            serde_json::to_string(&ModuleId::Path("a.js".into())).unwrap(),
            "\"a.js\""
        );
        let strategy: ModuleIdStrategy = serde_json::from_str("\"path\"").unwrap();
        assert_eq!(strategy, ModuleIdStrategy::Path);
    }
}
