//! Asset resolution.
//!
//! Turns an import string written inside one module into the canonical key
//! of the module it names. Resolution has two layers:
//!
//! 1. [`join_specifier`] is a pure lexical join of the importer's directory
//!    and the specifier, with `.` and `..` collapsed.
//! 2. [`ModuleResolver::resolve`] takes that candidate and probes the
//!    filesystem: the path as written, then each configured extension, then
//!    `index.<ext>` inside a directory.
//!
//! Only relative (`./`, `../`) and absolute specifiers are bundled. Bare
//! package names have no place in a closed-world bundle and are rejected.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use tracing::trace;

use crate::runtime::Runtime;

/// Extensions tried, in order, when an import omits one.
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "jsx", "json"];

/// Errors produced while resolving an import specifier.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The specifier is an empty string.
    #[error("Empty import specifier in '{}'", .from.display())]
    EmptySpecifier { from: PathBuf },

    /// The specifier names a package instead of a relative path.
    #[error(
        "Cannot resolve '{specifier}' from '{}': only relative imports can be bundled",
        .from.display()
    )]
    BareSpecifier { specifier: String, from: PathBuf },

    /// The specifier climbs above the filesystem root.
    #[error("Import '{specifier}' from '{}' escapes the filesystem root", .from.display())]
    EscapesRoot { specifier: String, from: PathBuf },

    /// No file exists at the joined location or any probed variant of it.
    #[error(
        "Cannot find module '{specifier}' imported from '{}' (looked for {})",
        .from.display(),
        format_candidates(.tried)
    )]
    NotFound {
        specifier: String,
        from: PathBuf,
        tried: Vec<PathBuf>,
    },
}

fn format_candidates(tried: &[PathBuf]) -> String {
    tried
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Whether `specifier` is written as a path rather than a package name.
pub fn is_path_specifier(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
        || specifier.starts_with('/')
}

/// Lexically join `specifier` onto the directory of `from`.
///
/// Pure: the filesystem is never consulted, so the same inputs always give
/// the same key.
pub fn join_specifier(from: &Path, specifier: &str) -> Result<PathBuf, ResolveError> {
    if specifier.is_empty() {
        return Err(ResolveError::EmptySpecifier {
            from: from.to_path_buf(),
        });
    }

    if !is_path_specifier(specifier) {
        return Err(ResolveError::BareSpecifier {
            specifier: specifier.to_string(),
            from: from.to_path_buf(),
        });
    }

    let joined = if specifier.starts_with('/') {
        PathBuf::from(specifier)
    } else {
        from.parent().unwrap_or(Path::new("")).join(specifier)
    };

    normalize(&joined).ok_or_else(|| ResolveError::EscapesRoot {
        specifier: specifier.to_string(),
        from: from.to_path_buf(),
    })
}

/// Collapse `.` and `..` components. Returns `None` when a `..` would step
/// above the root of an absolute path.
fn normalize(path: &Path) -> Option<PathBuf> {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => return None,
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    Some(parts.iter().collect())
}

/// Resolves import specifiers to canonical module keys.
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    extensions: Vec<String>,
}

impl Default for ModuleResolver {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()))
    }
}

impl ModuleResolver {
    /// Create a resolver that probes `extensions` (without leading dots), in
    /// the order given.
    pub fn new(extensions: impl IntoIterator<Item = String>) -> Self {
        Self {
            extensions: extensions.into_iter().collect(),
        }
    }

    /// Resolve `specifier` as written in the module at `from`.
    pub async fn resolve(
        &self,
        from: &Path,
        specifier: &str,
        runtime: &dyn Runtime,
    ) -> Result<PathBuf, ResolveError> {
        let candidate = join_specifier(from, specifier)?;
        let mut tried = Vec::new();

        if is_file(&candidate, runtime).await {
            return Ok(candidate);
        }
        tried.push(candidate.clone());

        for ext in &self.extensions {
            let with_ext = append_extension(&candidate, ext);
            if is_file(&with_ext, runtime).await {
                trace!(specifier, resolved = %with_ext.display(), "resolved with extension");
                return Ok(with_ext);
            }
            tried.push(with_ext);
        }

        if is_dir(&candidate, runtime).await {
            for ext in &self.extensions {
                let index = candidate.join(format!("index.{ext}"));
                if is_file(&index, runtime).await {
                    trace!(specifier, resolved = %index.display(), "resolved directory index");
                    return Ok(index);
                }
                tried.push(index);
            }
        }

        Err(ResolveError::NotFound {
            specifier: specifier.to_string(),
            from: from.to_path_buf(),
            tried,
        })
    }
}

/// `a/b.config` + `js` is `a/b.config.js`, not `a/b.js`.
fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut os: OsString = path.as_os_str().to_owned();
    os.push(".");
    os.push(ext);
    PathBuf::from(os)
}

async fn is_file(path: &Path, runtime: &dyn Runtime) -> bool {
    if !runtime.exists(path) {
        return false;
    }
    runtime
        .metadata(path)
        .await
        .map(|metadata| metadata.is_file)
        .unwrap_or(false)
}

async fn is_dir(path: &Path, runtime: &dyn Runtime) -> bool {
    if !runtime.exists(path) {
        return false;
    }
    runtime
        .metadata(path)
        .await
        .map(|metadata| metadata.is_dir)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TestRuntime, write_files};
    use tempfile::TempDir;

    #[test]
    fn test_join_relative_to_importer_directory() {
        let key = join_specifier(Path::new("/project/src/entry.js"), "./message.js").unwrap();
        assert_eq!(key, PathBuf::from("/project/src/message.js"));
    }

    #[test]
    fn test_join_collapses_parent_components() {
        let key =
            join_specifier(Path::new("/project/src/lib/a.js"), "../util/./b.js").unwrap();
        assert_eq!(key, PathBuf::from("/project/src/util/b.js"));
    }

    #[test]
    fn test_join_is_deterministic() {
        let from = Path::new("/project/src/entry.js");
        assert_eq!(
            join_specifier(from, "./a/../b.js").unwrap(),
            join_specifier(from, "./b.js").unwrap()
        );
    }

    #[test]
    fn test_join_absolute_specifier() {
        let key = join_specifier(Path::new("/project/src/entry.js"), "/shared/x.js").unwrap();
        assert_eq!(key, PathBuf::from("/shared/x.js"));
    }

    #[test]
    fn test_join_rejects_bare_specifier() {
        let err = join_specifier(Path::new("/project/src/entry.js"), "react").unwrap_err();
        assert!(matches!(err, ResolveError::BareSpecifier { .. }));
        assert!(err.to_string().contains("only relative imports"));
    }

    #[test]
    fn test_join_rejects_empty_specifier() {
        let err = join_specifier(Path::new("/project/entry.js"), "").unwrap_err();
        assert!(matches!(err, ResolveError::EmptySpecifier { .. }));
    }

    #[test]
    fn test_join_rejects_escape_above_root() {
        let err = join_specifier(Path::new("/entry.js"), "../../etc/passwd").unwrap_err();
        assert!(matches!(err, ResolveError::EscapesRoot { .. }));
    }

    #[test]
    fn test_append_extension_keeps_existing_dots() {
        assert_eq!(
            append_extension(Path::new("/p/b.config"), "js"),
            PathBuf::from("/p/b.config.js")
        );
    }

    #[tokio::test]
    async fn test_resolve_exact_file() {
        let temp = TempDir::new().unwrap();
        write_files(temp.path(), &[("src/entry.js", ""), ("src/a.js", "")]);
        let runtime = TestRuntime::new(temp.path().to_path_buf());

        let resolved = ModuleResolver::default()
            .resolve(&temp.path().join("src/entry.js"), "./a.js", &runtime)
            .await
            .unwrap();
        assert_eq!(resolved, temp.path().join("src/a.js"));
    }

    #[tokio::test]
    async fn test_resolve_probes_extensions_in_order() {
        let temp = TempDir::new().unwrap();
        write_files(
            temp.path(),
            &[("entry.js", ""), ("util.mjs", ""), ("util.json", "{}")],
        );
        let runtime = TestRuntime::new(temp.path().to_path_buf());

        let resolved = ModuleResolver::default()
            .resolve(&temp.path().join("entry.js"), "./util", &runtime)
            .await
            .unwrap();
        assert_eq!(resolved, temp.path().join("util.mjs"));
    }

    #[tokio::test]
    async fn test_resolve_directory_index() {
        let temp = TempDir::new().unwrap();
        write_files(temp.path(), &[("entry.js", ""), ("lib/index.js", "")]);
        let runtime = TestRuntime::new(temp.path().to_path_buf());

        let resolved = ModuleResolver::default()
            .resolve(&temp.path().join("entry.js"), "./lib", &runtime)
            .await
            .unwrap();
        assert_eq!(resolved, temp.path().join("lib/index.js"));
    }

    #[tokio::test]
    async fn test_resolve_without_extensions_requires_exact_match() {
        let temp = TempDir::new().unwrap();
        write_files(temp.path(), &[("entry.js", ""), ("a.js", "")]);
        let runtime = TestRuntime::new(temp.path().to_path_buf());

        let err = ModuleResolver::new(Vec::new())
            .resolve(&temp.path().join("entry.js"), "./a", &runtime)
            .await
            .unwrap_err();
        match err {
            ResolveError::NotFound { tried, .. } => assert_eq!(tried.len(), 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_missing_module() {
        let temp = TempDir::new().unwrap();
        write_files(temp.path(), &[("entry.js", "")]);
        let runtime = TestRuntime::new(temp.path().to_path_buf());

        let err = ModuleResolver::default()
            .resolve(&temp.path().join("entry.js"), "./missing.js", &runtime)
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::NotFound { .. }));
        assert!(err.to_string().contains("./missing.js"));
    }
}
