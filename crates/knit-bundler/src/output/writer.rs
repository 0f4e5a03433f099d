//! Atomic bundle writing.
//!
//! The bundle is written to a sibling temp file and renamed into place, so a
//! reader never sees a partially written bundle and a failed build never
//! leaves one behind. The output filename is checked against the output
//! directory so it cannot escape it.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use tracing::{debug, warn};

use knit::Runtime;

use crate::{Error, Result};

/// Write `code` to `dir/filename` through `runtime`, creating `dir` if
/// needed. Returns the final path.
pub async fn write_bundle(
    runtime: &dyn Runtime,
    dir: &Path,
    filename: &str,
    code: &str,
) -> Result<PathBuf> {
    let dir = dir.clean();
    let target = validate_output_path(&dir, filename)?;

    if let Some(parent) = target.parent() {
        runtime.create_dir(parent, true).await.map_err(|e| {
            Error::WriteFailure(format!(
                "Failed to create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp = temp_path(&target);
    runtime
        .write_file(&temp, code.as_bytes())
        .await
        .map_err(|e| {
            Error::WriteFailure(format!(
                "Failed to write temporary file '{}': {}",
                temp.display(),
                e
            ))
        })?;

    if let Err(e) = runtime.rename(&temp, &target).await {
        if let Err(cleanup) = runtime.remove_file(&temp).await {
            warn!(
                path = %temp.display(),
                error = %cleanup,
                "failed to clean up temporary file"
            );
        }
        return Err(Error::WriteFailure(format!(
            "Failed to rename '{}' to '{}': {}",
            temp.display(),
            target.display(),
            e
        )));
    }

    debug!(path = %target.display(), bytes = code.len(), "bundle written");
    Ok(target)
}

/// `bundle.js` -> `bundle.js.tmp`, next to the target.
fn temp_path(target: &Path) -> PathBuf {
    let mut name: OsString = target.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Join `filename` onto `base_dir`, rejecting anything that lands outside it.
pub fn validate_output_path(base_dir: &Path, filename: &str) -> Result<PathBuf> {
    if filename.is_empty() {
        return Err(Error::InvalidOutputPath("Filename is empty".to_string()));
    }

    if filename.contains('\0') {
        return Err(Error::InvalidOutputPath(
            "Filename contains null byte".to_string(),
        ));
    }

    let filename_path = Path::new(filename).clean();
    let full_path = base_dir.join(&filename_path).clean();

    if !full_path.starts_with(base_dir) || full_path == base_dir {
        return Err(Error::InvalidOutputPath(format!(
            "Path '{}' escapes output directory '{}' (resolved to '{}')",
            filename,
            base_dir.display(),
            full_path.display()
        )));
    }

    Ok(full_path)
}
