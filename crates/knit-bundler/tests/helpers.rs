//! Shared test utilities for knit-bundler tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use knit_bundler::{BuildOptions, NativeRuntime};

/// Get the path to a fixture project
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// BuildOptions rooted at a fixture project
pub fn fixture_options(name: &str, entry: &str) -> BuildOptions {
    BuildOptions::new(entry)
        .cwd(fixture(name))
        .runtime(Arc::new(NativeRuntime::new()))
}

/// Whether a `node` binary is available to execute bundles
pub fn node_available() -> bool {
    Command::new("node")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Output of running a bundle with node
pub struct NodeRun {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Run the bundle at `path` with node
pub fn run_node(path: &Path) -> NodeRun {
    let output = Command::new("node")
        .arg(path)
        .output()
        .expect("failed to spawn node");

    NodeRun {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}
