//! # knit
//!
//! Knit foundation crate: module resolution, source transformation and the
//! module dependency graph.
//!
//! Starting from one entry file, [`GraphBuilder`] discovers every module
//! reachable through static imports, deduplicates modules reached along
//! more than one path, and numbers them in discovery order. Turning the
//! graph into a bundle is the job of the `knit-bundler` crate.
//!
//! ```no_run
//! use std::sync::Arc;
//! use knit::{GraphBuilder, ModuleIdStrategy, NativeRuntime};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = GraphBuilder::new(Arc::new(NativeRuntime::new()))
//!     .id_strategy(ModuleIdStrategy::Numeric)
//!     .build("src/entry.js")
//!     .await?;
//!
//! println!("{} modules", graph.len());
//! # Ok(()) }
//! ```

pub mod graph;
pub mod resolver;
pub mod runtime;
pub mod transform;

pub mod native_runtime;
pub use native_runtime::NativeRuntime;

// Test utilities (available in test builds and when test-utils feature is enabled)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use graph::{
    DanglingReference, GraphBuilder, GraphError, Module, ModuleGraph, ModuleId,
    ModuleIdStrategy, build_graph,
};
pub use resolver::{DEFAULT_EXTENSIONS, ModuleResolver, ResolveError};
pub use runtime::{FileMetadata, Runtime, RuntimeError, RuntimeResult};
pub use transform::{EsmTransformer, SourceTransformer, TransformError, TransformedModule};
