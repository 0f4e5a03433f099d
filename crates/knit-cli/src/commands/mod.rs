//! Command implementations.
//!
//! - [`build`] - bundle an entry module into one file
//! - [`graph`] - print the module graph
//! - [`schema`] - print the config file schema

pub mod build;
pub mod graph;
pub mod schema;
pub mod utils;

pub use build::execute as build_execute;
pub use graph::execute as graph_execute;
pub use schema::execute as schema_execute;
