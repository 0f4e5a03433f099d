//! Bundle code generation.
//!
//! Output shape:
//!
//! ```text
//! (function (modules) {
//!   function require(id) { ... }
//!   require(0);
//! })({
//!   0: [
//!     function (require, module, exports) {
//!       ...
//!     },
//!     {"./message.js":1},
//!   ],
//! });
//! ```

mod preamble;
mod table;

pub use preamble::preamble;
pub use table::{ModuleTable, TableEntry};

use knit::ModuleGraph;

use crate::Result;

/// Options for the emitted `require` runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeOptions {
    /// Evaluate each module once and share its exports. Off by default, so
    /// every `require` re-runs the module body.
    pub cache_modules: bool,
}

/// Generate the bundle text for `graph`.
///
/// Fails with [`crate::Error::DanglingReference`] if any mapping points
/// outside the graph.
pub fn generate(graph: &ModuleGraph, options: &RuntimeOptions) -> Result<String> {
    let table = ModuleTable::from_graph(graph)?;
    Ok(render(&table, options))
}

/// Render an already validated table.
pub fn render(table: &ModuleTable, options: &RuntimeOptions) -> String {
    let mut out = String::new();

    out.push_str("(function (modules) {\n");
    out.push_str(preamble(options.cache_modules));
    out.push('\n');
    out.push_str(&format!("  require({});\n", table.entry.to_js_literal()));
    out.push_str("})({\n");

    for entry in &table.entries {
        out.push_str(&format!("  {}: [\n", entry.id.to_js_literal()));
        out.push_str("    function (require, module, exports) {\n");
        out.push_str(&entry.code);
        if !entry.code.is_empty() && !entry.code.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("    },\n");
        out.push_str(&format!("    {},\n", mapping_literal(entry)));
        out.push_str("  ],\n");
    }

    out.push_str("});\n");
    out
}

fn mapping_literal(entry: &TableEntry) -> String {
    match &entry.mapping {
        None => "undefined".to_string(),
        Some(mapping) => {
            let pairs: Vec<String> = mapping
                .iter()
                .map(|(specifier, id)| {
                    format!(
                        "{}:{}",
                        serde_json::Value::String(specifier.clone()),
                        id.to_js_literal()
                    )
                })
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
    }
}
