use indexmap::IndexMap;
use knit::{ModuleGraph, ModuleId};

use crate::{Error, Result};

/// One row of the bundle's module table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEntry {
    pub id: ModuleId,
    /// Opaque wrapper body.
    pub code: String,
    /// `None` when the module has no imports; emitted as `undefined`.
    pub mapping: Option<IndexMap<String, ModuleId>>,
}

/// The closed set of modules a bundle carries, in id order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleTable {
    pub entry: ModuleId,
    pub entries: Vec<TableEntry>,
}

impl ModuleTable {
    /// Build the table for `graph`, checking that it is closed.
    pub fn from_graph(graph: &ModuleGraph) -> Result<Self> {
        graph.validate()?;

        let entry = graph
            .entry_id()
            .cloned()
            .ok_or_else(|| Error::MissingEntry(graph.entry().to_path_buf()))?;

        let entries = graph
            .iter()
            .map(|module| TableEntry {
                id: module.id.clone(),
                code: module.code.clone(),
                mapping: if module.mapping.is_empty() {
                    None
                } else {
                    Some(module.mapping.clone())
                },
            })
            .collect();

        Ok(Self { entry, entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
