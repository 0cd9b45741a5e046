//! Schema document loading.
//!
//! The on-disk format is a JSON object with a root `schema` and an optional
//! `definitions` table for named references:
//!
//! ```json
//! {
//!   "schema": {"type": "ref", "name": "tree"},
//!   "definitions": {
//!     "tree": {
//!       "type": "object",
//!       "fields": [
//!         {"name": "value", "schema": {"type": "int"}},
//!         {"name": "children", "schema": {
//!           "type": "array",
//!           "element": {"type": "ref", "name": "tree"}
//!         }}
//!       ]
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use pathset_core::{SchemaNode, SchemaRegistry};

/// A parsed schema description file.
#[derive(Debug, Deserialize)]
pub struct SchemaDocument {
    /// The root schema to enumerate.
    pub schema: SchemaNode,
    /// Named definitions referenced via `{"type": "ref", "name": ...}`.
    #[serde(default)]
    pub definitions: BTreeMap<String, SchemaNode>,
}

impl SchemaDocument {
    /// Splits the document into the root schema and a populated registry.
    ///
    /// # Errors
    ///
    /// Fails if the definitions table contains a duplicate name, which a
    /// JSON object cannot normally express but a hand-built document can.
    pub fn into_parts(self) -> anyhow::Result<(SchemaNode, SchemaRegistry)> {
        let mut registry = SchemaRegistry::new();
        for (name, schema) in self.definitions {
            registry
                .define(name, schema)
                .context("invalid definitions table")?;
        }
        Ok((self.schema, registry))
    }
}

/// Reads and parses a schema description file.
///
/// # Errors
///
/// Fails if the file cannot be read or is not valid schema JSON; the error
/// context names the offending path.
pub fn read_document(path: &Path) -> anyhow::Result<SchemaDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read schema file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid schema JSON in {}", path.display()))
}
