//! Schema node model: structural descriptions of value shapes.
//!
//! A [`SchemaNode`] describes the shape of a value, not the value itself.
//! The variant universe mirrors the data model of the sync layer (null,
//! booleans, integers, floats, strings, binary, arrays, maps), extended with
//! the shapes a static analysis needs to distinguish: keyed objects with
//! declared fields, fixed-length tuples, variable-length arrays with an
//! optional fixed prefix, unions of alternative shapes, and named references.
//!
//! # Self-reference
//!
//! A schema may refer to itself (or to another schema) through
//! [`SchemaNode::Ref`], resolved against a [`SchemaRegistry`]. References are
//! purely name-based; there is no pointer identity between nodes, so a
//! recursive definition is an ordinary finite tree of nodes plus a registry
//! entry.
//!
//! # Wire format
//!
//! All schema types serialize with an internally-tagged camelCase
//! representation (`{"type": "object", "fields": [...]}`), matching the
//! conventions of the message schemas, so descriptions round-trip through
//! JSON and named `MsgPack`.

use std::collections::{btree_map, BTreeMap};

use serde::{Deserialize, Serialize};

/// Structural description of a value's shape.
///
/// Leaf variants (primitives, opaque containers, [`Any`](SchemaNode::Any),
/// [`Never`](SchemaNode::Never)) have no enumerable members. Container
/// variants carry their member schemas inline; member order is declaration
/// order and is significant for deterministic enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SchemaNode {
    /// The null value.
    Null,
    /// A boolean.
    Bool,
    /// A signed 64-bit integer.
    Int,
    /// A 64-bit IEEE 754 float.
    Float,
    /// A UTF-8 string.
    String,
    /// Raw binary data.
    Bytes,
    /// The wildcard shape: any value at all. Contributes no sub-paths.
    Any,
    /// The empty shape: no value inhabits it. Contributes no sub-paths.
    Never,
    /// An opaque map with uniform values and keys unknown at definition
    /// time. Its entries are not addressable, so it is a leaf.
    Map {
        /// Shape of every value in the map.
        value: Box<SchemaNode>,
    },
    /// An opaque set. Like [`Map`](SchemaNode::Map), a leaf.
    Set {
        /// Shape of every element in the set.
        element: Box<SchemaNode>,
    },
    /// A keyed container with declared, ordered fields.
    Object {
        /// Member fields in declaration order.
        fields: Vec<Field>,
    },
    /// A fixed-length sequence. Member keys are the indices `0..n-1`.
    Tuple {
        /// Element shapes, one per slot.
        elements: Vec<SchemaNode>,
    },
    /// A variable-length sequence: a statically-indexed prefix followed by
    /// an open tail of uniform elements. A fully uniform array has an empty
    /// prefix.
    Array {
        /// Fixed leading slots, addressable by index.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        prefix: Vec<SchemaNode>,
        /// Shape of every element beyond the prefix.
        element: Box<SchemaNode>,
    },
    /// A union of alternative shapes, each walked independently.
    Union {
        /// The alternatives, in declaration order.
        variants: Vec<SchemaNode>,
    },
    /// A named reference to a definition in a [`SchemaRegistry`].
    Ref {
        /// Definition name to resolve.
        name: String,
    },
}

impl SchemaNode {
    /// Builds an [`Object`](SchemaNode::Object) from fields in order.
    #[must_use]
    pub fn object(fields: impl IntoIterator<Item = Field>) -> Self {
        Self::Object { fields: fields.into_iter().collect() }
    }

    /// Builds a [`Tuple`](SchemaNode::Tuple) from element shapes in order.
    #[must_use]
    pub fn tuple(elements: impl IntoIterator<Item = SchemaNode>) -> Self {
        Self::Tuple { elements: elements.into_iter().collect() }
    }

    /// Builds a uniform [`Array`](SchemaNode::Array) with no fixed prefix.
    #[must_use]
    pub fn array(element: SchemaNode) -> Self {
        Self::Array { prefix: Vec::new(), element: Box::new(element) }
    }

    /// Builds an [`Array`](SchemaNode::Array) with fixed leading slots
    /// followed by an open uniform tail.
    #[must_use]
    pub fn array_with_prefix(
        prefix: impl IntoIterator<Item = SchemaNode>,
        element: SchemaNode,
    ) -> Self {
        Self::Array {
            prefix: prefix.into_iter().collect(),
            element: Box::new(element),
        }
    }

    /// Builds a [`Union`](SchemaNode::Union) of alternatives in order.
    #[must_use]
    pub fn union(variants: impl IntoIterator<Item = SchemaNode>) -> Self {
        Self::Union { variants: variants.into_iter().collect() }
    }

    /// Builds an opaque [`Map`](SchemaNode::Map) with uniform values.
    #[must_use]
    pub fn map(value: SchemaNode) -> Self {
        Self::Map { value: Box::new(value) }
    }

    /// Builds an opaque [`Set`](SchemaNode::Set) with uniform elements.
    #[must_use]
    pub fn set(element: SchemaNode) -> Self {
        Self::Set { element: Box::new(element) }
    }

    /// Builds a named [`Ref`](SchemaNode::Ref).
    #[must_use]
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Ref { name: name.into() }
    }
}

fn default_required() -> bool {
    true
}

/// A single named member of an [`Object`](SchemaNode::Object) schema.
///
/// `required: false` marks a member that may be absent from conforming
/// values. Path enumeration treats optional members as present with their
/// declared shape, so an optional field still contributes its paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Member name; the path segment for this field.
    pub name: String,
    /// Shape of the member's value.
    pub schema: SchemaNode,
    /// Whether conforming values must carry this member.
    #[serde(default = "default_required")]
    pub required: bool,
}

impl Field {
    /// A required field.
    #[must_use]
    pub fn new(name: impl Into<String>, schema: SchemaNode) -> Self {
        Self { name: name.into(), schema, required: true }
    }

    /// An optional field.
    #[must_use]
    pub fn optional(name: impl Into<String>, schema: SchemaNode) -> Self {
        Self { name: name.into(), schema, required: false }
    }
}

/// Errors from building a schema definition table.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A definition name was registered twice.
    #[error("schema definition '{name}' already exists in the registry")]
    DuplicateDefinition {
        /// The name that was already taken.
        name: String,
    },
}

/// Table of named schema definitions, the resolution target for
/// [`SchemaNode::Ref`].
///
/// Uses a `BTreeMap` so iteration order over definition names is
/// deterministic. Definitions are immutable once registered; a duplicate
/// name is rejected rather than silently replaced.
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    definitions: BTreeMap<String, SchemaNode>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a named definition.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateDefinition`] if `name` is already
    /// registered. The existing definition is left untouched.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        schema: SchemaNode,
    ) -> Result<(), SchemaError> {
        match self.definitions.entry(name.into()) {
            btree_map::Entry::Occupied(entry) => Err(SchemaError::DuplicateDefinition {
                name: entry.key().clone(),
            }),
            btree_map::Entry::Vacant(entry) => {
                tracing::debug!(name = %entry.key(), "registered schema definition");
                entry.insert(schema);
                Ok(())
            }
        }
    }

    /// Looks up a definition by name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&SchemaNode> {
        self.definitions.get(name)
    }

    /// Returns all definition names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    /// Returns the number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` if no definitions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    // ---- Registry ----

    #[test]
    fn define_and_resolve() {
        let mut registry = SchemaRegistry::new();
        registry.define("user", SchemaNode::object([Field::new("id", SchemaNode::Int)]))
            .expect("first definition");
        assert_eq!(registry.len(), 1);
        assert!(matches!(
            registry.resolve("user"),
            Some(SchemaNode::Object { .. })
        ));
        assert!(registry.resolve("missing").is_none());
    }

    #[test]
    fn duplicate_definition_rejected_and_original_kept() {
        let mut registry = SchemaRegistry::new();
        registry.define("node", SchemaNode::Int).expect("first definition");
        let err = registry.define("node", SchemaNode::Bool).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateDefinition { name } if name == "node"));
        assert_eq!(registry.resolve("node"), Some(&SchemaNode::Int));
    }

    #[test]
    fn names_are_sorted() {
        let mut registry = SchemaRegistry::new();
        registry.define("zebra", SchemaNode::Int).expect("define");
        registry.define("apple", SchemaNode::Bool).expect("define");
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["apple", "zebra"]);
    }

    #[test]
    fn empty_registry() {
        let registry = SchemaRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    // ---- Constructors ----

    #[test]
    fn field_constructors_set_required_flag() {
        let required = Field::new("a", SchemaNode::Int);
        let optional = Field::optional("b", SchemaNode::Int);
        assert!(required.required);
        assert!(!optional.required);
    }

    #[test]
    fn array_builder_has_empty_prefix() {
        let array = SchemaNode::array(SchemaNode::String);
        assert!(matches!(array, SchemaNode::Array { ref prefix, .. } if prefix.is_empty()));
    }

    #[test]
    fn array_with_prefix_builder_keeps_order() {
        let array = SchemaNode::array_with_prefix(
            [SchemaNode::Int, SchemaNode::Bool],
            SchemaNode::String,
        );
        match array {
            SchemaNode::Array { prefix, element } => {
                assert_eq!(prefix, vec![SchemaNode::Int, SchemaNode::Bool]);
                assert_eq!(*element, SchemaNode::String);
            }
            other => panic!("expected array, got {other:?}"),
        }
    }

    // ---- Serde wire form ----

    #[test]
    fn primitives_serialize_tagged() {
        assert_eq!(serde_json::to_value(SchemaNode::Int).expect("serialize"), json!({"type": "int"}));
        assert_eq!(serde_json::to_value(SchemaNode::Any).expect("serialize"), json!({"type": "any"}));
        assert_eq!(
            serde_json::to_value(SchemaNode::Never).expect("serialize"),
            json!({"type": "never"})
        );
    }

    #[test]
    fn object_serializes_with_fields() {
        let schema = SchemaNode::object([Field::new("filename", SchemaNode::String)]);
        assert_eq!(
            serde_json::to_value(&schema).expect("serialize"),
            json!({
                "type": "object",
                "fields": [
                    {"name": "filename", "schema": {"type": "string"}, "required": true}
                ]
            })
        );
    }

    #[test]
    fn field_required_defaults_to_true_on_deserialize() {
        let field: Field = serde_json::from_value(json!({
            "name": "x",
            "schema": {"type": "int"}
        }))
        .expect("deserialize");
        assert!(field.required);
    }

    #[test]
    fn uniform_array_omits_empty_prefix() {
        let schema = SchemaNode::array(SchemaNode::Int);
        assert_eq!(
            serde_json::to_value(&schema).expect("serialize"),
            json!({"type": "array", "element": {"type": "int"}})
        );
    }

    #[test]
    fn json_roundtrip_nested_schema() {
        let schema = SchemaNode::object([
            Field::new("items", SchemaNode::array_with_prefix(
                [SchemaNode::object([Field::new("filename", SchemaNode::String)])],
                SchemaNode::String,
            )),
            Field::optional("meta", SchemaNode::map(SchemaNode::Any)),
            Field::new("kind", SchemaNode::union([SchemaNode::Int, SchemaNode::String])),
            Field::new("next", SchemaNode::reference("self")),
        ]);
        let encoded = serde_json::to_string(&schema).expect("serialize");
        let decoded: SchemaNode = serde_json::from_str(&encoded).expect("deserialize");
        assert_eq!(decoded, schema);
    }

    #[test]
    fn msgpack_roundtrip_nested_schema() {
        let schema = SchemaNode::object([
            Field::new("children", SchemaNode::array(SchemaNode::reference("tree"))),
            Field::new("value", SchemaNode::Int),
        ]);
        let bytes = rmp_serde::to_vec_named(&schema).expect("serialize");
        let decoded: SchemaNode = rmp_serde::from_slice(&bytes).expect("deserialize");
        assert_eq!(decoded, schema);
    }
}
