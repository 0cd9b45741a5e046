//! Schema normalization: classify a node and list its addressable members.
//!
//! Two pure functions prepare a [`SchemaNode`] for enumeration:
//!
//! - [`expand_alternatives`] flattens unions and resolves named references
//!   into the list of concrete alternative shapes a node can take.
//! - [`classify`] decides, for one concrete shape, whether it is a leaf or a
//!   container, and lists the container's members as `(segment, schema)`
//!   pairs in declaration order.
//!
//! Variable-length arrays are split here: the fixed prefix becomes indexed
//! members and the open tail becomes a single [`Segment::AnyIndex`] member.

use std::collections::BTreeSet;
use std::fmt;

use crate::schema::{SchemaNode, SchemaRegistry};

/// One component of an access path.
///
/// Member keys are either declared field names or numeric indices, so every
/// segment is expressible as a path string. `Display` is the canonical
/// stringifier: names verbatim, indices in decimal, the open-tail wildcard
/// as `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A declared field name of a keyed container.
    Key(String),
    /// A fixed numeric index of a tuple or array prefix.
    Index(usize),
    /// Any index beyond an array's fixed prefix.
    AnyIndex,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(name) => write!(f, "{name}"),
            Self::Index(index) => write!(f, "{index}"),
            Self::AnyIndex => write!(f, "*"),
        }
    }
}

/// Classification of one concrete schema shape.
#[derive(Debug)]
pub enum Shape<'a> {
    /// No enumerable members: primitives, opaque containers, `any`, `never`.
    Leaf,
    /// Addressable members in declaration order.
    Members(Vec<(Segment, &'a SchemaNode)>),
}

static WILDCARD_LEAF: SchemaNode = SchemaNode::Any;

/// Flattens a node into its concrete alternatives.
///
/// Unions distribute: each variant is expanded independently and the results
/// are concatenated in declaration order. References resolve through the
/// registry; a reference to a missing definition degrades to the `any`
/// wildcard rather than failing.
///
/// Each definition name is expanded at most once per call. Alternatives all
/// land in one flat list consumed under a single path prefix, so a repeated
/// name would only re-contribute an identical path set; skipping it is plain
/// set deduplication. The same rule makes a degenerate alias that unions
/// itself (`a = a | int`) terminate instead of looping.
#[must_use]
pub fn expand_alternatives<'a>(
    node: &'a SchemaNode,
    registry: &'a SchemaRegistry,
) -> Vec<&'a SchemaNode> {
    let mut alternatives = Vec::new();
    let mut expanded_names = BTreeSet::new();
    push_alternatives(node, registry, &mut expanded_names, &mut alternatives);
    alternatives
}

fn push_alternatives<'a>(
    node: &'a SchemaNode,
    registry: &'a SchemaRegistry,
    expanded_names: &mut BTreeSet<&'a str>,
    alternatives: &mut Vec<&'a SchemaNode>,
) {
    match node {
        SchemaNode::Union { variants } => {
            for variant in variants {
                push_alternatives(variant, registry, expanded_names, alternatives);
            }
        }
        SchemaNode::Ref { name } => {
            if !expanded_names.insert(name.as_str()) {
                return;
            }
            match registry.resolve(name) {
                Some(resolved) => {
                    push_alternatives(resolved, registry, expanded_names, alternatives);
                }
                None => alternatives.push(&WILDCARD_LEAF),
            }
        }
        concrete => alternatives.push(concrete),
    }
}

/// Classifies one concrete shape as leaf or container.
///
/// Optional object fields are listed like required ones: absence in a
/// conforming value does not remove the member from the path universe.
/// Callers flatten unions and references with [`expand_alternatives`] first;
/// if one reaches this function anyway it classifies as a leaf.
#[must_use]
pub fn classify(node: &SchemaNode) -> Shape<'_> {
    match node {
        SchemaNode::Object { fields } => Shape::Members(
            fields
                .iter()
                .map(|field| (Segment::Key(field.name.clone()), &field.schema))
                .collect(),
        ),
        SchemaNode::Tuple { elements } => Shape::Members(
            elements
                .iter()
                .enumerate()
                .map(|(index, element)| (Segment::Index(index), element))
                .collect(),
        ),
        SchemaNode::Array { prefix, element } => {
            let mut members: Vec<(Segment, &SchemaNode)> = prefix
                .iter()
                .enumerate()
                .map(|(index, slot)| (Segment::Index(index), slot))
                .collect();
            members.push((Segment::AnyIndex, element.as_ref()));
            Shape::Members(members)
        }
        _ => Shape::Leaf,
    }
}
