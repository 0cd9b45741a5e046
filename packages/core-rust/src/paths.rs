//! Static enumeration of every legal access path into a schema-described
//! value.
//!
//! [`enumerate_paths`] walks a [`SchemaNode`] and produces the complete,
//! finite set of dot-joined path strings that a "get value at path" accessor
//! would accept. The walk is an analysis of the schema alone; no data values
//! are involved.
//!
//! # Termination
//!
//! Schemas may reference themselves through a [`SchemaRegistry`], so the
//! structural definition can be infinite. The walk stays finite because the
//! depth budget in [`PathsOptions`] strictly decreases on every member
//! descent and expansion stops at zero. No identity-based cycle detection is
//! needed.
//!
//! # Emission policy
//!
//! Every intermediate prefix is a path in its own right: for
//! `{a: {b: {c: string}}}` the result is `{"a", "a.b", "a.b.c"}`, not just
//! the deepest path. Numeric keys appear once, in decimal. The open tail of
//! a variable-length array appears as the `*` wildcard segment.
//!
//! # Cost
//!
//! Output size is bounded by `branching_factor ^ max_depth`; the default
//! budget of 50 is safe for realistic schemas, but wide self-referential
//! schemas combined with large budgets explode combinatorially. Callers
//! with untrusted schemas should pick a small budget. The walk itself uses
//! an explicit worklist, so call-stack depth does not grow with the budget.

use std::collections::BTreeSet;

use crate::normalize::{classify, expand_alternatives, Segment, Shape};
use crate::schema::{SchemaNode, SchemaRegistry};

/// Depth budget applied when callers do not choose one.
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Options for [`enumerate_paths`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathsOptions {
    /// Maximum number of nested member accesses a path may contain.
    /// Zero yields the empty set for every schema.
    pub max_depth: usize,
}

impl Default for PathsOptions {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

impl PathsOptions {
    /// Options with an explicit depth budget.
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

/// Joins a parent prefix with the next segment.
fn join(prefix: &str, segment: &Segment) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

/// Enumerates every legal access path into values described by `root`.
///
/// Named references inside `root` resolve through `registry`; pass an empty
/// registry for self-contained schemas. The result is a sorted set, so
/// iteration order is deterministic.
///
/// This function is total. Leaf roots, `any`, `never`, and a zero depth
/// budget all produce the empty set, which is the correct answer rather than
/// an error.
#[must_use]
pub fn enumerate_paths(
    root: &SchemaNode,
    registry: &SchemaRegistry,
    options: &PathsOptions,
) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    let mut worklist: Vec<(&SchemaNode, usize, String)> =
        vec![(root, options.max_depth, String::new())];

    while let Some((node, remaining_depth, prefix)) = worklist.pop() {
        // Termination gate, checked once per work item before any member
        // expansion. The budget strictly decreases on every descent.
        if remaining_depth == 0 {
            continue;
        }

        // Unions distribute: each alternative is walked independently under
        // the same prefix and budget, and the results union.
        for alternative in expand_alternatives(node, registry) {
            let Shape::Members(members) = classify(alternative) else {
                // Leaf: the path leading here was already recorded by the
                // parent when it descended into this member.
                continue;
            };
            for (segment, member) in members {
                let path = join(&prefix, &segment);
                tracing::trace!(%path, remaining_depth, "discovered access path");
                paths.insert(path.clone());
                worklist.push((member, remaining_depth - 1, path));
            }
        }
    }

    paths
}
