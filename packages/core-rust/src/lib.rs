//! `PathSet` Core: schema model, normalizer, and static access-path enumeration.
//!
//! Given a structural description of a value's shape, [`enumerate_paths`]
//! produces the complete finite set of path strings that a "get value at
//! path" accessor would accept: dot-separated field names, bare indices for
//! fixed sequence slots, and a `*` wildcard for the open tail of a
//! variable-length array. The analysis runs at schema-definition time and
//! never touches data values.
//!
//! ```
//! use pathset_core::{enumerate_paths, Field, PathsOptions, SchemaNode, SchemaRegistry};
//!
//! let schema = SchemaNode::object([
//!     Field::new("filename", SchemaNode::String),
//!     Field::new("tags", SchemaNode::array(SchemaNode::String)),
//! ]);
//! let paths = enumerate_paths(&schema, &SchemaRegistry::new(), &PathsOptions::default());
//!
//! assert!(paths.contains("filename"));
//! assert!(paths.contains("tags"));
//! assert!(paths.contains("tags.*"));
//! ```

pub mod normalize;
pub mod paths;
pub mod schema;

pub use normalize::{classify, expand_alternatives, Segment, Shape};
pub use paths::{enumerate_paths, PathsOptions, DEFAULT_MAX_DEPTH};
pub use schema::{Field, SchemaError, SchemaNode, SchemaRegistry};
