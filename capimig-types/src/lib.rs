//! Document model shared by the capimig workspace.
//!
//! A parsed manifest document is a tree of [`Node`]s: ordered mappings,
//! sequences and scalars. Loaders build it, the migration engine rewrites it
//! in place, serializers emit it again.
//!
//! # Design constraints
//! - Mapping key order is part of the document and is never reshuffled.
//! - The tree owns its nodes; there is no sharing and therefore no cycles.

mod mapping;
mod node;

pub use mapping::Mapping;
pub use node::{Node, Scalar};
