//! Conversion traits between domain objects and document elements.
//!
//! Domain types push themselves into a tree as detached elements
//! ([`ToDom`]) and pull themselves back out of parsed elements
//! ([`FromDom`]). Serialization is infallible (a live domain object is
//! always representable) while reconstruction surfaces every missing or
//! malformed value as a [`DomError`](crate::DomError).

use crate::error::Result;
use crate::node::{DomTree, NodeId};

/// Trait for types that serialize themselves into a document element.
pub trait ToDom {
    /// Build a detached element describing `self` in `tree`. The caller
    /// appends it wherever it belongs.
    fn to_dom(&self, tree: &mut DomTree) -> NodeId;
}

/// Trait for types that can be reconstructed from a document element.
///
/// Implementations typically chain [`DomTree::attribute`],
/// [`DomTree::child_by_path`] and [`DomTree::text`], so errors come out
/// carrying full file/element/value context without extra work.
pub trait FromDom: Sized {
    fn from_dom(tree: &DomTree, node: NodeId) -> Result<Self>;
}
