//! Node classification.

use crate::node::{Node, ARRAY_MARKER, OBJECT_MARKER};

/// The four kinds a node can classify as. Derived per node, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Terminal node carrying one typed scalar value.
    Leaf,

    /// Children merge into one keyed sub-object, itself keyed by the
    /// node's identifier.
    ObjectContainer,

    /// Children's values (keys discarded) become array elements, keyed by
    /// the node's identifier.
    ArrayContainer,

    /// Children's entries merge into the parent's level with no wrapping
    /// key.
    Group,
}

/// Classifies a node. Pure; first matching rule wins.
///
/// A leaf payload takes precedence over any structural marker, and the
/// object marker takes precedence over the array marker. Every node
/// classifies into exactly one kind.
pub fn classify(node: &Node) -> NodeKind {
    if node.field.is_some() {
        NodeKind::Leaf
    } else if node.markers.contains(OBJECT_MARKER) {
        NodeKind::ObjectContainer
    } else if node.markers.contains(ARRAY_MARKER) {
        NodeKind::ArrayContainer
    } else {
        NodeKind::Group
    }
}
