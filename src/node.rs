//! The form node data model and the [`NodeTree`] capability.
//!
//! Nodes are owned by the host document; a harvest only reads them. A node's
//! kind (leaf, object container, array container, group) is never stored —
//! it is derived from the leaf payload and the structural markers by
//! [`classify`](crate::harvest::classify::classify).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Structural marker that turns a node into an object container.
pub const OBJECT_MARKER: &str = "json-object";

/// Structural marker that turns a node into an array container.
pub const ARRAY_MARKER: &str = "json-array";

/// One element of a form tree.
///
/// A node is a leaf field exactly when [`field`](Node::field) is present;
/// otherwise its container kind is decided by the [`markers`](Node::markers)
/// set. Children are kept in document order, which is the traversal order
/// for every harvest rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Node {
    /// Element identifier. Containers without one harvest under a
    /// deterministic fallback key.
    pub id: Option<String>,

    /// Declared field name. Required in practice for leaves: an absent name
    /// keys the leaf's value under the empty string, and two unnamed leaves
    /// in the same container collide (the later one wins).
    pub name: Option<String>,

    /// Structural markers, queried by set membership.
    pub markers: BTreeSet<String>,

    /// Direct children, in document order.
    pub children: Vec<Node>,

    /// Leaf payload. Present exactly on leaf fields.
    pub field: Option<LeafField>,
}

/// The typed scalar payload carried by a leaf field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeafField {
    /// Declared control kind, driving value coercion.
    pub control: Control,

    /// Raw textual representation of the field's value.
    pub value: String,

    /// Step/precision attribute. Only meaningful for [`Control::Number`],
    /// where a fractional step selects floating-point coercion.
    pub step: Option<String>,
}

/// Control kinds a leaf field can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    /// Numeric input; integer or fractional depending on the step attribute.
    Number,

    /// Toggle input; harvests `true` only for the literal raw value
    /// `"checked"`.
    Checkbox,

    /// Any other input; harvests the raw string unmodified.
    Text,
}

impl Node {
    /// A transparent grouping node with the given children.
    pub fn group(children: Vec<Node>) -> Self {
        Node {
            children,
            ..Node::default()
        }
    }

    /// An object container with the given identifier and children.
    pub fn object(id: impl Into<String>, children: Vec<Node>) -> Self {
        Node {
            id: Some(id.into()),
            markers: BTreeSet::from([OBJECT_MARKER.to_string()]),
            children,
            ..Node::default()
        }
    }

    /// An array container with the given identifier and children.
    pub fn array(id: impl Into<String>, children: Vec<Node>) -> Self {
        Node {
            id: Some(id.into()),
            markers: BTreeSet::from([ARRAY_MARKER.to_string()]),
            children,
            ..Node::default()
        }
    }

    /// A named leaf field.
    pub fn leaf(name: impl Into<String>, field: LeafField) -> Self {
        Node {
            name: Some(name.into()),
            field: Some(field),
            ..Node::default()
        }
    }

    /// Removes the node's identifier, keeping everything else.
    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    /// Removes the node's declared name, keeping everything else.
    pub fn without_name(mut self) -> Self {
        self.name = None;
        self
    }
}

impl LeafField {
    /// A plain text field.
    pub fn text(value: impl Into<String>) -> Self {
        LeafField {
            control: Control::Text,
            value: value.into(),
            step: None,
        }
    }

    /// An integer-coerced numeric field (no step attribute).
    pub fn integer(value: impl Into<String>) -> Self {
        LeafField {
            control: Control::Number,
            value: value.into(),
            step: None,
        }
    }

    /// A numeric field with an explicit step attribute.
    pub fn number_with_step(value: impl Into<String>, step: impl Into<String>) -> Self {
        LeafField {
            control: Control::Number,
            value: value.into(),
            step: Some(step.into()),
        }
    }

    /// A checkbox field with the given raw value.
    pub fn checkbox(value: impl Into<String>) -> Self {
        LeafField {
            control: Control::Checkbox,
            value: value.into(),
            step: None,
        }
    }
}

/// Capability that supplies the form roots to harvest.
///
/// The host document owns the nodes; the harvester only reads them. A
/// harvest trigger names either one form by identifier or all forms.
pub trait NodeTree: Send + Sync {
    /// All top-level form nodes, in document order.
    fn forms(&self) -> &[Node];

    /// Looks up a single form by identifier.
    fn form(&self, id: &str) -> Option<&Node> {
        self.forms().iter().find(|n| n.id.as_deref() == Some(id))
    }
}

/// In-memory [`NodeTree`] holding a fixed list of form roots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticTree {
    forms: Vec<Node>,
}

impl StaticTree {
    /// Creates a tree from the given form roots.
    pub fn new(forms: Vec<Node>) -> Self {
        StaticTree { forms }
    }
}

impl NodeTree for StaticTree {
    fn forms(&self) -> &[Node] {
        &self.forms
    }
}
