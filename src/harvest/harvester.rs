//! Recursive tree harvesting.
//!
//! A harvest is a pure bottom-up fold over the node tree: every call
//! produces a fresh object for its subtree, and the caller merges child
//! objects according to the node's kind. Nothing is mutated and nothing
//! fails; traversal is bounded by the finite tree depth.

use crate::harvest::classify::{classify, NodeKind};
use crate::harvest::coerce::coerce;
use crate::node::Node;
use serde_json::{Map, Value};

/// Fallback key for an object container without an identifier.
pub const OBJECT_FALLBACK_KEY: &str = "_object_without_id";

/// Fallback key for an array container without an identifier.
pub const ARRAY_FALLBACK_KEY: &str = "_array_without_id";

/// Harvests a node and its descendants into one JSON object.
///
/// The result is always `Value::Object`, never a bare scalar or array:
/// - a leaf yields a single entry keyed by its declared name (the empty
///   string when absent);
/// - an object container yields its merged children under a single entry
///   keyed by its identifier, or [`OBJECT_FALLBACK_KEY`];
/// - an array container yields its children's values (keys discarded, in
///   traversal order) under a single entry keyed by its identifier, or
///   [`ARRAY_FALLBACK_KEY`];
/// - a transparent group yields its merged children directly, with no
///   wrapping key;
/// - a childless non-leaf node yields an empty object.
///
/// On key collision during a merge, the later child overwrites the
/// earlier one.
pub fn harvest(node: &Node) -> Value {
    Value::Object(harvest_map(node))
}

fn harvest_map(node: &Node) -> Map<String, Value> {
    match classify(node) {
        // classify returns Leaf only when the payload is present
        NodeKind::Leaf => match &node.field {
            Some(field) => {
                let key = node.name.clone().unwrap_or_default();
                Map::from_iter([(key, coerce(field))])
            }
            None => Map::new(),
        },
        NodeKind::ObjectContainer => {
            let key = node
                .id
                .clone()
                .unwrap_or_else(|| OBJECT_FALLBACK_KEY.to_string());
            Map::from_iter([(key, Value::Object(merge_children(node)))])
        }
        NodeKind::ArrayContainer => {
            let values: Vec<Value> = node
                .children
                .iter()
                .flat_map(|child| harvest_map(child).into_iter().map(|(_, v)| v))
                .collect();
            let key = node
                .id
                .clone()
                .unwrap_or_else(|| ARRAY_FALLBACK_KEY.to_string());
            Map::from_iter([(key, Value::Array(values))])
        }
        NodeKind::Group => merge_children(node),
    }
}

/// Harvests every direct child and merges the resulting objects into one
/// flat map, later entries overwriting earlier ones.
fn merge_children(node: &Node) -> Map<String, Value> {
    let mut acc = Map::new();
    for child in &node.children {
        acc.extend(harvest_map(child));
    }
    acc
}
