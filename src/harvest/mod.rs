//! Harvest module - the core tree-to-JSON conversion.
//!
//! This module provides the three cooperating pieces of a harvest:
//! - **Classification**: [`classify`] decides a node's [`NodeKind`]
//! - **Coercion**: [`coerce`] turns a leaf's raw value into a typed value
//! - **Harvesting**: [`harvest`] folds a subtree into one JSON object
//!
//! All three are pure, synchronous, and read-only over the node tree.

pub mod classify;
pub mod coerce;
pub mod harvester;

// Re-export commonly used items
pub use classify::{classify, NodeKind};
pub use coerce::coerce;
pub use harvester::{harvest, ARRAY_FALLBACK_KEY, OBJECT_FALLBACK_KEY};
