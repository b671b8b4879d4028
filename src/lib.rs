//! Harvests form-like node trees into nested JSON payloads.
//!
//! A host document supplies a tree of nodes via [`NodeTree`]; structural
//! markers on interior nodes decide how children combine. [`harvest`]
//! folds a tree into one JSON object, and a [`Submitter`] serializes and
//! delivers it, either as a freshly dispatched payload or as a field the
//! caller attaches itself.

pub mod executor;
pub mod harvest;
pub mod node;
pub mod submit;

// Re-export common types for convenience
pub use executor::*;
pub use harvest::{classify, coerce, harvest, NodeKind};
pub use node::*;
pub use submit::*;
