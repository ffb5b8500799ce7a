//! Error types for the AST crate.
//!
//! Every variant is a structural contract violation reported by an arena
//! mutation. Traversal abort is not an error (see [`Process`](crate::visitor::Process)).

use thiserror::Error;

use crate::{
    node::{Category, NodeId, Property, Shape},
    nodes::NodeKind,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[must_use = "errors must not be silently ignored"]
pub enum AstError {
    #[error("node {id} does not exist in the arena")]
    UnknownNode { id: NodeId },

    #[error("{kind} has no slot `{property}`")]
    NoSuchSlot { kind: NodeKind, property: Property },

    /// `set_child` on a list slot or `append_child` on a single slot.
    #[error("slot `{property}` of {kind} is a {shape} slot")]
    ShapeMismatch {
        kind: NodeKind,
        property: Property,
        shape: Shape,
    },

    #[error("slot `{property}` accepts a {expected}, found a {found} (node {id})")]
    KindMismatch {
        id: NodeId,
        property: Property,
        expected: Category,
        found: Category,
    },

    #[error("node {id} is already attached to node {parent}")]
    AlreadyAttached { id: NodeId, parent: NodeId },

    #[error("node {id} is listed more than once among the children of a new node")]
    DuplicateChild { id: NodeId },

    #[error("attaching node {child} below node {parent} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },

    #[error("node {child} is not a child of node {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("node {id} is a {kind}, not an ambiguity")]
    NotAnAmbiguity { id: NodeId, kind: NodeKind },

    #[error("an ambiguity needs at least 2 alternatives, got {count}")]
    DegenerateAmbiguity { count: usize },

    #[error("ambiguity {id} has no alternative {index} (it has {count})")]
    AlternativeOutOfRange {
        id: NodeId,
        index: usize,
        count: usize,
    },

    #[error("ambiguity {id} was never resolved")]
    UnresolvedAmbiguity { id: NodeId },
}
