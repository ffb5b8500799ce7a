#![warn(clippy::pedantic)]
//! Abstract syntax tree core for a C/C++ front end.
//!
//! Nodes live in an [`Arena`] and refer to each other by [`NodeId`]. Child
//! slots are described by static tables, which drive attachment, traversal,
//! replacement of ambiguous subtrees and role classification of names.
pub mod arena;
pub mod config;
pub(crate) mod enums_impl;
pub mod errors;
pub mod node;
pub mod nodes;
pub(crate) mod nodes_impl;
pub mod roles;
pub mod signature;
pub mod visitor;

pub use arena::{Ancestors, Arena, NodeRoute};
pub use config::{ArenaConfig, MissingChildPolicy, ReattachPolicy};
pub use errors::AstError;
pub use node::{Category, Location, Node, NodeId, Property, Shape, SlotSpec};
pub use nodes::{AstKind, AstNode, NodeKind};
pub use roles::Role;
pub use visitor::{AmbiguityFinder, NameCollector, Process, VisitFlags, Visitor};
