//! Role classification of name occurrences.

use serde::{Deserialize, Serialize};

use crate::{arena::Arena, node::NodeId, nodes::AstNode};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Role {
    Definition,
    Declaration,
    Reference,
    #[default]
    Unclear,
}

impl Arena {
    /// Role the name `name` plays inside `node`.
    ///
    /// Depends only on the kind of `node` and the slot holding `name`. Anything
    /// that is not a `Name` directly held by `node` is [`Role::Unclear`].
    #[must_use]
    pub fn role_for(&self, node: NodeId, name: NodeId) -> Role {
        let (Some(owner), Some(AstNode::Name(_))) = (self.get(node), self.get(name)) else {
            return Role::Unclear;
        };
        let owner = owner.node();
        owner
            .locate(name)
            .and_then(|(property, _)| owner.slot_spec(property))
            .map_or(Role::Unclear, |spec| spec.role)
    }
}
