//! Arena mutation policies.
//!
//! Both policies default to the strict behaviour. The lenient variants exist
//! for drivers ported from parsers that re-parent nodes implicitly.

use serde::{Deserialize, Serialize};

/// What attaching a node that already has a parent does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReattachPolicy {
    /// Fail with [`AstError::AlreadyAttached`](crate::errors::AstError::AlreadyAttached);
    /// the caller must `detach` first.
    #[default]
    Reject,
    /// Remove the node from its old parent's slot, then attach it.
    Detach,
}

/// What `replace` does when the old node is not a child of the parent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingChildPolicy {
    /// Fail with [`AstError::NotAChild`](crate::errors::AstError::NotAChild).
    #[default]
    Error,
    /// Leave the tree untouched and report success.
    Ignore,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub reattach: ReattachPolicy,
    pub missing_child: MissingChildPolicy,
}

impl ArenaConfig {
    #[must_use]
    pub fn with_reattach(mut self, reattach: ReattachPolicy) -> Self {
        self.reattach = reattach;
        self
    }

    #[must_use]
    pub fn with_missing_child(mut self, missing_child: MissingChildPolicy) -> Self {
        self.missing_child = missing_child;
        self
    }
}
