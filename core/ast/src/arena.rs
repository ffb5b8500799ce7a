//! Node storage and the mutation protocol.
//!
//! The arena owns every node. Ownership flows downward through child slots
//! that hold [`NodeId`]s; the upward relation lives in [`NodeRoute`]s and is a
//! lookup only. Every mutation validates first and then writes both sides of
//! the parent/child link, so a failed call leaves the tree untouched.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace, warn};

use crate::{
    config::{ArenaConfig, MissingChildPolicy, ReattachPolicy},
    errors::AstError,
    node::{Category, NodeId, Property, Shape, SlotMut, SlotRef},
    nodes::{AstKind, AstNode, NodeKind},
    visitor::AmbiguityFinder,
};

#[derive(Clone, Debug, Default)]
pub struct Arena {
    pub(crate) nodes: FxHashMap<NodeId, AstNode>,
    pub(crate) node_routes: FxHashMap<NodeId, NodeRoute>,
    next_id: u32,
    config: ArenaConfig,
}

impl Arena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: ArenaConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> ArenaConfig {
        self.config
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&AstNode> {
        self.nodes.get(&id)
    }

    /// Typed lookup, `None` when the id is unknown or of another kind.
    #[must_use]
    pub fn get_as<T: AstKind>(&self, id: NodeId) -> Option<&T> {
        self.get(id).and_then(T::from_node)
    }

    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(AstNode::kind)
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_routes.get(&id).and_then(|route| route.parent)
    }

    /// Slot of the parent this node occupies.
    #[must_use]
    pub fn property(&self, id: NodeId) -> Option<Property> {
        self.node_routes.get(&id).and_then(|route| route.property)
    }

    #[must_use]
    pub fn route(&self, id: NodeId) -> Option<NodeRoute> {
        self.node_routes.get(&id).copied()
    }

    /// Present children in traversal order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.get(id).map(AstNode::children).unwrap_or_default()
    }

    /// Parent, grandparent, ... up to the root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            next: self.parent(id),
        }
    }

    /// Nodes without a parent, in id order.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        self.filter_nodes(|node| self.parent(node.id()).is_none())
    }

    /// Ambiguity nodes still present, in id order.
    #[must_use]
    pub fn ambiguities(&self) -> Vec<NodeId> {
        self.filter_nodes(AstNode::is_ambiguity)
    }

    #[must_use]
    pub fn filter_nodes<T: Fn(&AstNode) -> bool>(&self, fn_predicate: T) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self
            .nodes
            .values()
            .filter(|node| fn_predicate(node))
            .map(AstNode::id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Adds a node and links the children its constructor was given.
    ///
    /// # Errors
    ///
    /// Fails if a constructor child is unknown, of the wrong category, listed
    /// twice, or already attached under [`ReattachPolicy::Reject`]; or if an
    /// ambiguity has fewer than two alternatives.
    pub fn add_node(&mut self, node: impl Into<AstNode>) -> Result<NodeId, AstError> {
        let mut node = node.into();
        if let AstNode::Ambiguity(ambiguity) = &node {
            let count = ambiguity.alternatives().len();
            if count < 2 {
                return Err(AstError::DegenerateAmbiguity { count });
            }
        }
        let entries = node.node().slot_entries();
        let mut seen = FxHashSet::default();
        for &(property, child) in &entries {
            if !seen.insert(child) {
                return Err(AstError::DuplicateChild { id: child });
            }
            if let Some(expected) = node.node().accepts(property) {
                self.check_kind(child, property, expected)?;
            }
            self.check_free(child)?;
        }
        let children: Vec<NodeId> = entries.iter().map(|&(_, child)| child).collect();
        self.check_detachable(&children)?;

        let id = self.next_node_id();
        node.node_mut().set_id(id);
        self.node_routes.insert(id, NodeRoute::root(id));
        for &(_, child) in &entries {
            if self.parent(child).is_some() {
                self.unlink(child);
            }
        }
        for (property, child) in entries {
            self.link(child, id, property);
        }
        trace!(%id, kind = %node.kind(), "added node");
        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Stores `child` in the single slot `property` of `parent`.
    ///
    /// A displaced occupant is detached (parent and property cleared) and
    /// returned. `None` clears the slot.
    ///
    /// # Errors
    ///
    /// Unknown ids, a missing or list-shaped slot, a category the slot does not
    /// accept, a cycle, or an attached child under [`ReattachPolicy::Reject`].
    pub fn set_child(
        &mut self,
        parent: NodeId,
        property: Property,
        child: Option<NodeId>,
    ) -> Result<Option<NodeId>, AstError> {
        let expected = self.slot_target(parent, property, Shape::Single)?;
        let previous = match self.get(parent).and_then(|node| node.node().slot(property)) {
            Some(SlotRef::Single(occupant)) => occupant,
            _ => None,
        };
        if child == previous {
            return Ok(None);
        }
        if let Some(child) = child {
            self.check_kind(child, property, expected)?;
            self.check_free(child)?;
            self.check_detachable(&[child])?;
            self.check_acyclic(parent, child)?;
            if self.parent(child).is_some() {
                self.unlink(child);
            }
        }

        if let Some(SlotMut::Single(slot)) = self.slot_mut(parent, property) {
            *slot = child;
        }
        if let Some(previous) = previous {
            self.clear_route(previous);
            trace!(%parent, %property, displaced = %previous, "displaced slot occupant");
        }
        if let Some(child) = child {
            self.link(child, parent, property);
        }
        Ok(previous)
    }

    /// Appends `child` to the list slot `property` of `parent`. `None` is a no-op.
    ///
    /// # Errors
    ///
    /// Same contract as [`Arena::set_child`], with a list-shaped slot required.
    pub fn append_child(
        &mut self,
        parent: NodeId,
        property: Property,
        child: Option<NodeId>,
    ) -> Result<(), AstError> {
        let expected = self.slot_target(parent, property, Shape::List)?;
        let Some(child) = child else {
            return Ok(());
        };
        self.check_kind(child, property, expected)?;
        self.check_free(child)?;
        self.check_detachable(&[child])?;
        self.check_acyclic(parent, child)?;
        if self.parent(child).is_some() {
            self.unlink(child);
        }

        if let Some(SlotMut::List(list)) = self.slot_mut(parent, property) {
            list.push(child);
        }
        self.link(child, parent, property);
        Ok(())
    }

    /// Removes `id` from its parent's slot and returns the former parent.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::UnknownNode`] for ids not in the arena and
    /// [`AstError::DegenerateAmbiguity`] when `id` is one of only two
    /// alternatives of an ambiguity.
    pub fn detach(&mut self, id: NodeId) -> Result<Option<NodeId>, AstError> {
        if !self.contains(id) {
            return Err(AstError::UnknownNode { id });
        }
        self.check_detachable(&[id])?;
        let parent = self.parent(id);
        self.unlink(id);
        Ok(parent)
    }

    /// Puts `new` into the exact slot (or list position) of `parent` that holds
    /// `old`. `new` inherits `old`'s property; `old` is left detached.
    ///
    /// `new` may be a child of `old`, which is how a winning alternative is
    /// lifted out of an ambiguity node.
    ///
    /// # Errors
    ///
    /// [`AstError::NotAChild`] when `old` is not a child of `parent` (unless
    /// [`MissingChildPolicy::Ignore`] is configured), plus the kind, cycle and
    /// reattachment checks of [`Arena::set_child`].
    pub fn replace(&mut self, parent: NodeId, old: NodeId, new: NodeId) -> Result<(), AstError> {
        let owner = self.get(parent).ok_or(AstError::UnknownNode { id: parent })?;
        let Some((property, _)) = owner.node().locate(old) else {
            return match self.config.missing_child {
                MissingChildPolicy::Error => Err(AstError::NotAChild { parent, child: old }),
                MissingChildPolicy::Ignore => {
                    warn!(%parent, %old, "replace target is not a child, ignoring");
                    Ok(())
                }
            };
        };
        if old == new {
            return Ok(());
        }
        let expected = owner.node().accepts(property).ok_or(AstError::NoSuchSlot {
            kind: owner.kind(),
            property,
        })?;
        self.check_kind(new, property, expected)?;
        if self.parent(new).is_some_and(|current| current != old) {
            self.check_free(new)?;
            self.check_detachable(&[new])?;
        }
        self.check_acyclic(parent, new)?;
        if self.parent(new).is_some() {
            self.unlink(new);
        }

        // Unlinking `new` may have shifted `old` inside a shared list.
        let index = self
            .get(parent)
            .and_then(|node| node.node().locate(old))
            .and_then(|(_, index)| index);
        if let Some(slot) = self.slot_mut(parent, property) {
            match slot {
                SlotMut::Single(slot) => *slot = Some(new),
                SlotMut::List(list) => {
                    if let Some(index) = index {
                        list.set(index, new);
                    }
                }
            }
        }
        self.clear_route(old);
        self.link(new, parent, property);
        debug!(%parent, %old, %new, %property, "replaced child");
        Ok(())
    }

    /// Grafts alternative `winner_index` of `ambiguity` into the ambiguity's
    /// place and reclaims the ambiguity node with the losing alternatives.
    ///
    /// # Errors
    ///
    /// Unknown ids, a node that is not an ambiguity, or an index past the last
    /// alternative.
    pub fn resolve_ambiguity(
        &mut self,
        ambiguity: NodeId,
        winner_index: usize,
    ) -> Result<NodeId, AstError> {
        let node = self
            .get(ambiguity)
            .ok_or(AstError::UnknownNode { id: ambiguity })?;
        let AstNode::Ambiguity(candidates) = node else {
            return Err(AstError::NotAnAmbiguity {
                id: ambiguity,
                kind: node.kind(),
            });
        };
        let count = candidates.alternatives().len();
        let winner = candidates
            .alternatives()
            .get(winner_index)
            .copied()
            .ok_or(AstError::AlternativeOutOfRange {
                id: ambiguity,
                index: winner_index,
                count,
            })?;

        match self.parent(ambiguity) {
            Some(parent) => self.replace(parent, ambiguity, winner)?,
            None => self.unlink(winner),
        }
        let reclaimed = self.remove_subtree(ambiguity)?;
        debug!(%ambiguity, %winner, reclaimed, "resolved ambiguity");
        Ok(winner)
    }

    /// Detaches `id` and drops it together with all its descendants. Returns
    /// the number of nodes removed.
    ///
    /// # Errors
    ///
    /// Same as [`Arena::detach`].
    pub fn remove_subtree(&mut self, id: NodeId) -> Result<usize, AstError> {
        self.detach(id)?;
        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend(node.children());
                removed += 1;
            }
            self.node_routes.remove(&current);
        }
        Ok(removed)
    }

    /// Checks that no ambiguity node is reachable from `root`.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::UnresolvedAmbiguity`] naming the first ambiguity in
    /// traversal order.
    pub fn ensure_resolved(&self, root: NodeId) -> Result<(), AstError> {
        if !self.contains(root) {
            return Err(AstError::UnknownNode { id: root });
        }
        let mut finder = AmbiguityFinder::default();
        self.accept(root, &mut finder);
        match finder.found() {
            Some(id) => Err(AstError::UnresolvedAmbiguity { id }),
            None => Ok(()),
        }
    }

    fn next_node_id(&mut self) -> NodeId {
        self.next_id += 1;
        NodeId::from_raw(self.next_id)
    }

    fn slot_mut(&mut self, parent: NodeId, property: Property) -> Option<SlotMut<'_>> {
        self.nodes
            .get_mut(&parent)
            .and_then(|node| node.node_mut().slot_mut(property))
    }

    /// Validates that `parent` has a slot `property` of `shape` and returns the
    /// category it accepts.
    fn slot_target(
        &self,
        parent: NodeId,
        property: Property,
        shape: Shape,
    ) -> Result<Category, AstError> {
        let node = self
            .get(parent)
            .ok_or(AstError::UnknownNode { id: parent })?;
        let no_such_slot = || AstError::NoSuchSlot {
            kind: node.kind(),
            property,
        };
        let actual = match node.node().slot(property).ok_or_else(no_such_slot)? {
            SlotRef::Single(_) => Shape::Single,
            SlotRef::List(_) => Shape::List,
        };
        if actual != shape {
            return Err(AstError::ShapeMismatch {
                kind: node.kind(),
                property,
                shape: actual,
            });
        }
        node.node().accepts(property).ok_or_else(no_such_slot)
    }

    fn check_kind(
        &self,
        child: NodeId,
        property: Property,
        expected: Category,
    ) -> Result<(), AstError> {
        let node = self.get(child).ok_or(AstError::UnknownNode { id: child })?;
        let found = node.slot_category();
        if found == expected {
            Ok(())
        } else {
            Err(AstError::KindMismatch {
                id: child,
                property,
                expected,
                found,
            })
        }
    }

    fn check_free(&self, child: NodeId) -> Result<(), AstError> {
        match (self.parent(child), self.config.reattach) {
            (Some(parent), ReattachPolicy::Reject) => {
                Err(AstError::AlreadyAttached { id: child, parent })
            }
            _ => Ok(()),
        }
    }

    /// Fails if moving `children` out of their current parents would leave an
    /// ambiguity with fewer than two alternatives. Only
    /// [`Arena::resolve_ambiguity`] may take an ambiguity apart.
    fn check_detachable(&self, children: &[NodeId]) -> Result<(), AstError> {
        let mut removals: FxHashMap<NodeId, usize> = FxHashMap::default();
        for &child in children {
            if let Some(NodeRoute {
                parent: Some(parent),
                property: Some(Property::Alternative),
                ..
            }) = self.route(child)
            {
                *removals.entry(parent).or_default() += 1;
            }
        }
        for (parent, removed) in removals {
            if let Some(AstNode::Ambiguity(ambiguity)) = self.get(parent) {
                let count = ambiguity.alternatives().len().saturating_sub(removed);
                if count < 2 {
                    return Err(AstError::DegenerateAmbiguity { count });
                }
            }
        }
        Ok(())
    }

    fn check_acyclic(&self, parent: NodeId, child: NodeId) -> Result<(), AstError> {
        if child == parent || self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(AstError::Cycle { parent, child });
        }
        Ok(())
    }

    fn link(&mut self, child: NodeId, parent: NodeId, property: Property) {
        if let Some(route) = self.node_routes.get_mut(&child) {
            route.parent = Some(parent);
            route.property = Some(property);
        }
        trace!(%child, %parent, %property, "attached node");
    }

    fn unlink(&mut self, child: NodeId) {
        let Some(NodeRoute {
            parent: Some(parent),
            property: Some(property),
            ..
        }) = self.route(child)
        else {
            return;
        };
        match self.slot_mut(parent, property) {
            Some(SlotMut::Single(slot)) => {
                if *slot == Some(child) {
                    *slot = None;
                }
            }
            Some(SlotMut::List(list)) => {
                if let Some(index) = list.position(child) {
                    list.remove(index);
                }
            }
            None => {}
        }
        self.clear_route(child);
        trace!(%child, %parent, %property, "detached node");
    }

    fn clear_route(&mut self, id: NodeId) {
        if let Some(route) = self.node_routes.get_mut(&id) {
            route.parent = None;
            route.property = None;
        }
    }
}

/// Upward link of a node: its parent and the slot it occupies there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeRoute {
    pub id: NodeId,
    parent: Option<NodeId>,
    property: Option<Property>,
}

impl NodeRoute {
    fn root(id: NodeId) -> Self {
        NodeRoute {
            id,
            parent: None,
            property: None,
        }
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn property(&self) -> Option<Property> {
        self.property
    }
}

pub struct Ancestors<'a> {
    arena: &'a Arena,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.arena.parent(current);
        Some(current)
    }
}
