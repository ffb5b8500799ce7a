//! Depth-first traversal with per-category interest and an abort verdict.

use serde::{Deserialize, Serialize};

use crate::{
    arena::Arena,
    node::{Category, NodeId},
    nodes::AstNode,
};

/// Verdict returned by [`Visitor::visit`] and [`Visitor::leave`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Process {
    /// Descend into the children.
    #[default]
    Continue,
    /// Treat the subtree as visited and go on with the next sibling.
    Skip,
    /// Stop the whole traversal.
    Abort,
}

/// Categories a visitor wants `visit`/`leave` calls for.
///
/// Nodes of other categories are still descended into, only the callbacks
/// are suppressed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct VisitFlags {
    pub translation_unit: bool,
    pub names: bool,
    pub declarations: bool,
    pub declarators: bool,
    pub decl_specifiers: bool,
    pub enumerators: bool,
    pub expressions: bool,
    pub statements: bool,
    pub type_ids: bool,
    pub problems: bool,
    pub template_parameters: bool,
    pub ambiguities: bool,
}

impl VisitFlags {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn all() -> Self {
        Self::only(&Category::ALL)
    }

    #[must_use]
    pub fn only(categories: &[Category]) -> Self {
        categories
            .iter()
            .fold(Self::none(), |flags, category| flags.with(*category))
    }

    #[must_use]
    pub fn with(mut self, category: Category) -> Self {
        self.set(category, true);
        self
    }

    #[must_use]
    pub fn contains(&self, category: Category) -> bool {
        match category {
            Category::TranslationUnit => self.translation_unit,
            Category::Names => self.names,
            Category::Declarations => self.declarations,
            Category::Declarators => self.declarators,
            Category::DeclSpecifiers => self.decl_specifiers,
            Category::Enumerators => self.enumerators,
            Category::Expressions => self.expressions,
            Category::Statements => self.statements,
            Category::TypeIds => self.type_ids,
            Category::Problems => self.problems,
            Category::TemplateParameters => self.template_parameters,
            Category::Ambiguities => self.ambiguities,
        }
    }

    pub fn set(&mut self, category: Category, value: bool) {
        let flag = match category {
            Category::TranslationUnit => &mut self.translation_unit,
            Category::Names => &mut self.names,
            Category::Declarations => &mut self.declarations,
            Category::Declarators => &mut self.declarators,
            Category::DeclSpecifiers => &mut self.decl_specifiers,
            Category::Enumerators => &mut self.enumerators,
            Category::Expressions => &mut self.expressions,
            Category::Statements => &mut self.statements,
            Category::TypeIds => &mut self.type_ids,
            Category::Problems => &mut self.problems,
            Category::TemplateParameters => &mut self.template_parameters,
            Category::Ambiguities => &mut self.ambiguities,
        };
        *flag = value;
    }
}

pub trait Visitor {
    fn flags(&self) -> VisitFlags;

    fn visit(&mut self, _arena: &Arena, _node: &AstNode) -> Process {
        Process::Continue
    }

    fn leave(&mut self, _arena: &Arena, _node: &AstNode) -> Process {
        Process::Continue
    }
}

impl Arena {
    /// Walks the subtree rooted at `id` in slot-table order.
    ///
    /// Returns `false` iff some callback answered [`Process::Abort`]. An id
    /// that is not in the arena counts as an absent slot.
    pub fn accept<V: Visitor + ?Sized>(&self, id: NodeId, visitor: &mut V) -> bool {
        let Some(node) = self.get(id) else {
            return true;
        };
        let interested = visitor.flags().contains(node.category());
        if interested {
            match visitor.visit(self, node) {
                Process::Abort => return false,
                Process::Skip => return true,
                Process::Continue => {}
            }
        }
        for child in node.children() {
            if !self.accept(child, visitor) {
                return false;
            }
        }
        !(interested && visitor.leave(self, node) == Process::Abort)
    }
}

/// Collects `Name` nodes, optionally only those spelled `text`.
#[derive(Debug, Default)]
pub struct NameCollector {
    text: Option<String>,
    names: Vec<NodeId>,
}

impl NameCollector {
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn matching(text: impl Into<String>) -> Self {
        NameCollector {
            text: Some(text.into()),
            names: Vec::new(),
        }
    }

    #[must_use]
    pub fn names(&self) -> &[NodeId] {
        &self.names
    }

    #[must_use]
    pub fn into_names(self) -> Vec<NodeId> {
        self.names
    }
}

impl Visitor for NameCollector {
    fn flags(&self) -> VisitFlags {
        VisitFlags::only(&[Category::Names])
    }

    fn visit(&mut self, _arena: &Arena, node: &AstNode) -> Process {
        if let AstNode::Name(name) = node
            && self.text.as_deref().is_none_or(|text| text == name.text())
        {
            self.names.push(node.id());
        }
        Process::Continue
    }
}

/// Stops at the first ambiguity node reached.
#[derive(Debug, Default)]
pub struct AmbiguityFinder {
    found: Option<NodeId>,
}

impl AmbiguityFinder {
    #[must_use]
    pub fn found(&self) -> Option<NodeId> {
        self.found
    }
}

impl Visitor for AmbiguityFinder {
    fn flags(&self) -> VisitFlags {
        VisitFlags::only(&[Category::Ambiguities])
    }

    fn visit(&mut self, _arena: &Arena, node: &AstNode) -> Process {
        self.found = Some(node.id());
        Process::Abort
    }
}
