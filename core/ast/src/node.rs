//! Base AST node definitions.
//!
//! Defines [`NodeId`], [`Location`], the [`Node`] trait, the slot model every
//! node kind is described with, and the `ast_nodes!` macro that generates node
//! structs together with their slot tables.
use core::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::roles::Role;

/// Handle of a node inside an [`Arena`](crate::arena::Arena).
///
/// Ids are assigned sequentially starting from 1; zero is reserved for nodes
/// that were constructed but not yet added to an arena.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        NodeId(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Location {
    pub offset_start: u32,
    pub offset_end: u32,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
    pub source: String,
}

impl Location {
    #[must_use]
    pub fn new(
        offset_start: u32,
        offset_end: u32,
        start_line: u32,
        start_column: u32,
        end_line: u32,
        end_column: u32,
        source: String,
    ) -> Self {
        Self {
            offset_start,
            offset_end,
            start_line,
            start_column,
            end_line,
            end_column,
            source,
        }
    }

    /// A location that only records the covered source text.
    #[must_use]
    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_column)
    }
}

/// Syntactic category a node kind belongs to.
///
/// Visitors declare interest per category; every node kind reports exactly one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    TranslationUnit,
    Names,
    Declarations,
    Declarators,
    DeclSpecifiers,
    Enumerators,
    Expressions,
    Statements,
    TypeIds,
    Problems,
    TemplateParameters,
    Ambiguities,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::TranslationUnit,
        Category::Names,
        Category::Declarations,
        Category::Declarators,
        Category::DeclSpecifiers,
        Category::Enumerators,
        Category::Expressions,
        Category::Statements,
        Category::TypeIds,
        Category::Problems,
        Category::TemplateParameters,
        Category::Ambiguities,
    ];

    /// Categories that only exist in the C++ dialect.
    #[must_use]
    pub fn is_cpp_extension(self) -> bool {
        matches!(self, Category::TemplateParameters)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            Category::TranslationUnit => "translation unit",
            Category::Names => "name",
            Category::Declarations => "declaration",
            Category::Declarators => "declarator",
            Category::DeclSpecifiers => "declaration specifier",
            Category::Enumerators => "enumerator",
            Category::Expressions => "expression",
            Category::Statements => "statement",
            Category::TypeIds => "type-id",
            Category::Problems => "problem",
            Category::TemplateParameters => "template parameter",
            Category::Ambiguities => "ambiguity",
        };
        f.write_str(name)
    }
}

/// Identity of the parent slot a node occupies ("property in parent").
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Property {
    OwnedDeclaration,
    IdName,
    Operand,
    Operand1,
    Operand2,
    FunctionName,
    FunctionArgument,
    Problem,
    NestedStatement,
    Expression,
    Declaration,
    ConditionExpression,
    Body,
    ThenClause,
    ElseClause,
    ReturnValue,
    DeclSpecifier,
    Declarator,
    DeclaratorName,
    Initializer,
    NamedTypeName,
    EnumerationName,
    Enumerator,
    EnumeratorName,
    EnumeratorValue,
    AbstractDeclarator,
    ParameterName,
    DefaultType,
    Alternative,
}

impl Display for Property {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            Property::OwnedDeclaration => "owned_declaration",
            Property::IdName => "id_name",
            Property::Operand => "operand",
            Property::Operand1 => "operand1",
            Property::Operand2 => "operand2",
            Property::FunctionName => "function_name",
            Property::FunctionArgument => "function_argument",
            Property::Problem => "problem",
            Property::NestedStatement => "nested_statement",
            Property::Expression => "expression",
            Property::Declaration => "declaration",
            Property::ConditionExpression => "condition",
            Property::Body => "body",
            Property::ThenClause => "then_clause",
            Property::ElseClause => "else_clause",
            Property::ReturnValue => "return_value",
            Property::DeclSpecifier => "decl_specifier",
            Property::Declarator => "declarator",
            Property::DeclaratorName => "declarator_name",
            Property::Initializer => "initializer",
            Property::NamedTypeName => "named_type_name",
            Property::EnumerationName => "enumeration_name",
            Property::Enumerator => "enumerator",
            Property::EnumeratorName => "enumerator_name",
            Property::EnumeratorValue => "enumerator_value",
            Property::AbstractDeclarator => "abstract_declarator",
            Property::ParameterName => "parameter_name",
            Property::DefaultType => "default_type",
            Property::Alternative => "alternative",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Shape {
    Single,
    List,
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Shape::Single => f.write_str("single"),
            Shape::List => f.write_str("list"),
        }
    }
}

/// Static description of one child slot of a node kind.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SlotSpec {
    pub property: Property,
    pub shape: Shape,
    /// Category of node the slot accepts. The ambiguity table holds a
    /// placeholder; see [`Node::accepts`].
    pub accepts: Category,
    /// Role of a name occupying this slot.
    pub role: Role,
}

/// Append-only ordered list of children.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChildList(Vec<NodeId>);

impl ChildList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[NodeId] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.0.iter().position(|c| *c == id)
    }

    pub(crate) fn push(&mut self, id: NodeId) {
        self.0.push(id);
    }

    pub(crate) fn set(&mut self, index: usize, id: NodeId) {
        self.0[index] = id;
    }

    pub(crate) fn remove(&mut self, index: usize) -> NodeId {
        self.0.remove(index)
    }
}

impl From<Vec<NodeId>> for ChildList {
    fn from(ids: Vec<NodeId>) -> Self {
        ChildList(ids)
    }
}

/// Read view of a slot.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SlotRef<'a> {
    Single(Option<NodeId>),
    List(&'a [NodeId]),
}

impl SlotRef<'_> {
    /// Position of `child` in this slot: `Some(None)` for a single slot,
    /// `Some(Some(index))` for a list slot.
    #[must_use]
    pub fn locate(&self, child: NodeId) -> Option<Option<usize>> {
        match self {
            SlotRef::Single(occupant) => (*occupant == Some(child)).then_some(None),
            SlotRef::List(ids) => ids.iter().position(|c| *c == child).map(Some),
        }
    }
}

pub enum SlotMut<'a> {
    Single(&'a mut Option<NodeId>),
    List(&'a mut ChildList),
}

/// Storage types usable as a child slot.
pub trait SlotField {
    const SHAPE: Shape;
    /// What the generated getter returns for this storage.
    type View<'a>
    where
        Self: 'a;

    fn view(&self) -> Self::View<'_>;
    fn as_slot(&self) -> SlotRef<'_>;
    fn as_slot_mut(&mut self) -> SlotMut<'_>;
}

impl SlotField for Option<NodeId> {
    const SHAPE: Shape = Shape::Single;
    type View<'a> = Option<NodeId>;

    fn view(&self) -> Option<NodeId> {
        *self
    }

    fn as_slot(&self) -> SlotRef<'_> {
        SlotRef::Single(*self)
    }

    fn as_slot_mut(&mut self) -> SlotMut<'_> {
        SlotMut::Single(self)
    }
}

impl SlotField for ChildList {
    const SHAPE: Shape = Shape::List;
    type View<'a> = &'a [NodeId];

    fn view(&self) -> &[NodeId] {
        self.as_slice()
    }

    fn as_slot(&self) -> SlotRef<'_> {
        SlotRef::List(self.as_slice())
    }

    fn as_slot_mut(&mut self) -> SlotMut<'_> {
        SlotMut::List(self)
    }
}

pub trait Node: fmt::Debug {
    fn id(&self) -> NodeId;
    fn location(&self) -> &Location;
    fn category(&self) -> Category;
    /// Slots in traversal order.
    fn slot_specs(&self) -> &'static [SlotSpec];
    fn slot(&self, property: Property) -> Option<SlotRef<'_>>;
    fn slot_mut(&mut self, property: Property) -> Option<SlotMut<'_>>;
    #[doc(hidden)]
    fn set_id(&mut self, id: NodeId);

    fn slot_spec(&self, property: Property) -> Option<&'static SlotSpec> {
        self.slot_specs().iter().find(|spec| spec.property == property)
    }

    /// Category accepted by the slot, `None` if the kind has no such slot.
    ///
    /// Prefer this over [`SlotSpec::accepts`]: kinds whose accepted category
    /// varies per node override it.
    fn accepts(&self, property: Property) -> Option<Category> {
        self.slot_spec(property).map(|spec| spec.accepts)
    }

    /// Present children paired with the slot they occupy, in traversal order.
    fn slot_entries(&self) -> Vec<(Property, NodeId)> {
        let mut entries = Vec::new();
        for spec in self.slot_specs() {
            match self.slot(spec.property) {
                Some(SlotRef::Single(Some(child))) => entries.push((spec.property, child)),
                Some(SlotRef::List(children)) => {
                    entries.extend(children.iter().map(|child| (spec.property, *child)));
                }
                _ => {}
            }
        }
        entries
    }

    fn children(&self) -> Vec<NodeId> {
        self.slot_entries().into_iter().map(|(_, id)| id).collect()
    }

    /// Slot (and list index for list slots) currently holding `child`.
    fn locate(&self, child: NodeId) -> Option<(Property, Option<usize>)> {
        self.slot_specs().iter().find_map(|spec| {
            self.slot(spec.property)
                .and_then(|slot| slot.locate(child))
                .map(|index| (spec.property, index))
        })
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! ast_slot_role {
    () => {
        $crate::roles::Role::Unclear
    };
    ($role:ident) => {
        $crate::roles::Role::$role
    };
}

/// Declares node structs together with their slot tables and `Node` impls.
///
/// Plain data goes in the struct body, child slots in the trailing `slots`
/// block as `field: Storage => Property accepts Category [as Role]`.
#[macro_export]
macro_rules! ast_nodes {
    (
        $(
            $(#[$outer:meta])*
            $struct_vis:vis struct $name:ident in $category:ident {
                $(
                    $(#[$field_attr:meta])*
                    $field_vis:vis $field_name:ident : $field_ty:ty
                ),* $(,)?
            }
            slots {
                $(
                    $(#[$slot_attr:meta])*
                    $slot_name:ident : $slot_ty:ty => $property:ident accepts $accepts:ident $(as $role:ident)?
                ),* $(,)?
            }
        )+
    ) => {
        $(
            $(#[$outer])*
            #[derive(Clone, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
            $struct_vis struct $name {
                pub(crate) id: $crate::node::NodeId,
                pub location: $crate::node::Location,
                $(
                    $(#[$field_attr])*
                    $field_vis $field_name : $field_ty,
                )*
                $(
                    $(#[$slot_attr])*
                    pub(crate) $slot_name : $slot_ty,
                )*
            }

            impl $name {
                pub const SLOTS: &'static [$crate::node::SlotSpec] = &[
                    $(
                        $crate::node::SlotSpec {
                            property: $crate::node::Property::$property,
                            shape: <$slot_ty as $crate::node::SlotField>::SHAPE,
                            accepts: $crate::node::Category::$accepts,
                            role: $crate::ast_slot_role!($($role)?),
                        },
                    )*
                ];

                #[must_use]
                pub fn with_location(mut self, location: $crate::node::Location) -> Self {
                    self.location = location;
                    self
                }

                $(
                    #[must_use]
                    pub fn $slot_name(&self) -> <$slot_ty as $crate::node::SlotField>::View<'_> {
                        $crate::node::SlotField::view(&self.$slot_name)
                    }
                )*
            }

            impl $crate::node::Node for $name {
                fn id(&self) -> $crate::node::NodeId {
                    self.id
                }

                fn location(&self) -> &$crate::node::Location {
                    &self.location
                }

                fn category(&self) -> $crate::node::Category {
                    $crate::node::Category::$category
                }

                fn slot_specs(&self) -> &'static [$crate::node::SlotSpec] {
                    Self::SLOTS
                }

                #[allow(clippy::match_single_binding)]
                fn slot(&self, property: $crate::node::Property) -> Option<$crate::node::SlotRef<'_>> {
                    match property {
                        $(
                            $crate::node::Property::$property => {
                                Some($crate::node::SlotField::as_slot(&self.$slot_name))
                            }
                        )*
                        _ => None,
                    }
                }

                #[allow(clippy::match_single_binding)]
                fn slot_mut(&mut self, property: $crate::node::Property) -> Option<$crate::node::SlotMut<'_>> {
                    match property {
                        $(
                            $crate::node::Property::$property => {
                                Some($crate::node::SlotField::as_slot_mut(&mut self.$slot_name))
                            }
                        )*
                        _ => None,
                    }
                }

                fn set_id(&mut self, id: $crate::node::NodeId) {
                    self.id = id;
                }
            }
        )+
    };
}

/// Declares the closed set of node kinds: the [`AstNode`](crate::nodes::AstNode)
/// sum type, its [`NodeKind`](crate::nodes::NodeKind) discriminant, and the
/// conversions between them and the concrete structs.
#[macro_export]
macro_rules! ast_node_kinds {
    ( $( $(#[$arm_attr:meta])* $kind:ident ),+ $(,)? ) => {
        #[derive(Clone, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
        pub enum AstNode {
            $(
                $(#[$arm_attr])*
                $kind($kind),
            )+
        }

        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        pub enum NodeKind {
            $( $kind, )+
        }

        impl AstNode {
            #[must_use]
            pub fn kind(&self) -> NodeKind {
                match self {
                    $( AstNode::$kind(_) => NodeKind::$kind, )+
                }
            }

            #[must_use]
            pub fn node(&self) -> &dyn $crate::node::Node {
                match self {
                    $( AstNode::$kind(n) => n, )+
                }
            }

            pub(crate) fn node_mut(&mut self) -> &mut dyn $crate::node::Node {
                match self {
                    $( AstNode::$kind(n) => n, )+
                }
            }
        }

        impl std::fmt::Display for NodeKind {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $( NodeKind::$kind => f.write_str(stringify!($kind)), )+
                }
            }
        }

        $(
            impl From<$kind> for AstNode {
                fn from(n: $kind) -> Self {
                    AstNode::$kind(n)
                }
            }

            impl $crate::nodes::AstKind for $kind {
                fn from_node(node: &AstNode) -> Option<&Self> {
                    match node {
                        AstNode::$kind(n) => Some(n),
                        _ => None,
                    }
                }
            }
        )+
    };
}
