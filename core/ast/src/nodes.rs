//! Concrete C/C++ node kinds.
//!
//! Every kind is declared through `ast_nodes!`, which records its category
//! and the static slot table driving attachment, traversal, replacement and
//! role classification. Slot order in the table is traversal order.
use serde::{Deserialize, Serialize};

use crate::{
    ast_node_kinds, ast_nodes,
    node::{Category, ChildList, Location, NodeId},
};

/// Typed access to one variant of [`AstNode`].
pub trait AstKind: Sized {
    fn from_node(node: &AstNode) -> Option<&Self>;
}

ast_node_kinds! {
    TranslationUnit,
    Name,
    Problem,
    LiteralExpression,
    IdExpression,
    UnaryExpression,
    BinaryExpression,
    FunctionCallExpression,
    ProblemExpression,
    CompoundStatement,
    ExpressionStatement,
    DeclarationStatement,
    WhileStatement,
    DoStatement,
    IfStatement,
    ReturnStatement,
    NullStatement,
    ProblemStatement,
    SimpleDeclaration,
    ProblemDeclaration,
    Declarator,
    SimpleDeclSpecifier,
    NamedTypeSpecifier,
    EnumerationSpecifier,
    Enumerator,
    TypeId,
    ProblemTypeId,
    SimpleTypeTemplateParameter,
    /// Placeholder for several parses that cannot be told apart yet.
    Ambiguity,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum LiteralKind {
    Integer,
    Float,
    Char,
    String,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum UnaryOperator {
    Minus,
    Plus,
    Not,
    Tilde,
    Star,
    Amper,
    PrefixIncr,
    PrefixDecr,
    PostfixIncr,
    PostfixDecr,
    SizeOf,
    Bracketed,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum BinaryOperator {
    Multiply,
    Divide,
    Modulo,
    Plus,
    Minus,
    ShiftLeft,
    ShiftRight,
    LessThan,
    GreaterThan,
    LessEqual,
    GreaterEqual,
    BinaryAnd,
    BinaryXor,
    BinaryOr,
    LogicalAnd,
    LogicalOr,
    Assign,
    Equals,
    NotEquals,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum SimpleType {
    #[default]
    Unspecified,
    Void,
    Char,
    Int,
    Float,
    Double,
    Bool,
}

/// Keyword introducing a type template parameter.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum TemplateParameterKind {
    #[default]
    Class,
    Typename,
}

ast_nodes! {

    /// Root of a parsed file.
    pub struct TranslationUnit in TranslationUnit {}
    slots {
        declarations: ChildList => OwnedDeclaration accepts Declarations,
    }

    pub struct Name in Names {
        pub text: String,
    }
    slots {}

    /// Syntax problem recorded where the parser could not build a node.
    pub struct Problem in Problems {
        pub code: u32,
        pub message: String,
    }
    slots {}

    pub struct LiteralExpression in Expressions {
        pub literal_kind: LiteralKind,
        pub value: String,
    }
    slots {}

    pub struct IdExpression in Expressions {}
    slots {
        name: Option<NodeId> => IdName accepts Names as Reference,
    }

    pub struct UnaryExpression in Expressions {
        pub operator: UnaryOperator,
    }
    slots {
        operand: Option<NodeId> => Operand accepts Expressions,
    }

    pub struct BinaryExpression in Expressions {
        pub operator: BinaryOperator,
    }
    slots {
        operand1: Option<NodeId> => Operand1 accepts Expressions,
        operand2: Option<NodeId> => Operand2 accepts Expressions,
    }

    pub struct FunctionCallExpression in Expressions {}
    slots {
        function_name: Option<NodeId> => FunctionName accepts Expressions,
        arguments: ChildList => FunctionArgument accepts Expressions,
    }

    pub struct ProblemExpression in Expressions {}
    slots {
        problem: Option<NodeId> => Problem accepts Problems,
    }

    pub struct CompoundStatement in Statements {}
    slots {
        statements: ChildList => NestedStatement accepts Statements,
    }

    pub struct ExpressionStatement in Statements {}
    slots {
        expression: Option<NodeId> => Expression accepts Expressions,
    }

    pub struct DeclarationStatement in Statements {}
    slots {
        declaration: Option<NodeId> => Declaration accepts Declarations,
    }

    pub struct WhileStatement in Statements {}
    slots {
        condition: Option<NodeId> => ConditionExpression accepts Expressions,
        body: Option<NodeId> => Body accepts Statements,
    }

    pub struct DoStatement in Statements {}
    slots {
        body: Option<NodeId> => Body accepts Statements,
        condition: Option<NodeId> => ConditionExpression accepts Expressions,
    }

    pub struct IfStatement in Statements {}
    slots {
        condition: Option<NodeId> => ConditionExpression accepts Expressions,
        then_clause: Option<NodeId> => ThenClause accepts Statements,
        else_clause: Option<NodeId> => ElseClause accepts Statements,
    }

    pub struct ReturnStatement in Statements {}
    slots {
        return_value: Option<NodeId> => ReturnValue accepts Expressions,
    }

    pub struct NullStatement in Statements {}
    slots {}

    pub struct ProblemStatement in Statements {}
    slots {
        problem: Option<NodeId> => Problem accepts Problems,
    }

    /// `decl-specifier declarator, declarator;`
    pub struct SimpleDeclaration in Declarations {}
    slots {
        decl_specifier: Option<NodeId> => DeclSpecifier accepts DeclSpecifiers,
        declarators: ChildList => Declarator accepts Declarators,
    }

    pub struct ProblemDeclaration in Declarations {}
    slots {
        problem: Option<NodeId> => Problem accepts Problems,
    }

    pub struct Declarator in Declarators {}
    slots {
        name: Option<NodeId> => DeclaratorName accepts Names as Declaration,
        initializer: Option<NodeId> => Initializer accepts Expressions,
    }

    pub struct SimpleDeclSpecifier in DeclSpecifiers {
        pub simple_type: SimpleType,
    }
    slots {}

    pub struct NamedTypeSpecifier in DeclSpecifiers {}
    slots {
        name: Option<NodeId> => NamedTypeName accepts Names as Reference,
    }

    /// `enum name { enumerators }`
    pub struct EnumerationSpecifier in DeclSpecifiers {}
    slots {
        name: Option<NodeId> => EnumerationName accepts Names as Definition,
        enumerators: ChildList => Enumerator accepts Enumerators,
    }

    pub struct Enumerator in Enumerators {}
    slots {
        name: Option<NodeId> => EnumeratorName accepts Names as Definition,
        value: Option<NodeId> => EnumeratorValue accepts Expressions,
    }

    pub struct TypeId in TypeIds {}
    slots {
        decl_specifier: Option<NodeId> => DeclSpecifier accepts DeclSpecifiers,
        abstract_declarator: Option<NodeId> => AbstractDeclarator accepts Declarators,
    }

    /// Type-id the parser gave up on.
    pub struct ProblemTypeId in TypeIds {}
    slots {
        problem: Option<NodeId> => Problem accepts Problems,
    }

    /// `class T = Default` / `typename T = Default`
    pub struct SimpleTypeTemplateParameter in TemplateParameters {
        pub parameter_kind: TemplateParameterKind,
    }
    slots {
        name: Option<NodeId> => ParameterName accepts Names as Declaration,
        default_type: Option<NodeId> => DefaultType accepts TypeIds,
    }
}

/// Transient node holding two or more alternative parses of one `family`.
///
/// It sits in its parent's slot wherever a node of `family` is accepted and is
/// removed by [`Arena::resolve_ambiguity`](crate::arena::Arena::resolve_ambiguity).
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Ambiguity {
    pub(crate) id: NodeId,
    pub location: Location,
    pub(crate) family: Category,
    pub(crate) alternatives: ChildList,
}
