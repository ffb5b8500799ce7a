use crate::{
    node::{
        Category, ChildList, Location, Node, NodeId, Property, Shape, SlotField, SlotMut, SlotRef,
        SlotSpec,
    },
    nodes::{
        Ambiguity, AstNode, BinaryExpression, BinaryOperator, CompoundStatement,
        DeclarationStatement, Declarator, DoStatement, EnumerationSpecifier, Enumerator,
        ExpressionStatement, FunctionCallExpression, IdExpression, IfStatement, LiteralExpression,
        LiteralKind, Name, NamedTypeSpecifier, NullStatement, Problem, ProblemDeclaration,
        ProblemExpression, ProblemStatement, ProblemTypeId, ReturnStatement, SimpleDeclSpecifier,
        SimpleDeclaration, SimpleType, SimpleTypeTemplateParameter, TemplateParameterKind,
        TranslationUnit, TypeId, UnaryExpression, UnaryOperator, WhileStatement,
    },
    roles::Role,
};

impl AstNode {
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.node().id()
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        self.node().location()
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.node().category()
    }

    /// Category this node counts as when placed into a slot.
    ///
    /// An ambiguity stands in for its family.
    #[must_use]
    pub fn slot_category(&self) -> Category {
        match self {
            AstNode::Ambiguity(ambiguity) => ambiguity.family,
            _ => self.category(),
        }
    }

    #[must_use]
    pub fn children(&self) -> Vec<NodeId> {
        self.node().children()
    }

    #[must_use]
    pub fn is_ambiguity(&self) -> bool {
        matches!(self, AstNode::Ambiguity(_))
    }
}

impl TranslationUnit {
    #[must_use]
    pub fn new(declarations: Vec<NodeId>) -> Self {
        TranslationUnit {
            id: NodeId::default(),
            location: Location::default(),
            declarations: ChildList::from(declarations),
        }
    }
}

impl Name {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Name {
            id: NodeId::default(),
            location: Location::default(),
            text: text.into(),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Problem {
    #[must_use]
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Problem {
            id: NodeId::default(),
            location: Location::default(),
            code,
            message: message.into(),
        }
    }
}

impl LiteralExpression {
    #[must_use]
    pub fn new(literal_kind: LiteralKind, value: impl Into<String>) -> Self {
        LiteralExpression {
            id: NodeId::default(),
            location: Location::default(),
            literal_kind,
            value: value.into(),
        }
    }
}

impl IdExpression {
    #[must_use]
    pub fn new(name: Option<NodeId>) -> Self {
        IdExpression {
            id: NodeId::default(),
            location: Location::default(),
            name,
        }
    }
}

impl UnaryExpression {
    #[must_use]
    pub fn new(operator: UnaryOperator, operand: Option<NodeId>) -> Self {
        UnaryExpression {
            id: NodeId::default(),
            location: Location::default(),
            operator,
            operand,
        }
    }
}

impl BinaryExpression {
    #[must_use]
    pub fn new(
        operator: BinaryOperator,
        operand1: Option<NodeId>,
        operand2: Option<NodeId>,
    ) -> Self {
        BinaryExpression {
            id: NodeId::default(),
            location: Location::default(),
            operator,
            operand1,
            operand2,
        }
    }
}

impl FunctionCallExpression {
    #[must_use]
    pub fn new(function_name: Option<NodeId>, arguments: Vec<NodeId>) -> Self {
        FunctionCallExpression {
            id: NodeId::default(),
            location: Location::default(),
            function_name,
            arguments: ChildList::from(arguments),
        }
    }
}

impl ProblemExpression {
    #[must_use]
    pub fn new(problem: Option<NodeId>) -> Self {
        ProblemExpression {
            id: NodeId::default(),
            location: Location::default(),
            problem,
        }
    }
}

impl CompoundStatement {
    #[must_use]
    pub fn new(statements: Vec<NodeId>) -> Self {
        CompoundStatement {
            id: NodeId::default(),
            location: Location::default(),
            statements: ChildList::from(statements),
        }
    }
}

impl ExpressionStatement {
    #[must_use]
    pub fn new(expression: Option<NodeId>) -> Self {
        ExpressionStatement {
            id: NodeId::default(),
            location: Location::default(),
            expression,
        }
    }
}

impl DeclarationStatement {
    #[must_use]
    pub fn new(declaration: Option<NodeId>) -> Self {
        DeclarationStatement {
            id: NodeId::default(),
            location: Location::default(),
            declaration,
        }
    }
}

impl WhileStatement {
    #[must_use]
    pub fn new(condition: Option<NodeId>, body: Option<NodeId>) -> Self {
        WhileStatement {
            id: NodeId::default(),
            location: Location::default(),
            condition,
            body,
        }
    }
}

impl DoStatement {
    #[must_use]
    pub fn new(body: Option<NodeId>, condition: Option<NodeId>) -> Self {
        DoStatement {
            id: NodeId::default(),
            location: Location::default(),
            body,
            condition,
        }
    }
}

impl IfStatement {
    #[must_use]
    pub fn new(
        condition: Option<NodeId>,
        then_clause: Option<NodeId>,
        else_clause: Option<NodeId>,
    ) -> Self {
        IfStatement {
            id: NodeId::default(),
            location: Location::default(),
            condition,
            then_clause,
            else_clause,
        }
    }
}

impl ReturnStatement {
    #[must_use]
    pub fn new(return_value: Option<NodeId>) -> Self {
        ReturnStatement {
            id: NodeId::default(),
            location: Location::default(),
            return_value,
        }
    }
}

impl NullStatement {
    #[must_use]
    pub fn new() -> Self {
        NullStatement {
            id: NodeId::default(),
            location: Location::default(),
        }
    }
}

impl Default for NullStatement {
    fn default() -> Self {
        NullStatement::new()
    }
}

impl ProblemStatement {
    #[must_use]
    pub fn new(problem: Option<NodeId>) -> Self {
        ProblemStatement {
            id: NodeId::default(),
            location: Location::default(),
            problem,
        }
    }
}

impl SimpleDeclaration {
    #[must_use]
    pub fn new(decl_specifier: Option<NodeId>, declarators: Vec<NodeId>) -> Self {
        SimpleDeclaration {
            id: NodeId::default(),
            location: Location::default(),
            decl_specifier,
            declarators: ChildList::from(declarators),
        }
    }
}

impl ProblemDeclaration {
    #[must_use]
    pub fn new(problem: Option<NodeId>) -> Self {
        ProblemDeclaration {
            id: NodeId::default(),
            location: Location::default(),
            problem,
        }
    }
}

impl Declarator {
    #[must_use]
    pub fn new(name: Option<NodeId>, initializer: Option<NodeId>) -> Self {
        Declarator {
            id: NodeId::default(),
            location: Location::default(),
            name,
            initializer,
        }
    }
}

impl SimpleDeclSpecifier {
    #[must_use]
    pub fn new(simple_type: SimpleType) -> Self {
        SimpleDeclSpecifier {
            id: NodeId::default(),
            location: Location::default(),
            simple_type,
        }
    }
}

impl NamedTypeSpecifier {
    #[must_use]
    pub fn new(name: Option<NodeId>) -> Self {
        NamedTypeSpecifier {
            id: NodeId::default(),
            location: Location::default(),
            name,
        }
    }
}

impl EnumerationSpecifier {
    /// Enumerators are appended afterwards, in declaration order.
    #[must_use]
    pub fn new(name: Option<NodeId>) -> Self {
        EnumerationSpecifier {
            id: NodeId::default(),
            location: Location::default(),
            name,
            enumerators: ChildList::new(),
        }
    }
}

impl Enumerator {
    #[must_use]
    pub fn new(name: Option<NodeId>, value: Option<NodeId>) -> Self {
        Enumerator {
            id: NodeId::default(),
            location: Location::default(),
            name,
            value,
        }
    }
}

impl TypeId {
    #[must_use]
    pub fn new(decl_specifier: Option<NodeId>, abstract_declarator: Option<NodeId>) -> Self {
        TypeId {
            id: NodeId::default(),
            location: Location::default(),
            decl_specifier,
            abstract_declarator,
        }
    }
}

impl ProblemTypeId {
    #[must_use]
    pub fn new(problem: Option<NodeId>) -> Self {
        ProblemTypeId {
            id: NodeId::default(),
            location: Location::default(),
            problem,
        }
    }
}

impl SimpleTypeTemplateParameter {
    #[must_use]
    pub fn new(
        parameter_kind: TemplateParameterKind,
        name: Option<NodeId>,
        default_type: Option<NodeId>,
    ) -> Self {
        SimpleTypeTemplateParameter {
            id: NodeId::default(),
            location: Location::default(),
            parameter_kind,
            name,
            default_type,
        }
    }
}

/// `accepts` here is a placeholder: an ambiguity's alternatives belong to its
/// `family`, which is per node. Read it through [`Node::accepts`], which
/// `Ambiguity` overrides.
const AMBIGUITY_SLOTS: &[SlotSpec] = &[SlotSpec {
    property: Property::Alternative,
    shape: Shape::List,
    accepts: Category::Ambiguities,
    role: Role::Unclear,
}];

impl Ambiguity {
    /// `family` is the category every alternative (and the slot holding this
    /// node) belongs to.
    #[must_use]
    pub fn new(family: Category, alternatives: Vec<NodeId>) -> Self {
        Ambiguity {
            id: NodeId::default(),
            location: Location::default(),
            family,
            alternatives: ChildList::from(alternatives),
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    #[must_use]
    pub fn family(&self) -> Category {
        self.family
    }

    #[must_use]
    pub fn alternatives(&self) -> &[NodeId] {
        self.alternatives.as_slice()
    }
}

impl Node for Ambiguity {
    fn id(&self) -> NodeId {
        self.id
    }

    fn location(&self) -> &Location {
        &self.location
    }

    fn category(&self) -> Category {
        Category::Ambiguities
    }

    fn slot_specs(&self) -> &'static [SlotSpec] {
        AMBIGUITY_SLOTS
    }

    fn slot(&self, property: Property) -> Option<SlotRef<'_>> {
        (property == Property::Alternative).then(|| self.alternatives.as_slot())
    }

    fn slot_mut(&mut self, property: Property) -> Option<SlotMut<'_>> {
        (property == Property::Alternative).then(|| self.alternatives.as_slot_mut())
    }

    fn set_id(&mut self, id: NodeId) {
        self.id = id;
    }

    fn accepts(&self, property: Property) -> Option<Category> {
        (property == Property::Alternative).then_some(self.family)
    }
}
