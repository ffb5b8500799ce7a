//! Raw source text of a subtree.

use crate::{arena::Arena, node::NodeId, nodes::AstNode};

impl Arena {
    /// Source text covered by `id`.
    ///
    /// Uses the text recorded in the node's [`Location`](crate::node::Location)
    /// when there is one and otherwise renders the subtree. Unknown ids give an
    /// empty string.
    #[must_use]
    pub fn raw_signature(&self, id: NodeId) -> String {
        let Some(node) = self.get(id) else {
            return String::new();
        };
        let source = &node.location().source;
        if !source.is_empty() {
            return source.clone();
        }
        self.render(node)
    }

    fn render_slot(&self, id: Option<NodeId>) -> String {
        id.map(|id| self.raw_signature(id)).unwrap_or_default()
    }

    fn render_list(&self, ids: &[NodeId], separator: &str) -> String {
        ids.iter()
            .map(|id| self.raw_signature(*id))
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn render(&self, node: &AstNode) -> String {
        match node {
            AstNode::TranslationUnit(unit) => self.render_list(unit.declarations(), "\n"),
            AstNode::Name(name) => name.text().to_string(),
            AstNode::Problem(problem) => problem.message.clone(),
            AstNode::LiteralExpression(literal) => literal.value.clone(),
            AstNode::IdExpression(expr) => self.render_slot(expr.name()),
            AstNode::UnaryExpression(expr) => {
                expr.operator.apply(&self.render_slot(expr.operand()))
            }
            AstNode::BinaryExpression(expr) => format!(
                "{} {} {}",
                self.render_slot(expr.operand1()),
                expr.operator.symbol(),
                self.render_slot(expr.operand2())
            ),
            AstNode::FunctionCallExpression(call) => format!(
                "{}({})",
                self.render_slot(call.function_name()),
                self.render_list(call.arguments(), ", ")
            ),
            AstNode::ProblemExpression(problem) => self.render_slot(problem.problem()),
            AstNode::ProblemStatement(problem) => self.render_slot(problem.problem()),
            AstNode::ProblemDeclaration(problem) => self.render_slot(problem.problem()),
            AstNode::ProblemTypeId(problem) => self.render_slot(problem.problem()),
            AstNode::CompoundStatement(block) => {
                if block.statements().is_empty() {
                    "{}".to_string()
                } else {
                    format!("{{ {} }}", self.render_list(block.statements(), " "))
                }
            }
            AstNode::ExpressionStatement(stmt) => {
                format!("{};", self.render_slot(stmt.expression()))
            }
            AstNode::DeclarationStatement(stmt) => self.render_slot(stmt.declaration()),
            AstNode::WhileStatement(stmt) => format!(
                "while ({}) {}",
                self.render_slot(stmt.condition()),
                self.render_slot(stmt.body())
            ),
            AstNode::DoStatement(stmt) => format!(
                "do {} while ({});",
                self.render_slot(stmt.body()),
                self.render_slot(stmt.condition())
            ),
            AstNode::IfStatement(stmt) => {
                let mut text = format!(
                    "if ({}) {}",
                    self.render_slot(stmt.condition()),
                    self.render_slot(stmt.then_clause())
                );
                if let Some(else_clause) = stmt.else_clause() {
                    text.push_str(" else ");
                    text.push_str(&self.raw_signature(else_clause));
                }
                text
            }
            AstNode::ReturnStatement(stmt) => match stmt.return_value() {
                Some(value) => format!("return {};", self.raw_signature(value)),
                None => "return;".to_string(),
            },
            AstNode::NullStatement(_) => ";".to_string(),
            AstNode::SimpleDeclaration(decl) => {
                let text = spaced(&[
                    self.render_slot(decl.decl_specifier()),
                    self.render_list(decl.declarators(), ", "),
                ]);
                format!("{text};")
            }
            AstNode::Declarator(declarator) => assigned(
                self.render_slot(declarator.name()),
                declarator.initializer().map(|init| self.raw_signature(init)),
            ),
            AstNode::SimpleDeclSpecifier(spec) => spec.simple_type.keyword().to_string(),
            AstNode::NamedTypeSpecifier(spec) => self.render_slot(spec.name()),
            AstNode::EnumerationSpecifier(spec) => self.render_slot(spec.name()),
            AstNode::Enumerator(enumerator) => assigned(
                self.render_slot(enumerator.name()),
                enumerator.value().map(|value| self.raw_signature(value)),
            ),
            AstNode::TypeId(type_id) => spaced(&[
                self.render_slot(type_id.decl_specifier()),
                self.render_slot(type_id.abstract_declarator()),
            ]),
            AstNode::SimpleTypeTemplateParameter(param) => {
                let head = spaced(&[
                    param.parameter_kind.keyword().to_string(),
                    self.render_slot(param.name()),
                ]);
                assigned(
                    head,
                    param.default_type().map(|default| self.raw_signature(default)),
                )
            }
            AstNode::Ambiguity(ambiguity) => {
                self.render_slot(ambiguity.alternatives().first().copied())
            }
        }
    }
}

/// Joins the non-empty parts with single spaces.
fn spaced(parts: &[String]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ")
}

fn assigned(head: String, value: Option<String>) -> String {
    match value {
        Some(value) => format!("{head} = {value}"),
        None => head,
    }
}
