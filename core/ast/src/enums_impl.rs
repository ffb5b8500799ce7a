//! Implementation methods for AST enum types.
//!
//! Source spellings of operators and keywords, used when a raw signature has
//! to be synthesised from a subtree.

use crate::nodes::{BinaryOperator, SimpleType, TemplateParameterKind, UnaryOperator};

impl BinaryOperator {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::ShiftLeft => "<<",
            BinaryOperator::ShiftRight => ">>",
            BinaryOperator::LessThan => "<",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::BinaryAnd => "&",
            BinaryOperator::BinaryXor => "^",
            BinaryOperator::BinaryOr => "|",
            BinaryOperator::LogicalAnd => "&&",
            BinaryOperator::LogicalOr => "||",
            BinaryOperator::Assign => "=",
            BinaryOperator::Equals => "==",
            BinaryOperator::NotEquals => "!=",
        }
    }
}

impl UnaryOperator {
    /// Wraps an already rendered operand in this operator.
    #[must_use]
    pub fn apply(self, operand: &str) -> String {
        match self {
            UnaryOperator::Minus => format!("-{operand}"),
            UnaryOperator::Plus => format!("+{operand}"),
            UnaryOperator::Not => format!("!{operand}"),
            UnaryOperator::Tilde => format!("~{operand}"),
            UnaryOperator::Star => format!("*{operand}"),
            UnaryOperator::Amper => format!("&{operand}"),
            UnaryOperator::PrefixIncr => format!("++{operand}"),
            UnaryOperator::PrefixDecr => format!("--{operand}"),
            UnaryOperator::PostfixIncr => format!("{operand}++"),
            UnaryOperator::PostfixDecr => format!("{operand}--"),
            UnaryOperator::SizeOf => format!("sizeof {operand}"),
            UnaryOperator::Bracketed => format!("({operand})"),
        }
    }
}

impl SimpleType {
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            SimpleType::Unspecified => "",
            SimpleType::Void => "void",
            SimpleType::Char => "char",
            SimpleType::Int => "int",
            SimpleType::Float => "float",
            SimpleType::Double => "double",
            SimpleType::Bool => "_Bool",
        }
    }
}

impl TemplateParameterKind {
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            TemplateParameterKind::Class => "class",
            TemplateParameterKind::Typename => "typename",
        }
    }
}
