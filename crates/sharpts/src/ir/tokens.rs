//! Closed token sets carried by IR nodes.

use crate::error::TranslateError;
use crate::syntax::{AssignmentKind, BinaryKind, Modifier, UnaryKind};

/// Operator tokens an expression unit can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorToken {
    Addition,
    Subtraction,
    Multiplication,
    Divide,
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEquals,
    GreaterThan,
    GreaterThanOrEquals,
    LogicalAnd,
    LogicalOr,
    Increment,
    Decrement,
    LogicalNot,
    Assignment,
    AdditionAssignment,
    SubtractionAssignment,
    MultiplicationAssignment,
    DivideAssignment,
    ModuloAssignment,
    BitwiseAndAssignment,
    BitwiseOrAssignment,
    ExclusiveOrAssignment,
    LeftShiftAssignment,
    RightShiftAssignment,
    CoalesceAssignment,
}

impl OperatorToken {
    pub fn symbol(self) -> &'static str {
        match self {
            OperatorToken::Addition => "+",
            OperatorToken::Subtraction => "-",
            OperatorToken::Multiplication => "*",
            OperatorToken::Divide => "/",
            OperatorToken::Equals => "==",
            OperatorToken::NotEquals => "!=",
            OperatorToken::LessThan => "<",
            OperatorToken::LessThanOrEquals => "<=",
            OperatorToken::GreaterThan => ">",
            OperatorToken::GreaterThanOrEquals => ">=",
            OperatorToken::LogicalAnd => "&&",
            OperatorToken::LogicalOr => "||",
            OperatorToken::Increment => "++",
            OperatorToken::Decrement => "--",
            OperatorToken::LogicalNot => "!",
            OperatorToken::Assignment => "=",
            OperatorToken::AdditionAssignment => "+=",
            OperatorToken::SubtractionAssignment => "-=",
            OperatorToken::MultiplicationAssignment => "*=",
            OperatorToken::DivideAssignment => "/=",
            OperatorToken::ModuloAssignment => "%=",
            OperatorToken::BitwiseAndAssignment => "&=",
            OperatorToken::BitwiseOrAssignment => "|=",
            OperatorToken::ExclusiveOrAssignment => "^=",
            OperatorToken::LeftShiftAssignment => "<<=",
            OperatorToken::RightShiftAssignment => ">>=",
            OperatorToken::CoalesceAssignment => "??=",
        }
    }

    /// Token for a binary operator the dispatcher translates structurally.
    pub fn binary(kind: BinaryKind) -> Result<Self, TranslateError> {
        let token = match kind {
            BinaryKind::Add => OperatorToken::Addition,
            BinaryKind::Subtract => OperatorToken::Subtraction,
            BinaryKind::Multiply => OperatorToken::Multiplication,
            BinaryKind::Divide => OperatorToken::Divide,
            BinaryKind::Equals => OperatorToken::Equals,
            BinaryKind::NotEquals => OperatorToken::NotEquals,
            BinaryKind::LessThan => OperatorToken::LessThan,
            BinaryKind::LessThanOrEqual => OperatorToken::LessThanOrEquals,
            BinaryKind::GreaterThan => OperatorToken::GreaterThan,
            BinaryKind::GreaterThanOrEqual => OperatorToken::GreaterThanOrEquals,
            BinaryKind::LogicalAnd => OperatorToken::LogicalAnd,
            BinaryKind::LogicalOr => OperatorToken::LogicalOr,
            other => {
                return Err(TranslateError::UnsupportedOperator {
                    kind: format!("{:?}", other),
                });
            }
        };
        Ok(token)
    }

    pub fn unary(kind: UnaryKind) -> Result<Self, TranslateError> {
        let token = match kind {
            UnaryKind::PreIncrement | UnaryKind::PostIncrement => OperatorToken::Increment,
            UnaryKind::PreDecrement | UnaryKind::PostDecrement => OperatorToken::Decrement,
            UnaryKind::LogicalNot => OperatorToken::LogicalNot,
            other => {
                return Err(TranslateError::UnsupportedOperator {
                    kind: format!("{:?}", other),
                });
            }
        };
        Ok(token)
    }

    pub fn assignment(kind: AssignmentKind) -> Self {
        match kind {
            AssignmentKind::Simple => OperatorToken::Assignment,
            AssignmentKind::Add => OperatorToken::AdditionAssignment,
            AssignmentKind::Subtract => OperatorToken::SubtractionAssignment,
            AssignmentKind::Multiply => OperatorToken::MultiplicationAssignment,
            AssignmentKind::Divide => OperatorToken::DivideAssignment,
            AssignmentKind::Modulo => OperatorToken::ModuloAssignment,
            AssignmentKind::And => OperatorToken::BitwiseAndAssignment,
            AssignmentKind::Or => OperatorToken::BitwiseOrAssignment,
            AssignmentKind::ExclusiveOr => OperatorToken::ExclusiveOrAssignment,
            AssignmentKind::LeftShift => OperatorToken::LeftShiftAssignment,
            AssignmentKind::RightShift => OperatorToken::RightShiftAssignment,
            AssignmentKind::Coalesce => OperatorToken::CoalesceAssignment,
        }
    }
}

/// Position of a unary operator relative to its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryPosition {
    Prefix,
    Postfix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    None,
    Public,
    Protected,
    Private,
    Internal,
}

/// Visibility plus the `static` flag, as read from a modifier list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibilityToken {
    pub visibility: Visibility,
    pub is_static: bool,
}

impl VisibilityToken {
    pub fn from_modifiers(modifiers: &[Modifier]) -> Self {
        let mut token = Self::default();
        for modifier in modifiers {
            match modifier {
                Modifier::Public => token.visibility = Visibility::Public,
                Modifier::Private => token.visibility = Visibility::Private,
                // `protected internal` stays protected.
                Modifier::Internal if token.visibility == Visibility::Protected => {}
                Modifier::Internal => token.visibility = Visibility::Internal,
                Modifier::Protected => token.visibility = Visibility::Protected,
                Modifier::Static => token.is_static = true,
                _ => {}
            }
        }
        token
    }

    /// Rendered prefix, with a trailing space when non-empty.
    pub fn prefix(self) -> String {
        let keyword = match self.visibility {
            Visibility::Public | Visibility::Internal => Some("public"),
            Visibility::Protected => Some("protected"),
            Visibility::Private => Some("private"),
            Visibility::None => None,
        };
        let mut out = String::new();
        if let Some(keyword) = keyword {
            out.push_str(keyword);
            out.push(' ');
        }
        if self.is_static {
            out.push_str(super::lexemes::STATIC_KEYWORD);
            out.push(' ');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_prefixes() {
        let cases: [(&[Modifier], &str); 5] = [
            (&[Modifier::Public], "public "),
            (&[Modifier::Internal], "public "),
            (&[Modifier::Private, Modifier::Static], "private static "),
            (&[Modifier::Protected, Modifier::Internal], "protected "),
            (&[Modifier::Readonly], ""),
        ];
        for (modifiers, expected) in cases {
            assert_eq!(VisibilityToken::from_modifiers(modifiers).prefix(), expected);
        }
    }

    #[test]
    fn only_structural_binary_operators_have_tokens() {
        assert_eq!(OperatorToken::binary(BinaryKind::Add).unwrap().symbol(), "+");
        assert_eq!(
            OperatorToken::binary(BinaryKind::LessThanOrEqual).unwrap().symbol(),
            "<="
        );
        assert!(matches!(
            OperatorToken::binary(BinaryKind::Modulo),
            Err(TranslateError::UnsupportedOperator { .. })
        ));
        assert!(OperatorToken::unary(UnaryKind::Minus).is_err());
    }
}
