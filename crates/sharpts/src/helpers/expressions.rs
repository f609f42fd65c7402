use crate::error::TranslateError;
use crate::ir::{OperatorToken, UnaryPosition};
use crate::syntax::{
    Argument, AssignmentExpr, BinaryExpr, Expr, InvocationExpr, MemberAccessExpr, ObjectCreationExpr,
    Parameter, UnaryExpr,
};
use crate::type_map::{map_type, map_type_name};

/// Framework root identifiers and factory members with a lowercase
/// TypeScript spelling.
const KNOWN_ALIASES: &[(&str, &str)] = &[
    ("Knockout", "ko"),
    ("KnockoutUtils", "ko.utils"),
    ("ObservableArray", "observableArray"),
    ("Observable", "observable"),
];

/// Member names that only wrap an observable accessor; the access is
/// replaced by its receiver.
const WRAPPER_MEMBERS: &[&str] = &["SetValue", "GetValue", "SetItems", "GetItems"];

/// TypeScript spelling of a plain identifier or member name.
pub fn known_alias(name: &str) -> &str {
    KNOWN_ALIASES
        .iter()
        .find(|(from, _)| *from == name)
        .map_or(name, |&(_, to)| to)
}

pub struct BinaryExpression<'a> {
    pub left: &'a Expr,
    pub right: &'a Expr,
    pub operator: OperatorToken,
}

impl<'a> BinaryExpression<'a> {
    pub fn new(node: &'a BinaryExpr) -> Result<Self, TranslateError> {
        Ok(Self {
            left: &node.left,
            right: &node.right,
            operator: OperatorToken::binary(node.operator)?,
        })
    }
}

pub struct UnaryExpression<'a> {
    pub operand: &'a Expr,
    pub operator: OperatorToken,
    pub position: UnaryPosition,
}

impl<'a> UnaryExpression<'a> {
    /// Fails when the operator does not match `position` (e.g. a postfix
    /// `!`) or has no token.
    pub fn new(node: &'a UnaryExpr, position: UnaryPosition) -> Result<Self, TranslateError> {
        use crate::syntax::UnaryKind::*;
        let matches_position = match position {
            UnaryPosition::Prefix => matches!(node.operator, PreIncrement | PreDecrement | LogicalNot),
            UnaryPosition::Postfix => matches!(node.operator, PostIncrement | PostDecrement),
        };
        if !matches_position {
            return Err(TranslateError::UnsupportedOperator {
                kind: format!("{:?} in {:?} position", node.operator, position),
            });
        }
        Ok(Self {
            operand: &node.operand,
            operator: OperatorToken::unary(node.operator)?,
            position,
        })
    }
}

pub struct AssignmentExpression<'a> {
    pub left: &'a Expr,
    pub right: &'a Expr,
    pub operator: OperatorToken,
}

impl<'a> AssignmentExpression<'a> {
    pub fn new(node: &'a AssignmentExpr) -> Self {
        Self {
            left: &node.left,
            right: &node.right,
            operator: OperatorToken::assignment(node.operator),
        }
    }
}

pub struct MemberAccessExpression<'a> {
    pub receiver: &'a Expr,
    /// Member name after alias substitution, without type arguments.
    pub member_name: &'a str,
    /// The member only wraps an observable accessor.
    pub is_wrapper: bool,
}

impl<'a> MemberAccessExpression<'a> {
    pub fn new(node: &'a MemberAccessExpr) -> Self {
        let name = node.member.name.as_str();
        Self {
            receiver: &node.receiver,
            member_name: known_alias(name),
            is_wrapper: WRAPPER_MEMBERS.contains(&name),
        }
    }
}

pub struct InvocationExpression<'a> {
    pub callee: &'a Expr,
    pub arguments: Vec<&'a Expr>,
}

impl<'a> InvocationExpression<'a> {
    pub fn new(node: &'a InvocationExpr) -> Self {
        Self {
            callee: &node.callee,
            arguments: argument_expressions(&node.arguments),
        }
    }
}

pub struct ObjectCreationExpression<'a> {
    /// Declared name of the created type, with aliases applied and type
    /// arguments resolved.
    pub type_name: String,
    pub arguments: Vec<&'a Expr>,
}

impl<'a> ObjectCreationExpression<'a> {
    pub fn new(node: &'a ObjectCreationExpr) -> Result<Self, TranslateError> {
        Ok(Self {
            type_name: map_type_name(&node.ty, known_alias)?,
            arguments: argument_expressions(&node.arguments),
        })
    }
}

/// A parameter of a lambda, anonymous method, method or constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterInfo<'a> {
    pub name: &'a str,
    /// Resolved type; `None` for implicitly typed lambda parameters.
    pub ty: Option<String>,
    pub default: Option<&'a Expr>,
}

impl<'a> ParameterInfo<'a> {
    pub fn new(node: &'a Parameter) -> Result<Self, TranslateError> {
        Ok(Self {
            name: &node.name,
            ty: node.ty.as_ref().map(map_type).transpose()?,
            default: node.default.as_ref(),
        })
    }

    pub fn all(parameters: &'a [Parameter]) -> Result<Vec<Self>, TranslateError> {
        parameters.iter().map(Self::new).collect()
    }
}

fn argument_expressions(arguments: &[Argument]) -> Vec<&Expr> {
    arguments.iter().map(|a| &a.expression).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{BinaryKind, TypeSyntax, UnaryKind};

    #[test]
    fn aliases_apply_to_exact_names_only() {
        assert_eq!(known_alias("Knockout"), "ko");
        assert_eq!(known_alias("KnockoutUtils"), "ko.utils");
        assert_eq!(known_alias("Observable"), "observable");
        assert_eq!(known_alias("Observables"), "Observables");
    }

    #[test]
    fn unary_position_must_match_operator() {
        let Expr::PostfixUnary(node) = Expr::postfix(Expr::identifier("i"), UnaryKind::LogicalNot) else {
            unreachable!()
        };
        assert!(UnaryExpression::new(&node, UnaryPosition::Postfix).is_err());

        let Expr::PrefixUnary(node) = Expr::prefix(UnaryKind::PreIncrement, Expr::identifier("i")) else {
            unreachable!()
        };
        let helper = UnaryExpression::new(&node, UnaryPosition::Prefix).unwrap();
        assert_eq!(helper.operator, OperatorToken::Increment);
    }

    #[test]
    fn created_type_keeps_its_declared_name() {
        let Expr::ObjectCreation(node) = Expr::new_object(TypeSyntax::identifier("StringBuilder"), Vec::new()) else {
            unreachable!()
        };
        assert_eq!(ObjectCreationExpression::new(&node).unwrap().type_name, "StringBuilder");

        let Expr::ObjectCreation(node) = Expr::new_object(
            TypeSyntax::generic("ObservableArray", vec![TypeSyntax::predefined("int")]),
            Vec::new(),
        ) else {
            unreachable!()
        };
        assert_eq!(ObjectCreationExpression::new(&node).unwrap().type_name, "observableArray<number>");
    }

    #[test]
    fn binary_helper_exposes_operands() {
        let Expr::Binary(node) = Expr::binary(Expr::identifier("a"), BinaryKind::LogicalOr, Expr::identifier("b"))
        else {
            unreachable!()
        };
        let helper = BinaryExpression::new(&node).unwrap();
        assert_eq!(helper.left.to_string(), "a");
        assert_eq!(helper.right.to_string(), "b");
        assert_eq!(helper.operator.symbol(), "||");
    }
}
