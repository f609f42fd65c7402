//! Expression dispatch: one source expression to one IR subtree.
//!
//! Nested expressions go back through the same builder. Kinds without a
//! structural translation fall through to a [`VerbatimUnit`] holding the
//! source text, so an incomplete table never fails a translation.

use crate::error::TranslateError;
use crate::factories::AnonymousMethodFactory;
use crate::helpers::{
    AssignmentExpression, BinaryExpression, InvocationExpression, MemberAccessExpression,
    ObjectCreationExpression, ParameterInfo, UnaryExpression, known_alias,
};
use crate::ir::{
    AccessMethod, ArgumentUnit, ArrayCreationUnit, AssignmentUnit, BinaryUnit, ElementAccessUnit,
    IdentifierUnit, InvocationUnit, LambdaUnit, LiteralUnit, MemberAccessUnit, ObjectCreationUnit,
    OperatorToken, ParenthesizedUnit, UnaryPosition, UnaryUnit, Unit, VerbatimUnit,
};
use crate::semantic::SemanticModel;
use crate::statement::build_statements;
use crate::syntax::{
    Argument, ElementAccessExpr, Expr, FunctionBody, LambdaExpr, MemberAccessExpr, UnaryKind,
};
use crate::type_map::map_type;

/// Builds the IR for one expression.
pub struct ExpressionBuilder<'a> {
    node: &'a Expr,
    semantic: Option<&'a dyn SemanticModel>,
}

impl<'a> ExpressionBuilder<'a> {
    pub fn new(node: &'a Expr, semantic: Option<&'a dyn SemanticModel>) -> Self {
        Self { node, semantic }
    }

    pub fn build(&self) -> Result<Unit, TranslateError> {
        match self.node {
            Expr::Binary(node) if OperatorToken::binary(node.operator).is_ok() => {
                let helper = BinaryExpression::new(node)?;
                Ok(BinaryUnit::create(self.nested(helper.left)?, helper.operator, self.nested(helper.right)?).into())
            }
            Expr::PrefixUnary(node) if !is_sign_or_complement(node.operator) => {
                self.build_unary(UnaryExpression::new(node, UnaryPosition::Prefix)?)
            }
            Expr::PostfixUnary(node) => self.build_unary(UnaryExpression::new(node, UnaryPosition::Postfix)?),
            Expr::Literal(node) => Ok(LiteralUnit::create(node.value.clone()).into()),
            Expr::Identifier(node) => Ok(IdentifierUnit::create(known_alias(&node.name))?.into()),
            Expr::GenericName(node) => {
                let arguments = node
                    .type_arguments
                    .iter()
                    .map(map_type)
                    .collect::<Result<Vec<_>, _>>()?;
                let name = format!("{}<{}>", known_alias(&node.name), arguments.join(", "));
                Ok(IdentifierUnit::create(name)?.into())
            }
            Expr::Invocation(node) => {
                let helper = InvocationExpression::new(node);
                let mut unit = InvocationUnit::create(self.nested(helper.callee)?);
                for argument in helper.arguments {
                    unit.add_argument(self.nested(argument)?);
                }
                Ok(unit.into())
            }
            Expr::ObjectCreation(node) if node.initializer.is_none() => {
                let helper = ObjectCreationExpression::new(node)?;
                let mut unit = ObjectCreationUnit::create(IdentifierUnit::create(helper.type_name)?.into());
                for argument in helper.arguments {
                    unit.add_argument(self.nested(argument)?);
                }
                Ok(unit.into())
            }
            Expr::ArrayCreation(node) => {
                let elements = node
                    .initializer
                    .iter()
                    .map(|element| self.nested(element))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ArrayCreationUnit::create(elements).into())
            }
            Expr::Parenthesized(node) => Ok(ParenthesizedUnit::create(self.nested(&node.inner)?).into()),
            Expr::Assignment(node) => {
                let helper = AssignmentExpression::new(node);
                Ok(AssignmentUnit::create(self.nested(helper.left)?, helper.operator, self.nested(helper.right)?).into())
            }
            Expr::MemberAccess(node) => self.build_member_access(node),
            Expr::ElementAccess(node) => self.build_element_access(node),
            Expr::AnonymousMethod(_) => Ok(AnonymousMethodFactory::new(self.node, self.semantic).create()?.into()),
            Expr::Lambda(node) => self.build_lambda(node),
            other => {
                tracing::debug!(kind = other.kind_name(), "no expression translation, emitting source text");
                Ok(VerbatimUnit::create(other.to_string()).into())
            }
        }
    }

    fn nested(&self, node: &Expr) -> Result<Unit, TranslateError> {
        ExpressionBuilder::new(node, self.semantic).build()
    }

    fn build_unary(&self, helper: UnaryExpression<'_>) -> Result<Unit, TranslateError> {
        Ok(UnaryUnit::create(self.nested(helper.operand)?, helper.operator, helper.position).into())
    }

    fn build_member_access(&self, node: &MemberAccessExpr) -> Result<Unit, TranslateError> {
        let helper = MemberAccessExpression::new(node);
        if helper.is_wrapper {
            return self.nested(helper.receiver);
        }
        let member: Unit = IdentifierUnit::create(helper.member_name)?.into();
        let unit = match helper.receiver {
            Expr::This => MemberAccessUnit::create(member, AccessMethod::This),
            Expr::Base => MemberAccessUnit::create(member, AccessMethod::Base),
            receiver => MemberAccessUnit::qualified(self.nested(receiver)?, member),
        };
        Ok(unit.into())
    }

    fn build_element_access(&self, node: &ElementAccessExpr) -> Result<Unit, TranslateError> {
        let arguments = self.arguments(&node.arguments)?;
        let unit = match node.receiver.as_ref() {
            Expr::This => ElementAccessUnit::create(arguments, AccessMethod::This),
            Expr::Base => ElementAccessUnit::create(arguments, AccessMethod::Base),
            receiver => ElementAccessUnit::qualified(self.nested(receiver)?, arguments),
        };
        Ok(unit.into())
    }

    fn build_lambda(&self, node: &LambdaExpr) -> Result<Unit, TranslateError> {
        let mut unit = LambdaUnit::create(None);
        for parameter in ParameterInfo::all(&node.parameters)? {
            unit.add_argument(ArgumentUnit::create(parameter.name, parameter.ty));
        }
        match &node.body {
            FunctionBody::Block(block) => {
                for statement in build_statements(&block.statements, self.semantic)? {
                    unit.add_statement(statement);
                }
            }
            FunctionBody::Expression(expression) => unit.set_expression_body(self.nested(expression)?),
        }
        Ok(unit.into())
    }

    fn arguments(&self, arguments: &[Argument]) -> Result<Vec<Unit>, TranslateError> {
        arguments.iter().map(|a| self.nested(&a.expression)).collect()
    }
}

/// `+x`, `-x` and `~x` have no unary unit and keep their source text.
fn is_sign_or_complement(kind: UnaryKind) -> bool {
    matches!(kind, UnaryKind::Plus | UnaryKind::Minus | UnaryKind::BitwiseNot)
}

/// Shorthand for [`ExpressionBuilder::build`].
pub fn build_expression(node: &Expr, semantic: Option<&dyn SemanticModel>) -> Result<Unit, TranslateError> {
    ExpressionBuilder::new(node, semantic).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::TranslationUnit;
    use crate::syntax::{AssignmentKind, BinaryKind, LiteralValue, NumericLiteral, TypeSyntax};

    fn translate(expr: &Expr) -> String {
        build_expression(expr, None).unwrap().translate()
    }

    #[test]
    fn structural_binary_operators() {
        let kinds = [
            BinaryKind::Add,
            BinaryKind::Subtract,
            BinaryKind::Multiply,
            BinaryKind::Divide,
            BinaryKind::Equals,
            BinaryKind::NotEquals,
            BinaryKind::LessThan,
            BinaryKind::LessThanOrEqual,
            BinaryKind::GreaterThan,
            BinaryKind::GreaterThanOrEqual,
            BinaryKind::LogicalAnd,
            BinaryKind::LogicalOr,
        ];
        for kind in kinds {
            let expr = Expr::binary(Expr::identifier("left"), kind, Expr::identifier("right"));
            let unit = build_expression(&expr, None).unwrap();
            assert!(matches!(unit, Unit::Binary(_)), "{kind:?}");
            assert_eq!(unit.translate(), format!("left {} right", kind.symbol()));
        }
    }

    #[test]
    fn other_binary_operators_keep_source_text() {
        let expr = Expr::binary(Expr::identifier("a"), BinaryKind::Modulo, Expr::int(2));
        let unit = build_expression(&expr, None).unwrap();
        assert!(matches!(unit, Unit::Verbatim(_)));
        assert_eq!(unit.translate(), "a % 2");
    }

    #[test]
    fn unary_operators() {
        assert_eq!(translate(&Expr::prefix(UnaryKind::LogicalNot, Expr::identifier("ok"))), "!ok");
        assert_eq!(translate(&Expr::prefix(UnaryKind::PreDecrement, Expr::identifier("i"))), "--i");
        assert_eq!(translate(&Expr::postfix(Expr::identifier("i"), UnaryKind::PostIncrement)), "i++");
        assert_eq!(translate(&Expr::prefix(UnaryKind::Minus, Expr::int(1))), "-1");
        assert!(build_expression(&Expr::postfix(Expr::identifier("i"), UnaryKind::LogicalNot), None).is_err());
    }

    #[test]
    fn literals() {
        let cases = [
            (LiteralValue::Numeric(NumericLiteral::UInt64(18_446_744_073_709_551_615)), "18446744073709551615"),
            (LiteralValue::Numeric(NumericLiteral::Decimal("1.50".into())), "1.50"),
            (LiteralValue::String("hi".into()), "\"hi\""),
            (LiteralValue::Character('c'), "'c'"),
            (LiteralValue::Boolean(false), "false"),
            (LiteralValue::Null, "null"),
        ];
        for (value, expected) in cases {
            assert_eq!(translate(&Expr::literal(value)), expected);
        }
    }

    #[test]
    fn identifiers_use_known_aliases() {
        assert_eq!(translate(&Expr::identifier("Knockout")), "ko");
        let generic = Expr::generic_name("Observable", vec![TypeSyntax::predefined("int")]);
        assert_eq!(translate(&generic), "observable<number>");
    }

    #[test]
    fn member_access_receivers() {
        assert_eq!(translate(&Expr::member(Expr::This, "Count")), "this.Count");
        assert_eq!(translate(&Expr::member(Expr::Base, "Save")), "super.Save");
        let chained = Expr::member(Expr::call(Expr::identifier("GetCommand"), vec![]), "Run");
        assert_eq!(translate(&chained), "GetCommand().Run");
        let indexed = Expr::member(Expr::element(Expr::identifier("rows"), vec![Expr::int(0)]), "Id");
        assert_eq!(translate(&indexed), "rows[0].Id");
        let aliased = Expr::call(Expr::member(Expr::identifier("Knockout"), "ObservableArray"), vec![]);
        assert_eq!(translate(&aliased), "ko.observableArray()");
    }

    #[test]
    fn wrapper_members_collapse_to_receiver() {
        let expr = Expr::call(Expr::member(Expr::member(Expr::This, "Name"), "GetValue"), vec![]);
        assert_eq!(translate(&expr), "this.Name()");
    }

    #[test]
    fn object_creation_and_assignment() {
        let expr = Expr::new_object(
            TypeSyntax::generic("List", vec![TypeSyntax::predefined("string")]),
            vec![Expr::identifier("a"), Expr::identifier("b")],
        );
        assert_eq!(translate(&expr), "new List<string>(a, b)");
        let expr = Expr::assign(Expr::member(Expr::This, "total"), AssignmentKind::Add, Expr::int(1));
        assert_eq!(translate(&expr), "this.total += 1");
    }

    #[test]
    fn unmodelled_expressions_are_verbatim() {
        let expr = Expr::other("interpolated_string_expression", "$\"{a}\"");
        assert_eq!(translate(&expr), "$\"{a}\"");
    }
}
