//! Factories for declarations that translate to a single unit.

use crate::dialect::Dialect;
use crate::error::TranslateError;
use crate::expression::build_expression;
use crate::helpers::{FieldDeclaration, ParameterInfo};
use crate::ir::{ArgumentUnit, FieldUnit, LambdaUnit};
use crate::semantic::SemanticModel;
use crate::statement::build_statements;
use crate::syntax::{Expr, Member};

/// Builds a [`FieldUnit`] from a field member.
pub struct FieldFactory<'a> {
    node: &'a Member,
    semantic: Option<&'a dyn SemanticModel>,
    dialect: &'a dyn Dialect,
}

impl<'a> FieldFactory<'a> {
    pub fn new(node: &'a Member, semantic: Option<&'a dyn SemanticModel>, dialect: &'a dyn Dialect) -> Self {
        Self {
            node,
            semantic,
            dialect,
        }
    }

    /// `Ok(None)` when the dialect skips the field.
    pub fn create(&self) -> Result<Option<FieldUnit>, TranslateError> {
        let Member::Field(node) = self.node else {
            return Err(TranslateError::unexpected("field declaration", self.node.kind_name()));
        };
        if self.dialect.skip_field(node) {
            return Ok(None);
        }
        let helper = FieldDeclaration::new(node)?;
        if !helper.dropped.is_empty() {
            tracing::warn!(
                field = helper.name,
                dropped = ?helper.dropped,
                "only the first declarator of a field is translated"
            );
        }
        let mut unit = FieldUnit::create(helper.visibility, helper.name, helper.ty);
        unit.set_readonly(helper.is_readonly);
        if let Some(initializer) = helper.initializer {
            unit.set_initializer(build_expression(initializer, self.semantic)?);
        }
        Ok(Some(unit))
    }
}

/// Builds a lambda from a `delegate (...) { ... }` expression.
pub struct AnonymousMethodFactory<'a> {
    node: &'a Expr,
    semantic: Option<&'a dyn SemanticModel>,
}

impl<'a> AnonymousMethodFactory<'a> {
    pub fn new(node: &'a Expr, semantic: Option<&'a dyn SemanticModel>) -> Self {
        Self { node, semantic }
    }

    pub fn create(&self) -> Result<LambdaUnit, TranslateError> {
        let Expr::AnonymousMethod(node) = self.node else {
            return Err(TranslateError::unexpected("anonymous method", self.node.kind_name()));
        };
        let mut unit = LambdaUnit::create(None);
        for parameter in ParameterInfo::all(node.parameters.as_deref().unwrap_or_default())? {
            unit.add_argument(ArgumentUnit::create(parameter.name, parameter.ty));
        }
        for statement in build_statements(&node.body.statements, self.semantic)? {
            unit.add_statement(statement);
        }
        Ok(unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{SCRIPT_SHARP, TYPESCRIPT};
    use crate::ir::TranslationUnit;
    use crate::syntax::{AnonymousMethodExpr, Block, FieldDecl, Modifier, Parameter, Stmt, TypeSyntax, VariableDeclaration};

    fn int_field(modifiers: Vec<Modifier>) -> Member {
        Member::Field(FieldDecl {
            attributes: Vec::new(),
            modifiers,
            declaration: VariableDeclaration::single(TypeSyntax::predefined("int"), "x", Some(Expr::int(7))),
        })
    }

    #[test]
    fn field_with_integral_type_and_initializer() {
        let member = int_field(vec![Modifier::Public]);
        let unit = FieldFactory::new(&member, None, &TYPESCRIPT).create().unwrap().unwrap();
        assert_eq!(unit.ty(), "number");
        assert_eq!(unit.translate(), "public x: number = 7;");
    }

    #[test]
    fn dialect_can_skip_field() {
        let member = int_field(vec![Modifier::Private, Modifier::Static]);
        assert!(FieldFactory::new(&member, None, &SCRIPT_SHARP).create().unwrap().is_none());
        let unit = FieldFactory::new(&member, None, &TYPESCRIPT).create().unwrap().unwrap();
        assert_eq!(unit.translate(), "private static x: number = 7;");
    }

    #[test]
    fn wrong_node_kind_is_rejected() {
        let member = Member::Other(crate::syntax::OtherDecl {
            kind: "event_field_declaration".into(),
            text: "event Action Changed;".into(),
        });
        let err = FieldFactory::new(&member, None, &TYPESCRIPT).create().unwrap_err();
        assert!(matches!(err, TranslateError::UnexpectedNode { .. }));

        let err = AnonymousMethodFactory::new(&Expr::This, None).create().unwrap_err();
        assert_eq!(err, TranslateError::unexpected("anonymous method", "this expression"));
    }

    #[test]
    fn anonymous_method_becomes_untyped_lambda() {
        let node = Expr::AnonymousMethod(AnonymousMethodExpr {
            parameters: Some(vec![Parameter::new(Some(TypeSyntax::predefined("int")), "n")]),
            body: Block::new(vec![Stmt::ret(Some(Expr::identifier("n")))]),
        });
        let unit = AnonymousMethodFactory::new(&node, None).create().unwrap();
        assert_eq!(unit.translate(), "(n: number) => {\n    return n;\n}");

        let node = Expr::AnonymousMethod(AnonymousMethodExpr {
            parameters: None,
            body: Block::new(Vec::new()),
        });
        assert_eq!(AnonymousMethodFactory::new(&node, None).create().unwrap().translate(), "() => {\n}");
    }
}
