//! Statement walkers.
//!
//! Each walker is built from one statement node and resolves the fixed
//! parts of that statement (condition, scrutinee, loop variable) in `new`.
//! [`Walker::walk`] then translates the body: a block body goes through
//! [`BlockWalker`], any other body through [`StatementBuilder`]. Bodies are
//! attached to the statement unit, which puts them one level deeper.

use crate::error::TranslateError;
use crate::expression::build_expression;
use crate::helpers::{ForEachStatement, ForStatement, body_statements};
use crate::ir::lexemes;
use crate::ir::{
    BlockUnit, CatchUnit, ConditionalStatementUnit, DoWhileStatementUnit, ElseBranch,
    ExpressionStatementUnit, ForEachStatementUnit, ForHeader, ForStatementUnit, KeywordStatementUnit,
    SwitchSectionUnit, SwitchStatementUnit, TryStatementUnit, Unit, VariableDeclarationUnit,
    WhileStatementUnit,
};
use crate::semantic::SemanticModel;
use crate::syntax::{
    Block, DoStmt, Expr, ForEachStmt, ForStmt, IfStmt, Stmt, SwitchLabel, SwitchSection, SwitchStmt, ThrowStmt,
    TryStmt, TypeSyntax, VariableDeclaration, WhileStmt,
};
use crate::type_map::map_type;

/// A walker that produces one translation unit.
pub trait Walker {
    fn walk(self) -> Result<Unit, TranslateError>;
}

type Semantic<'a> = Option<&'a dyn SemanticModel>;

/// Translates a statement list in order. Empty statements produce nothing.
pub struct BlockWalker<'a> {
    statements: &'a [Stmt],
    semantic: Semantic<'a>,
}

impl<'a> BlockWalker<'a> {
    pub fn new(statements: &'a [Stmt], semantic: Semantic<'a>) -> Self {
        Self { statements, semantic }
    }

    pub fn walk_statements(self) -> Result<Vec<Unit>, TranslateError> {
        let mut units = Vec::with_capacity(self.statements.len());
        for statement in self.statements {
            if let Some(unit) = StatementBuilder::new(statement, self.semantic).build()? {
                units.push(unit);
            }
        }
        Ok(units)
    }
}

impl Walker for BlockWalker<'_> {
    /// Wraps the statements in a `{ ... }` block unit.
    fn walk(self) -> Result<Unit, TranslateError> {
        let mut block = BlockUnit::create();
        for unit in self.walk_statements()? {
            block.add_statement(unit);
        }
        Ok(block.into())
    }
}

/// Translates a statement list; shorthand for [`BlockWalker`].
pub fn build_statements(statements: &[Stmt], semantic: Semantic<'_>) -> Result<Vec<Unit>, TranslateError> {
    BlockWalker::new(statements, semantic).walk_statements()
}

/// Translates the body of a compound statement.
fn walk_body(body: &Stmt, semantic: Semantic<'_>) -> Result<Vec<Unit>, TranslateError> {
    build_statements(body_statements(body), semantic)
}

/// Dispatches a single statement to its walker.
pub struct StatementBuilder<'a> {
    node: &'a Stmt,
    semantic: Semantic<'a>,
}

impl<'a> StatementBuilder<'a> {
    pub fn new(node: &'a Stmt, semantic: Semantic<'a>) -> Self {
        Self { node, semantic }
    }

    /// `Ok(None)` for statements with no output, such as a lone `;`.
    pub fn build(self) -> Result<Option<Unit>, TranslateError> {
        let semantic = self.semantic;
        let unit = match self.node {
            Stmt::Empty => return Ok(None),
            Stmt::Block(block) => BlockWalker::new(&block.statements, semantic).walk()?,
            Stmt::Expression(node) => ExpressionStatementUnit::create(build_expression(&node.expression, semantic)?).into(),
            Stmt::LocalDeclaration(node) => local_declaration(node, semantic)?.into(),
            Stmt::Return(node) => keyword(lexemes::RETURN_KEYWORD, node.expression.as_ref(), semantic)?,
            Stmt::Throw(node) => keyword(lexemes::THROW_KEYWORD, node.expression.as_ref(), semantic)?,
            Stmt::Break => KeywordStatementUnit::create(lexemes::BREAK_KEYWORD, None).into(),
            Stmt::Continue => KeywordStatementUnit::create(lexemes::CONTINUE_KEYWORD, None).into(),
            Stmt::If(node) => IfWalker::new(node, semantic)?.walk()?,
            Stmt::For(node) => ForWalker::new(node, semantic)?.walk()?,
            Stmt::ForEach(node) => ForEachWalker::new(node, semantic)?.walk()?,
            Stmt::While(node) => WhileWalker::new(node, semantic)?.walk()?,
            Stmt::Do(node) => DoWalker::new(node, semantic)?.walk()?,
            Stmt::Switch(node) => SwitchWalker::new(node, semantic)?.walk()?,
            Stmt::Try(node) => TryWalker::new(node, semantic).walk()?,
            Stmt::Other(node) => {
                return Err(TranslateError::UnsupportedStatement {
                    kind: node.kind.clone(),
                });
            }
        };
        Ok(Some(unit))
    }
}

fn keyword(keyword: &'static str, expression: Option<&Expr>, semantic: Semantic<'_>) -> Result<Unit, TranslateError> {
    let expression = expression.map(|e| build_expression(e, semantic)).transpose()?;
    Ok(KeywordStatementUnit::create(keyword, expression).into())
}

/// `let name[: type][ = initializer]`; `var` declarations carry no type.
fn local_declaration(
    node: &VariableDeclaration,
    semantic: Semantic<'_>,
) -> Result<VariableDeclarationUnit, TranslateError> {
    let ty = match &node.ty {
        TypeSyntax::Implicit => None,
        ty => Some(map_type(ty)?),
    };
    let mut unit = VariableDeclarationUnit::create(ty);
    for declarator in &node.declarators {
        let initializer = declarator
            .initializer
            .as_ref()
            .map(|e| build_expression(e, semantic))
            .transpose()?;
        unit.add_declarator(&declarator.name, initializer);
    }
    Ok(unit)
}

pub struct IfWalker<'a> {
    node: &'a IfStmt,
    condition: Unit,
    semantic: Semantic<'a>,
}

impl<'a> IfWalker<'a> {
    pub fn new(node: &'a IfStmt, semantic: Semantic<'a>) -> Result<Self, TranslateError> {
        Ok(Self {
            node,
            condition: build_expression(&node.condition, semantic)?,
            semantic,
        })
    }

    fn walk_conditional(self) -> Result<ConditionalStatementUnit, TranslateError> {
        let mut unit = ConditionalStatementUnit::create(self.condition);
        for statement in walk_body(&self.node.then, self.semantic)? {
            unit.add_statement(statement);
        }
        match self.node.otherwise.as_deref() {
            Some(Stmt::If(nested)) => {
                let nested = IfWalker::new(nested, self.semantic)?.walk_conditional()?;
                unit.set_else(ElseBranch::If(Box::new(nested)));
            }
            Some(otherwise) => unit.set_else(ElseBranch::Else(walk_body(otherwise, self.semantic)?)),
            None => {}
        }
        Ok(unit)
    }
}

impl Walker for IfWalker<'_> {
    fn walk(self) -> Result<Unit, TranslateError> {
        Ok(self.walk_conditional()?.into())
    }
}

pub struct ForWalker<'a> {
    body: &'a Stmt,
    header: ForHeader,
    semantic: Semantic<'a>,
}

impl<'a> ForWalker<'a> {
    pub fn new(node: &'a ForStmt, semantic: Semantic<'a>) -> Result<Self, TranslateError> {
        let helper = ForStatement::new(node);
        let condition = helper.condition.map(|c| build_expression(c, semantic)).transpose()?;
        let header = match condition {
            Some(condition) if helper.is_collection_walk() => ForHeader::CollectionWalk(Box::new(condition)),
            condition => ForHeader::Classic {
                declaration: helper.declaration.map(|d| local_declaration(d, semantic)).transpose()?,
                initializers: expressions(helper.initializers, semantic)?,
                condition: condition.map(Box::new),
                incrementors: expressions(helper.incrementors, semantic)?,
            },
        };
        Ok(Self {
            body: helper.body,
            header,
            semantic,
        })
    }
}

impl Walker for ForWalker<'_> {
    fn walk(self) -> Result<Unit, TranslateError> {
        let mut unit = ForStatementUnit::create(self.header);
        for statement in walk_body(self.body, self.semantic)? {
            unit.add_statement(statement);
        }
        Ok(unit.into())
    }
}

fn expressions(nodes: &[Expr], semantic: Semantic<'_>) -> Result<Vec<Unit>, TranslateError> {
    nodes.iter().map(|e| build_expression(e, semantic)).collect()
}

/// `foreach` over a collection, rendered as a `forEach` call with a
/// one-parameter closure.
pub struct ForEachWalker<'a> {
    helper: ForEachStatement<'a>,
    semantic: Semantic<'a>,
}

impl<'a> ForEachWalker<'a> {
    pub fn new(node: &'a ForEachStmt, semantic: Semantic<'a>) -> Result<Self, TranslateError> {
        Ok(Self {
            helper: ForEachStatement::new(node)?,
            semantic,
        })
    }
}

impl Walker for ForEachWalker<'_> {
    fn walk(self) -> Result<Unit, TranslateError> {
        let helper = self.helper;
        let mut unit = ForEachStatementUnit::create(helper.element_type, helper.variable, helper.collection);
        for statement in walk_body(helper.body, self.semantic)? {
            unit.add_statement(statement);
        }
        Ok(unit.into())
    }
}

pub struct WhileWalker<'a> {
    body: &'a Stmt,
    condition: Unit,
    semantic: Semantic<'a>,
}

impl<'a> WhileWalker<'a> {
    pub fn new(node: &'a WhileStmt, semantic: Semantic<'a>) -> Result<Self, TranslateError> {
        Ok(Self {
            body: &node.body,
            condition: build_expression(&node.condition, semantic)?,
            semantic,
        })
    }
}

impl Walker for WhileWalker<'_> {
    fn walk(self) -> Result<Unit, TranslateError> {
        let mut unit = WhileStatementUnit::create(self.condition);
        for statement in walk_body(self.body, self.semantic)? {
            unit.add_statement(statement);
        }
        Ok(unit.into())
    }
}

pub struct DoWalker<'a> {
    body: &'a Stmt,
    condition: Unit,
    semantic: Semantic<'a>,
}

impl<'a> DoWalker<'a> {
    pub fn new(node: &'a DoStmt, semantic: Semantic<'a>) -> Result<Self, TranslateError> {
        Ok(Self {
            body: &node.body,
            condition: build_expression(&node.condition, semantic)?,
            semantic,
        })
    }
}

impl Walker for DoWalker<'_> {
    fn walk(self) -> Result<Unit, TranslateError> {
        let mut unit = DoWhileStatementUnit::create(self.condition);
        for statement in walk_body(self.body, self.semantic)? {
            unit.add_statement(statement);
        }
        Ok(unit.into())
    }
}

pub struct SwitchWalker<'a> {
    node: &'a SwitchStmt,
    expression: Unit,
    semantic: Semantic<'a>,
}

impl<'a> SwitchWalker<'a> {
    pub fn new(node: &'a SwitchStmt, semantic: Semantic<'a>) -> Result<Self, TranslateError> {
        Ok(Self {
            node,
            expression: build_expression(&node.expression, semantic)?,
            semantic,
        })
    }
}

impl Walker for SwitchWalker<'_> {
    fn walk(self) -> Result<Unit, TranslateError> {
        let mut unit = SwitchStatementUnit::create(self.expression);
        for section in &self.node.sections {
            let mut section_unit = SwitchSectionUnit::create();
            for label in &section.labels {
                match label {
                    SwitchLabel::Case(value) => section_unit.add_case(build_expression(value, self.semantic)?),
                    SwitchLabel::Default => section_unit.add_default(),
                }
            }
            for statement in build_statements(&section.statements, self.semantic)? {
                section_unit.add_statement(statement);
            }
            unit.add_section(section_unit);
        }
        Ok(unit.into())
    }
}

pub struct TryWalker<'a> {
    node: &'a TryStmt,
    semantic: Semantic<'a>,
}

impl<'a> TryWalker<'a> {
    pub fn new(node: &'a TryStmt, semantic: Semantic<'a>) -> Self {
        Self { node, semantic }
    }
}

impl Walker for TryWalker<'_> {
    fn walk(self) -> Result<Unit, TranslateError> {
        let mut unit = TryStatementUnit::create();
        for statement in build_statements(&self.node.block.statements, self.semantic)? {
            unit.add_statement(statement);
        }
        for catch in &self.node.catches {
            let statements = &catch.block.statements;
            let catch_unit = if statements.iter().any(rethrows) {
                // `throw;` has no TypeScript form; rethrow the bound exception.
                let variable = catch.identifier.as_deref().unwrap_or(RETHROW_VARIABLE);
                let bound: Vec<Stmt> = statements.iter().map(|s| bind_rethrow(s, variable)).collect();
                CatchUnit {
                    variable: Some(variable.to_string()),
                    body: build_statements(&bound, self.semantic)?,
                }
            } else {
                CatchUnit {
                    variable: catch.identifier.clone(),
                    body: build_statements(statements, self.semantic)?,
                }
            };
            unit.add_catch(catch_unit);
        }
        if let Some(finally) = &self.node.finally {
            unit.set_finally(build_statements(&finally.statements, self.semantic)?);
        }
        Ok(unit.into())
    }
}

/// Variable bound by a catch clause that names none but rethrows.
const RETHROW_VARIABLE: &str = "error";

/// Whether `statement` contains a bare `throw;` that rethrows the exception
/// of the enclosing catch. Catch clauses of nested `try` statements own
/// their rethrows.
fn rethrows(statement: &Stmt) -> bool {
    match statement {
        Stmt::Throw(node) => node.expression.is_none(),
        Stmt::Block(block) => block.statements.iter().any(rethrows),
        Stmt::If(node) => rethrows(&node.then) || node.otherwise.as_deref().is_some_and(rethrows),
        Stmt::For(ForStmt { body, .. })
        | Stmt::ForEach(ForEachStmt { body, .. })
        | Stmt::While(WhileStmt { body, .. })
        | Stmt::Do(DoStmt { body, .. }) => rethrows(body),
        Stmt::Switch(node) => node.sections.iter().flat_map(|s| &s.statements).any(rethrows),
        Stmt::Try(node) => {
            node.block.statements.iter().any(rethrows)
                || node.finally.iter().flat_map(|b| &b.statements).any(rethrows)
        }
        _ => false,
    }
}

/// Copy of `statement` where every bare `throw;` rethrows `variable`.
fn bind_rethrow(statement: &Stmt, variable: &str) -> Stmt {
    let bind_all = |statements: &[Stmt]| -> Vec<Stmt> { statements.iter().map(|s| bind_rethrow(s, variable)).collect() };
    let bind_box = |body: &Stmt| Box::new(bind_rethrow(body, variable));
    match statement {
        Stmt::Throw(ThrowStmt { expression: None }) => Stmt::Throw(ThrowStmt {
            expression: Some(Expr::identifier(variable)),
        }),
        Stmt::Block(block) => Stmt::block(bind_all(&block.statements)),
        Stmt::If(node) => Stmt::If(IfStmt {
            condition: node.condition.clone(),
            then: bind_box(&node.then),
            otherwise: node.otherwise.as_deref().map(bind_box),
        }),
        Stmt::For(node) => Stmt::For(ForStmt {
            body: bind_box(&node.body),
            ..node.clone()
        }),
        Stmt::ForEach(node) => Stmt::ForEach(ForEachStmt {
            body: bind_box(&node.body),
            ..node.clone()
        }),
        Stmt::While(node) => Stmt::While(WhileStmt {
            body: bind_box(&node.body),
            ..node.clone()
        }),
        Stmt::Do(node) => Stmt::Do(DoStmt {
            body: bind_box(&node.body),
            ..node.clone()
        }),
        Stmt::Switch(node) => Stmt::Switch(SwitchStmt {
            expression: node.expression.clone(),
            sections: node
                .sections
                .iter()
                .map(|section| SwitchSection {
                    labels: section.labels.clone(),
                    statements: bind_all(&section.statements),
                })
                .collect(),
        }),
        Stmt::Try(node) => Stmt::Try(TryStmt {
            block: Block::new(bind_all(&node.block.statements)),
            catches: node.catches.clone(),
            finally: node.finally.as_ref().map(|b| Block::new(bind_all(&b.statements))),
        }),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::TranslationUnit;
    use crate::syntax::{
        BinaryKind, Block, CatchClause, ExpressionStmt, OtherStmt, SwitchSection, UnaryKind, VariableDeclarator,
    };

    fn translate(statement: &Stmt) -> String {
        StatementBuilder::new(statement, None).build().unwrap().unwrap().translate()
    }

    fn call(name: &str) -> Stmt {
        Stmt::expression(Expr::call(Expr::identifier(name), Vec::new()))
    }

    #[test]
    fn foreach_renders_closure_over_collection() {
        let statement = Stmt::ForEach(ForEachStmt {
            ty: TypeSyntax::predefined("string"),
            identifier: "x".into(),
            collection: Expr::identifier("names"),
            body: Box::new(Stmt::block(vec![call("Log")])),
        });
        assert_eq!(translate(&statement), "names.forEach((x: string) => {\n    Log();\n});");
    }

    #[test]
    fn foreach_over_var_has_no_annotation() {
        let statement = Stmt::ForEach(ForEachStmt {
            ty: TypeSyntax::Implicit,
            identifier: "item".into(),
            collection: Expr::member(Expr::This, "Items"),
            body: Box::new(call("Touch")),
        });
        assert_eq!(translate(&statement), "this.Items.forEach((item) => {\n    Touch();\n});");
    }

    #[test]
    fn condition_only_for_walks_the_condition() {
        let statement = Stmt::For(ForStmt {
            declaration: None,
            initializers: Vec::new(),
            condition: Some(Expr::identifier("items")),
            incrementors: Vec::new(),
            body: Box::new(Stmt::block(vec![Stmt::Break])),
        });
        assert_eq!(translate(&statement), "for (let variable of items) {\n    break;\n}");
    }

    #[test]
    fn classic_for_keeps_all_three_parts() {
        let statement = Stmt::For(ForStmt {
            declaration: Some(VariableDeclaration::single(TypeSyntax::predefined("int"), "i", Some(Expr::int(0)))),
            initializers: Vec::new(),
            condition: Some(Expr::binary(Expr::identifier("i"), BinaryKind::LessThan, Expr::identifier("n"))),
            incrementors: vec![Expr::postfix(Expr::identifier("i"), UnaryKind::PostIncrement)],
            body: Box::new(Stmt::block(vec![Stmt::Continue])),
        });
        assert_eq!(
            translate(&statement),
            "for (let i: number = 0; i < n; i++) {\n    continue;\n}"
        );
    }

    #[test]
    fn if_else_if_else_chain() {
        let statement = Stmt::If(IfStmt {
            condition: Expr::identifier("a"),
            then: Box::new(Stmt::block(vec![Stmt::ret(Some(Expr::int(1)))])),
            otherwise: Some(Box::new(Stmt::If(IfStmt {
                condition: Expr::identifier("b"),
                then: Box::new(Stmt::ret(Some(Expr::int(2)))),
                otherwise: Some(Box::new(Stmt::block(vec![Stmt::ret(None)]))),
            }))),
        });
        assert_eq!(
            translate(&statement),
            "if (a) {\n    return 1;\n} else if (b) {\n    return 2;\n} else {\n    return;\n}"
        );
    }

    #[test]
    fn nesting_is_one_level_per_body() {
        let mut statement = Stmt::block(vec![call("Leaf")]);
        for _ in 0..3 {
            statement = Stmt::While(WhileStmt {
                condition: Expr::boolean(true),
                body: Box::new(statement),
            });
        }
        let unit = StatementBuilder::new(&statement, None).build().unwrap().unwrap();

        fn check(unit: &Unit, level: usize) {
            assert_eq!(unit.nesting_level(), level);
            for child in unit.inner_units() {
                let expected = if child.is_expression() { level } else { level + 1 };
                check(child, expected);
            }
        }
        check(&unit, 0);
        assert!(unit.translate().contains("\n            Leaf();\n"));
    }

    #[test]
    fn local_declarations() {
        let typed = Stmt::local(TypeSyntax::predefined("double"), "ratio", Some(Expr::int(1)));
        assert_eq!(translate(&typed), "let ratio: number = 1;");
        let implicit = Stmt::LocalDeclaration(VariableDeclaration {
            ty: TypeSyntax::Implicit,
            declarators: vec![
                VariableDeclarator {
                    name: "a".into(),
                    initializer: Some(Expr::string("x")),
                },
                VariableDeclarator {
                    name: "b".into(),
                    initializer: None,
                },
            ],
        });
        assert_eq!(translate(&implicit), "let a = \"x\", b;");
    }

    #[test]
    fn switch_with_sections() {
        let statement = Stmt::Switch(SwitchStmt {
            expression: Expr::identifier("mode"),
            sections: vec![
                SwitchSection {
                    labels: vec![SwitchLabel::Case(Expr::int(1)), SwitchLabel::Case(Expr::int(2))],
                    statements: vec![call("Low"), Stmt::Break],
                },
                SwitchSection {
                    labels: vec![SwitchLabel::Default],
                    statements: vec![Stmt::Break],
                },
            ],
        });
        assert_eq!(
            translate(&statement),
            "switch (mode) {\n    case 1:\n    case 2:\n        Low();\n        break;\n    default:\n        break;\n}"
        );
    }

    #[test]
    fn try_catch_finally() {
        let statement = Stmt::Try(TryStmt {
            block: Block::new(vec![call("Open")]),
            catches: vec![CatchClause {
                ty: Some(TypeSyntax::identifier("IOException")),
                identifier: Some("e".into()),
                block: Block::new(vec![Stmt::Throw(crate::syntax::ThrowStmt { expression: None })]),
            }],
            finally: Some(Block::new(vec![call("Close")])),
        });
        assert_eq!(
            translate(&statement),
            "try {\n    Open();\n} catch (e) {\n    throw e;\n} finally {\n    Close();\n}"
        );
    }

    #[test]
    fn rethrow_binds_the_innermost_catch() {
        let rethrow = || Stmt::Throw(crate::syntax::ThrowStmt { expression: None });
        let inner = Stmt::Try(TryStmt {
            block: Block::new(vec![call("Log")]),
            catches: vec![CatchClause {
                ty: None,
                identifier: Some("inner".into()),
                block: Block::new(vec![rethrow()]),
            }],
            finally: None,
        });
        let statement = Stmt::Try(TryStmt {
            block: Block::new(vec![call("Open")]),
            catches: vec![CatchClause {
                ty: None,
                identifier: None,
                block: Block::new(vec![
                    inner,
                    Stmt::If(IfStmt {
                        condition: Expr::identifier("fatal"),
                        then: Box::new(rethrow()),
                        otherwise: None,
                    }),
                ]),
            }],
            finally: None,
        });
        assert_eq!(
            translate(&statement),
            "try {\n    Open();\n} catch (error) {\n    try {\n        Log();\n    } catch (inner) {\n        throw inner;\n    }\n    if (fatal) {\n        throw error;\n    }\n}"
        );
    }

    #[test]
    fn do_while_and_empty_statements() {
        let statement = Stmt::Do(DoStmt {
            body: Box::new(Stmt::block(vec![Stmt::Empty, call("Step")])),
            condition: Expr::identifier("more"),
        });
        assert_eq!(translate(&statement), "do {\n    Step();\n} while (more);");
        assert!(StatementBuilder::new(&Stmt::Empty, None).build().unwrap().is_none());
    }

    #[test]
    fn unmodelled_statements_are_errors() {
        let statement = Stmt::Other(OtherStmt {
            kind: "lock_statement".into(),
            text: "lock (x) {}".into(),
        });
        let err = StatementBuilder::new(&statement, None).build().unwrap_err();
        assert_eq!(
            err,
            TranslateError::UnsupportedStatement {
                kind: "lock_statement".into()
            }
        );
    }

    #[test]
    fn expression_statement_uses_dispatcher() {
        let statement = Stmt::Expression(ExpressionStmt {
            expression: Expr::member(Expr::This, "Count"),
        });
        assert_eq!(translate(&statement), "this.Count;");
    }
}
