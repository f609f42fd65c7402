//! Source statements.

use super::expr::Expr;
use super::types::{TypeSyntax, write_separated};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stmt {
    Block(Block),
    Expression(ExpressionStmt),
    LocalDeclaration(VariableDeclaration),
    Return(ReturnStmt),
    If(IfStmt),
    For(ForStmt),
    ForEach(ForEachStmt),
    While(WhileStmt),
    Do(DoStmt),
    Switch(SwitchStmt),
    Try(TryStmt),
    Break,
    Continue,
    Throw(ThrowStmt),
    Empty,
    Other(OtherStmt),
}

/// `{ ... }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

impl Block {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionStmt {
    pub expression: Expr,
}

/// `Type a = 1, b;` Shared by locals, fields and `for` initialisers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    #[serde(rename = "type")]
    pub ty: TypeSyntax,
    pub declarators: Vec<VariableDeclarator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclarator {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<Expr>,
}

impl VariableDeclaration {
    pub fn single(ty: TypeSyntax, name: impl Into<String>, initializer: Option<Expr>) -> Self {
        Self {
            ty,
            declarators: vec![VariableDeclarator {
                name: name.into(),
                initializer,
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStmt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrowStmt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStmt {
    pub condition: Expr,
    pub then: Box<Stmt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otherwise: Option<Box<Stmt>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForStmt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaration: Option<VariableDeclaration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub initializers: Vec<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Expr>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub incrementors: Vec<Expr>,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForEachStmt {
    #[serde(rename = "type")]
    pub ty: TypeSyntax,
    pub identifier: String,
    pub collection: Expr,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoStmt {
    pub body: Box<Stmt>,
    pub condition: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchStmt {
    pub expression: Expr,
    pub sections: Vec<SwitchSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchSection {
    pub labels: Vec<SwitchLabel>,
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchLabel {
    Case(Expr),
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TryStmt {
    pub block: Block,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub catches: Vec<CatchClause>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finally: Option<Block>,
}

/// `catch (Type name) { ... }`; both the type and the name are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeSyntax>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub block: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherStmt {
    #[serde(rename = "node_kind")]
    pub kind: String,
    pub text: String,
}

impl Stmt {
    pub fn expression(expression: Expr) -> Self {
        Stmt::Expression(ExpressionStmt { expression })
    }

    pub fn block(statements: Vec<Stmt>) -> Self {
        Stmt::Block(Block::new(statements))
    }

    pub fn ret(expression: Option<Expr>) -> Self {
        Stmt::Return(ReturnStmt { expression })
    }

    pub fn local(ty: TypeSyntax, name: impl Into<String>, initializer: Option<Expr>) -> Self {
        Stmt::LocalDeclaration(VariableDeclaration::single(ty, name, initializer))
    }

    pub fn kind_name(&self) -> &str {
        match self {
            Stmt::Block(_) => "block",
            Stmt::Expression(_) => "expression statement",
            Stmt::LocalDeclaration(_) => "local declaration statement",
            Stmt::Return(_) => "return statement",
            Stmt::If(_) => "if statement",
            Stmt::For(_) => "for statement",
            Stmt::ForEach(_) => "foreach statement",
            Stmt::While(_) => "while statement",
            Stmt::Do(_) => "do statement",
            Stmt::Switch(_) => "switch statement",
            Stmt::Try(_) => "try statement",
            Stmt::Break => "break statement",
            Stmt::Continue => "continue statement",
            Stmt::Throw(_) => "throw statement",
            Stmt::Empty => "empty statement",
            Stmt::Other(other) => &other.kind,
        }
    }
}

// Single-line source form. Only used for diagnostics and for the text of
// lambdas and anonymous methods that end up in a verbatim fallback.
impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Block(block) => write!(f, "{}", block),
            Stmt::Expression(s) => write!(f, "{};", s.expression),
            Stmt::LocalDeclaration(decl) => write!(f, "{};", decl),
            Stmt::Return(r) => match &r.expression {
                Some(e) => write!(f, "return {};", e),
                None => f.write_str("return;"),
            },
            Stmt::If(s) => {
                write!(f, "if ({}) {}", s.condition, s.then)?;
                if let Some(otherwise) = &s.otherwise {
                    write!(f, " else {}", otherwise)?;
                }
                Ok(())
            }
            Stmt::For(s) => {
                f.write_str("for (")?;
                if let Some(decl) = &s.declaration {
                    write!(f, "{}", decl)?;
                } else {
                    write_separated(f, &s.initializers, ", ")?;
                }
                f.write_str("; ")?;
                if let Some(c) = &s.condition {
                    write!(f, "{}", c)?;
                }
                f.write_str("; ")?;
                write_separated(f, &s.incrementors, ", ")?;
                write!(f, ") {}", s.body)
            }
            Stmt::ForEach(s) => write!(
                f,
                "foreach ({} {} in {}) {}",
                s.ty, s.identifier, s.collection, s.body
            ),
            Stmt::While(s) => write!(f, "while ({}) {}", s.condition, s.body),
            Stmt::Do(s) => write!(f, "do {} while ({});", s.body, s.condition),
            Stmt::Switch(s) => {
                write!(f, "switch ({}) {{", s.expression)?;
                for section in &s.sections {
                    for label in &section.labels {
                        match label {
                            SwitchLabel::Case(e) => write!(f, " case {}:", e)?,
                            SwitchLabel::Default => f.write_str(" default:")?,
                        }
                    }
                    for stmt in &section.statements {
                        write!(f, " {}", stmt)?;
                    }
                }
                f.write_str(" }")
            }
            Stmt::Try(s) => {
                write!(f, "try {}", s.block)?;
                for catch in &s.catches {
                    f.write_str(" catch")?;
                    match (&catch.ty, &catch.identifier) {
                        (Some(ty), Some(name)) => write!(f, " ({} {})", ty, name)?,
                        (Some(ty), None) => write!(f, " ({})", ty)?,
                        _ => {}
                    }
                    write!(f, " {}", catch.block)?;
                }
                if let Some(finally) = &s.finally {
                    write!(f, " finally {}", finally)?;
                }
                Ok(())
            }
            Stmt::Break => f.write_str("break;"),
            Stmt::Continue => f.write_str("continue;"),
            Stmt::Throw(t) => match &t.expression {
                Some(e) => write!(f, "throw {};", e),
                None => f.write_str("throw;"),
            },
            Stmt::Empty => f.write_str(";"),
            Stmt::Other(other) => f.write_str(&other.text),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            return f.write_str("{ }");
        }
        f.write_str("{ ")?;
        write_separated(f, &self.statements, " ")?;
        f.write_str(" }")
    }
}

impl fmt::Display for VariableDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.ty)?;
        for (i, d) in self.declarators.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&d.name)?;
            if let Some(init) = &d.initializer {
                write!(f, " = {}", init)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{BinaryKind, UnaryKind};

    #[test]
    fn for_loop_source_form() {
        let stmt = Stmt::For(ForStmt {
            declaration: Some(VariableDeclaration::single(
                TypeSyntax::predefined("int"),
                "i",
                Some(Expr::int(0)),
            )),
            initializers: Vec::new(),
            condition: Some(Expr::binary(
                Expr::identifier("i"),
                BinaryKind::LessThan,
                Expr::identifier("n"),
            )),
            incrementors: vec![Expr::postfix(Expr::identifier("i"), UnaryKind::PostIncrement)],
            body: Box::new(Stmt::block(vec![Stmt::Break])),
        });
        assert_eq!(stmt.to_string(), "for (int i = 0; i < n; i++) { break; }");
    }
}
