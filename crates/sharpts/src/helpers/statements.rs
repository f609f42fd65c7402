use crate::error::TranslateError;
use crate::syntax::{Block, Expr, ForEachStmt, ForStmt, Stmt, TypeSyntax, VariableDeclaration};
use crate::type_map::map_type;

/// Parts of a `foreach` statement, as text.
pub struct ForEachStatement<'a> {
    /// Resolved element type; `None` for `var`.
    pub element_type: Option<String>,
    pub variable: &'a str,
    /// The collection expression exactly as written.
    pub collection: String,
    pub body: &'a Stmt,
}

impl<'a> ForEachStatement<'a> {
    pub fn new(node: &'a ForEachStmt) -> Result<Self, TranslateError> {
        let element_type = match &node.ty {
            TypeSyntax::Implicit => None,
            ty => Some(map_type(ty)?),
        };
        Ok(Self {
            element_type,
            variable: &node.identifier,
            collection: node.collection.to_string(),
            body: &node.body,
        })
    }
}

pub struct ForStatement<'a> {
    pub declaration: Option<&'a VariableDeclaration>,
    pub initializers: &'a [Expr],
    pub condition: Option<&'a Expr>,
    pub incrementors: &'a [Expr],
    pub body: &'a Stmt,
}

impl<'a> ForStatement<'a> {
    pub fn new(node: &'a ForStmt) -> Self {
        Self {
            declaration: node.declaration.as_ref(),
            initializers: &node.initializers,
            condition: node.condition.as_ref(),
            incrementors: &node.incrementors,
            body: &node.body,
        }
    }

    /// Only a condition: rendered as a walk over that condition.
    pub fn is_collection_walk(&self) -> bool {
        self.condition.is_some()
            && self.declaration.is_none()
            && self.initializers.is_empty()
            && self.incrementors.is_empty()
    }
}

/// The statements a body runs: the contents of a block, or the single
/// statement itself.
pub fn body_statements(body: &Stmt) -> &[Stmt] {
    match body {
        Stmt::Block(Block { statements }) => statements,
        other => std::slice::from_ref(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{BinaryKind, UnaryKind};

    #[test]
    fn foreach_keeps_collection_text() {
        let node = ForEachStmt {
            ty: TypeSyntax::predefined("string"),
            identifier: "x".into(),
            collection: Expr::member(Expr::This, "Names"),
            body: Box::new(Stmt::block(Vec::new())),
        };
        let helper = ForEachStatement::new(&node).unwrap();
        assert_eq!(helper.element_type.as_deref(), Some("string"));
        assert_eq!(helper.collection, "this.Names");
    }

    #[test]
    fn collection_walk_requires_condition_only() {
        let mut node = ForStmt {
            declaration: None,
            initializers: Vec::new(),
            condition: Some(Expr::identifier("items")),
            incrementors: Vec::new(),
            body: Box::new(Stmt::Empty),
        };
        assert!(ForStatement::new(&node).is_collection_walk());

        node.condition = Some(Expr::binary(Expr::identifier("i"), BinaryKind::LessThan, Expr::int(3)));
        node.incrementors = vec![Expr::postfix(Expr::identifier("i"), UnaryKind::PostIncrement)];
        assert!(!ForStatement::new(&node).is_collection_walk());
    }
}
