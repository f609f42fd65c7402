//! Read-only projections over source nodes.
//!
//! A helper borrows one syntax node and exposes its parts under
//! descriptive names, with types resolved and modifiers decoded when the
//! helper is built. Walkers and factories go through helpers instead of
//! matching on node fields directly.

pub mod declarations;
pub mod decorations;
pub mod expressions;
pub mod statements;

pub use declarations::{
    BaseTypeReference, ClassDeclaration, ConstructorDeclaration, FieldDeclaration, InterfaceDeclaration,
    MethodDeclaration, PropertyDeclaration,
};
pub use expressions::{
    AssignmentExpression, BinaryExpression, InvocationExpression, MemberAccessExpression,
    ObjectCreationExpression, ParameterInfo, UnaryExpression, known_alias,
};
pub use statements::{ForEachStatement, ForStatement, body_statements};
