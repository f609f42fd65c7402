//! Owned source syntax tree.
//!
//! This is the tree the readers in [`crate::input`] produce and the walkers
//! consume. Every node is a plain value with serde support, so an external
//! parser can hand a tree over as JSON instead of going through a built-in
//! reader.

mod decl;
mod expr;
mod stmt;
mod types;

pub use decl::*;
pub use expr::*;
pub use stmt::*;
pub use types::TypeSyntax;
