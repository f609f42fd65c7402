//! Optional type-resolution service.
//!
//! The walkers only ask one question of it: what kind of type does a name
//! denote. A parser front end with a real binder can implement
//! [`SemanticModel`] directly; [`DeclarationIndex`] answers from the
//! declarations found in a set of parsed compilation units.

use crate::syntax::{CompilationUnit, Declaration};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Enum,
    Unknown,
}

/// Answers type-kind queries for names referenced in source.
pub trait SemanticModel: Send + Sync {
    /// Kind of the type named `name` (simple name, no type arguments), or
    /// `None` when the model has never seen it.
    fn type_kind(&self, name: &str) -> Option<TypeKind>;
}

/// Declared types of one or more compilation units, by simple name.
#[derive(Debug, Clone, Default)]
pub struct DeclarationIndex {
    kinds: HashMap<String, TypeKind>,
}

impl DeclarationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_units<'a>(units: impl IntoIterator<Item = &'a CompilationUnit>) -> Self {
        let mut index = Self::new();
        for unit in units {
            index.add_unit(unit);
        }
        index
    }

    pub fn add_unit(&mut self, unit: &CompilationUnit) {
        for decl in &unit.members {
            self.add_declaration(decl);
        }
    }

    fn add_declaration(&mut self, decl: &Declaration) {
        match decl {
            Declaration::Namespace(ns) => {
                for member in &ns.members {
                    self.add_declaration(member);
                }
            }
            Declaration::Class(class) => self.insert(&class.name, TypeKind::Class),
            Declaration::Interface(iface) => self.insert(&iface.name, TypeKind::Interface),
            Declaration::Other(_) => {}
        }
    }

    pub fn insert(&mut self, name: &str, kind: TypeKind) {
        self.kinds.insert(name.to_string(), kind);
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl SemanticModel for DeclarationIndex {
    fn type_kind(&self, name: &str) -> Option<TypeKind> {
        self.kinds.get(name).copied()
    }
}

/// Interface names follow the `IName` convention: an `I` followed by an
/// upper-case letter.
pub fn looks_like_interface(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next() == Some('I') && chars.next().is_some_and(|c| c.is_ascii_uppercase())
}

/// Classify `name` through `model`, falling back to the naming convention
/// when there is no model or it does not know the name.
pub fn classify(model: Option<&dyn SemanticModel>, name: &str) -> TypeKind {
    match model.and_then(|m| m.type_kind(name)) {
        Some(TypeKind::Unknown) | None => {
            if looks_like_interface(name) {
                TypeKind::Interface
            } else {
                TypeKind::Class
            }
        }
        Some(kind) => kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{ClassDecl, InterfaceDecl, NamespaceDecl};

    #[test]
    fn index_collects_nested_declarations() {
        let unit = CompilationUnit {
            usings: Vec::new(),
            members: vec![Declaration::Namespace(NamespaceDecl {
                name: "App".into(),
                members: vec![
                    Declaration::Class(ClassDecl {
                        name: "Widget".into(),
                        ..Default::default()
                    }),
                    Declaration::Interface(InterfaceDecl {
                        name: "Renderable".into(),
                        ..Default::default()
                    }),
                ],
            })],
        };
        let index = DeclarationIndex::from_units([&unit]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.type_kind("Widget"), Some(TypeKind::Class));
        assert_eq!(index.type_kind("Renderable"), Some(TypeKind::Interface));
        assert_eq!(index.type_kind("Missing"), None);
    }

    #[test]
    fn classify_prefers_model_over_convention() {
        let mut index = DeclarationIndex::new();
        index.insert("Renderable", TypeKind::Interface);
        index.insert("IOBuffer", TypeKind::Class);

        assert_eq!(classify(Some(&index), "Renderable"), TypeKind::Interface);
        assert_eq!(classify(Some(&index), "IOBuffer"), TypeKind::Class);
        assert_eq!(classify(None, "IDisposable"), TypeKind::Interface);
        assert_eq!(classify(None, "Item"), TypeKind::Class);
    }
}
