use super::expressions::ParameterInfo;
use crate::error::TranslateError;
use crate::ir::VisibilityToken;
use crate::semantic::{SemanticModel, TypeKind, classify};
use crate::syntax::{
    ClassDecl, ConstructorDecl, Expr, FieldDecl, InterfaceDecl, MethodDecl, Modifier, PropertyDecl,
    TypeSyntax,
};
use crate::type_map::{map_type, map_type_name};

/// A base type listed after `:` in a type declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseTypeReference {
    /// Declared name with resolved type arguments.
    pub name: String,
    pub kind: TypeKind,
}

impl BaseTypeReference {
    pub fn new(ty: &TypeSyntax, semantic: Option<&dyn SemanticModel>) -> Result<Self, TranslateError> {
        let simple = ty.simple_name().unwrap_or_default();
        Ok(Self {
            name: map_type_name(ty, declared)?,
            kind: classify(semantic, simple),
        })
    }
}

fn declared(name: &str) -> &str {
    name
}

fn base_types(
    types: &[TypeSyntax],
    semantic: Option<&dyn SemanticModel>,
) -> Result<Vec<BaseTypeReference>, TranslateError> {
    types.iter().map(|ty| BaseTypeReference::new(ty, semantic)).collect()
}

/// A class declaration with its base types classified up front.
pub struct ClassDeclaration<'a> {
    pub node: &'a ClassDecl,
    pub visibility: VisibilityToken,
    pub base_class: Option<BaseTypeReference>,
    pub interfaces: Vec<BaseTypeReference>,
}

impl<'a> ClassDeclaration<'a> {
    pub fn new(node: &'a ClassDecl, semantic: Option<&dyn SemanticModel>) -> Result<Self, TranslateError> {
        let mut base_class = None;
        let mut interfaces = Vec::new();
        for base in base_types(&node.base_types, semantic)? {
            match base.kind {
                TypeKind::Interface => interfaces.push(base),
                _ if base_class.is_none() => base_class = Some(base),
                // A second class-like base can only be an interface the
                // model does not know about.
                _ => interfaces.push(base),
            }
        }
        Ok(Self {
            node,
            visibility: VisibilityToken::from_modifiers(&node.modifiers),
            base_class,
            interfaces,
        })
    }

    pub fn name(&self) -> &'a str {
        &self.node.name
    }

    pub fn is_public(&self) -> bool {
        self.node.modifiers.contains(&Modifier::Public)
    }
}

pub struct InterfaceDeclaration<'a> {
    pub node: &'a InterfaceDecl,
    pub bases: Vec<BaseTypeReference>,
}

impl<'a> InterfaceDeclaration<'a> {
    pub fn new(node: &'a InterfaceDecl, semantic: Option<&dyn SemanticModel>) -> Result<Self, TranslateError> {
        Ok(Self {
            node,
            bases: base_types(&node.base_types, semantic)?,
        })
    }

    pub fn is_public(&self) -> bool {
        self.node.modifiers.contains(&Modifier::Public)
    }
}

/// A field declaration. Only the first declarator is translated.
pub struct FieldDeclaration<'a> {
    pub visibility: VisibilityToken,
    pub is_readonly: bool,
    pub ty: String,
    pub name: &'a str,
    pub initializer: Option<&'a Expr>,
    /// Declarators after the first one, which are not translated.
    pub dropped: Vec<&'a str>,
}

impl<'a> FieldDeclaration<'a> {
    pub fn new(node: &'a FieldDecl) -> Result<Self, TranslateError> {
        let mut declarators = node.declaration.declarators.iter();
        let first = declarators
            .next()
            .ok_or_else(|| TranslateError::unexpected("field declarator", "empty field declaration"))?;
        Ok(Self {
            visibility: VisibilityToken::from_modifiers(&node.modifiers),
            is_readonly: node
                .modifiers
                .iter()
                .any(|m| matches!(m, Modifier::Readonly | Modifier::Const)),
            ty: map_type(&node.declaration.ty)?,
            name: &first.name,
            initializer: first.initializer.as_ref(),
            dropped: declarators.map(|d| d.name.as_str()).collect(),
        })
    }

    pub fn is_static(&self) -> bool {
        self.visibility.is_static
    }
}

pub struct MethodDeclaration<'a> {
    pub visibility: VisibilityToken,
    pub name: &'a str,
    pub return_type: String,
    pub parameters: Vec<ParameterInfo<'a>>,
}

impl<'a> MethodDeclaration<'a> {
    pub fn new(node: &'a MethodDecl) -> Result<Self, TranslateError> {
        Ok(Self {
            visibility: VisibilityToken::from_modifiers(&node.modifiers),
            name: &node.name,
            return_type: map_type(&node.return_type)?,
            parameters: ParameterInfo::all(&node.parameters)?,
        })
    }
}

pub struct ConstructorDeclaration<'a> {
    pub visibility: VisibilityToken,
    pub parameters: Vec<ParameterInfo<'a>>,
}

impl<'a> ConstructorDeclaration<'a> {
    pub fn new(node: &'a ConstructorDecl) -> Result<Self, TranslateError> {
        Ok(Self {
            visibility: VisibilityToken::from_modifiers(&node.modifiers),
            parameters: ParameterInfo::all(&node.parameters)?,
        })
    }

    pub fn is_static(&self) -> bool {
        self.visibility.is_static
    }
}

pub struct PropertyDeclaration<'a> {
    pub visibility: VisibilityToken,
    pub name: &'a str,
    pub ty: String,
}

impl<'a> PropertyDeclaration<'a> {
    pub fn new(node: &'a PropertyDecl) -> Result<Self, TranslateError> {
        Ok(Self {
            visibility: VisibilityToken::from_modifiers(&node.modifiers),
            name: &node.name,
            ty: map_type(&node.ty)?,
        })
    }
}
