//! Source declarations: compilation units, types and their members.

use super::expr::{Argument, Expr, FunctionBody};
use super::stmt::{Block, VariableDeclaration};
use super::types::{TypeSyntax, write_separated};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One parsed source file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompilationUnit {
    #[serde(default)]
    pub usings: Vec<String>,
    pub members: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    Namespace(NamespaceDecl),
    Class(ClassDecl),
    Interface(InterfaceDecl),
    Other(OtherDecl),
}

impl Declaration {
    pub fn kind_name(&self) -> &str {
        match self {
            Declaration::Namespace(_) => "namespace declaration",
            Declaration::Class(_) => "class declaration",
            Declaration::Interface(_) => "interface declaration",
            Declaration::Other(other) => &other.kind,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Declaration::Namespace(ns) => Some(&ns.name),
            Declaration::Class(class) => Some(&class.name),
            Declaration::Interface(iface) => Some(&iface.name),
            Declaration::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceDecl {
    pub name: String,
    pub members: Vec<Declaration>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<String>,
    /// Base class and implemented interfaces, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub base_types: Vec<TypeSyntax>,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDecl {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub base_types: Vec<TypeSyntax>,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherDecl {
    #[serde(rename = "node_kind")]
    pub kind: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Member {
    Field(FieldDecl),
    Property(PropertyDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Other(OtherDecl),
}

impl Member {
    pub fn kind_name(&self) -> &str {
        match self {
            Member::Field(_) => "field declaration",
            Member::Property(_) => "property declaration",
            Member::Method(_) => "method declaration",
            Member::Constructor(_) => "constructor declaration",
            Member::Other(other) => &other.kind,
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Member::Field(d) => &d.attributes,
            Member::Property(d) => &d.attributes,
            Member::Method(d) => &d.attributes,
            Member::Constructor(d) => &d.attributes,
            Member::Other(_) => &[],
        }
    }

    pub fn modifiers(&self) -> &[Modifier] {
        match self {
            Member::Field(d) => &d.modifiers,
            Member::Property(d) => &d.modifiers,
            Member::Method(d) => &d.modifiers,
            Member::Constructor(d) => &d.modifiers,
            Member::Other(_) => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
    pub declaration: VariableDeclaration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDecl {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
    #[serde(rename = "type")]
    pub ty: TypeSyntax,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accessors: Vec<Accessor>,
    /// `int X => expr;`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression_body: Option<Expr>,
    /// `int X { get; set; } = expr;`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<Expr>,
}

impl PropertyDecl {
    /// Every accessor is body-less (`{ get; set; }`).
    pub fn is_auto(&self) -> bool {
        self.expression_body.is_none() && self.accessors.iter().all(|a| a.body.is_none())
    }

    pub fn has_setter(&self) -> bool {
        self.accessors.iter().any(|a| a.kind == AccessorKind::Set)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accessor {
    pub kind: AccessorKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<FunctionBody>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessorKind {
    Get,
    Set,
    Init,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
    pub return_type: TypeSyntax,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<String>,
    pub parameters: Vec<Parameter>,
    /// `None` for abstract, extern and interface methods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<FunctionBody>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorDecl {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
    pub name: String,
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<ConstructorInitializer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Block>,
}

/// `: base(...)` or `: this(...)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorInitializer {
    pub kind: InitializerKind,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitializerKind {
    Base,
    This,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    /// `ref`, `out`, `params`, `this`, ...
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,
    /// `None` for implicitly typed lambda parameters.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeSyntax>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Expr>,
}

impl Parameter {
    pub fn new(ty: Option<TypeSyntax>, name: impl Into<String>) -> Self {
        Self {
            attributes: Vec::new(),
            modifiers: Vec::new(),
            ty,
            name: name.into(),
            default: None,
        }
    }
}

/// `[Name(arg, ...)]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<Expr>,
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// Whether this is `[name]` or `[nameAttribute]`, optionally qualified.
    pub fn is(&self, name: &str) -> bool {
        let simple = self.name.rsplit('.').next().unwrap_or(&self.name);
        simple == name || simple.strip_suffix("Attribute") == Some(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Internal,
    Static,
    Abstract,
    Virtual,
    Override,
    Sealed,
    Readonly,
    Const,
    Async,
    Partial,
    Extern,
    New,
}

impl Modifier {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let m = match keyword {
            "public" => Modifier::Public,
            "protected" => Modifier::Protected,
            "private" => Modifier::Private,
            "internal" => Modifier::Internal,
            "static" => Modifier::Static,
            "abstract" => Modifier::Abstract,
            "virtual" => Modifier::Virtual,
            "override" => Modifier::Override,
            "sealed" => Modifier::Sealed,
            "readonly" => Modifier::Readonly,
            "const" => Modifier::Const,
            "async" => Modifier::Async,
            "partial" => Modifier::Partial,
            "extern" => Modifier::Extern,
            "new" => Modifier::New,
            _ => return None,
        };
        Some(m)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{} ", modifier)?;
        }
        if let Some(ty) = &self.ty {
            write!(f, "{} ", ty)?;
        }
        f.write_str(&self.name)?;
        if let Some(default) = &self.default {
            write!(f, " = {}", default)?;
        }
        Ok(())
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.arguments.is_empty() {
            f.write_str("(")?;
            write_separated(f, &self.arguments, ", ")?;
            f.write_str(")")?;
        }
        Ok(())
    }
}
