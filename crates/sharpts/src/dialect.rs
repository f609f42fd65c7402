//! Target dialects.
//!
//! A dialect decides which declarations are emitted. Factories and walkers
//! ask it before producing a unit; a skipped declaration produces nothing
//! and is not an error.

use crate::helpers::decorations::{self, SCRIPT_SKIP};
use crate::syntax::{ClassDecl, ConstructorDecl, FieldDecl, MethodDecl, Modifier, PropertyDecl};
use std::fmt;
use std::str::FromStr;

pub trait Dialect: Send + Sync {
    /// Name used on the command line and in configuration files.
    fn name(&self) -> &'static str;

    fn skip_field(&self, _field: &FieldDecl) -> bool {
        false
    }

    fn skip_property(&self, _property: &PropertyDecl) -> bool {
        false
    }

    fn skip_method(&self, _method: &MethodDecl) -> bool {
        false
    }

    fn skip_constructor(&self, _constructor: &ConstructorDecl) -> bool {
        false
    }

    /// Namespace the class must be wrapped in, if any.
    fn namespace_override<'a>(&self, _class: &'a ClassDecl) -> Option<&'a str> {
        None
    }
}

/// Plain TypeScript: everything is emitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptDialect;

impl Dialect for TypeScriptDialect {
    fn name(&self) -> &'static str {
        "typescript"
    }
}

/// Script#-annotated sources: `[ScriptSkip]` members and static fields are
/// dropped, `[ScriptNamespace("x")]` classes are wrapped in `namespace x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptSharpDialect;

impl Dialect for ScriptSharpDialect {
    fn name(&self) -> &'static str {
        "script-sharp"
    }

    fn skip_field(&self, field: &FieldDecl) -> bool {
        field.modifiers.contains(&Modifier::Static) || decorations::has(&field.attributes, SCRIPT_SKIP)
    }

    fn skip_property(&self, property: &PropertyDecl) -> bool {
        decorations::has(&property.attributes, SCRIPT_SKIP)
    }

    fn skip_method(&self, method: &MethodDecl) -> bool {
        decorations::has(&method.attributes, SCRIPT_SKIP)
    }

    fn skip_constructor(&self, constructor: &ConstructorDecl) -> bool {
        decorations::has(&constructor.attributes, SCRIPT_SKIP)
    }

    fn namespace_override<'a>(&self, class: &'a ClassDecl) -> Option<&'a str> {
        decorations::script_namespace(&class.attributes)
    }
}

pub static TYPESCRIPT: TypeScriptDialect = TypeScriptDialect;
pub static SCRIPT_SHARP: ScriptSharpDialect = ScriptSharpDialect;

/// Selectable dialects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DialectKind {
    #[default]
    #[serde(rename = "typescript")]
    TypeScript,
    ScriptSharp,
}

impl DialectKind {
    pub fn dialect(self) -> &'static dyn Dialect {
        match self {
            DialectKind::TypeScript => &TYPESCRIPT,
            DialectKind::ScriptSharp => &SCRIPT_SHARP,
        }
    }
}

impl FromStr for DialectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "typescript" | "ts" => Ok(DialectKind::TypeScript),
            "script-sharp" | "scriptsharp" => Ok(DialectKind::ScriptSharp),
            other => Err(format!("unknown dialect `{other}` (expected typescript or script-sharp)")),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dialect().name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Attribute, Expr, TypeSyntax, VariableDeclaration};

    fn field(modifiers: Vec<Modifier>, attributes: Vec<Attribute>) -> FieldDecl {
        FieldDecl {
            attributes,
            modifiers,
            declaration: VariableDeclaration::single(TypeSyntax::predefined("int"), "x", None),
        }
    }

    #[test]
    fn script_sharp_skips_static_and_decorated_fields() {
        let dialect = DialectKind::ScriptSharp.dialect();
        assert!(dialect.skip_field(&field(vec![Modifier::Public, Modifier::Static], Vec::new())));
        assert!(dialect.skip_field(&field(Vec::new(), vec![Attribute::new("ScriptSkip")])));
        assert!(!dialect.skip_field(&field(vec![Modifier::Private], Vec::new())));
        assert!(!TYPESCRIPT.skip_field(&field(vec![Modifier::Static], Vec::new())));
    }

    #[test]
    fn script_namespace_override() {
        let class = ClassDecl {
            name: "Model".into(),
            attributes: vec![Attribute {
                name: "ScriptNamespace".into(),
                arguments: vec![Expr::string("app")],
            }],
            ..Default::default()
        };
        assert_eq!(SCRIPT_SHARP.namespace_override(&class), Some("app"));
        assert_eq!(TYPESCRIPT.namespace_override(&class), None);
    }

    #[test]
    fn parses_names() {
        assert_eq!("script-sharp".parse::<DialectKind>(), Ok(DialectKind::ScriptSharp));
        assert_eq!(DialectKind::TypeScript.to_string(), "typescript");
        assert!("java".parse::<DialectKind>().is_err());
    }
}
