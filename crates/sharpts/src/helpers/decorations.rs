//! Attribute lookups used by the dialects.

use crate::syntax::{Attribute, Expr, LiteralValue};

pub const SCRIPT_SKIP: &str = "ScriptSkip";
pub const SCRIPT_NAMESPACE: &str = "ScriptNamespace";

pub fn find<'a>(attributes: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attributes.iter().find(|a| a.is(name))
}

pub fn has(attributes: &[Attribute], name: &str) -> bool {
    find(attributes, name).is_some()
}

/// First argument of the attribute when it is a string literal.
pub fn string_argument(attribute: &Attribute) -> Option<&str> {
    match attribute.arguments.first() {
        Some(Expr::Literal(lit)) => match &lit.value {
            LiteralValue::String(s) => Some(s),
            _ => None,
        },
        _ => None,
    }
}

/// Namespace named by `[ScriptNamespace("...")]`, if present.
pub fn script_namespace(attributes: &[Attribute]) -> Option<&str> {
    find(attributes, SCRIPT_NAMESPACE).and_then(string_argument)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_namespace_argument() {
        let attributes = vec![
            Attribute::new("Serializable"),
            Attribute {
                name: "ScriptNamespaceAttribute".into(),
                arguments: vec![Expr::string("app.models")],
            },
        ];
        assert_eq!(script_namespace(&attributes), Some("app.models"));
        assert!(!has(&attributes, SCRIPT_SKIP));
    }
}
