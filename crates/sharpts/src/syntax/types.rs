//! Type descriptors as they appear in source declarations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A source type reference (`int`, `List<string>`, `Foo[]`, `int?`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeSyntax {
    /// Keyword type (`int`, `string`, `void`, `object`, ...).
    Predefined { keyword: String },
    Identifier { name: String },
    Generic {
        name: String,
        arguments: Vec<TypeSyntax>,
    },
    Array {
        element: Box<TypeSyntax>,
        /// Number of dimensions: `int[]` is 1, `int[,]` is 2.
        rank: usize,
    },
    Nullable { inner: Box<TypeSyntax> },
    /// `Left.Right`, e.g. `System.String`.
    Qualified {
        left: Box<TypeSyntax>,
        right: Box<TypeSyntax>,
    },
    Pointer { inner: Box<TypeSyntax> },
    Tuple { elements: Vec<TypeSyntax> },
    Ref { inner: Box<TypeSyntax> },
    /// `var`
    Implicit,
}

impl TypeSyntax {
    pub fn predefined(keyword: impl Into<String>) -> Self {
        TypeSyntax::Predefined {
            keyword: keyword.into(),
        }
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        TypeSyntax::Identifier { name: name.into() }
    }

    pub fn generic(name: impl Into<String>, arguments: Vec<TypeSyntax>) -> Self {
        TypeSyntax::Generic {
            name: name.into(),
            arguments,
        }
    }

    pub fn array(element: TypeSyntax) -> Self {
        TypeSyntax::Array {
            element: Box::new(element),
            rank: 1,
        }
    }

    pub fn nullable(inner: TypeSyntax) -> Self {
        TypeSyntax::Nullable {
            inner: Box::new(inner),
        }
    }

    pub fn qualified(left: TypeSyntax, right: TypeSyntax) -> Self {
        TypeSyntax::Qualified {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Syntactic category name, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeSyntax::Predefined { .. } => "predefined type",
            TypeSyntax::Identifier { .. } => "identifier name",
            TypeSyntax::Generic { .. } => "generic name",
            TypeSyntax::Array { .. } => "array type",
            TypeSyntax::Nullable { .. } => "nullable type",
            TypeSyntax::Qualified { .. } => "qualified name",
            TypeSyntax::Pointer { .. } => "pointer type",
            TypeSyntax::Tuple { .. } => "tuple type",
            TypeSyntax::Ref { .. } => "ref type",
            TypeSyntax::Implicit => "implicit type",
        }
    }

    /// The right-most simple name, without type arguments.
    ///
    /// `System.Collections.Generic.List<int>` yields `List`. Keyword types
    /// yield their keyword; shapes without a name (arrays, tuples, ...)
    /// yield `None`.
    pub fn simple_name(&self) -> Option<&str> {
        match self {
            TypeSyntax::Predefined { keyword } => Some(keyword),
            TypeSyntax::Identifier { name } | TypeSyntax::Generic { name, .. } => Some(name),
            TypeSyntax::Qualified { right, .. } => right.simple_name(),
            _ => None,
        }
    }
}

impl fmt::Display for TypeSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSyntax::Predefined { keyword } => f.write_str(keyword),
            TypeSyntax::Identifier { name } => f.write_str(name),
            TypeSyntax::Generic { name, arguments } => {
                write!(f, "{}<", name)?;
                write_separated(f, arguments, ", ")?;
                f.write_str(">")
            }
            TypeSyntax::Array { element, rank } => {
                write!(f, "{}[{}]", element, ",".repeat(rank.saturating_sub(1)))
            }
            TypeSyntax::Nullable { inner } => write!(f, "{}?", inner),
            TypeSyntax::Qualified { left, right } => write!(f, "{}.{}", left, right),
            TypeSyntax::Pointer { inner } => write!(f, "{}*", inner),
            TypeSyntax::Tuple { elements } => {
                f.write_str("(")?;
                write_separated(f, elements, ", ")?;
                f.write_str(")")
            }
            TypeSyntax::Ref { inner } => write!(f, "ref {}", inner),
            TypeSyntax::Implicit => f.write_str("var"),
        }
    }
}

pub(crate) fn write_separated<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    separator: &str,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_source_form() {
        let ty = TypeSyntax::qualified(
            TypeSyntax::identifier("System"),
            TypeSyntax::generic(
                "Dictionary",
                vec![
                    TypeSyntax::predefined("string"),
                    TypeSyntax::array(TypeSyntax::nullable(TypeSyntax::predefined("int"))),
                ],
            ),
        );
        assert_eq!(ty.to_string(), "System.Dictionary<string, int?[]>");
    }

    #[test]
    fn simple_name_skips_qualifier() {
        let ty = TypeSyntax::qualified(
            TypeSyntax::identifier("Collections"),
            TypeSyntax::generic("List", vec![TypeSyntax::predefined("int")]),
        );
        assert_eq!(ty.simple_name(), Some("List"));
        assert_eq!(TypeSyntax::array(TypeSyntax::predefined("int")).simple_name(), None);
    }
}
