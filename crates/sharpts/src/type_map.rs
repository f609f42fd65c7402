//! Source type descriptor to TypeScript type text.
//!
//! Resolution runs in three steps:
//!
//! 1. the descriptor's shape picks a *base* name: keyword text, identifier
//!    text, or the fully resolved element/inner type for arrays and
//!    nullables (qualified names resolve their right-most segment);
//! 2. keyword and identifier bases run through the name normalizations
//!    below, in order, each one seeing the output of the previous; resolved
//!    element and inner types are not normalized again;
//! 3. the shape suffix is re-applied: `<args>` for generics, `[]` for
//!    arrays, `|null` for nullables.
//!
//! Nullables resolve before array wrapping, so `int?[]` becomes
//! `number|null[]`.
//!
//! The normalizations match on substrings, case-insensitively: any name
//! containing `int` becomes `number`, including user types such as
//! `Point`. This is kept as is.

use crate::error::TranslateError;
use crate::ir::lexemes;
use crate::syntax::TypeSyntax;

/// Keyword spellings of integral types whose text does not contain `int`.
const INTEGRAL_KEYWORDS: &[&str] = &["long", "short", "byte", "sbyte", "ulong", "ushort"];

/// Runtime names of the integral types.
const INTEGRAL_RUNTIME_NAMES: &[&str] = &[
    "System.Int16",
    "System.Int32",
    "System.Int64",
    "System.IntPtr",
    "System.UInt16",
    "System.UInt32",
    "System.UInt64",
    "System.UIntPtr",
];

/// Resolve `ty` to its TypeScript spelling.
///
/// Fails with [`TranslateError::UnsupportedType`] for pointer, tuple and
/// `ref` types.
pub fn map_type(ty: &TypeSyntax) -> Result<String, TranslateError> {
    // Element, inner and right-hand types come back already normalized.
    let mut resolved = match ty {
        TypeSyntax::Predefined { keyword } => normalize(keyword.clone()),
        TypeSyntax::Identifier { name } | TypeSyntax::Generic { name, .. } => normalize(name.clone()),
        TypeSyntax::Array { element, .. } => map_type(element)?,
        TypeSyntax::Nullable { inner } => map_type(inner)?,
        TypeSyntax::Qualified { right, .. } => map_type(right)?,
        TypeSyntax::Implicit => return Ok(lexemes::ANY_TYPE.to_string()),
        TypeSyntax::Pointer { .. } | TypeSyntax::Tuple { .. } | TypeSyntax::Ref { .. } => {
            return Err(TranslateError::UnsupportedType {
                kind: ty.kind_name().to_string(),
            });
        }
    };

    match ty {
        TypeSyntax::Generic { arguments, .. } => {
            let arguments = arguments
                .iter()
                .map(map_type)
                .collect::<Result<Vec<_>, _>>()?;
            resolved.push('<');
            resolved.push_str(&arguments.join(", "));
            resolved.push('>');
        }
        TypeSyntax::Array { rank, .. } => {
            for _ in 0..(*rank).max(1) {
                resolved.push_str(lexemes::ARRAY_SUFFIX);
            }
        }
        TypeSyntax::Nullable { .. } => resolved.push_str(lexemes::NULL_UNION_SUFFIX),
        _ => {}
    }

    Ok(resolved)
}

/// Spelling of a declared type name: an object-creation target or a base
/// type. The name itself is kept (after `rename`); only its type arguments
/// are resolved. Qualified names keep their right-most segment, and any
/// other shape resolves as [`map_type`] does.
pub fn map_type_name(ty: &TypeSyntax, rename: fn(&str) -> &str) -> Result<String, TranslateError> {
    match ty {
        TypeSyntax::Identifier { name } => Ok(rename(name).to_string()),
        TypeSyntax::Generic { name, arguments } => {
            let arguments = arguments
                .iter()
                .map(map_type)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!("{}<{}>", rename(name), arguments.join(", ")))
        }
        TypeSyntax::Qualified { right, .. } => map_type_name(right, rename),
        other => map_type(other),
    }
}

fn normalize(mut name: String) -> String {
    if is_void(&name) {
        name = lexemes::VOID_TYPE.to_string();
    }
    if is_string(&name) {
        name = lexemes::STRING_TYPE.to_string();
    }
    if is_integral(&name) || contains_ignore_case(&name, "double") || contains_ignore_case(&name, "float") {
        name = lexemes::NUMBER_TYPE.to_string();
    }
    if contains_ignore_case(&name, "bool") {
        name = lexemes::BOOLEAN_TYPE.to_string();
    }
    match name.as_str() {
        "Observable" => name = "KnockoutObservable".to_string(),
        "ObservableArray" => name = "KnockoutObservableArray".to_string(),
        "DependentObservable" => name = "KnockoutComputed".to_string(),
        _ => {}
    }
    if contains_ignore_case(&name, "object") {
        name = lexemes::ANY_TYPE.to_string();
    }
    name
}

fn is_void(name: &str) -> bool {
    name == "System.Void" || contains_ignore_case(name, "void")
}

fn is_string(name: &str) -> bool {
    name == "System.String" || contains_ignore_case(name, "string")
}

fn is_integral(name: &str) -> bool {
    INTEGRAL_RUNTIME_NAMES.contains(&name)
        || INTEGRAL_KEYWORDS.contains(&name)
        || contains_ignore_case(name, "int")
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
