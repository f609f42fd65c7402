//! Fixed TypeScript spellings.

pub const VOID_TYPE: &str = "void";
pub const STRING_TYPE: &str = "string";
pub const NUMBER_TYPE: &str = "number";
pub const BOOLEAN_TYPE: &str = "boolean";
pub const ANY_TYPE: &str = "any";

pub const ARRAY_SUFFIX: &str = "[]";
pub const NULL_UNION_SUFFIX: &str = "|null";

pub const THIS_KEYWORD: &str = "this";
pub const SUPER_KEYWORD: &str = "super";
pub const NULL_KEYWORD: &str = "null";
pub const NEW_KEYWORD: &str = "new";
pub const LET_KEYWORD: &str = "let";
pub const CONSTRUCTOR_KEYWORD: &str = "constructor";
pub const EXPORT_KEYWORD: &str = "export";
pub const STATIC_KEYWORD: &str = "static";
pub const READONLY_KEYWORD: &str = "readonly";
pub const RETURN_KEYWORD: &str = "return";
pub const THROW_KEYWORD: &str = "throw";
pub const BREAK_KEYWORD: &str = "break";
pub const CONTINUE_KEYWORD: &str = "continue";

/// Loop variable name used when a `for` loop is rendered as a walk over
/// its condition.
pub const FOR_OF_VARIABLE: &str = "variable";

/// Parameter name of a generated setter.
pub const SETTER_PARAMETER: &str = "value";
