//! Errors raised while turning a syntax tree into translation units.
//!
//! Every variant is fatal for the declaration being translated: the walkers
//! never return a partially built unit. Whether a failure aborts the whole
//! run or only skips one declaration is decided by the caller (see
//! [`ErrorPolicy`](crate::walker::ErrorPolicy)).

/// Error that can occur while translating source syntax into the IR.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    /// A type descriptor category the type map has no rule for.
    #[error("type kind not implemented: {kind}")]
    UnsupportedType { kind: String },

    /// An operator that has no target-language token.
    #[error("operator could not be detected: {kind}")]
    UnsupportedOperator { kind: String },

    #[error("statement kind not implemented: {kind}")]
    UnsupportedStatement { kind: String },

    #[error("declaration kind not implemented: {kind}")]
    UnsupportedDeclaration { kind: String },

    /// A node handed to a factory or walker is not of the kind it builds.
    #[error("expected {expected}, got {got}")]
    UnexpectedNode { expected: String, got: String },

    #[error("invalid identifier `{name}`: names cannot contain spaces")]
    InvalidIdentifier { name: String },
}

impl TranslateError {
    pub(crate) fn unexpected(expected: &str, got: &str) -> Self {
        Self::UnexpectedNode {
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }
}

/// Error from reading and translating one source file.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error(transparent)]
    Read(#[from] crate::traits::ReadError),

    #[error(transparent)]
    Translate(#[from] TranslateError),
}
