//! The reader trait: source text in, syntax model out.

use crate::syntax::CompilationUnit;

/// Error that can occur when reading source code into the syntax model.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("unsupported syntax: {0}")]
    Unsupported(String),

    #[error("expected {expected}, got {got}")]
    UnexpectedNode { expected: String, got: String },
}

/// A reader parses one source file into a [`CompilationUnit`].
pub trait Reader: Send + Sync {
    /// Language identifier (e.g. "csharp", "json").
    fn language(&self) -> &'static str;

    /// File extensions this reader handles (e.g. `&["cs"]`).
    fn extensions(&self) -> &'static [&'static str];

    fn read(&self, source: &str) -> Result<CompilationUnit, ReadError>;
}
