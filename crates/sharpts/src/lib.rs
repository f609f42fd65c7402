//! C# to TypeScript source-to-source translation.
//!
//! `sharpts` reads C# into an owned syntax tree, walks each declaration
//! into a tree of self-rendering translation units, and renders those as
//! TypeScript text. It maps syntax, not runtime semantics: constructs it
//! has no rule for are either copied through verbatim (expressions) or
//! reported as errors (types, statements, declarations).
//!
//! # Architecture
//!
//! ```text
//! Source                Syntax              IR                  Output
//! ──────────────     ────────────     ───────────────     ──────────────
//! C# (tree-sitter) ─┐                ┌─ ClassUnit ...  ─┐
//!                   ├─> Compilation ─┤                  ├─> TypeScript
//! JSON tree        ─┘    Unit        └─ (walker, ...)  ─┘    text blocks
//! ```
//!
//! # Example
//!
//! ```ignore
//! use sharpts::{ErrorPolicy, WalkContext, translate_source, input::CSHARP_READER};
//!
//! let translation = translate_source(
//!     &CSHARP_READER,
//!     "public class Point { public int X; }",
//!     WalkContext::default(),
//!     ErrorPolicy::Skip,
//! )?;
//! assert_eq!(translation.text(), "export class Point {\n    public X: number;\n}\n");
//! ```
//!
//! # Dialects
//!
//! A [`Dialect`] decides which declarations are emitted at all and whether
//! classes are wrapped in a namespace. [`TypeScriptDialect`] emits
//! everything; [`ScriptSharpDialect`] follows Script# conventions
//! (`[ScriptSkip]`, `[ScriptNamespace]`, no static fields).

pub mod dialect;
pub mod error;
pub mod expression;
pub mod factories;
pub mod helpers;
pub mod input;
pub mod ir;
pub mod registry;
pub mod semantic;
pub mod statement;
pub mod syntax;
pub mod traits;
pub mod type_map;
pub mod walker;

// Re-exports: errors
pub use error::{SourceError, TranslateError};

// Re-exports: IR
pub use ir::{TranslationUnit, Unit};

// Re-exports: translation entry points
pub use dialect::{Dialect, DialectKind, ScriptSharpDialect, TypeScriptDialect};
pub use expression::{ExpressionBuilder, build_expression};
pub use semantic::{DeclarationIndex, SemanticModel, TypeKind};
pub use statement::{StatementBuilder, Walker, build_statements};
pub use type_map::map_type;
pub use walker::{
    ClassWalker, DeclarationFailure, ErrorPolicy, InterfaceWalker, ProgramTranslation, ProgramWalker,
    TranslatedBlock, WalkContext, WalkEvent,
};

// Re-exports: Traits
pub use traits::{ReadError, Reader};

// Re-exports: Registry
pub use registry::{reader_for_extension, reader_for_language, readers, register_reader};

// Re-exports: Built-in readers
#[cfg(feature = "read-csharp")]
pub use input::{CSharpReader, read_csharp};
pub use input::{JsonSyntaxReader, read_json};

use syntax::CompilationUnit;

/// Translate a parsed compilation unit.
pub fn translate_unit(
    unit: &CompilationUnit,
    cx: WalkContext<'_>,
    policy: ErrorPolicy,
) -> Result<ProgramTranslation, TranslateError> {
    ProgramWalker::new(unit, cx, policy).walk()
}

/// Read `source` with `reader` and translate the result.
pub fn translate_source(
    reader: &dyn Reader,
    source: &str,
    cx: WalkContext<'_>,
    policy: ErrorPolicy,
) -> Result<ProgramTranslation, SourceError> {
    let unit = reader.read(source)?;
    Ok(translate_unit(&unit, cx, policy)?)
}
