//! Declaration walkers: classes, their members, interfaces, namespaces and
//! whole compilation units.
//!
//! Walkers report what they visited as a list of [`WalkEvent`]s returned
//! to the caller, and log the same events through `tracing`.

mod class;
mod interface;
mod members;
mod program;

pub use class::ClassWalker;
pub use interface::InterfaceWalker;
pub use members::{ConstructorWalker, MethodWalker, PropertyWalker};
pub use program::{DeclarationFailure, NamespaceWalker, ProgramTranslation, ProgramWalker, TranslatedBlock};

use crate::dialect::{Dialect, TYPESCRIPT};
use crate::semantic::SemanticModel;
use std::fmt;

/// Shared inputs of every walker in one translation.
#[derive(Clone, Copy)]
pub struct WalkContext<'a> {
    pub semantic: Option<&'a dyn SemanticModel>,
    pub dialect: &'a dyn Dialect,
}

impl<'a> WalkContext<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self { semantic: None, dialect }
    }

    pub fn with_semantic(mut self, semantic: &'a dyn SemanticModel) -> Self {
        self.semantic = Some(semantic);
        self
    }
}

impl Default for WalkContext<'_> {
    fn default() -> Self {
        Self::new(&TYPESCRIPT)
    }
}

impl fmt::Debug for WalkContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalkContext")
            .field("semantic", &self.semantic.is_some())
            .field("dialect", &self.dialect.name())
            .finish()
    }
}

/// Something a walker did with one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEvent {
    /// The declaration was translated.
    Visited {
        /// The type declaration that owns the member.
        originator: String,
        kind: String,
        name: String,
    },
    /// The dialect suppressed the declaration.
    Skipped {
        originator: String,
        kind: String,
        name: String,
    },
}

impl WalkEvent {
    pub(crate) fn visited(originator: &str, kind: &str, name: &str) -> Self {
        tracing::debug!(originator, kind, name, "visited");
        WalkEvent::Visited {
            originator: originator.to_string(),
            kind: kind.to_string(),
            name: name.to_string(),
        }
    }

    pub(crate) fn skipped(originator: &str, kind: &str, name: &str) -> Self {
        tracing::debug!(originator, kind, name, "skipped by dialect");
        WalkEvent::Skipped {
            originator: originator.to_string(),
            kind: kind.to_string(),
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            WalkEvent::Visited { name, .. } | WalkEvent::Skipped { name, .. } => name,
        }
    }
}

/// What to do when one type declaration fails to translate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Log and record the failure, then continue with the next declaration.
    #[default]
    Skip,
    /// Stop at the first failure.
    Abort,
}
