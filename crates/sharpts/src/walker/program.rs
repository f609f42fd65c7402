use super::{ClassWalker, ErrorPolicy, InterfaceWalker, WalkContext, WalkEvent};
use crate::error::TranslateError;
use crate::ir::{NamespaceUnit, TranslationUnit, Unit};
use crate::statement::Walker;
use crate::syntax::{CompilationUnit, Declaration, NamespaceDecl};

/// One rendered top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedBlock {
    pub name: String,
    pub text: String,
}

/// A type declaration that failed under [`ErrorPolicy::Skip`].
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationFailure {
    pub name: String,
    pub error: TranslateError,
}

/// Result of translating one compilation unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgramTranslation {
    pub blocks: Vec<TranslatedBlock>,
    pub failures: Vec<DeclarationFailure>,
    pub events: Vec<WalkEvent>,
}

impl ProgramTranslation {
    /// All blocks, separated by a blank line, with a trailing newline.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&block.text);
            out.push('\n');
        }
        out
    }

    /// Apply `policy` to the outcome of one type declaration.
    fn settle(
        &mut self,
        name: &str,
        result: Result<(Unit, Vec<WalkEvent>), TranslateError>,
        policy: ErrorPolicy,
    ) -> Result<Option<Unit>, TranslateError> {
        match result {
            Ok((unit, events)) => {
                self.events.extend(events);
                Ok(Some(unit))
            }
            Err(error) if policy == ErrorPolicy::Skip => {
                tracing::warn!(declaration = name, %error, "declaration skipped");
                self.failures.push(DeclarationFailure {
                    name: name.to_string(),
                    error,
                });
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }
}

/// Translate one declaration. `exported` forces the `export` prefix on
/// classes and interfaces.
fn walk_declaration(
    declaration: &Declaration,
    cx: WalkContext<'_>,
    policy: ErrorPolicy,
    exported: bool,
    out: &mut ProgramTranslation,
) -> Result<Option<Unit>, TranslateError> {
    match declaration {
        Declaration::Namespace(namespace) => {
            let unit = NamespaceWalker::new(namespace, cx, policy).walk_into(out)?;
            Ok(Some(unit.into()))
        }
        Declaration::Class(class) => {
            let result = ClassWalker::new(class, cx).and_then(|walker| {
                let walker = if exported { walker.exported() } else { walker };
                walker.walk_with_events()
            });
            out.settle(&class.name, result, policy)
        }
        Declaration::Interface(interface) => {
            let result = InterfaceWalker::new(interface, cx).and_then(|walker| {
                let walker = if exported { walker.exported() } else { walker };
                walker.walk_with_events()
            });
            out.settle(&interface.name, result, policy)
        }
        Declaration::Other(other) => {
            let error = TranslateError::UnsupportedDeclaration {
                kind: other.kind.clone(),
            };
            out.settle(&other.kind, Err(error), policy)
        }
    }
}

/// Translates a namespace. Its classes and interfaces are exported and
/// translated independently of each other.
pub struct NamespaceWalker<'a> {
    node: &'a NamespaceDecl,
    cx: WalkContext<'a>,
    policy: ErrorPolicy,
}

impl<'a> NamespaceWalker<'a> {
    pub fn new(node: &'a NamespaceDecl, cx: WalkContext<'a>, policy: ErrorPolicy) -> Self {
        Self { node, cx, policy }
    }

    /// Translate the namespace, recording events and skipped declarations
    /// in `out`.
    pub fn walk_into(self, out: &mut ProgramTranslation) -> Result<NamespaceUnit, TranslateError> {
        let mut unit = NamespaceUnit::create(&self.node.name);
        for declaration in &self.node.members {
            if let Some(member) = walk_declaration(declaration, self.cx, self.policy, true, out)? {
                unit.add_member(member);
            }
        }
        out.events
            .push(WalkEvent::visited(&self.node.name, "namespace declaration", &self.node.name));
        Ok(unit)
    }
}

impl Walker for NamespaceWalker<'_> {
    fn walk(self) -> Result<Unit, TranslateError> {
        let mut scratch = ProgramTranslation::default();
        Ok(self.walk_into(&mut scratch)?.into())
    }
}

/// Translates a whole compilation unit into one text block per top-level
/// declaration.
pub struct ProgramWalker<'a> {
    node: &'a CompilationUnit,
    cx: WalkContext<'a>,
    policy: ErrorPolicy,
}

impl<'a> ProgramWalker<'a> {
    pub fn new(node: &'a CompilationUnit, cx: WalkContext<'a>, policy: ErrorPolicy) -> Self {
        Self { node, cx, policy }
    }

    pub fn walk(self) -> Result<ProgramTranslation, TranslateError> {
        let mut out = ProgramTranslation::default();
        for declaration in &self.node.members {
            if let Some(unit) = walk_declaration(declaration, self.cx, self.policy, false, &mut out)? {
                out.blocks.push(TranslatedBlock {
                    name: declaration.name().unwrap_or_default().to_string(),
                    text: unit.translate(),
                });
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{ClassDecl, InterfaceDecl, Member, Modifier, OtherDecl, PropertyDecl, TypeSyntax};

    fn class(name: &str, members: Vec<Member>) -> Declaration {
        Declaration::Class(ClassDecl {
            name: name.into(),
            members,
            ..Default::default()
        })
    }

    fn broken_property() -> Member {
        Member::Property(PropertyDecl {
            attributes: Vec::new(),
            modifiers: vec![Modifier::Public],
            ty: TypeSyntax::Tuple {
                elements: vec![TypeSyntax::predefined("int"), TypeSyntax::predefined("int")],
            },
            name: "Pair".into(),
            accessors: Vec::new(),
            expression_body: None,
            initializer: None,
        })
    }

    fn program() -> CompilationUnit {
        CompilationUnit {
            usings: vec!["System".into()],
            members: vec![Declaration::Namespace(NamespaceDecl {
                name: "App.Models".into(),
                members: vec![
                    class("Good", Vec::new()),
                    class("Bad", vec![broken_property()]),
                    Declaration::Interface(InterfaceDecl {
                        name: "IShape".into(),
                        members: Vec::new(),
                        ..Default::default()
                    }),
                ],
            })],
        }
    }

    #[test]
    fn namespace_members_are_exported_and_independent() {
        let unit = program();
        let translation = ProgramWalker::new(&unit, WalkContext::default(), ErrorPolicy::Skip)
            .walk()
            .unwrap();
        assert_eq!(translation.blocks.len(), 1);
        assert_eq!(translation.blocks[0].name, "App.Models");
        assert_eq!(
            translation.text(),
            "namespace App.Models {\n    export class Good {\n    }\n\n    export interface IShape {\n    }\n}\n"
        );
        assert_eq!(translation.failures.len(), 1);
        assert_eq!(translation.failures[0].name, "Bad");
    }

    #[test]
    fn abort_policy_returns_first_error() {
        let unit = program();
        let err = ProgramWalker::new(&unit, WalkContext::default(), ErrorPolicy::Abort)
            .walk()
            .unwrap_err();
        assert_eq!(
            err,
            TranslateError::UnsupportedType {
                kind: "tuple type".into()
            }
        );
    }

    #[test]
    fn unmodelled_declarations_are_failures() {
        let unit = CompilationUnit {
            usings: Vec::new(),
            members: vec![
                Declaration::Other(OtherDecl {
                    kind: "enum_declaration".into(),
                    text: "enum Color { Red }".into(),
                }),
                class("Shape", Vec::new()),
            ],
        };
        let translation = ProgramWalker::new(&unit, WalkContext::default(), ErrorPolicy::Skip)
            .walk()
            .unwrap();
        assert_eq!(translation.text(), "class Shape {\n}\n");
        assert_eq!(
            translation.failures[0].error,
            TranslateError::UnsupportedDeclaration {
                kind: "enum_declaration".into()
            }
        );
    }
}
