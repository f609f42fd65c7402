use super::members::MethodWalker;
use super::{WalkContext, WalkEvent};
use crate::error::TranslateError;
use crate::helpers::{InterfaceDeclaration, PropertyDeclaration};
use crate::ir::{FieldUnit, InterfaceUnit, Unit};
use crate::statement::Walker;
use crate::syntax::{InterfaceDecl, Member};

/// Translates an interface into method and property signatures.
pub struct InterfaceWalker<'a> {
    helper: InterfaceDeclaration<'a>,
    cx: WalkContext<'a>,
    exported: bool,
}

impl<'a> InterfaceWalker<'a> {
    pub fn new(node: &'a InterfaceDecl, cx: WalkContext<'a>) -> Result<Self, TranslateError> {
        let helper = InterfaceDeclaration::new(node, cx.semantic)?;
        Ok(Self {
            exported: helper.is_public(),
            helper,
            cx,
        })
    }

    /// Force the `export` prefix, as for declarations inside a namespace.
    pub fn exported(mut self) -> Self {
        self.exported = true;
        self
    }

    pub fn walk_with_events(self) -> Result<(Unit, Vec<WalkEvent>), TranslateError> {
        let node = self.helper.node;
        let name = node.name.as_str();
        let mut events = Vec::new();
        let mut unit = InterfaceUnit::create(name);
        unit.set_exported(self.exported);
        unit.set_type_parameters(node.type_parameters.clone());
        for base in &self.helper.bases {
            unit.add_base(base.name.clone());
        }
        for member in &node.members {
            let translated = match member {
                Member::Method(method) => {
                    let signature = MethodWalker::new(method, self.cx, name)?.walk()?;
                    Some((method.name.as_str(), signature))
                }
                Member::Property(property) => {
                    let helper = PropertyDeclaration::new(property)?;
                    let mut signature = FieldUnit::create(Default::default(), helper.name, helper.ty);
                    signature.set_readonly(!property.has_setter());
                    Some((helper.name, signature.into()))
                }
                other => {
                    tracing::warn!(interface = name, kind = other.kind_name(), "interface member not translated, skipping");
                    None
                }
            };
            match translated {
                Some((member_name, signature)) => {
                    events.push(WalkEvent::visited(name, member.kind_name(), member_name));
                    unit.add_member(signature);
                }
                None => events.push(WalkEvent::skipped(name, member.kind_name(), "")),
            }
        }
        events.push(WalkEvent::visited(name, "interface declaration", name));
        Ok((unit.into(), events))
    }
}

impl Walker for InterfaceWalker<'_> {
    fn walk(self) -> Result<Unit, TranslateError> {
        Ok(self.walk_with_events()?.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::TranslationUnit;
    use crate::syntax::{Accessor, AccessorKind, MethodDecl, Modifier, Parameter, PropertyDecl, TypeSyntax};

    #[test]
    fn renders_signatures() {
        let node = InterfaceDecl {
            modifiers: vec![Modifier::Public],
            name: "IRepository".into(),
            type_parameters: vec!["T".into()],
            base_types: vec![TypeSyntax::identifier("IDisposable")],
            members: vec![
                Member::Property(PropertyDecl {
                    attributes: Vec::new(),
                    modifiers: Vec::new(),
                    ty: TypeSyntax::predefined("int"),
                    name: "Count".into(),
                    accessors: vec![Accessor {
                        kind: AccessorKind::Get,
                        modifiers: Vec::new(),
                        body: None,
                    }],
                    expression_body: None,
                    initializer: None,
                }),
                Member::Method(MethodDecl {
                    attributes: Vec::new(),
                    modifiers: Vec::new(),
                    return_type: TypeSyntax::identifier("T"),
                    name: "Find".into(),
                    type_parameters: Vec::new(),
                    parameters: vec![Parameter::new(Some(TypeSyntax::predefined("string")), "key")],
                    body: None,
                }),
            ],
            ..Default::default()
        };
        let (unit, events) = InterfaceWalker::new(&node, WalkContext::default())
            .unwrap()
            .walk_with_events()
            .unwrap();
        assert_eq!(
            unit.translate(),
            "export interface IRepository<T> extends IDisposable {\n    readonly Count: number;\n    Find(key: string): T;\n}"
        );
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn base_names_keep_their_spelling() {
        let node = InterfaceDecl {
            modifiers: vec![Modifier::Public],
            name: "IDocument".into(),
            base_types: vec![TypeSyntax::identifier("IStringable"), TypeSyntax::identifier("IPointable")],
            ..Default::default()
        };
        let unit = InterfaceWalker::new(&node, WalkContext::default()).unwrap().walk().unwrap();
        assert_eq!(
            unit.translate(),
            "export interface IDocument extends IStringable, IPointable {\n}"
        );
    }
}
