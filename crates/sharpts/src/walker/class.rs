use super::members::{ConstructorWalker, MethodWalker, PropertyWalker};
use super::{WalkContext, WalkEvent};
use crate::error::TranslateError;
use crate::factories::FieldFactory;
use crate::helpers::ClassDeclaration;
use crate::ir::{ClassUnit, NamespaceUnit, Unit};
use crate::statement::Walker;
use crate::syntax::{ClassDecl, Member};

/// Translates one class declaration.
///
/// Fields go through [`FieldFactory`]; properties, methods and
/// constructors each get their own sub-walker with this class as the
/// originator. Base types are classified once, when the walker is built.
pub struct ClassWalker<'a> {
    helper: ClassDeclaration<'a>,
    cx: WalkContext<'a>,
    exported: bool,
    events: Vec<WalkEvent>,
}

impl<'a> ClassWalker<'a> {
    pub fn new(node: &'a ClassDecl, cx: WalkContext<'a>) -> Result<Self, TranslateError> {
        let helper = ClassDeclaration::new(node, cx.semantic)?;
        Ok(Self {
            exported: helper.is_public(),
            helper,
            cx,
            events: Vec::new(),
        })
    }

    /// Force the `export` prefix, as for declarations inside a namespace.
    pub fn exported(mut self) -> Self {
        self.exported = true;
        self
    }

    /// Translate the class and return it with the events of its members.
    pub fn walk_with_events(mut self) -> Result<(Unit, Vec<WalkEvent>), TranslateError> {
        let node = self.helper.node;
        let name = self.helper.name();
        let mut unit = ClassUnit::create(name);
        unit.set_exported(self.exported);
        unit.set_type_parameters(node.type_parameters.clone());
        if let Some(base) = &self.helper.base_class {
            unit.set_base(base.name.clone());
        }
        for interface in &self.helper.interfaces {
            unit.add_interface(interface.name.clone());
        }
        for member in &node.members {
            if let Some(member_unit) = self.member(member)? {
                unit.add_member(member_unit);
            }
        }
        self.events.push(WalkEvent::visited(name, "class declaration", name));

        let unit = match self.cx.dialect.namespace_override(node) {
            Some(namespace) => {
                unit.set_exported(true);
                let mut wrapper = NamespaceUnit::create(namespace);
                wrapper.add_member(unit.into());
                wrapper.into()
            }
            None => unit.into(),
        };
        Ok((unit, self.events))
    }

    fn member(&mut self, member: &'a Member) -> Result<Option<Unit>, TranslateError> {
        let originator = self.helper.name();
        let dialect = self.cx.dialect;
        let (name, unit) = match member {
            Member::Field(field) => {
                let name = field.declaration.declarators.first().map_or("", |d| d.name.as_str());
                let unit = FieldFactory::new(member, self.cx.semantic, dialect).create()?;
                (name, unit.map(Unit::from))
            }
            Member::Property(property) if dialect.skip_property(property) => (property.name.as_str(), None),
            Member::Property(property) => {
                let unit = PropertyWalker::new(property, self.cx, originator)?.walk()?;
                (property.name.as_str(), Some(unit))
            }
            Member::Method(method) if dialect.skip_method(method) => (method.name.as_str(), None),
            Member::Method(method) => {
                let unit = MethodWalker::new(method, self.cx, originator)?.walk()?;
                (method.name.as_str(), Some(unit))
            }
            Member::Constructor(constructor) if dialect.skip_constructor(constructor) => {
                (constructor.name.as_str(), None)
            }
            Member::Constructor(constructor) => {
                let unit = ConstructorWalker::new(constructor, self.cx, originator)?.walk()?;
                (constructor.name.as_str(), Some(unit))
            }
            Member::Other(other) => {
                tracing::warn!(class = originator, kind = %other.kind, "member kind not translated, skipping");
                ("", None)
            }
        };
        let event = match &unit {
            Some(_) => WalkEvent::visited(originator, member.kind_name(), name),
            None => WalkEvent::skipped(originator, member.kind_name(), name),
        };
        self.events.push(event);
        Ok(unit)
    }
}

impl Walker for ClassWalker<'_> {
    fn walk(self) -> Result<Unit, TranslateError> {
        Ok(self.walk_with_events()?.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::SCRIPT_SHARP;
    use crate::ir::TranslationUnit;
    use crate::semantic::{DeclarationIndex, TypeKind};
    use crate::syntax::{
        Attribute, Block, Expr, FieldDecl, MethodDecl, Modifier, OtherDecl, Stmt, TypeSyntax, VariableDeclaration,
    };

    fn field(name: &str, modifiers: Vec<Modifier>) -> Member {
        Member::Field(FieldDecl {
            attributes: Vec::new(),
            modifiers,
            declaration: VariableDeclaration::single(TypeSyntax::predefined("int"), name, Some(Expr::int(0))),
        })
    }

    fn method(name: &str, attributes: Vec<Attribute>) -> Member {
        Member::Method(MethodDecl {
            attributes,
            modifiers: vec![Modifier::Public],
            return_type: TypeSyntax::predefined("void"),
            name: name.into(),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            body: Some(crate::syntax::FunctionBody::Block(Block::new(vec![Stmt::expression(
                Expr::member(Expr::This, "count"),
            )]))),
        })
    }

    fn counter() -> ClassDecl {
        ClassDecl {
            modifiers: vec![Modifier::Public],
            name: "Counter".into(),
            base_types: vec![TypeSyntax::identifier("Widget"), TypeSyntax::identifier("Resettable")],
            members: vec![
                field("count", vec![Modifier::Private]),
                field("instances", vec![Modifier::Private, Modifier::Static]),
                method("Touch", Vec::new()),
                method("Debug", vec![Attribute::new("ScriptSkip")]),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn renders_class_with_bases_and_members() {
        let mut index = DeclarationIndex::new();
        index.insert("Resettable", TypeKind::Interface);
        let node = counter();
        let cx = WalkContext::default().with_semantic(&index);
        let (unit, events) = ClassWalker::new(&node, cx).unwrap().walk_with_events().unwrap();
        assert_eq!(
            unit.translate(),
            "export class Counter extends Widget implements Resettable {\n    \
             private count: number = 0;\n    \
             private static instances: number = 0;\n\n    \
             public Touch(): void {\n        this.count;\n    }\n\n    \
             public Debug(): void {\n        this.count;\n    }\n}"
        );
        assert_eq!(events.len(), 5);
        assert!(events.iter().all(|e| matches!(e, WalkEvent::Visited { .. })));
    }

    #[test]
    fn script_sharp_dialect_suppresses_members_and_wraps_namespace() {
        let mut node = counter();
        node.attributes.push(Attribute {
            name: "ScriptNamespace".into(),
            arguments: vec![Expr::string("app")],
        });
        node.members.push(Member::Other(OtherDecl {
            kind: "event_field_declaration".into(),
            text: "public event Action Changed;".into(),
        }));
        let cx = WalkContext::new(&SCRIPT_SHARP);
        let (unit, events) = ClassWalker::new(&node, cx).unwrap().walk_with_events().unwrap();
        assert_eq!(
            unit.translate(),
            "namespace app {\n    \
             export class Counter extends Widget implements Resettable {\n        \
             private count: number = 0;\n\n        \
             public Touch(): void {\n            this.count;\n        }\n    }\n}"
        );
        let skipped: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, WalkEvent::Skipped { .. }))
            .map(WalkEvent::name)
            .collect();
        assert_eq!(skipped, ["instances", "Debug", ""]);
    }

    #[test]
    fn member_failure_fails_the_class() {
        let mut node = counter();
        node.members.push(Member::Field(FieldDecl {
            attributes: Vec::new(),
            modifiers: Vec::new(),
            declaration: VariableDeclaration::single(
                TypeSyntax::Pointer {
                    inner: Box::new(TypeSyntax::predefined("int")),
                },
                "raw",
                None,
            ),
        }));
        let err = ClassWalker::new(&node, WalkContext::default()).unwrap().walk().unwrap_err();
        assert!(matches!(err, TranslateError::UnsupportedType { .. }));
    }
}
