use super::WalkContext;
use crate::error::TranslateError;
use crate::expression::build_expression;
use crate::helpers::{ConstructorDeclaration, MethodDeclaration, ParameterInfo, PropertyDeclaration};
use crate::ir::lexemes;
use crate::ir::{
    ArgumentUnit, ExpressionStatementUnit, FieldUnit, GroupUnit, IdentifierUnit, InvocationUnit,
    KeywordStatementUnit, MethodKind, MethodUnit, Unit,
};
use crate::statement::{Walker, build_statements};
use crate::syntax::{
    Accessor, AccessorKind, ConstructorDecl, Expr, FunctionBody, InitializerKind, MethodDecl, PropertyDecl,
};

fn arguments(parameters: Vec<ParameterInfo<'_>>, cx: WalkContext<'_>) -> Result<Vec<Unit>, TranslateError> {
    parameters
        .into_iter()
        .map(|parameter| {
            let mut unit = ArgumentUnit::create(parameter.name, parameter.ty);
            if let Some(default) = parameter.default {
                unit = unit.with_default(build_expression(default, cx.semantic)?);
            }
            Ok(unit.into())
        })
        .collect()
}

/// Statements of a block body, or a single statement for an expression
/// body: `return e;` when the member returns a value, `e;` otherwise.
fn function_body(body: &FunctionBody, returns_value: bool, cx: WalkContext<'_>) -> Result<Vec<Unit>, TranslateError> {
    match body {
        FunctionBody::Block(block) => build_statements(&block.statements, cx.semantic),
        FunctionBody::Expression(expression) => Ok(vec![expression_body(expression, returns_value, cx)?]),
    }
}

fn expression_body(expression: &Expr, returns_value: bool, cx: WalkContext<'_>) -> Result<Unit, TranslateError> {
    let expression = build_expression(expression, cx.semantic)?;
    Ok(if returns_value {
        KeywordStatementUnit::create(lexemes::RETURN_KEYWORD, Some(expression)).into()
    } else {
        ExpressionStatementUnit::create(expression).into()
    })
}

/// Translates a method, or a method signature when it has no body.
pub struct MethodWalker<'a> {
    node: &'a MethodDecl,
    helper: MethodDeclaration<'a>,
    cx: WalkContext<'a>,
    originator: &'a str,
}

impl<'a> MethodWalker<'a> {
    pub fn new(node: &'a MethodDecl, cx: WalkContext<'a>, originator: &'a str) -> Result<Self, TranslateError> {
        Ok(Self {
            node,
            helper: MethodDeclaration::new(node)?,
            cx,
            originator,
        })
    }
}

impl Walker for MethodWalker<'_> {
    fn walk(self) -> Result<Unit, TranslateError> {
        let helper = self.helper;
        tracing::debug!(originator = self.originator, method = helper.name, "walking method");
        let returns_value = helper.return_type != lexemes::VOID_TYPE;
        let mut unit = MethodUnit::create(MethodKind::Method, helper.visibility, helper.name);
        unit.set_type_parameters(self.node.type_parameters.clone());
        unit.set_return_type(helper.return_type);
        for argument in arguments(helper.parameters, self.cx)? {
            unit.add_argument(argument);
        }
        if let Some(body) = &self.node.body {
            unit.open_body();
            for statement in function_body(body, returns_value, self.cx)? {
                unit.add_statement(statement);
            }
        }
        Ok(unit.into())
    }
}

/// Translates an instance constructor, or a static constructor into a
/// `static { }` block.
pub struct ConstructorWalker<'a> {
    node: &'a ConstructorDecl,
    helper: ConstructorDeclaration<'a>,
    cx: WalkContext<'a>,
    originator: &'a str,
}

impl<'a> ConstructorWalker<'a> {
    pub fn new(node: &'a ConstructorDecl, cx: WalkContext<'a>, originator: &'a str) -> Result<Self, TranslateError> {
        Ok(Self {
            node,
            helper: ConstructorDeclaration::new(node)?,
            cx,
            originator,
        })
    }

    /// `super(arguments);` for a `: base(...)` initializer.
    fn base_call(&self) -> Result<Option<Unit>, TranslateError> {
        let Some(initializer) = &self.node.initializer else {
            return Ok(None);
        };
        if initializer.kind == InitializerKind::This {
            return Err(TranslateError::UnsupportedStatement {
                kind: "this(...) constructor initializer".to_string(),
            });
        }
        let mut call = InvocationUnit::create(IdentifierUnit::create(lexemes::SUPER_KEYWORD)?.into());
        for argument in &initializer.arguments {
            call.add_argument(build_expression(&argument.expression, self.cx.semantic)?);
        }
        Ok(Some(ExpressionStatementUnit::create(call.into()).into()))
    }
}

impl Walker for ConstructorWalker<'_> {
    fn walk(self) -> Result<Unit, TranslateError> {
        tracing::debug!(originator = self.originator, "walking constructor");
        let kind = if self.helper.is_static() {
            MethodKind::StaticInitializer
        } else {
            MethodKind::Constructor
        };
        let mut unit = MethodUnit::create(kind, self.helper.visibility, &self.node.name);
        let base_call = self.base_call()?;
        for argument in arguments(self.helper.parameters, self.cx)? {
            unit.add_argument(argument);
        }
        if self.node.body.is_some() || base_call.is_some() {
            unit.open_body();
        }
        if let Some(call) = base_call {
            unit.add_statement(call);
        }
        if let Some(body) = &self.node.body {
            for statement in build_statements(&body.statements, self.cx.semantic)? {
                unit.add_statement(statement);
            }
        }
        Ok(unit.into())
    }
}

/// Translates a property: auto-properties become fields, properties with
/// bodies become a getter and/or setter.
pub struct PropertyWalker<'a> {
    node: &'a PropertyDecl,
    helper: PropertyDeclaration<'a>,
    cx: WalkContext<'a>,
    originator: &'a str,
}

impl<'a> PropertyWalker<'a> {
    pub fn new(node: &'a PropertyDecl, cx: WalkContext<'a>, originator: &'a str) -> Result<Self, TranslateError> {
        Ok(Self {
            node,
            helper: PropertyDeclaration::new(node)?,
            cx,
            originator,
        })
    }

    fn field(&self) -> Result<Unit, TranslateError> {
        let mut unit = FieldUnit::create(self.helper.visibility, self.helper.name, self.helper.ty.clone());
        unit.set_readonly(!self.node.has_setter());
        if let Some(initializer) = &self.node.initializer {
            unit.set_initializer(build_expression(initializer, self.cx.semantic)?);
        }
        Ok(unit.into())
    }

    fn getter(&self, body: Vec<Unit>) -> MethodUnit {
        let mut unit = MethodUnit::create(MethodKind::Getter, self.helper.visibility, self.helper.name);
        unit.set_return_type(self.helper.ty.clone());
        unit.open_body();
        for statement in body {
            unit.add_statement(statement);
        }
        unit
    }

    fn accessor(&self, accessor: &Accessor) -> Result<MethodUnit, TranslateError> {
        match accessor.kind {
            AccessorKind::Get => {
                let body = match &accessor.body {
                    Some(body) => function_body(body, true, self.cx)?,
                    None => Vec::new(),
                };
                Ok(self.getter(body))
            }
            AccessorKind::Set | AccessorKind::Init => {
                let mut unit = MethodUnit::create(MethodKind::Setter, self.helper.visibility, self.helper.name);
                let value = ArgumentUnit::create(lexemes::SETTER_PARAMETER, Some(self.helper.ty.clone()));
                unit.add_argument(value.into());
                unit.open_body();
                if let Some(body) = &accessor.body {
                    for statement in function_body(body, false, self.cx)? {
                        unit.add_statement(statement);
                    }
                }
                Ok(unit)
            }
        }
    }
}

impl Walker for PropertyWalker<'_> {
    fn walk(self) -> Result<Unit, TranslateError> {
        tracing::debug!(originator = self.originator, property = self.helper.name, "walking property");
        if let Some(expression) = &self.node.expression_body {
            let body = vec![expression_body(expression, true, self.cx)?];
            return Ok(self.getter(body).into());
        }
        if self.node.is_auto() {
            return self.field();
        }
        let mut group = GroupUnit::create();
        for accessor in &self.node.accessors {
            group.add_member(self.accessor(accessor)?.into());
        }
        Ok(group.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::TranslationUnit;
    use crate::syntax::{
        Argument, Block, ConstructorInitializer, Modifier, Parameter, Stmt, TypeSyntax,
    };

    fn walk(walker: impl Walker) -> String {
        walker.walk().unwrap().translate()
    }

    fn property(accessors: Vec<Accessor>) -> PropertyDecl {
        PropertyDecl {
            attributes: Vec::new(),
            modifiers: vec![Modifier::Public],
            ty: TypeSyntax::predefined("string"),
            name: "Name".into(),
            accessors,
            expression_body: None,
            initializer: None,
        }
    }

    fn accessor(kind: AccessorKind, body: Option<Vec<Stmt>>) -> Accessor {
        Accessor {
            kind,
            modifiers: Vec::new(),
            body: body.map(|statements| FunctionBody::Block(Block::new(statements))),
        }
    }

    #[test]
    fn method_with_parameters_and_body() {
        let mut count = Parameter::new(Some(TypeSyntax::predefined("int")), "count");
        count.default = Some(Expr::int(1));
        let node = MethodDecl {
            attributes: Vec::new(),
            modifiers: vec![Modifier::Protected],
            return_type: TypeSyntax::predefined("bool"),
            name: "Take".into(),
            type_parameters: vec!["T".into()],
            parameters: vec![Parameter::new(Some(TypeSyntax::identifier("T")), "item"), count],
            body: Some(FunctionBody::Block(Block::new(vec![Stmt::ret(Some(Expr::boolean(true)))]))),
        };
        let walker = MethodWalker::new(&node, WalkContext::default(), "Bag").unwrap();
        assert_eq!(
            walk(walker),
            "protected Take<T>(item: T, count: number = 1): boolean {\n    return true;\n}"
        );
    }

    #[test]
    fn expression_bodied_void_method_is_a_statement() {
        let node = MethodDecl {
            attributes: Vec::new(),
            modifiers: Vec::new(),
            return_type: TypeSyntax::predefined("void"),
            name: "Reset".into(),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            body: Some(FunctionBody::Expression(Box::new(Expr::call(Expr::identifier("Clear"), Vec::new())))),
        };
        let walker = MethodWalker::new(&node, WalkContext::default(), "Bag").unwrap();
        assert_eq!(walk(walker), "Reset(): void {\n    Clear();\n}");
    }

    #[test]
    fn constructor_calls_super_first() {
        let node = ConstructorDecl {
            attributes: Vec::new(),
            modifiers: vec![Modifier::Public],
            name: "Child".into(),
            parameters: vec![Parameter::new(Some(TypeSyntax::predefined("string")), "name")],
            initializer: Some(ConstructorInitializer {
                kind: InitializerKind::Base,
                arguments: vec![Argument::new(Expr::identifier("name"))],
            }),
            body: Some(Block::new(vec![Stmt::expression(Expr::call(Expr::identifier("Init"), Vec::new()))])),
        };
        let walker = ConstructorWalker::new(&node, WalkContext::default(), "Child").unwrap();
        assert_eq!(
            walk(walker),
            "public constructor(name: string) {\n    super(name);\n    Init();\n}"
        );
    }

    #[test]
    fn static_constructor_is_a_static_block() {
        let node = ConstructorDecl {
            attributes: Vec::new(),
            modifiers: vec![Modifier::Static],
            name: "Registry".into(),
            parameters: Vec::new(),
            initializer: None,
            body: Some(Block::new(Vec::new())),
        };
        let walker = ConstructorWalker::new(&node, WalkContext::default(), "Registry").unwrap();
        assert_eq!(walk(walker), "static {\n}");
    }

    #[test]
    fn auto_property_is_a_field() {
        let node = property(vec![accessor(AccessorKind::Get, None)]);
        let walker = PropertyWalker::new(&node, WalkContext::default(), "Person").unwrap();
        assert_eq!(walk(walker), "public readonly Name: string;");

        let mut node = property(vec![accessor(AccessorKind::Get, None), accessor(AccessorKind::Set, None)]);
        node.initializer = Some(Expr::string(""));
        let walker = PropertyWalker::new(&node, WalkContext::default(), "Person").unwrap();
        assert_eq!(walk(walker), "public Name: string = \"\";");
    }

    #[test]
    fn accessor_bodies_become_getter_and_setter() {
        let field = Expr::member(Expr::This, "name");
        let node = property(vec![
            accessor(AccessorKind::Get, Some(vec![Stmt::ret(Some(field.clone()))])),
            accessor(
                AccessorKind::Set,
                Some(vec![Stmt::expression(Expr::assign(
                    field,
                    crate::syntax::AssignmentKind::Simple,
                    Expr::identifier("value"),
                ))]),
            ),
        ]);
        let walker = PropertyWalker::new(&node, WalkContext::default(), "Person").unwrap();
        assert_eq!(
            walk(walker),
            "public get Name(): string {\n    return this.name;\n}\npublic set Name(value: string) {\n    this.name = value;\n}"
        );
    }

    #[test]
    fn expression_bodied_property_is_a_getter() {
        let mut node = property(Vec::new());
        node.expression_body = Some(Expr::member(Expr::This, "first"));
        let walker = PropertyWalker::new(&node, WalkContext::default(), "Person").unwrap();
        assert_eq!(walk(walker), "public get Name(): string {\n    return this.first;\n}");
    }
}
