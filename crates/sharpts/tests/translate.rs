//! End-to-end translation of hand-built and JSON syntax trees.

use sharpts::syntax::*;
use sharpts::{
    DeclarationIndex, ErrorPolicy, TranslateError, TranslationUnit, TypeKind, WalkContext, WalkEvent,
    build_expression, build_statements, input::JSON_READER, map_type, translate_source, translate_unit,
};

fn class(name: &str, members: Vec<Member>) -> ClassDecl {
    ClassDecl {
        modifiers: vec![Modifier::Public],
        name: name.into(),
        members,
        ..Default::default()
    }
}

fn field(modifiers: Vec<Modifier>, ty: TypeSyntax, name: &str, initializer: Option<Expr>) -> Member {
    Member::Field(FieldDecl {
        attributes: Vec::new(),
        modifiers,
        declaration: VariableDeclaration::single(ty, name, initializer),
    })
}

fn method(name: &str, parameters: Vec<Parameter>, statements: Vec<Stmt>) -> Member {
    Member::Method(MethodDecl {
        attributes: Vec::new(),
        modifiers: vec![Modifier::Public],
        return_type: TypeSyntax::predefined("void"),
        name: name.into(),
        type_parameters: Vec::new(),
        parameters,
        body: Some(FunctionBody::Block(Block::new(statements))),
    })
}

fn unit_of(declarations: Vec<Declaration>) -> CompilationUnit {
    CompilationUnit {
        usings: Vec::new(),
        members: declarations,
    }
}

#[test]
fn integral_field_with_literal_initializer() {
    let node = class(
        "Holder",
        vec![field(vec![Modifier::Public], TypeSyntax::predefined("int"), "x", Some(Expr::int(7)))],
    );
    let translation = translate_unit(
        &unit_of(vec![Declaration::Class(node)]),
        WalkContext::default(),
        ErrorPolicy::Abort,
    )
    .unwrap();
    insta::assert_snapshot!(translation.text(), @r"
    export class Holder {
        public x: number = 7;
    }
    ");
}

#[test]
fn enumerated_loop_becomes_for_each_closure() {
    let log = Stmt::expression(Expr::call(
        Expr::member(Expr::identifier("console"), "log"),
        vec![Expr::identifier("x")],
    ));
    let loop_stmt = Stmt::ForEach(ForEachStmt {
        ty: TypeSyntax::predefined("string"),
        identifier: "x".into(),
        collection: Expr::identifier("names"),
        body: Box::new(Stmt::block(vec![log])),
    });
    let node = class(
        "Greeter",
        vec![method(
            "GreetAll",
            vec![Parameter::new(
                Some(TypeSyntax::generic("List", vec![TypeSyntax::predefined("string")])),
                "names",
            )],
            vec![loop_stmt],
        )],
    );
    let translation = translate_unit(
        &unit_of(vec![Declaration::Class(node)]),
        WalkContext::default(),
        ErrorPolicy::Abort,
    )
    .unwrap();
    insta::assert_snapshot!(translation.text(), @r"
    export class Greeter {
        public GreetAll(names: List<string>): void {
            names.forEach((x: string) => {
                console.log(x);
            });
        }
    }
    ");
}

#[test]
fn expressions_render_in_target_form() {
    let this_count = build_expression(&Expr::member(Expr::This, "Count"), None).unwrap();
    assert_eq!(this_count.translate(), "this.Count");

    let creation = Expr::new_object(
        TypeSyntax::identifier("Pair"),
        vec![Expr::identifier("left"), Expr::string("right")],
    );
    assert_eq!(build_expression(&creation, None).unwrap().translate(), "new Pair(left, \"right\")");

    let unknown = Expr::other("interpolated_string_expression", "$\"{count} items\"");
    assert_eq!(build_expression(&unknown, None).unwrap().translate(), "$\"{count} items\"");
}

#[test]
fn declared_type_names_keep_their_spelling() {
    let builder = Expr::new_object(TypeSyntax::identifier("StringBuilder"), Vec::new());
    assert_eq!(build_expression(&builder, None).unwrap().translate(), "new StringBuilder()");
    let point = Expr::new_object(TypeSyntax::identifier("Point"), vec![Expr::int(1), Expr::int(2)]);
    assert_eq!(build_expression(&point, None).unwrap().translate(), "new Point(1, 2)");

    let mut node = class("Doc", Vec::new());
    node.base_types = vec![TypeSyntax::identifier("Paint"), TypeSyntax::identifier("IPrintable")];
    let translation = translate_unit(
        &unit_of(vec![Declaration::Class(node)]),
        WalkContext::default(),
        ErrorPolicy::Abort,
    )
    .unwrap();
    assert_eq!(
        translation.text(),
        "export class Doc extends Paint implements IPrintable {\n}\n"
    );
}

#[test]
fn literals_render_canonically() {
    let cases = [
        (Expr::int(42), "42"),
        (Expr::string("hi"), "\"hi\""),
        (Expr::literal(LiteralValue::Character('c')), "'c'"),
        (Expr::boolean(true), "true"),
        (Expr::null(), "null"),
    ];
    for (expr, expected) in cases {
        assert_eq!(build_expression(&expr, None).unwrap().translate(), expected);
    }
}

#[test]
fn translation_is_idempotent() {
    let statements = vec![Stmt::If(IfStmt {
        condition: Expr::binary(Expr::identifier("a"), BinaryKind::LessThan, Expr::identifier("b")),
        then: Box::new(Stmt::block(vec![Stmt::ret(Some(Expr::identifier("a")))])),
        otherwise: None,
    })];
    for unit in build_statements(&statements, None).unwrap() {
        assert_eq!(unit.translate(), unit.translate());
    }
}

#[test]
fn nested_generics_and_nullable_arrays() {
    let nested = TypeSyntax::generic(
        "Dictionary",
        vec![
            TypeSyntax::predefined("string"),
            TypeSyntax::generic("List", vec![TypeSyntax::predefined("int")]),
        ],
    );
    assert_eq!(map_type(&nested).unwrap(), "Dictionary<string, List<number>>");
    let nullable_array = TypeSyntax::array(TypeSyntax::nullable(TypeSyntax::predefined("int")));
    assert_eq!(map_type(&nullable_array).unwrap(), "number|null[]");
    let array_of_lists = TypeSyntax::array(TypeSyntax::generic("List", vec![TypeSyntax::predefined("string")]));
    assert_eq!(map_type(&array_of_lists).unwrap(), "List<string>[]");
}

#[test]
fn semantic_model_decides_base_class_and_interfaces() {
    let mut node = class("Widget", Vec::new());
    node.base_types = vec![TypeSyntax::identifier("Observer"), TypeSyntax::identifier("Control")];
    let unit = unit_of(vec![Declaration::Class(node)]);

    let mut index = DeclarationIndex::new();
    index.insert("Observer", TypeKind::Interface);
    index.insert("Control", TypeKind::Class);
    let cx = WalkContext::default().with_semantic(&index);
    let translation = translate_unit(&unit, cx, ErrorPolicy::Abort).unwrap();
    assert_eq!(
        translation.text(),
        "export class Widget extends Control implements Observer {\n}\n"
    );
}

#[test]
fn failing_declarations_are_skipped_or_abort() {
    let broken = class(
        "Broken",
        vec![field(
            Vec::new(),
            TypeSyntax::Tuple {
                elements: vec![TypeSyntax::predefined("int"), TypeSyntax::predefined("int")],
            },
            "pair",
            None,
        )],
    );
    let unit = unit_of(vec![
        Declaration::Class(broken),
        Declaration::Class(class("Fine", Vec::new())),
    ]);

    let translation = translate_unit(&unit, WalkContext::default(), ErrorPolicy::Skip).unwrap();
    assert_eq!(translation.text(), "export class Fine {\n}\n");
    assert_eq!(translation.failures.len(), 1);
    assert_eq!(translation.failures[0].name, "Broken");
    assert!(
        translation
            .events
            .iter()
            .any(|event| matches!(event, WalkEvent::Visited { .. }))
    );

    let err = translate_unit(&unit, WalkContext::default(), ErrorPolicy::Abort).unwrap_err();
    assert_eq!(
        err,
        TranslateError::UnsupportedType {
            kind: "tuple type".into()
        }
    );
}

#[test]
fn json_trees_translate_like_parsed_ones() {
    let source = r#"{
        "members": [{
            "kind": "namespace",
            "name": "Shop",
            "members": [{
                "kind": "interface",
                "name": "IPriced",
                "members": [{
                    "kind": "property",
                    "type": {"kind": "predefined", "keyword": "double"},
                    "name": "Price",
                    "accessors": [{"kind": "get"}]
                }]
            }]
        }]
    }"#;
    let translation = translate_source(&JSON_READER, source, WalkContext::default(), ErrorPolicy::Abort).unwrap();
    insta::assert_snapshot!(translation.text(), @r"
    namespace Shop {
        export interface IPriced {
            readonly Price: number;
        }
    }
    ");
}
