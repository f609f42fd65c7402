//! Translation of real C# source through the tree-sitter reader.

#![cfg(feature = "read-csharp")]

use sharpts::dialect::SCRIPT_SHARP;
use sharpts::input::CSHARP_READER;
use sharpts::{ErrorPolicy, SourceError, TranslateError, WalkContext, translate_source};

fn translate(source: &str, cx: WalkContext<'_>) -> String {
    translate_source(&CSHARP_READER, source, cx, ErrorPolicy::Abort)
        .expect("translation failed")
        .text()
}

#[test]
fn namespace_with_interface_and_class() {
    let source = r#"
using System.Collections.Generic;

namespace Shop.Models
{
    public interface ICart
    {
        int Count { get; }
        void Add(string item);
    }

    public class Cart : EntityBase, ICart
    {
        private List<string> items = new List<string>();
        public int Count { get; private set; }

        public Cart(string owner) : base(owner)
        {
            Count = 0;
        }

        public void Add(string item)
        {
            items.Add(item);
            Count += 1;
        }

        public bool IsEmpty() => Count == 0;
    }
}
"#;
    insta::assert_snapshot!(translate(source, WalkContext::default()), @r"
    namespace Shop.Models {
        export interface ICart {
            readonly Count: number;
            Add(item: string): void;
        }

        export class Cart extends EntityBase implements ICart {
            private items: List<string> = new List<string>();
            public Count: number;

            public constructor(owner: string) {
                super(owner);
                Count = 0;
            }

            public Add(item: string): void {
                items.Add(item);
                Count += 1;
            }

            public IsEmpty(): boolean {
                return Count == 0;
            }
        }
    }
    ");
}

#[test]
fn loops_and_verbatim_expressions() {
    let source = r#"
public class Greeter
{
    public void GreetAll(List<string> names)
    {
        var count = names.Count;
        foreach (string name in names)
        {
            Console.WriteLine(name);
        }
        var label = $"{count} greeted";
    }
}
"#;
    insta::assert_snapshot!(translate(source, WalkContext::default()), @r#"
    export class Greeter {
        public GreetAll(names: List<string>): void {
            let count = names.Count;
            names.forEach((name: string) => {
                Console.WriteLine(name);
            });
            let label = $"{count} greeted";
        }
    }
    "#);
}

#[test]
fn script_sharp_dialect_drops_skipped_members() {
    let source = r#"
[ScriptNamespace("shop")]
public class Basket
{
    private static double created = 0;
    private double total;

    [ScriptSkip]
    public void Dump() { }

    public void Add(double price)
    {
        if (price > 0)
        {
            total += price;
        }
    }
}
"#;
    insta::assert_snapshot!(translate(source, WalkContext::new(&SCRIPT_SHARP)), @r"
    namespace shop {
        export class Basket {
            private total: number;

            public Add(price: number): void {
                if (price > 0) {
                    total += price;
                }
            }
        }
    }
    ");
}

#[test]
fn unsupported_statements_fail_the_declaration() {
    let source = r#"
public class Locker
{
    public void Run()
    {
        lock (this) { }
    }
}

public class Plain { }
"#;
    let translation =
        translate_source(&CSHARP_READER, source, WalkContext::default(), ErrorPolicy::Skip).unwrap();
    assert_eq!(translation.text(), "export class Plain {\n}\n");
    assert_eq!(translation.failures[0].name, "Locker");
    assert_eq!(
        translation.failures[0].error,
        TranslateError::UnsupportedStatement {
            kind: "lock_statement".into()
        }
    );
}

#[test]
fn syntax_errors_surface_as_read_errors() {
    let err = translate_source(&CSHARP_READER, "public class {", WalkContext::default(), ErrorPolicy::Skip)
        .unwrap_err();
    assert!(matches!(err, SourceError::Read(_)));
}
