//! JSON syntax-tree reader.
//!
//! External parsers hand over a serialized [`CompilationUnit`]; node
//! variants are tagged by their `kind` field.

use crate::syntax::CompilationUnit;
use crate::traits::{ReadError, Reader};

pub static JSON_READER: JsonSyntaxReader = JsonSyntaxReader;

pub struct JsonSyntaxReader;

impl Reader for JsonSyntaxReader {
    fn language(&self) -> &'static str {
        "json"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn read(&self, source: &str) -> Result<CompilationUnit, ReadError> {
        read_json(source)
    }
}

pub fn read_json(source: &str) -> Result<CompilationUnit, ReadError> {
    serde_json::from_str(source).map_err(|err| ReadError::Parse(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Declaration, Member, Stmt};

    #[test]
    fn reads_tagged_tree() {
        let source = r#"{
            "usings": ["System"],
            "members": [{
                "kind": "class",
                "modifiers": ["public"],
                "name": "Point",
                "members": [
                    {
                        "kind": "field",
                        "modifiers": ["private"],
                        "declaration": {
                            "type": {"kind": "predefined", "keyword": "int"},
                            "declarators": [{"name": "x"}]
                        }
                    },
                    {
                        "kind": "method",
                        "return_type": {"kind": "predefined", "keyword": "void"},
                        "name": "Reset",
                        "parameters": [],
                        "body": {"block": {"statements": [{"kind": "break"}]}}
                    }
                ]
            }]
        }"#;
        let unit = read_json(source).unwrap();
        let Declaration::Class(class) = &unit.members[0] else {
            panic!("expected a class");
        };
        assert_eq!(class.name, "Point");
        assert!(matches!(class.members[0], Member::Field(_)));
        let Member::Method(method) = &class.members[1] else {
            panic!("expected a method");
        };
        let Some(crate::syntax::FunctionBody::Block(block)) = &method.body else {
            panic!("expected a block body");
        };
        assert_eq!(block.statements, vec![Stmt::Break]);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(read_json("{\"members\": [{\"kind\": \"class\"}]}"), Err(ReadError::Parse(_))));
    }
}
