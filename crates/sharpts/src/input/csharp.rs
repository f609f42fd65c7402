//! Tree-sitter based C# reader.
//!
//! Covers the declarations, statements and expressions the walkers
//! translate. Anything else is kept as an `Other` node holding its source
//! text, so the walkers can report it or copy it through.

use crate::syntax::*;
use crate::traits::{ReadError, Reader};
use tree_sitter::{Node, Parser, Tree};

/// Static instance of the C# reader for registry.
pub static CSHARP_READER: CSharpReader = CSharpReader;

/// C# reader using tree-sitter.
pub struct CSharpReader;

impl Reader for CSharpReader {
    fn language(&self) -> &'static str {
        "csharp"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["cs"]
    }

    fn read(&self, source: &str) -> Result<CompilationUnit, ReadError> {
        read_csharp(source)
    }
}

/// Parse C# source into the syntax model.
pub fn read_csharp(source: &str) -> Result<CompilationUnit, ReadError> {
    let mut parser = Parser::new();
    parser
        .set_language(&arborium_c_sharp::language().into())
        .map_err(|err| ReadError::Parse(err.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ReadError::Parse("failed to parse".into()))?;

    let ctx = ReadContext::new(source);
    ctx.read_compilation_unit(&tree)
}

fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !is_trivia(child.kind()))
        .collect()
}

fn all_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

fn fields<'t>(node: Node<'t>, name: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children_by_field_name(name, &mut cursor).collect()
}

fn child_of_kind<'t>(node: Node<'t>, kinds: &[&str]) -> Option<Node<'t>> {
    named_children(node)
        .into_iter()
        .find(|child| kinds.contains(&child.kind()))
}

fn is_trivia(kind: &str) -> bool {
    kind == "comment" || kind.starts_with("preproc")
}

/// The first node below `node` that is an error or a missing token.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    all_children(node)
        .into_iter()
        .filter(|child| child.has_error() || child.is_missing())
        .find_map(first_error)
}

struct ReadContext<'a> {
    source: &'a str,
}

impl<'a> ReadContext<'a> {
    fn new(source: &'a str) -> Self {
        Self { source }
    }

    fn node_text(&self, node: Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn required<'t>(&self, node: Node<'t>, field: &str) -> Result<Node<'t>, ReadError> {
        node.child_by_field_name(field)
            .ok_or_else(|| ReadError::Parse(format!("{} missing {}", node.kind(), field)))
    }

    fn read_compilation_unit(&self, tree: &Tree) -> Result<CompilationUnit, ReadError> {
        let root = tree.root_node();

        if root.has_error() {
            let message = match first_error(root) {
                Some(node) => {
                    let at = node.start_position();
                    format!("syntax error at {}:{}", at.row + 1, at.column + 1)
                }
                None => "syntax error in source".into(),
            };
            return Err(ReadError::Parse(message));
        }

        let mut usings = Vec::new();
        let members = self.read_declarations(&named_children(root), &mut usings)?;
        Ok(CompilationUnit { usings, members })
    }

    fn read_declarations(
        &self,
        nodes: &[Node],
        usings: &mut Vec<String>,
    ) -> Result<Vec<Declaration>, ReadError> {
        let mut declarations = Vec::new();
        for (i, node) in nodes.iter().enumerate() {
            match node.kind() {
                "using_directive" => usings.push(self.read_using(*node)),
                "extern_alias_directive" | "global_attribute" | "attribute_list" => {}
                "namespace_declaration" => {
                    let name = self.node_text(self.required(*node, "name")?).to_string();
                    let members = match node.child_by_field_name("body") {
                        Some(body) => self.read_declarations(&named_children(body), usings)?,
                        None => Vec::new(),
                    };
                    declarations.push(Declaration::Namespace(NamespaceDecl { name, members }));
                }
                // `namespace X;` covers everything after it, whether the
                // grammar nests those declarations or leaves them as siblings.
                "file_scoped_namespace_declaration" => {
                    let name = self.node_text(self.required(*node, "name")?).to_string();
                    let mut inner: Vec<Node> = named_children(*node)
                        .into_iter()
                        .filter(|child| Some(*child) != node.child_by_field_name("name"))
                        .collect();
                    inner.extend_from_slice(&nodes[i + 1..]);
                    let members = self.read_declarations(&inner, usings)?;
                    declarations.push(Declaration::Namespace(NamespaceDecl { name, members }));
                    break;
                }
                "class_declaration" => declarations.push(Declaration::Class(self.read_class(*node)?)),
                "interface_declaration" => {
                    declarations.push(Declaration::Interface(self.read_interface(*node)?))
                }
                kind => declarations.push(Declaration::Other(OtherDecl {
                    kind: kind.to_string(),
                    text: self.node_text(*node).to_string(),
                })),
            }
        }
        Ok(declarations)
    }

    fn read_using(&self, node: Node) -> String {
        let text = self.node_text(node).trim().trim_end_matches(';').trim();
        let text = text.strip_prefix("global").map(str::trim_start).unwrap_or(text);
        let text = text.strip_prefix("using").map(str::trim_start).unwrap_or(text);
        text.to_string()
    }

    fn read_attributes(&self, node: Node) -> Result<Vec<Attribute>, ReadError> {
        let mut attributes = Vec::new();
        for list in named_children(node)
            .into_iter()
            .filter(|child| child.kind() == "attribute_list")
        {
            for attribute in named_children(list)
                .into_iter()
                .filter(|child| child.kind() == "attribute")
            {
                let name = self.node_text(self.required(attribute, "name")?).to_string();
                let mut arguments = Vec::new();
                if let Some(args) = child_of_kind(attribute, &["attribute_argument_list"]) {
                    for arg in named_children(args) {
                        if let Some(expr) = named_children(arg).last() {
                            arguments.push(self.read_expr(*expr)?);
                        }
                    }
                }
                attributes.push(Attribute { name, arguments });
            }
        }
        Ok(attributes)
    }

    fn read_modifiers(&self, node: Node) -> Vec<Modifier> {
        all_children(node)
            .into_iter()
            .filter_map(|child| match child.kind() {
                "modifier" => Modifier::from_keyword(self.node_text(child).trim()),
                kind if !child.is_named() => Modifier::from_keyword(kind),
                _ => None,
            })
            .collect()
    }

    fn read_type_parameters(&self, node: Node) -> Vec<String> {
        let list = node
            .child_by_field_name("type_parameters")
            .or_else(|| child_of_kind(node, &["type_parameter_list"]));
        let Some(list) = list else {
            return Vec::new();
        };
        named_children(list)
            .into_iter()
            .filter(|child| child.kind() == "type_parameter")
            .map(|param| {
                let name = param.child_by_field_name("name").unwrap_or(param);
                self.node_text(name).to_string()
            })
            .collect()
    }

    fn read_base_types(&self, node: Node) -> Result<Vec<TypeSyntax>, ReadError> {
        let Some(list) = child_of_kind(node, &["base_list"]) else {
            return Ok(Vec::new());
        };
        named_children(list)
            .into_iter()
            .filter(|child| child.kind() != "argument_list")
            .map(|child| {
                let ty = match child.kind() {
                    "primary_constructor_base_type" => self.required(child, "type")?,
                    _ => child,
                };
                self.read_type(ty)
            })
            .collect()
    }

    fn read_class(&self, node: Node) -> Result<ClassDecl, ReadError> {
        Ok(ClassDecl {
            attributes: self.read_attributes(node)?,
            modifiers: self.read_modifiers(node),
            name: self.node_text(self.required(node, "name")?).to_string(),
            type_parameters: self.read_type_parameters(node),
            base_types: self.read_base_types(node)?,
            members: self.read_members(node)?,
        })
    }

    fn read_interface(&self, node: Node) -> Result<InterfaceDecl, ReadError> {
        Ok(InterfaceDecl {
            attributes: self.read_attributes(node)?,
            modifiers: self.read_modifiers(node),
            name: self.node_text(self.required(node, "name")?).to_string(),
            type_parameters: self.read_type_parameters(node),
            base_types: self.read_base_types(node)?,
            members: self.read_members(node)?,
        })
    }

    fn read_members(&self, node: Node) -> Result<Vec<Member>, ReadError> {
        let Some(body) = node.child_by_field_name("body") else {
            return Ok(Vec::new());
        };
        named_children(body)
            .into_iter()
            .map(|member| self.read_member(member))
            .collect()
    }

    fn read_member(&self, node: Node) -> Result<Member, ReadError> {
        match node.kind() {
            "field_declaration" => {
                let declaration = child_of_kind(node, &["variable_declaration"])
                    .ok_or_else(|| ReadError::Parse("field_declaration missing variable_declaration".into()))?;
                Ok(Member::Field(FieldDecl {
                    attributes: self.read_attributes(node)?,
                    modifiers: self.read_modifiers(node),
                    declaration: self.read_variable_declaration(declaration)?,
                }))
            }
            "property_declaration" => self.read_property(node).map(Member::Property),
            "method_declaration" => self.read_method(node).map(Member::Method),
            "constructor_declaration" => self.read_constructor(node).map(Member::Constructor),
            kind => Ok(Member::Other(OtherDecl {
                kind: kind.to_string(),
                text: self.node_text(node).to_string(),
            })),
        }
    }

    fn read_property(&self, node: Node) -> Result<PropertyDecl, ReadError> {
        let mut accessors = Vec::new();
        let list = node
            .child_by_field_name("accessors")
            .or_else(|| child_of_kind(node, &["accessor_list"]));
        if let Some(list) = list {
            for accessor in named_children(list)
                .into_iter()
                .filter(|child| child.kind() == "accessor_declaration")
            {
                accessors.push(self.read_accessor(accessor)?);
            }
        }

        let mut expression_body = None;
        let mut initializer = None;
        let value = node
            .child_by_field_name("value")
            .or_else(|| child_of_kind(node, &["arrow_expression_clause", "equals_value_clause"]));
        if let Some(value) = value {
            match value.kind() {
                "arrow_expression_clause" => expression_body = Some(self.read_clause_expr(value)?),
                "equals_value_clause" => initializer = Some(self.read_clause_expr(value)?),
                _ => initializer = Some(self.read_expr(value)?),
            }
        }

        Ok(PropertyDecl {
            attributes: self.read_attributes(node)?,
            modifiers: self.read_modifiers(node),
            ty: self.read_type(self.required(node, "type")?)?,
            name: self.node_text(self.required(node, "name")?).to_string(),
            accessors,
            expression_body,
            initializer,
        })
    }

    fn read_accessor(&self, node: Node) -> Result<Accessor, ReadError> {
        let keyword = all_children(node)
            .into_iter()
            .map(|child| child.kind())
            .find(|kind| matches!(*kind, "get" | "set" | "init"))
            .or_else(|| node.child_by_field_name("name").map(|name| self.node_text(name)));
        let kind = match keyword {
            Some("get") => AccessorKind::Get,
            Some("set") => AccessorKind::Set,
            Some("init") => AccessorKind::Init,
            _ => return Err(ReadError::Unsupported(self.node_text(node).to_string())),
        };
        Ok(Accessor {
            kind,
            modifiers: self.read_modifiers(node),
            body: self.read_function_body(node)?,
        })
    }

    /// `{ ... }` or `=> expr` of a method, accessor or lambda.
    fn read_function_body(&self, node: Node) -> Result<Option<FunctionBody>, ReadError> {
        let body = node
            .child_by_field_name("body")
            .or_else(|| child_of_kind(node, &["block", "arrow_expression_clause"]));
        let Some(body) = body else {
            return Ok(None);
        };
        let body = match body.kind() {
            "block" => FunctionBody::Block(self.read_block(body)?),
            "arrow_expression_clause" => FunctionBody::Expression(Box::new(self.read_clause_expr(body)?)),
            _ => FunctionBody::Expression(Box::new(self.read_expr(body)?)),
        };
        Ok(Some(body))
    }

    fn read_method(&self, node: Node) -> Result<MethodDecl, ReadError> {
        let returns = node
            .child_by_field_name("returns")
            .or_else(|| node.child_by_field_name("type"))
            .ok_or_else(|| ReadError::Parse("method_declaration missing returns".into()))?;
        Ok(MethodDecl {
            attributes: self.read_attributes(node)?,
            modifiers: self.read_modifiers(node),
            return_type: self.read_type(returns)?,
            name: self.node_text(self.required(node, "name")?).to_string(),
            type_parameters: self.read_type_parameters(node),
            parameters: self.read_parameters(self.required(node, "parameters")?)?,
            body: self.read_function_body(node)?,
        })
    }

    fn read_constructor(&self, node: Node) -> Result<ConstructorDecl, ReadError> {
        let initializer = match child_of_kind(node, &["constructor_initializer"]) {
            Some(init) => {
                let kind = if all_children(init).iter().any(|child| child.kind() == "this") {
                    InitializerKind::This
                } else {
                    InitializerKind::Base
                };
                let arguments = match child_of_kind(init, &["argument_list"]) {
                    Some(list) => self.read_arguments(list)?,
                    None => Vec::new(),
                };
                Some(ConstructorInitializer { kind, arguments })
            }
            None => None,
        };
        let body = match self.read_function_body(node)? {
            Some(FunctionBody::Block(block)) => Some(block),
            Some(FunctionBody::Expression(expr)) => Some(Block::new(vec![Stmt::expression(*expr)])),
            None => None,
        };
        Ok(ConstructorDecl {
            attributes: self.read_attributes(node)?,
            modifiers: self.read_modifiers(node),
            name: self.node_text(self.required(node, "name")?).to_string(),
            parameters: self.read_parameters(self.required(node, "parameters")?)?,
            initializer,
            body,
        })
    }

    fn read_parameters(&self, list: Node) -> Result<Vec<Parameter>, ReadError> {
        named_children(list)
            .into_iter()
            .filter(|child| child.kind() == "parameter")
            .map(|param| self.read_parameter(param))
            .collect()
    }

    fn read_parameter(&self, node: Node) -> Result<Parameter, ReadError> {
        let name_node = self.required(node, "name")?;
        let ty = match node.child_by_field_name("type") {
            Some(ty) => Some(self.read_type(ty)?),
            None => None,
        };
        let modifiers = all_children(node)
            .into_iter()
            .filter(|child| child.start_byte() < name_node.start_byte())
            .filter_map(|child| match child.kind() {
                "ref" | "out" | "in" | "params" | "this" | "scoped" => Some(child.kind().to_string()),
                "parameter_modifier" | "modifier" => Some(self.node_text(child).to_string()),
                _ => None,
            })
            .collect();
        Ok(Parameter {
            attributes: self.read_attributes(node)?,
            modifiers,
            ty,
            name: self.node_text(name_node).to_string(),
            default: self.read_trailing_value(node, name_node)?,
        })
    }

    /// The `= value` after `name`, with or without an `equals_value_clause`.
    fn read_trailing_value(&self, node: Node, name: Node) -> Result<Option<Expr>, ReadError> {
        let value = named_children(node)
            .into_iter()
            .filter(|child| child.start_byte() > name.start_byte())
            .find(|child| child.kind() != "bracketed_argument_list");
        match value {
            Some(clause) if clause.kind() == "equals_value_clause" => self.read_clause_expr(clause).map(Some),
            Some(expr) => self.read_expr(expr).map(Some),
            None => Ok(None),
        }
    }

    fn read_clause_expr(&self, clause: Node) -> Result<Expr, ReadError> {
        let expr = named_children(clause)
            .into_iter()
            .next()
            .ok_or_else(|| ReadError::Parse(format!("{} has no expression", clause.kind())))?;
        self.read_expr(expr)
    }

    fn read_variable_declaration(&self, node: Node) -> Result<VariableDeclaration, ReadError> {
        let ty = self.read_type(self.required(node, "type")?)?;
        let mut declarators = Vec::new();
        for declarator in named_children(node)
            .into_iter()
            .filter(|child| child.kind() == "variable_declarator")
        {
            let name = declarator
                .child_by_field_name("name")
                .or_else(|| child_of_kind(declarator, &["identifier"]))
                .ok_or_else(|| ReadError::Parse("variable_declarator missing name".into()))?;
            declarators.push(VariableDeclarator {
                name: self.node_text(name).to_string(),
                initializer: self.read_trailing_value(declarator, name)?,
            });
        }
        Ok(VariableDeclaration { ty, declarators })
    }

    fn read_type(&self, node: Node) -> Result<TypeSyntax, ReadError> {
        let ty = match node.kind() {
            "predefined_type" => TypeSyntax::predefined(self.node_text(node)),
            "implicit_type" => TypeSyntax::Implicit,
            "identifier" if self.node_text(node) == "var" => TypeSyntax::Implicit,
            "identifier" => TypeSyntax::identifier(self.node_text(node)),
            "generic_name" => {
                let (name, arguments) = self.read_generic_name(node)?;
                TypeSyntax::generic(name, arguments)
            }
            "array_type" => {
                let element = self.read_type(self.required(node, "type")?)?;
                let rank = match node.child_by_field_name("rank") {
                    Some(rank) => all_children(rank).iter().filter(|c| c.kind() == ",").count() + 1,
                    None => 1,
                };
                TypeSyntax::Array {
                    element: Box::new(element),
                    rank,
                }
            }
            "nullable_type" => TypeSyntax::nullable(self.read_inner_type(node)?),
            "pointer_type" => TypeSyntax::Pointer {
                inner: Box::new(self.read_inner_type(node)?),
            },
            "ref_type" => TypeSyntax::Ref {
                inner: Box::new(self.read_inner_type(node)?),
            },
            "qualified_name" => {
                let parts = named_children(node);
                match (parts.first(), parts.last()) {
                    (Some(left), Some(right)) if parts.len() >= 2 => {
                        TypeSyntax::qualified(self.read_type(*left)?, self.read_type(*right)?)
                    }
                    _ => return Err(ReadError::Parse("qualified_name needs two parts".into())),
                }
            }
            "tuple_type" => {
                let elements = named_children(node)
                    .into_iter()
                    .filter(|child| child.kind() == "tuple_element")
                    .map(|element| self.read_inner_type(element))
                    .collect::<Result<Vec<_>, _>>()?;
                TypeSyntax::Tuple { elements }
            }
            _ => TypeSyntax::identifier(self.node_text(node)),
        };
        Ok(ty)
    }

    fn read_inner_type(&self, node: Node) -> Result<TypeSyntax, ReadError> {
        let inner = node
            .child_by_field_name("type")
            .or_else(|| named_children(node).into_iter().next())
            .ok_or_else(|| ReadError::Parse(format!("{} missing type", node.kind())))?;
        self.read_type(inner)
    }

    fn read_generic_name(&self, node: Node) -> Result<(String, Vec<TypeSyntax>), ReadError> {
        let name = node
            .child_by_field_name("name")
            .or_else(|| child_of_kind(node, &["identifier"]))
            .ok_or_else(|| ReadError::Parse("generic_name missing name".into()))?;
        let arguments = match child_of_kind(node, &["type_argument_list"]) {
            Some(list) => named_children(list)
                .into_iter()
                .map(|arg| self.read_type(arg))
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };
        Ok((self.node_text(name).to_string(), arguments))
    }

    // Statements

    fn read_block(&self, node: Node) -> Result<Block, ReadError> {
        let statements = named_children(node)
            .into_iter()
            .map(|stmt| self.read_stmt(stmt))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Block::new(statements))
    }

    fn read_boxed_stmt(&self, node: Node, field: &str) -> Result<Box<Stmt>, ReadError> {
        Ok(Box::new(self.read_stmt(self.required(node, field)?)?))
    }

    fn other_stmt(&self, node: Node) -> Stmt {
        Stmt::Other(OtherStmt {
            kind: node.kind().to_string(),
            text: self.node_text(node).to_string(),
        })
    }

    fn read_optional_expr(&self, node: Node) -> Result<Option<Expr>, ReadError> {
        match named_children(node).into_iter().next() {
            Some(expr) => self.read_expr(expr).map(Some),
            None => Ok(None),
        }
    }

    fn read_stmt(&self, node: Node) -> Result<Stmt, ReadError> {
        let stmt = match node.kind() {
            "block" => Stmt::Block(self.read_block(node)?),
            "expression_statement" => {
                let expr = named_children(node)
                    .into_iter()
                    .next()
                    .ok_or_else(|| ReadError::Parse("expression_statement has no child".into()))?;
                Stmt::expression(self.read_expr(expr)?)
            }
            "local_declaration_statement" => {
                if all_children(node).iter().any(|child| child.kind() == "using") {
                    return Ok(self.other_stmt(node));
                }
                let declaration = child_of_kind(node, &["variable_declaration"])
                    .ok_or_else(|| ReadError::Parse("local_declaration_statement missing declaration".into()))?;
                Stmt::LocalDeclaration(self.read_variable_declaration(declaration)?)
            }
            "return_statement" => Stmt::ret(self.read_optional_expr(node)?),
            "throw_statement" => Stmt::Throw(ThrowStmt {
                expression: self.read_optional_expr(node)?,
            }),
            "break_statement" => Stmt::Break,
            "continue_statement" => Stmt::Continue,
            "empty_statement" => Stmt::Empty,
            "if_statement" => {
                let otherwise = match node.child_by_field_name("alternative") {
                    Some(alt) if alt.kind() == "else_clause" => {
                        let inner = named_children(alt)
                            .into_iter()
                            .next()
                            .ok_or_else(|| ReadError::Parse("else_clause has no statement".into()))?;
                        Some(Box::new(self.read_stmt(inner)?))
                    }
                    Some(alt) => Some(Box::new(self.read_stmt(alt)?)),
                    None => None,
                };
                Stmt::If(IfStmt {
                    condition: self.read_expr(self.required(node, "condition")?)?,
                    then: self.read_boxed_stmt(node, "consequence")?,
                    otherwise,
                })
            }
            "for_statement" => self.read_for(node)?,
            "foreach_statement" => {
                let identifier = node
                    .child_by_field_name("left")
                    .or_else(|| child_of_kind(node, &["identifier"]))
                    .ok_or_else(|| ReadError::Parse("foreach_statement missing variable".into()))?;
                if identifier.kind() != "identifier" {
                    return Ok(self.other_stmt(node));
                }
                Stmt::ForEach(ForEachStmt {
                    ty: self.read_type(self.required(node, "type")?)?,
                    identifier: self.node_text(identifier).to_string(),
                    collection: self.read_expr(self.required(node, "right")?)?,
                    body: self.read_boxed_stmt(node, "body")?,
                })
            }
            "while_statement" => Stmt::While(WhileStmt {
                condition: self.read_expr(self.required(node, "condition")?)?,
                body: self.read_boxed_stmt(node, "body")?,
            }),
            "do_statement" => Stmt::Do(DoStmt {
                body: self.read_boxed_stmt(node, "body")?,
                condition: self.read_expr(self.required(node, "condition")?)?,
            }),
            "switch_statement" => match self.read_switch(node)? {
                Some(stmt) => stmt,
                None => self.other_stmt(node),
            },
            "try_statement" => match self.read_try(node)? {
                Some(stmt) => stmt,
                None => self.other_stmt(node),
            },
            _ => self.other_stmt(node),
        };
        Ok(stmt)
    }

    fn read_for(&self, node: Node) -> Result<Stmt, ReadError> {
        let mut declaration = None;
        let mut initializers = Vec::new();
        let mut init_nodes = fields(node, "initializer");
        if init_nodes.is_empty() {
            init_nodes.extend(child_of_kind(node, &["variable_declaration"]));
        }
        for init in init_nodes {
            if init.kind() == "variable_declaration" {
                declaration = Some(self.read_variable_declaration(init)?);
            } else {
                initializers.push(self.read_expr(init)?);
            }
        }
        let condition = match node.child_by_field_name("condition") {
            Some(cond) => Some(self.read_expr(cond)?),
            None => None,
        };
        let incrementors = fields(node, "update")
            .into_iter()
            .map(|update| self.read_expr(update))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Stmt::For(ForStmt {
            declaration,
            initializers,
            condition,
            incrementors,
            body: self.read_boxed_stmt(node, "body")?,
        }))
    }

    /// `None` when a section uses patterns or guards.
    fn read_switch(&self, node: Node) -> Result<Option<Stmt>, ReadError> {
        let value = node
            .child_by_field_name("value")
            .or_else(|| node.child_by_field_name("expression"))
            .ok_or_else(|| ReadError::Parse("switch_statement missing value".into()))?;
        let value = match value.kind() {
            "parenthesized_expression" => named_children(value).into_iter().next().unwrap_or(value),
            _ => value,
        };
        let body = self.required(node, "body")?;

        let mut sections = Vec::new();
        for section in named_children(body)
            .into_iter()
            .filter(|child| child.kind() == "switch_section")
        {
            let mut labels = Vec::new();
            let mut statements = Vec::new();
            let mut after_case = false;
            for child in all_children(section) {
                match child.kind() {
                    "case" => after_case = true,
                    "default" => labels.push(SwitchLabel::Default),
                    ":" => after_case = false,
                    "default_switch_label" => labels.push(SwitchLabel::Default),
                    "case_switch_label" => match named_children(child).into_iter().next() {
                        Some(expr) => labels.push(SwitchLabel::Case(self.read_expr(expr)?)),
                        None => return Ok(None),
                    },
                    "when_clause" | "case_pattern_switch_label" => return Ok(None),
                    "constant_pattern" if after_case => match named_children(child).into_iter().next() {
                        Some(expr) => labels.push(SwitchLabel::Case(self.read_expr(expr)?)),
                        None => return Ok(None),
                    },
                    kind if after_case && child.is_named() => {
                        if kind.ends_with("_pattern") || kind == "discard" {
                            return Ok(None);
                        }
                        labels.push(SwitchLabel::Case(self.read_expr(child)?));
                    }
                    kind if child.is_named() && !is_trivia(kind) => statements.push(self.read_stmt(child)?),
                    _ => {}
                }
            }
            sections.push(SwitchSection { labels, statements });
        }

        Ok(Some(Stmt::Switch(SwitchStmt {
            expression: self.read_expr(value)?,
            sections,
        })))
    }

    /// `None` when a catch clause has an exception filter.
    fn read_try(&self, node: Node) -> Result<Option<Stmt>, ReadError> {
        let body = node
            .child_by_field_name("body")
            .or_else(|| child_of_kind(node, &["block"]))
            .ok_or_else(|| ReadError::Parse("try_statement missing body".into()))?;
        let mut catches = Vec::new();
        let mut finally = None;
        for child in named_children(node) {
            match child.kind() {
                "catch_clause" => {
                    if child_of_kind(child, &["catch_filter_clause"]).is_some() {
                        return Ok(None);
                    }
                    let (ty, identifier) = match child_of_kind(child, &["catch_declaration"]) {
                        Some(decl) => (
                            Some(self.read_type(self.required(decl, "type")?)?),
                            decl.child_by_field_name("name")
                                .map(|name| self.node_text(name).to_string()),
                        ),
                        None => (None, None),
                    };
                    let block = child
                        .child_by_field_name("body")
                        .or_else(|| child_of_kind(child, &["block"]))
                        .ok_or_else(|| ReadError::Parse("catch_clause missing body".into()))?;
                    catches.push(CatchClause {
                        ty,
                        identifier,
                        block: self.read_block(block)?,
                    });
                }
                "finally_clause" => {
                    let block = child_of_kind(child, &["block"])
                        .ok_or_else(|| ReadError::Parse("finally_clause missing block".into()))?;
                    finally = Some(self.read_block(block)?);
                }
                _ => {}
            }
        }
        Ok(Some(Stmt::Try(TryStmt {
            block: self.read_block(body)?,
            catches,
            finally,
        })))
    }

    // Expressions

    fn other_expr(&self, node: Node) -> Expr {
        Expr::other(node.kind(), self.node_text(node))
    }

    fn boxed_expr(&self, node: Node, field: &str) -> Result<Box<Expr>, ReadError> {
        Ok(Box::new(self.read_expr(self.required(node, field)?)?))
    }

    fn read_arguments(&self, list: Node) -> Result<Vec<Argument>, ReadError> {
        named_children(list)
            .into_iter()
            .filter(|child| child.kind() == "argument")
            .map(|arg| self.read_argument(arg))
            .collect()
    }

    fn read_argument(&self, node: Node) -> Result<Argument, ReadError> {
        let name = match node.child_by_field_name("name") {
            Some(name) => Some(self.node_text(name).to_string()),
            None => child_of_kind(node, &["name_colon"])
                .and_then(|colon| named_children(colon).into_iter().next())
                .map(|name| self.node_text(name).to_string()),
        };
        let modifier = all_children(node)
            .into_iter()
            .find(|child| matches!(child.kind(), "ref" | "out" | "in"))
            .map(|child| child.kind().to_string());
        let expr = named_children(node)
            .into_iter()
            .last()
            .ok_or_else(|| ReadError::Parse("argument has no expression".into()))?;
        Ok(Argument {
            name,
            modifier,
            expression: self.read_expr(expr)?,
        })
    }

    fn read_expr(&self, node: Node) -> Result<Expr, ReadError> {
        let expr = match node.kind() {
            "identifier" => Expr::identifier(self.node_text(node)),
            "generic_name" => {
                let (name, type_arguments) = self.read_generic_name(node)?;
                Expr::generic_name(name, type_arguments)
            }
            "predefined_type" => Expr::PredefinedType(NameExpr {
                name: self.node_text(node).to_string(),
            }),
            "this" | "this_expression" => Expr::This,
            "base" | "base_expression" => Expr::Base,
            "integer_literal" => match parse_integer(self.node_text(node)) {
                Some(value) => Expr::literal(LiteralValue::Numeric(value)),
                None => self.other_expr(node),
            },
            "real_literal" => match parse_real(self.node_text(node)) {
                Some(value) => Expr::literal(LiteralValue::Numeric(value)),
                None => self.other_expr(node),
            },
            "string_literal" => match parse_string(self.node_text(node)) {
                Some(value) => Expr::string(value),
                None => self.other_expr(node),
            },
            "verbatim_string_literal" => match parse_verbatim(self.node_text(node)) {
                Some(value) => Expr::string(value),
                None => self.other_expr(node),
            },
            "character_literal" => match parse_character(self.node_text(node)) {
                Some(value) => Expr::literal(LiteralValue::Character(value)),
                None => self.other_expr(node),
            },
            "boolean_literal" => Expr::boolean(self.node_text(node) == "true"),
            "null_literal" => Expr::null(),
            "binary_expression" => {
                let operator = self.required(node, "operator")?;
                match BinaryKind::from_symbol(self.node_text(operator)) {
                    Some(operator) => Expr::Binary(BinaryExpr {
                        operator,
                        left: self.boxed_expr(node, "left")?,
                        right: self.boxed_expr(node, "right")?,
                    }),
                    None => self.other_expr(node),
                }
            }
            "prefix_unary_expression" | "unary_expression" => self.read_unary(node, true)?,
            "postfix_unary_expression" => self.read_unary(node, false)?,
            "assignment_expression" => {
                let operator = node
                    .child_by_field_name("operator")
                    .map(|op| self.node_text(op))
                    .or_else(|| {
                        all_children(node)
                            .into_iter()
                            .map(|child| child.kind())
                            .find(|kind| AssignmentKind::from_symbol(kind).is_some())
                    });
                match operator.and_then(AssignmentKind::from_symbol) {
                    Some(operator) => Expr::Assignment(AssignmentExpr {
                        operator,
                        left: self.boxed_expr(node, "left")?,
                        right: self.boxed_expr(node, "right")?,
                    }),
                    None => self.other_expr(node),
                }
            }
            "parenthesized_expression" => match named_children(node).into_iter().next() {
                Some(inner) => Expr::parenthesized(self.read_expr(inner)?),
                None => self.other_expr(node),
            },
            "invocation_expression" => Expr::Invocation(InvocationExpr {
                callee: self.boxed_expr(node, "function")?,
                arguments: self.read_arguments(self.required(node, "arguments")?)?,
            }),
            "object_creation_expression" => {
                let arguments = match node.child_by_field_name("arguments") {
                    Some(list) => self.read_arguments(list)?,
                    None => Vec::new(),
                };
                let initializer = match node.child_by_field_name("initializer") {
                    Some(init) => Some(self.read_initializer(init)?),
                    None => None,
                };
                Expr::ObjectCreation(ObjectCreationExpr {
                    ty: self.read_type(self.required(node, "type")?)?,
                    arguments,
                    initializer,
                })
            }
            "array_creation_expression" | "implicit_array_creation_expression" => {
                match node.child_by_field_name("initializer") {
                    Some(init) => {
                        let ty = match node.child_by_field_name("type") {
                            Some(ty) => Some(self.read_type(ty)?),
                            None => None,
                        };
                        Expr::ArrayCreation(ArrayCreationExpr {
                            ty,
                            initializer: self.read_initializer(init)?,
                        })
                    }
                    None => self.other_expr(node),
                }
            }
            "member_access_expression" => {
                let name = self.required(node, "name")?;
                let member = match name.kind() {
                    "generic_name" => {
                        let (name, type_arguments) = self.read_generic_name(name)?;
                        SimpleName { name, type_arguments }
                    }
                    _ => SimpleName::new(self.node_text(name)),
                };
                Expr::MemberAccess(MemberAccessExpr {
                    receiver: self.boxed_expr(node, "expression")?,
                    member,
                })
            }
            "qualified_name" => {
                let parts = named_children(node);
                match (parts.first(), parts.last()) {
                    (Some(left), Some(right)) if parts.len() >= 2 => Expr::MemberAccess(MemberAccessExpr {
                        receiver: Box::new(self.read_expr(*left)?),
                        member: SimpleName::new(self.node_text(*right)),
                    }),
                    _ => self.other_expr(node),
                }
            }
            "element_access_expression" => Expr::ElementAccess(ElementAccessExpr {
                receiver: self.boxed_expr(node, "expression")?,
                arguments: self.read_arguments(self.required(node, "subscript")?)?,
            }),
            "anonymous_method_expression" => {
                let parameters = match child_of_kind(node, &["parameter_list"]) {
                    Some(list) => Some(self.read_parameters(list)?),
                    None => None,
                };
                let body = child_of_kind(node, &["block"])
                    .ok_or_else(|| ReadError::Parse("anonymous_method_expression missing body".into()))?;
                Expr::AnonymousMethod(AnonymousMethodExpr {
                    parameters,
                    body: self.read_block(body)?,
                })
            }
            "lambda_expression" => {
                let params = self.required(node, "parameters")?;
                let parameters = match params.kind() {
                    "parameter_list" => self.read_parameters(params)?,
                    _ => vec![Parameter::new(None, self.node_text(params))],
                };
                let body = self
                    .read_function_body(node)?
                    .ok_or_else(|| ReadError::Parse("lambda_expression missing body".into()))?;
                Expr::Lambda(LambdaExpr { parameters, body })
            }
            "cast_expression" => Expr::Cast(CastExpr {
                ty: self.read_type(self.required(node, "type")?)?,
                operand: self.boxed_expr(node, "value")?,
            }),
            "conditional_expression" => Expr::Conditional(ConditionalExpr {
                condition: self.boxed_expr(node, "condition")?,
                when_true: self.boxed_expr(node, "consequence")?,
                when_false: self.boxed_expr(node, "alternative")?,
            }),
            _ => self.other_expr(node),
        };
        Ok(expr)
    }

    fn read_initializer(&self, node: Node) -> Result<Vec<Expr>, ReadError> {
        named_children(node)
            .into_iter()
            .map(|element| self.read_expr(element))
            .collect()
    }

    fn read_unary(&self, node: Node, prefix: bool) -> Result<Expr, ReadError> {
        let children = all_children(node);
        let token = if prefix { children.first() } else { children.last() };
        let operand = named_children(node).into_iter().next();
        let (Some(token), Some(operand)) = (token, operand) else {
            return Ok(self.other_expr(node));
        };
        let operator = match (token.kind(), prefix) {
            ("+", true) => UnaryKind::Plus,
            ("-", true) => UnaryKind::Minus,
            ("!", true) => UnaryKind::LogicalNot,
            ("~", true) => UnaryKind::BitwiseNot,
            ("++", true) => UnaryKind::PreIncrement,
            ("--", true) => UnaryKind::PreDecrement,
            ("++", false) => UnaryKind::PostIncrement,
            ("--", false) => UnaryKind::PostDecrement,
            _ => return Ok(self.other_expr(node)),
        };
        let operand = self.read_expr(operand)?;
        Ok(if prefix {
            Expr::prefix(operator, operand)
        } else {
            Expr::postfix(operand, operator)
        })
    }
}

/// Parse an integer literal the way C# types it: the first of
/// `int`, `uint`, `long`, `ulong` that holds the value, narrowed by any
/// `u`/`l` suffix.
fn parse_integer(text: &str) -> Option<NumericLiteral> {
    let lower = text.replace('_', "").to_ascii_lowercase();
    let digits = lower.trim_end_matches(['u', 'l']);
    let suffix = &lower[digits.len()..];
    let value = if let Some(hex) = digits.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()?
    } else if let Some(bin) = digits.strip_prefix("0b") {
        u64::from_str_radix(bin, 2).ok()?
    } else {
        digits.parse::<u64>().ok()?
    };
    let (signed, unsigned) = match suffix {
        "" => (true, true),
        "u" => (false, true),
        "l" => (true, true),
        "ul" | "lu" => (false, true),
        _ => return None,
    };
    let long_only = suffix.contains('l');
    let literal = if signed && !long_only && value <= i32::MAX as u64 {
        NumericLiteral::Int32(value as i32)
    } else if unsigned && !long_only && value <= u32::MAX as u64 {
        NumericLiteral::UInt32(value as u32)
    } else if signed && value <= i64::MAX as u64 {
        NumericLiteral::Int64(value as i64)
    } else {
        NumericLiteral::UInt64(value)
    };
    Some(literal)
}

fn parse_real(text: &str) -> Option<NumericLiteral> {
    let text = text.replace('_', "");
    let (digits, suffix) = match text.char_indices().last() {
        Some((i, c)) if c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E') => (&text[..i], c.to_ascii_lowercase()),
        _ => (text.as_str(), 'd'),
    };
    let literal = match suffix {
        'f' => NumericLiteral::Single(digits.parse().ok()?),
        'd' => NumericLiteral::Double(digits.parse().ok()?),
        'm' => NumericLiteral::Decimal(digits.to_string()),
        _ => return None,
    };
    Some(literal)
}

fn parse_string(text: &str) -> Option<String> {
    let body = text.strip_prefix('"')?.strip_suffix('"')?;
    unescape(body)
}

fn parse_verbatim(text: &str) -> Option<String> {
    let body = text.strip_prefix("@\"")?.strip_suffix('"')?;
    Some(body.replace("\"\"", "\""))
}

fn parse_character(text: &str) -> Option<char> {
    let body = text.strip_prefix('\'')?.strip_suffix('\'')?;
    let unescaped = unescape(body)?;
    let mut chars = unescaped.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

/// Resolve C# escape sequences. `None` on a malformed escape.
fn unescape(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next()? {
            '\'' => '\'',
            '"' => '"',
            '\\' => '\\',
            '0' => '\0',
            'a' => '\u{07}',
            'b' => '\u{08}',
            'f' => '\u{0C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{0B}',
            'u' => hex_char(&mut chars, 4, 4)?,
            'U' => hex_char(&mut chars, 8, 8)?,
            'x' => hex_char(&mut chars, 1, 4)?,
            _ => return None,
        };
        out.push(escaped);
    }
    Some(out)
}

fn hex_char(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, min: usize, max: usize) -> Option<char> {
    let mut digits = String::new();
    while digits.len() < max {
        match chars.peek() {
            Some(c) if c.is_ascii_hexdigit() => {
                digits.push(*c);
                chars.next();
            }
            _ => break,
        }
    }
    if digits.len() < min {
        return None;
    }
    char::from_u32(u32::from_str_radix(&digits, 16).ok()?)
}
