//! Declaration units: fields, methods, classes, interfaces, namespaces.

use super::lexemes;
use super::tokens::VisibilityToken;
use super::{AUTOMATIC_NESTING_LEVEL, CodeWriter, TranslationUnit, Unit, set_levels};

macro_rules! into_unit {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(impl From<$ty> for Unit {
            fn from(unit: $ty) -> Self {
                Unit::$variant(unit)
            }
        })*
    };
}

into_unit! {
    FieldUnit => Field,
    MethodUnit => Method,
    GroupUnit => Group,
    ClassUnit => Class,
    InterfaceUnit => Interface,
    NamespaceUnit => Namespace,
}

/// `private name: type = initializer;`
#[derive(Debug, Clone, PartialEq)]
pub struct FieldUnit {
    visibility: VisibilityToken,
    readonly: bool,
    name: String,
    ty: String,
    initializer: Option<Box<Unit>>,
    level: usize,
}

impl FieldUnit {
    pub fn create(visibility: VisibilityToken, name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            visibility,
            readonly: false,
            name: name.into(),
            ty: ty.into(),
            initializer: None,
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }

    pub fn set_readonly(&mut self, readonly: bool) {
        self.readonly = readonly;
    }

    pub fn set_initializer(&mut self, mut initializer: Unit) {
        initializer.set_nesting_level(self.level);
        self.initializer = Some(Box::new(initializer));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &str {
        &self.ty
    }
}

impl TranslationUnit for FieldUnit {
    fn translate(&self) -> String {
        let mut writer = CodeWriter::new();
        writer.write_indent(self.level);
        writer.write(&self.visibility.prefix());
        if self.readonly {
            writer.write(lexemes::READONLY_KEYWORD);
            writer.write(" ");
        }
        writer.write(&self.name);
        writer.write(": ");
        writer.write(&self.ty);
        if let Some(initializer) = &self.initializer {
            writer.write(" = ");
            writer.write(&initializer.translate());
        }
        writer.write(";");
        writer.finish()
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        if let Some(initializer) = &mut self.initializer {
            initializer.set_nesting_level(level);
        }
    }

    fn inner_units(&self) -> Vec<&Unit> {
        self.initializer.as_deref().into_iter().collect()
    }
}

/// What a [`MethodUnit`] declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Method,
    Getter,
    Setter,
    Constructor,
    /// Static constructor, rendered as a `static { }` block.
    StaticInitializer,
}

/// Signature plus optional body of a method, accessor or constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodUnit {
    kind: MethodKind,
    visibility: VisibilityToken,
    name: String,
    type_parameters: Vec<String>,
    arguments: Vec<Unit>,
    return_type: Option<String>,
    /// `None` renders a signature ending with `;`.
    body: Option<Vec<Unit>>,
    level: usize,
}

impl MethodUnit {
    pub fn create(kind: MethodKind, visibility: VisibilityToken, name: impl Into<String>) -> Self {
        Self {
            kind,
            visibility,
            name: name.into(),
            type_parameters: Vec::new(),
            arguments: Vec::new(),
            return_type: None,
            body: None,
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }

    pub fn set_type_parameters(&mut self, type_parameters: Vec<String>) {
        self.type_parameters = type_parameters;
    }

    pub fn set_return_type(&mut self, return_type: impl Into<String>) {
        self.return_type = Some(return_type.into());
    }

    pub fn add_argument(&mut self, mut argument: Unit) {
        argument.set_nesting_level(self.level);
        self.arguments.push(argument);
    }

    /// Give the method a body, possibly empty.
    pub fn open_body(&mut self) {
        self.body.get_or_insert_with(Vec::new);
    }

    pub fn add_statement(&mut self, mut statement: Unit) {
        statement.set_nesting_level(self.level + 1);
        self.body.get_or_insert_with(Vec::new).push(statement);
    }

    pub fn kind(&self) -> MethodKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn statements(&self) -> &[Unit] {
        self.body.as_deref().unwrap_or_default()
    }

    fn write_signature(&self, writer: &mut CodeWriter) {
        if self.kind == MethodKind::StaticInitializer {
            writer.write(lexemes::STATIC_KEYWORD);
            return;
        }
        writer.write(&self.visibility.prefix());
        match self.kind {
            MethodKind::Getter => writer.write("get "),
            MethodKind::Setter => writer.write("set "),
            _ => {}
        }
        if self.kind == MethodKind::Constructor {
            writer.write(lexemes::CONSTRUCTOR_KEYWORD);
        } else {
            writer.write(&self.name);
        }
        if !self.type_parameters.is_empty() {
            writer.write("<");
            writer.write(&self.type_parameters.join(", "));
            writer.write(">");
        }
        writer.write("(");
        writer.write_joined(&self.arguments, ", ");
        writer.write(")");
        if let Some(return_type) = &self.return_type {
            writer.write(": ");
            writer.write(return_type);
        }
    }
}

impl TranslationUnit for MethodUnit {
    fn translate(&self) -> String {
        let mut writer = CodeWriter::new();
        writer.write_indent(self.level);
        self.write_signature(&mut writer);
        match &self.body {
            Some(body) => {
                writer.write(" {");
                writer.write_body(body, self.level);
            }
            None => writer.write(";"),
        }
        writer.finish()
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        set_levels(&mut self.arguments, level);
        if let Some(body) = &mut self.body {
            set_levels(body, level + 1);
        }
    }

    fn inner_units(&self) -> Vec<&Unit> {
        self.arguments.iter().chain(self.statements()).collect()
    }
}

/// Several declarations produced by one source member, such as the getter
/// and setter of a property. Members share the group's level.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupUnit {
    members: Vec<Unit>,
    level: usize,
}

impl GroupUnit {
    pub fn create() -> Self {
        Self::default()
    }

    pub fn add_member(&mut self, mut member: Unit) {
        member.set_nesting_level(self.level);
        self.members.push(member);
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl TranslationUnit for GroupUnit {
    fn translate(&self) -> String {
        let mut writer = CodeWriter::new();
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                writer.write("\n");
            }
            writer.write(&member.translate());
        }
        writer.finish()
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        set_levels(&mut self.members, level);
    }

    fn inner_units(&self) -> Vec<&Unit> {
        self.members.iter().collect()
    }
}

/// `export class Name<T> extends Base implements I { members }`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassUnit {
    exported: bool,
    name: String,
    type_parameters: Vec<String>,
    base: Option<String>,
    interfaces: Vec<String>,
    members: Vec<Unit>,
    level: usize,
}

impl ClassUnit {
    pub fn create(name: impl Into<String>) -> Self {
        Self {
            exported: false,
            name: name.into(),
            type_parameters: Vec::new(),
            base: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }

    pub fn set_exported(&mut self, exported: bool) {
        self.exported = exported;
    }

    pub fn set_type_parameters(&mut self, type_parameters: Vec<String>) {
        self.type_parameters = type_parameters;
    }

    pub fn set_base(&mut self, base: impl Into<String>) {
        self.base = Some(base.into());
    }

    pub fn add_interface(&mut self, interface: impl Into<String>) {
        self.interfaces.push(interface.into());
    }

    pub fn add_member(&mut self, mut member: Unit) {
        member.set_nesting_level(self.level + 1);
        self.members.push(member);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[Unit] {
        &self.members
    }
}

impl TranslationUnit for ClassUnit {
    fn translate(&self) -> String {
        let mut writer = CodeWriter::new();
        writer.write_indent(self.level);
        if self.exported {
            writer.write(lexemes::EXPORT_KEYWORD);
            writer.write(" ");
        }
        writer.write("class ");
        writer.write(&self.name);
        if !self.type_parameters.is_empty() {
            writer.write("<");
            writer.write(&self.type_parameters.join(", "));
            writer.write(">");
        }
        if let Some(base) = &self.base {
            writer.write(" extends ");
            writer.write(base);
        }
        if !self.interfaces.is_empty() {
            writer.write(" implements ");
            writer.write(&self.interfaces.join(", "));
        }
        writer.write(" {");
        writer.write_members(&self.members, self.level);
        writer.finish()
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        set_levels(&mut self.members, level + 1);
    }

    fn inner_units(&self) -> Vec<&Unit> {
        self.members.iter().collect()
    }
}

/// `export interface Name<T> extends A, B { signatures }`
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceUnit {
    exported: bool,
    name: String,
    type_parameters: Vec<String>,
    bases: Vec<String>,
    members: Vec<Unit>,
    level: usize,
}

impl InterfaceUnit {
    pub fn create(name: impl Into<String>) -> Self {
        Self {
            exported: false,
            name: name.into(),
            type_parameters: Vec::new(),
            bases: Vec::new(),
            members: Vec::new(),
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }

    pub fn set_exported(&mut self, exported: bool) {
        self.exported = exported;
    }

    pub fn set_type_parameters(&mut self, type_parameters: Vec<String>) {
        self.type_parameters = type_parameters;
    }

    pub fn add_base(&mut self, base: impl Into<String>) {
        self.bases.push(base.into());
    }

    pub fn add_member(&mut self, mut member: Unit) {
        member.set_nesting_level(self.level + 1);
        self.members.push(member);
    }
}

impl TranslationUnit for InterfaceUnit {
    fn translate(&self) -> String {
        let mut writer = CodeWriter::new();
        writer.write_indent(self.level);
        if self.exported {
            writer.write(lexemes::EXPORT_KEYWORD);
            writer.write(" ");
        }
        writer.write("interface ");
        writer.write(&self.name);
        if !self.type_parameters.is_empty() {
            writer.write("<");
            writer.write(&self.type_parameters.join(", "));
            writer.write(">");
        }
        if !self.bases.is_empty() {
            writer.write(" extends ");
            writer.write(&self.bases.join(", "));
        }
        writer.write(" {");
        writer.write_members(&self.members, self.level);
        writer.finish()
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        set_levels(&mut self.members, level + 1);
    }

    fn inner_units(&self) -> Vec<&Unit> {
        self.members.iter().collect()
    }
}

/// `namespace A.B { declarations }`
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceUnit {
    name: String,
    members: Vec<Unit>,
    level: usize,
}

impl NamespaceUnit {
    pub fn create(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }

    pub fn add_member(&mut self, mut member: Unit) {
        member.set_nesting_level(self.level + 1);
        self.members.push(member);
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl TranslationUnit for NamespaceUnit {
    fn translate(&self) -> String {
        let mut writer = CodeWriter::new();
        writer.write_indent(self.level);
        writer.write("namespace ");
        writer.write(&self.name);
        writer.write(" {");
        writer.write_members(&self.members, self.level);
        writer.finish()
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        set_levels(&mut self.members, level + 1);
    }

    fn inner_units(&self) -> Vec<&Unit> {
        self.members.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{ArgumentUnit, IdentifierUnit, LiteralUnit, Visibility};
    use crate::syntax::{LiteralValue, NumericLiteral};

    fn public() -> VisibilityToken {
        VisibilityToken {
            visibility: Visibility::Public,
            is_static: false,
        }
    }

    #[test]
    fn field_with_initializer() {
        let mut field = FieldUnit::create(public(), "x", "number");
        field.set_initializer(LiteralUnit::create(LiteralValue::Numeric(NumericLiteral::Int32(7))).into());
        assert_eq!(field.translate(), "public x: number = 7;");
    }

    #[test]
    fn class_places_members_one_level_deeper() {
        let mut method = MethodUnit::create(MethodKind::Method, public(), "run");
        method.add_argument(ArgumentUnit::create("n", Some("number".into())).into());
        method.set_return_type("void");
        method.add_statement(
            crate::ir::ExpressionStatementUnit::create(IdentifierUnit::create("n").unwrap().into()).into(),
        );

        let mut class = ClassUnit::create("Runner");
        class.set_exported(true);
        class.set_base("Base");
        class.add_interface("IRunnable");
        class.add_member(FieldUnit::create(public(), "count", "number").into());
        class.add_member(method.into());

        let mut unit = Unit::from(class);
        unit.set_nesting_level(1);
        assert_eq!(
            unit.translate(),
            "    export class Runner extends Base implements IRunnable {\n        public count: number;\n\n        public run(n: number): void {\n            n;\n        }\n    }"
        );
        assert!(unit.inner_units().iter().all(|member| member.nesting_level() == 2));
    }

    #[test]
    fn static_initializer_and_signature() {
        let mut block = MethodUnit::create(MethodKind::StaticInitializer, public(), "Registry");
        block.open_body();
        assert_eq!(block.translate(), "static {\n}");

        let signature = MethodUnit::create(MethodKind::Method, VisibilityToken::default(), "Dispose");
        assert_eq!(signature.translate(), "Dispose();");
    }
}
