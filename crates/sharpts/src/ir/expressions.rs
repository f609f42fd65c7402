//! Expression units. All of them render inline, without indentation.

use super::lexemes;
use super::tokens::{OperatorToken, UnaryPosition};
use super::{AUTOMATIC_NESTING_LEVEL, CodeWriter, TranslationUnit, Unit, set_levels};
use crate::error::TranslateError;
use crate::syntax::{LiteralValue, escape};

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
    IdentifierUnit => Identifier,
    LiteralUnit => Literal,
    VerbatimUnit => Verbatim,
    UnaryUnit => Unary,
    BinaryUnit => Binary,
    AssignmentUnit => Assignment,
    ParenthesizedUnit => Parenthesized,
    MemberAccessUnit => MemberAccess,
    ElementAccessUnit => ElementAccess,
    InvocationUnit => Invocation,
    ObjectCreationUnit => ObjectCreation,
    ArrayCreationUnit => ArrayCreation,
    LambdaUnit => Lambda,
    ArgumentUnit => Argument,
}

/// A name: identifier, type name or keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierUnit {
    name: String,
    level: usize,
}

impl IdentifierUnit {
    /// Fails when the name contains a space outside its type-argument list.
    pub fn create(name: impl Into<String>) -> Result<Self, TranslateError> {
        let name = name.into();
        let head = name.split('<').next().unwrap_or_default();
        if head.contains(' ') {
            return Err(TranslateError::InvalidIdentifier { name });
        }
        Ok(Self {
            name,
            level: AUTOMATIC_NESTING_LEVEL,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl TranslationUnit for IdentifierUnit {
    fn translate(&self) -> String {
        self.name.clone()
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
    }

    fn inner_units(&self) -> Vec<&Unit> {
        Vec::new()
    }
}

/// A typed literal value.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralUnit {
    value: LiteralValue,
    level: usize,
}

impl LiteralUnit {
    pub fn create(value: LiteralValue) -> Self {
        Self {
            value,
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }

    pub fn value(&self) -> &LiteralValue {
        &self.value
    }
}

impl TranslationUnit for LiteralUnit {
    fn translate(&self) -> String {
        match &self.value {
            LiteralValue::Numeric(n) => n.to_string(),
            LiteralValue::String(s) => format!("\"{}\"", escape(s, '"')),
            LiteralValue::Character(c) => format!("'{}'", escape(&c.to_string(), '\'')),
            LiteralValue::Boolean(b) => b.to_string(),
            LiteralValue::Null => lexemes::NULL_KEYWORD.to_string(),
        }
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
    }

    fn inner_units(&self) -> Vec<&Unit> {
        Vec::new()
    }
}

/// Source text emitted unchanged, for constructs without a translation.
#[derive(Debug, Clone, PartialEq)]
pub struct VerbatimUnit {
    text: String,
    level: usize,
}

impl VerbatimUnit {
    pub fn create(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }
}

impl TranslationUnit for VerbatimUnit {
    fn translate(&self) -> String {
        self.text.clone()
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
    }

    fn inner_units(&self) -> Vec<&Unit> {
        Vec::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryUnit {
    operator: OperatorToken,
    position: UnaryPosition,
    operand: Box<Unit>,
    level: usize,
}

impl UnaryUnit {
    pub fn create(operand: Unit, operator: OperatorToken, position: UnaryPosition) -> Self {
        Self {
            operator,
            position,
            operand: Box::new(operand),
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }
}

impl TranslationUnit for UnaryUnit {
    fn translate(&self) -> String {
        match self.position {
            UnaryPosition::Prefix => format!("{}{}", self.operator.symbol(), self.operand.translate()),
            UnaryPosition::Postfix => format!("{}{}", self.operand.translate(), self.operator.symbol()),
        }
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        self.operand.set_nesting_level(level);
    }

    fn inner_units(&self) -> Vec<&Unit> {
        vec![self.operand.as_ref()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryUnit {
    operator: OperatorToken,
    left: Box<Unit>,
    right: Box<Unit>,
    level: usize,
}

impl BinaryUnit {
    pub fn create(left: Unit, operator: OperatorToken, right: Unit) -> Self {
        Self {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }
}

impl TranslationUnit for BinaryUnit {
    fn translate(&self) -> String {
        format!(
            "{} {} {}",
            self.left.translate(),
            self.operator.symbol(),
            self.right.translate()
        )
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        self.left.set_nesting_level(level);
        self.right.set_nesting_level(level);
    }

    fn inner_units(&self) -> Vec<&Unit> {
        vec![self.left.as_ref(), self.right.as_ref()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentUnit {
    operator: OperatorToken,
    left: Box<Unit>,
    right: Box<Unit>,
    level: usize,
}

impl AssignmentUnit {
    pub fn create(left: Unit, operator: OperatorToken, right: Unit) -> Self {
        Self {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }
}

impl TranslationUnit for AssignmentUnit {
    fn translate(&self) -> String {
        format!(
            "{} {} {}",
            self.left.translate(),
            self.operator.symbol(),
            self.right.translate()
        )
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        self.left.set_nesting_level(level);
        self.right.set_nesting_level(level);
    }

    fn inner_units(&self) -> Vec<&Unit> {
        vec![self.left.as_ref(), self.right.as_ref()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParenthesizedUnit {
    inner: Box<Unit>,
    level: usize,
}

impl ParenthesizedUnit {
    pub fn create(inner: Unit) -> Self {
        Self {
            inner: Box::new(inner),
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }
}

impl TranslationUnit for ParenthesizedUnit {
    fn translate(&self) -> String {
        format!("({})", self.inner.translate())
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        self.inner.set_nesting_level(level);
    }

    fn inner_units(&self) -> Vec<&Unit> {
        vec![self.inner.as_ref()]
    }
}

/// How a member or element is reached.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessMethod {
    /// `this.member`
    This,
    /// `super.member`
    Base,
    /// `left.member`
    Member(Box<Unit>),
    /// `member`
    None,
}

impl AccessMethod {
    fn left(&self) -> Option<&Unit> {
        match self {
            AccessMethod::Member(left) => Some(left),
            _ => None,
        }
    }

    fn left_mut(&mut self) -> Option<&mut Unit> {
        match self {
            AccessMethod::Member(left) => Some(left),
            _ => None,
        }
    }

    fn prefix(&self) -> Option<String> {
        match self {
            AccessMethod::This => Some(lexemes::THIS_KEYWORD.to_string()),
            AccessMethod::Base => Some(lexemes::SUPER_KEYWORD.to_string()),
            AccessMethod::Member(left) => Some(left.translate()),
            AccessMethod::None => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberAccessUnit {
    method: AccessMethod,
    member: Box<Unit>,
    level: usize,
}

impl MemberAccessUnit {
    pub fn create(member: Unit, method: AccessMethod) -> Self {
        Self {
            method,
            member: Box::new(member),
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }

    /// `left.member`
    pub fn qualified(left: Unit, member: Unit) -> Self {
        Self::create(member, AccessMethod::Member(Box::new(left)))
    }

    pub fn method(&self) -> &AccessMethod {
        &self.method
    }
}

impl TranslationUnit for MemberAccessUnit {
    fn translate(&self) -> String {
        match self.method.prefix() {
            Some(prefix) => format!("{}.{}", prefix, self.member.translate()),
            None => self.member.translate(),
        }
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        if let Some(left) = self.method.left_mut() {
            left.set_nesting_level(level);
        }
        self.member.set_nesting_level(level);
    }

    fn inner_units(&self) -> Vec<&Unit> {
        let mut units: Vec<&Unit> = self.method.left().into_iter().collect();
        units.push(&self.member);
        units
    }
}

/// `left[index, ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct ElementAccessUnit {
    method: AccessMethod,
    arguments: Vec<Unit>,
    level: usize,
}

impl ElementAccessUnit {
    pub fn create(arguments: Vec<Unit>, method: AccessMethod) -> Self {
        Self {
            method,
            arguments,
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }

    pub fn qualified(left: Unit, arguments: Vec<Unit>) -> Self {
        Self::create(arguments, AccessMethod::Member(Box::new(left)))
    }
}

impl TranslationUnit for ElementAccessUnit {
    fn translate(&self) -> String {
        let mut writer = CodeWriter::new();
        match self.method.prefix() {
            Some(prefix) => {
                writer.write(&prefix);
                writer.write("[");
                writer.write_joined(&self.arguments, ", ");
                writer.write("]");
            }
            None => writer.write_joined(&self.arguments, ", "),
        }
        writer.finish()
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        if let Some(left) = self.method.left_mut() {
            left.set_nesting_level(level);
        }
        set_levels(&mut self.arguments, level);
    }

    fn inner_units(&self) -> Vec<&Unit> {
        let mut units: Vec<&Unit> = self.method.left().into_iter().collect();
        units.extend(self.arguments.iter());
        units
    }
}

/// `callee(arguments)`
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationUnit {
    callee: Box<Unit>,
    arguments: Vec<Unit>,
    level: usize,
}

impl InvocationUnit {
    pub fn create(callee: Unit) -> Self {
        Self {
            callee: Box::new(callee),
            arguments: Vec::new(),
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }

    pub fn add_argument(&mut self, mut argument: Unit) {
        argument.set_nesting_level(self.level);
        self.arguments.push(argument);
    }
}

impl TranslationUnit for InvocationUnit {
    fn translate(&self) -> String {
        let mut writer = CodeWriter::new();
        writer.write(&self.callee.translate());
        writer.write("(");
        writer.write_joined(&self.arguments, ", ");
        writer.write(")");
        writer.finish()
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        self.callee.set_nesting_level(level);
        set_levels(&mut self.arguments, level);
    }

    fn inner_units(&self) -> Vec<&Unit> {
        std::iter::once(self.callee.as_ref())
            .chain(self.arguments.iter())
            .collect()
    }
}

/// `new Type(arguments)`
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectCreationUnit {
    ty: Box<Unit>,
    arguments: Vec<Unit>,
    level: usize,
}

impl ObjectCreationUnit {
    pub fn create(ty: Unit) -> Self {
        Self {
            ty: Box::new(ty),
            arguments: Vec::new(),
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }

    pub fn add_argument(&mut self, mut argument: Unit) {
        argument.set_nesting_level(self.level);
        self.arguments.push(argument);
    }
}

impl TranslationUnit for ObjectCreationUnit {
    fn translate(&self) -> String {
        let mut writer = CodeWriter::new();
        writer.write(lexemes::NEW_KEYWORD);
        writer.write(" ");
        writer.write(&self.ty.translate());
        writer.write("(");
        writer.write_joined(&self.arguments, ", ");
        writer.write(")");
        writer.finish()
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        self.ty.set_nesting_level(level);
        set_levels(&mut self.arguments, level);
    }

    fn inner_units(&self) -> Vec<&Unit> {
        std::iter::once(self.ty.as_ref())
            .chain(self.arguments.iter())
            .collect()
    }
}

/// `[a, b, c]`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayCreationUnit {
    elements: Vec<Unit>,
    level: usize,
}

impl ArrayCreationUnit {
    pub fn create(elements: Vec<Unit>) -> Self {
        Self {
            elements,
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }
}

impl TranslationUnit for ArrayCreationUnit {
    fn translate(&self) -> String {
        let mut writer = CodeWriter::new();
        writer.write("[");
        writer.write_joined(&self.elements, ", ");
        writer.write("]");
        writer.finish()
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        set_levels(&mut self.elements, level);
    }

    fn inner_units(&self) -> Vec<&Unit> {
        self.elements.iter().collect()
    }
}

/// One entry of a parameter list: `name`, `name: type`, `name: type = default`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentUnit {
    name: String,
    ty: Option<String>,
    default: Option<Box<Unit>>,
    level: usize,
}

impl ArgumentUnit {
    pub fn create(name: impl Into<String>, ty: Option<String>) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }

    pub fn with_default(mut self, default: Unit) -> Self {
        self.default = Some(Box::new(default));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl TranslationUnit for ArgumentUnit {
    fn translate(&self) -> String {
        let mut out = self.name.clone();
        if let Some(ty) = &self.ty {
            out.push_str(": ");
            out.push_str(ty);
        }
        if let Some(default) = &self.default {
            out.push_str(" = ");
            out.push_str(&default.translate());
        }
        out
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        if let Some(default) = &mut self.default {
            default.set_nesting_level(level);
        }
    }

    fn inner_units(&self) -> Vec<&Unit> {
        self.default.as_deref().into_iter().collect()
    }
}

/// Body of a lambda.
#[derive(Debug, Clone, PartialEq)]
pub enum LambdaBody {
    Statements(Vec<Unit>),
    Expression(Box<Unit>),
}

/// `(arguments): type => { statements }`
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaUnit {
    arguments: Vec<Unit>,
    return_type: Option<String>,
    body: LambdaBody,
    level: usize,
}

impl LambdaUnit {
    pub fn create(return_type: Option<String>) -> Self {
        Self {
            arguments: Vec::new(),
            return_type,
            body: LambdaBody::Statements(Vec::new()),
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }

    pub fn add_argument(&mut self, argument: ArgumentUnit) {
        let mut argument = Unit::Argument(argument);
        argument.set_nesting_level(self.level);
        self.arguments.push(argument);
    }

    /// Append a body statement. Replaces an expression body.
    pub fn add_statement(&mut self, mut statement: Unit) {
        statement.set_nesting_level(self.level + 1);
        match &mut self.body {
            LambdaBody::Statements(statements) => statements.push(statement),
            LambdaBody::Expression(_) => self.body = LambdaBody::Statements(vec![statement]),
        }
    }

    pub fn set_expression_body(&mut self, mut expression: Unit) {
        expression.set_nesting_level(self.level);
        self.body = LambdaBody::Expression(Box::new(expression));
    }

    pub fn arguments(&self) -> &[Unit] {
        &self.arguments
    }
}

impl TranslationUnit for LambdaUnit {
    fn translate(&self) -> String {
        let mut writer = CodeWriter::new();
        writer.write("(");
        writer.write_joined(&self.arguments, ", ");
        writer.write(")");
        if let Some(return_type) = &self.return_type {
            writer.write(": ");
            writer.write(return_type);
        }
        writer.write(" => ");
        match &self.body {
            LambdaBody::Statements(statements) => {
                writer.write("{");
                writer.write_body(statements, self.level);
            }
            LambdaBody::Expression(expression) => writer.write(&expression.translate()),
        }
        writer.finish()
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        set_levels(&mut self.arguments, level);
        match &mut self.body {
            LambdaBody::Statements(statements) => set_levels(statements, level + 1),
            LambdaBody::Expression(expression) => expression.set_nesting_level(level),
        }
    }

    fn inner_units(&self) -> Vec<&Unit> {
        let mut units: Vec<&Unit> = self.arguments.iter().collect();
        match &self.body {
            LambdaBody::Statements(statements) => units.extend(statements.iter()),
            LambdaBody::Expression(expression) => units.push(expression),
        }
        units
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::NumericLiteral;

    fn ident(name: &str) -> Unit {
        IdentifierUnit::create(name).unwrap().into()
    }

    #[test]
    fn identifier_rejects_spaces_outside_type_arguments() {
        assert!(IdentifierUnit::create("Map<string, number>").is_ok());
        assert_eq!(
            IdentifierUnit::create("two words"),
            Err(TranslateError::InvalidIdentifier {
                name: "two words".into()
            })
        );
    }

    #[test]
    fn literals_render_target_forms() {
        let cases = [
            (LiteralValue::Numeric(NumericLiteral::Int32(7)), "7"),
            (LiteralValue::Numeric(NumericLiteral::Double(2.5)), "2.5"),
            (LiteralValue::String("a\"b".into()), "\"a\\\"b\""),
            (LiteralValue::Character('x'), "'x'"),
            (LiteralValue::Boolean(true), "true"),
            (LiteralValue::Null, "null"),
        ];
        for (value, expected) in cases {
            assert_eq!(LiteralUnit::create(value).translate(), expected);
        }
    }

    #[test]
    fn access_methods() {
        let this = MemberAccessUnit::create(ident("Count"), AccessMethod::This);
        assert_eq!(this.translate(), "this.Count");
        let base = MemberAccessUnit::create(ident("Load"), AccessMethod::Base);
        assert_eq!(base.translate(), "super.Load");
        let plain = MemberAccessUnit::create(ident("Load"), AccessMethod::None);
        assert_eq!(plain.translate(), "Load");
        let element = ElementAccessUnit::qualified(ident("items"), vec![ident("i")]);
        assert_eq!(element.translate(), "items[i]");
    }

    #[test]
    fn lambda_body_is_one_level_deeper() {
        let mut lambda = LambdaUnit::create(Some("void".into()));
        lambda.add_argument(ArgumentUnit::create("x", Some("number".into())));
        lambda.add_statement(Unit::ExpressionStatement(
            crate::ir::ExpressionStatementUnit::create(ident("x")),
        ));
        let mut unit = Unit::Lambda(lambda);
        unit.set_nesting_level(1);
        assert_eq!(unit.translate(), "(x: number): void => {\n        x;\n    }");
        assert_eq!(unit.inner_units()[1].nesting_level(), 2);
    }
}
