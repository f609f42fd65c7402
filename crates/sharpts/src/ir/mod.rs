//! Translation units: the TypeScript-oriented output tree.
//!
//! Every node renders itself through [`TranslationUnit::translate`].
//! Rendering is pure, so a unit can be translated any number of times with
//! the same result.
//!
//! Nodes are built bottom-up with [`AUTOMATIC_NESTING_LEVEL`]. Attaching a
//! node to a parent sets its nesting level, and the level propagates down:
//! statement bodies and type members sit one level deeper than their owner,
//! expression children share the level of the statement that owns them.
//! A lambda's body is one level deeper than the lambda.

pub mod declarations;
pub mod expressions;
pub mod lexemes;
pub mod statements;
pub mod tokens;

pub use declarations::*;
pub use expressions::*;
pub use statements::*;
pub use tokens::{OperatorToken, UnaryPosition, Visibility, VisibilityToken};

/// Nesting level of a unit that has not been attached to a parent yet.
pub const AUTOMATIC_NESTING_LEVEL: usize = 0;

/// One indentation step.
pub const INDENT: &str = "    ";

/// A self-rendering node of the output tree.
pub trait TranslationUnit {
    /// Render this unit and its children to TypeScript.
    fn translate(&self) -> String;

    fn nesting_level(&self) -> usize;

    /// Set this unit's level and propagate the matching levels to its
    /// children.
    fn set_nesting_level(&mut self, level: usize);

    /// Structural children, in source order.
    fn inner_units(&self) -> Vec<&Unit>;
}

/// Any translation unit.
#[derive(Debug, Clone, PartialEq)]
pub enum Unit {
    Identifier(IdentifierUnit),
    Literal(LiteralUnit),
    Verbatim(VerbatimUnit),
    Unary(UnaryUnit),
    Binary(BinaryUnit),
    Assignment(AssignmentUnit),
    Parenthesized(ParenthesizedUnit),
    MemberAccess(MemberAccessUnit),
    ElementAccess(ElementAccessUnit),
    Invocation(InvocationUnit),
    ObjectCreation(ObjectCreationUnit),
    ArrayCreation(ArrayCreationUnit),
    Lambda(LambdaUnit),
    Argument(ArgumentUnit),

    ExpressionStatement(ExpressionStatementUnit),
    VariableDeclaration(VariableDeclarationUnit),
    Keyword(KeywordStatementUnit),
    Conditional(ConditionalStatementUnit),
    For(ForStatementUnit),
    ForEach(ForEachStatementUnit),
    While(WhileStatementUnit),
    DoWhile(DoWhileStatementUnit),
    Switch(SwitchStatementUnit),
    Try(TryStatementUnit),
    Block(BlockUnit),

    Field(FieldUnit),
    Method(MethodUnit),
    Group(GroupUnit),
    Class(ClassUnit),
    Interface(InterfaceUnit),
    Namespace(NamespaceUnit),
}

macro_rules! dispatch {
    ($self:expr, $unit:ident => $body:expr) => {
        match $self {
            Unit::Identifier($unit) => $body,
            Unit::Literal($unit) => $body,
            Unit::Verbatim($unit) => $body,
            Unit::Unary($unit) => $body,
            Unit::Binary($unit) => $body,
            Unit::Assignment($unit) => $body,
            Unit::Parenthesized($unit) => $body,
            Unit::MemberAccess($unit) => $body,
            Unit::ElementAccess($unit) => $body,
            Unit::Invocation($unit) => $body,
            Unit::ObjectCreation($unit) => $body,
            Unit::ArrayCreation($unit) => $body,
            Unit::Lambda($unit) => $body,
            Unit::Argument($unit) => $body,
            Unit::ExpressionStatement($unit) => $body,
            Unit::VariableDeclaration($unit) => $body,
            Unit::Keyword($unit) => $body,
            Unit::Conditional($unit) => $body,
            Unit::For($unit) => $body,
            Unit::ForEach($unit) => $body,
            Unit::While($unit) => $body,
            Unit::DoWhile($unit) => $body,
            Unit::Switch($unit) => $body,
            Unit::Try($unit) => $body,
            Unit::Block($unit) => $body,
            Unit::Field($unit) => $body,
            Unit::Method($unit) => $body,
            Unit::Group($unit) => $body,
            Unit::Class($unit) => $body,
            Unit::Interface($unit) => $body,
            Unit::Namespace($unit) => $body,
        }
    };
}

impl TranslationUnit for Unit {
    fn translate(&self) -> String {
        dispatch!(self, unit => unit.translate())
    }

    fn nesting_level(&self) -> usize {
        dispatch!(self, unit => unit.nesting_level())
    }

    fn set_nesting_level(&mut self, level: usize) {
        dispatch!(self, unit => unit.set_nesting_level(level))
    }

    fn inner_units(&self) -> Vec<&Unit> {
        dispatch!(self, unit => unit.inner_units())
    }
}

impl Unit {
    /// Whether this unit renders as an inline expression rather than as
    /// one or more indented lines.
    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            Unit::Identifier(_)
                | Unit::Literal(_)
                | Unit::Verbatim(_)
                | Unit::Unary(_)
                | Unit::Binary(_)
                | Unit::Assignment(_)
                | Unit::Parenthesized(_)
                | Unit::MemberAccess(_)
                | Unit::ElementAccess(_)
                | Unit::Invocation(_)
                | Unit::ObjectCreation(_)
                | Unit::ArrayCreation(_)
                | Unit::Lambda(_)
                | Unit::Argument(_)
        )
    }

    /// Depth-first walk over this unit and everything below it.
    pub fn descendants(&self) -> Vec<&Unit> {
        let mut out = vec![self];
        let mut i = 0;
        while i < out.len() {
            let node: &Unit = out[i];
            out.extend(node.inner_units());
            i += 1;
        }
        out
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.translate())
    }
}

/// Text buffer with indentation helpers shared by the units.
pub(crate) struct CodeWriter {
    output: String,
}

impl CodeWriter {
    pub(crate) fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    pub(crate) fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    pub(crate) fn write_indent(&mut self, level: usize) {
        for _ in 0..level {
            self.output.push_str(INDENT);
        }
    }

    /// Write each unit on its own line. Units indent themselves.
    pub(crate) fn write_lines(&mut self, units: &[Unit]) {
        for unit in units {
            self.output.push('\n');
            self.output.push_str(&unit.translate());
        }
    }

    /// Write the body lines followed by a closing brace at `level`.
    pub(crate) fn write_body(&mut self, body: &[Unit], level: usize) {
        self.write_lines(body);
        self.output.push('\n');
        self.write_indent(level);
        self.output.push('}');
    }

    /// Write type members, separating multi-line members by a blank line.
    pub(crate) fn write_members(&mut self, members: &[Unit], level: usize) {
        let mut previous_multiline = false;
        for (i, member) in members.iter().enumerate() {
            let text = member.translate();
            let multiline = text.contains('\n');
            if i > 0 && (multiline || previous_multiline) {
                self.output.push('\n');
            }
            self.output.push('\n');
            self.output.push_str(&text);
            previous_multiline = multiline;
        }
        self.output.push('\n');
        self.write_indent(level);
        self.output.push('}');
    }

    pub(crate) fn write_joined(&mut self, units: &[Unit], separator: &str) {
        for (i, unit) in units.iter().enumerate() {
            if i > 0 {
                self.output.push_str(separator);
            }
            self.output.push_str(&unit.translate());
        }
    }

    pub(crate) fn finish(self) -> String {
        self.output
    }
}

/// Set `level` on every unit of a list.
pub(crate) fn set_levels(units: &mut [Unit], level: usize) {
    for unit in units {
        unit.set_nesting_level(level);
    }
}
