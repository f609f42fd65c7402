//! Source expressions.
//!
//! `Display` renders an expression back to source-language text. The
//! expression dispatcher uses that text for constructs it does not
//! translate, so the output keeps them exactly as written.

use super::stmt::Block;
use super::types::{TypeSyntax, write_separated};
use super::Parameter;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    Binary(BinaryExpr),
    PrefixUnary(UnaryExpr),
    PostfixUnary(UnaryExpr),
    Literal(LiteralExpr),
    Identifier(NameExpr),
    GenericName(GenericNameExpr),
    Invocation(InvocationExpr),
    ObjectCreation(ObjectCreationExpr),
    ArrayCreation(ArrayCreationExpr),
    Parenthesized(ParenthesizedExpr),
    Assignment(AssignmentExpr),
    MemberAccess(MemberAccessExpr),
    ElementAccess(ElementAccessExpr),
    AnonymousMethod(AnonymousMethodExpr),
    Lambda(LambdaExpr),
    Cast(CastExpr),
    Conditional(ConditionalExpr),
    /// `this`
    This,
    /// `base`
    Base,
    /// A keyword type used as an expression, e.g. the `int` in `int.Parse(s)`.
    PredefinedType(NameExpr),
    /// Anything the reader does not model, kept as raw text.
    Other(OtherExpr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryKind {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    LeftShift,
    RightShift,
    LogicalAnd,
    LogicalOr,
    BitwiseAnd,
    BitwiseOr,
    ExclusiveOr,
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Coalesce,
    Is,
    As,
}

impl BinaryKind {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryKind::Add => "+",
            BinaryKind::Subtract => "-",
            BinaryKind::Multiply => "*",
            BinaryKind::Divide => "/",
            BinaryKind::Modulo => "%",
            BinaryKind::LeftShift => "<<",
            BinaryKind::RightShift => ">>",
            BinaryKind::LogicalAnd => "&&",
            BinaryKind::LogicalOr => "||",
            BinaryKind::BitwiseAnd => "&",
            BinaryKind::BitwiseOr => "|",
            BinaryKind::ExclusiveOr => "^",
            BinaryKind::Equals => "==",
            BinaryKind::NotEquals => "!=",
            BinaryKind::LessThan => "<",
            BinaryKind::LessThanOrEqual => "<=",
            BinaryKind::GreaterThan => ">",
            BinaryKind::GreaterThanOrEqual => ">=",
            BinaryKind::Coalesce => "??",
            BinaryKind::Is => "is",
            BinaryKind::As => "as",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let kind = match symbol {
            "+" => BinaryKind::Add,
            "-" => BinaryKind::Subtract,
            "*" => BinaryKind::Multiply,
            "/" => BinaryKind::Divide,
            "%" => BinaryKind::Modulo,
            "<<" => BinaryKind::LeftShift,
            ">>" => BinaryKind::RightShift,
            "&&" => BinaryKind::LogicalAnd,
            "||" => BinaryKind::LogicalOr,
            "&" => BinaryKind::BitwiseAnd,
            "|" => BinaryKind::BitwiseOr,
            "^" => BinaryKind::ExclusiveOr,
            "==" => BinaryKind::Equals,
            "!=" => BinaryKind::NotEquals,
            "<" => BinaryKind::LessThan,
            "<=" => BinaryKind::LessThanOrEqual,
            ">" => BinaryKind::GreaterThan,
            ">=" => BinaryKind::GreaterThanOrEqual,
            "??" => BinaryKind::Coalesce,
            "is" => BinaryKind::Is,
            "as" => BinaryKind::As,
            _ => return None,
        };
        Some(kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryKind {
    Plus,
    Minus,
    LogicalNot,
    BitwiseNot,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
}

impl UnaryKind {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryKind::Plus => "+",
            UnaryKind::Minus => "-",
            UnaryKind::LogicalNot => "!",
            UnaryKind::BitwiseNot => "~",
            UnaryKind::PreIncrement | UnaryKind::PostIncrement => "++",
            UnaryKind::PreDecrement | UnaryKind::PostDecrement => "--",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentKind {
    Simple,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    And,
    Or,
    ExclusiveOr,
    LeftShift,
    RightShift,
    Coalesce,
}

impl AssignmentKind {
    pub fn symbol(self) -> &'static str {
        match self {
            AssignmentKind::Simple => "=",
            AssignmentKind::Add => "+=",
            AssignmentKind::Subtract => "-=",
            AssignmentKind::Multiply => "*=",
            AssignmentKind::Divide => "/=",
            AssignmentKind::Modulo => "%=",
            AssignmentKind::And => "&=",
            AssignmentKind::Or => "|=",
            AssignmentKind::ExclusiveOr => "^=",
            AssignmentKind::LeftShift => "<<=",
            AssignmentKind::RightShift => ">>=",
            AssignmentKind::Coalesce => "??=",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let kind = match symbol {
            "=" => AssignmentKind::Simple,
            "+=" => AssignmentKind::Add,
            "-=" => AssignmentKind::Subtract,
            "*=" => AssignmentKind::Multiply,
            "/=" => AssignmentKind::Divide,
            "%=" => AssignmentKind::Modulo,
            "&=" => AssignmentKind::And,
            "|=" => AssignmentKind::Or,
            "^=" => AssignmentKind::ExclusiveOr,
            "<<=" => AssignmentKind::LeftShift,
            ">>=" => AssignmentKind::RightShift,
            "??=" => AssignmentKind::Coalesce,
            _ => return None,
        };
        Some(kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub operator: BinaryKind,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpr {
    pub operator: UnaryKind,
    pub operand: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralExpr {
    pub value: LiteralValue,
}

/// Token value of a literal expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralValue {
    Numeric(NumericLiteral),
    String(String),
    Character(char),
    Boolean(bool),
    Null,
}

/// The runtime representation a numeric literal token carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericLiteral {
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Single(f32),
    Double(f64),
    /// Decimal literals keep their digits; there is no native 128-bit decimal.
    Decimal(String),
}

impl fmt::Display for NumericLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericLiteral::Int32(v) => write!(f, "{}", v),
            NumericLiteral::UInt32(v) => write!(f, "{}", v),
            NumericLiteral::Int64(v) => write!(f, "{}", v),
            NumericLiteral::UInt64(v) => write!(f, "{}", v),
            NumericLiteral::Single(v) => write_real(f, v, f64::from(v.abs())),
            NumericLiteral::Double(v) => write_real(f, v, v.abs()),
            NumericLiteral::Decimal(digits) => f.write_str(digits),
        }
    }
}

/// Reals outside `[1e-6, 1e21)` use exponent notation, as JavaScript
/// number literals do.
fn write_real<T: fmt::Display + fmt::LowerExp>(f: &mut fmt::Formatter<'_>, value: T, magnitude: f64) -> fmt::Result {
    if magnitude != 0.0 && !(1e-6..1e21).contains(&magnitude) {
        write!(f, "{:e}", value)
    } else {
        write!(f, "{}", value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameExpr {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericNameExpr {
    pub name: String,
    pub type_arguments: Vec<TypeSyntax>,
}

/// One call argument, including its optional `name:` and `ref`/`out` prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
    pub expression: Expr,
}

impl Argument {
    pub fn new(expression: Expr) -> Self {
        Self {
            name: None,
            modifier: None,
            expression,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectCreationExpr {
    #[serde(rename = "type")]
    pub ty: TypeSyntax,
    pub arguments: Vec<Argument>,
    /// Object or collection initializer (`new Foo { A = 1 }`), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<Vec<Expr>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayCreationExpr {
    /// `None` for implicitly typed arrays (`new[] { 1, 2 }`).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeSyntax>,
    pub initializer: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParenthesizedExpr {
    pub inner: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentExpr {
    pub operator: AssignmentKind,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

/// Member name on the right of a `.`; may carry type arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleName {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<TypeSyntax>,
}

impl SimpleName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_arguments: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberAccessExpr {
    pub receiver: Box<Expr>,
    pub member: SimpleName,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementAccessExpr {
    pub receiver: Box<Expr>,
    pub arguments: Vec<Argument>,
}

/// `delegate (int x) { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymousMethodExpr {
    /// `None` when the parameter list is omitted (`delegate { ... }`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Parameter>>,
    pub body: Block,
}

/// `(x, y) => ...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LambdaExpr {
    pub parameters: Vec<Parameter>,
    pub body: FunctionBody,
}

/// Body of a lambda, accessor or expression-bodied member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionBody {
    Block(Block),
    Expression(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastExpr {
    #[serde(rename = "type")]
    pub ty: TypeSyntax,
    pub operand: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalExpr {
    pub condition: Box<Expr>,
    pub when_true: Box<Expr>,
    pub when_false: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherExpr {
    /// Parser node kind, kept for diagnostics.
    #[serde(rename = "node_kind")]
    pub kind: String,
    pub text: String,
}

impl Expr {
    pub fn identifier(name: impl Into<String>) -> Self {
        Expr::Identifier(NameExpr { name: name.into() })
    }

    pub fn generic_name(name: impl Into<String>, type_arguments: Vec<TypeSyntax>) -> Self {
        Expr::GenericName(GenericNameExpr {
            name: name.into(),
            type_arguments,
        })
    }

    pub fn literal(value: LiteralValue) -> Self {
        Expr::Literal(LiteralExpr { value })
    }

    pub fn int(value: i32) -> Self {
        Expr::literal(LiteralValue::Numeric(NumericLiteral::Int32(value)))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::literal(LiteralValue::String(value.into()))
    }

    pub fn boolean(value: bool) -> Self {
        Expr::literal(LiteralValue::Boolean(value))
    }

    pub fn null() -> Self {
        Expr::literal(LiteralValue::Null)
    }

    pub fn binary(left: Expr, operator: BinaryKind, right: Expr) -> Self {
        Expr::Binary(BinaryExpr {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn prefix(operator: UnaryKind, operand: Expr) -> Self {
        Expr::PrefixUnary(UnaryExpr {
            operator,
            operand: Box::new(operand),
        })
    }

    pub fn postfix(operand: Expr, operator: UnaryKind) -> Self {
        Expr::PostfixUnary(UnaryExpr {
            operator,
            operand: Box::new(operand),
        })
    }

    pub fn assign(left: Expr, operator: AssignmentKind, right: Expr) -> Self {
        Expr::Assignment(AssignmentExpr {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn member(receiver: Expr, name: impl Into<String>) -> Self {
        Expr::MemberAccess(MemberAccessExpr {
            receiver: Box::new(receiver),
            member: SimpleName::new(name),
        })
    }

    pub fn element(receiver: Expr, arguments: Vec<Expr>) -> Self {
        Expr::ElementAccess(ElementAccessExpr {
            receiver: Box::new(receiver),
            arguments: arguments.into_iter().map(Argument::new).collect(),
        })
    }

    pub fn call(callee: Expr, arguments: Vec<Expr>) -> Self {
        Expr::Invocation(InvocationExpr {
            callee: Box::new(callee),
            arguments: arguments.into_iter().map(Argument::new).collect(),
        })
    }

    pub fn new_object(ty: TypeSyntax, arguments: Vec<Expr>) -> Self {
        Expr::ObjectCreation(ObjectCreationExpr {
            ty,
            arguments: arguments.into_iter().map(Argument::new).collect(),
            initializer: None,
        })
    }

    pub fn parenthesized(inner: Expr) -> Self {
        Expr::Parenthesized(ParenthesizedExpr {
            inner: Box::new(inner),
        })
    }

    pub fn other(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Expr::Other(OtherExpr {
            kind: kind.into(),
            text: text.into(),
        })
    }

    /// Syntactic category name, used in diagnostics.
    pub fn kind_name(&self) -> &str {
        match self {
            Expr::Binary(_) => "binary expression",
            Expr::PrefixUnary(_) => "prefix unary expression",
            Expr::PostfixUnary(_) => "postfix unary expression",
            Expr::Literal(_) => "literal expression",
            Expr::Identifier(_) => "identifier name",
            Expr::GenericName(_) => "generic name",
            Expr::Invocation(_) => "invocation expression",
            Expr::ObjectCreation(_) => "object creation expression",
            Expr::ArrayCreation(_) => "array creation expression",
            Expr::Parenthesized(_) => "parenthesized expression",
            Expr::Assignment(_) => "assignment expression",
            Expr::MemberAccess(_) => "member access expression",
            Expr::ElementAccess(_) => "element access expression",
            Expr::AnonymousMethod(_) => "anonymous method expression",
            Expr::Lambda(_) => "lambda expression",
            Expr::Cast(_) => "cast expression",
            Expr::Conditional(_) => "conditional expression",
            Expr::This => "this expression",
            Expr::Base => "base expression",
            Expr::PredefinedType(_) => "predefined type",
            Expr::Other(other) => &other.kind,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Binary(b) => write!(f, "{} {} {}", b.left, b.operator.symbol(), b.right),
            Expr::PrefixUnary(u) => write!(f, "{}{}", u.operator.symbol(), u.operand),
            Expr::PostfixUnary(u) => write!(f, "{}{}", u.operand, u.operator.symbol()),
            Expr::Literal(lit) => write!(f, "{}", lit.value),
            Expr::Identifier(n) | Expr::PredefinedType(n) => f.write_str(&n.name),
            Expr::GenericName(g) => {
                write!(f, "{}<", g.name)?;
                write_separated(f, &g.type_arguments, ", ")?;
                f.write_str(">")
            }
            Expr::Invocation(call) => {
                write!(f, "{}(", call.callee)?;
                write_separated(f, &call.arguments, ", ")?;
                f.write_str(")")
            }
            Expr::ObjectCreation(new) => {
                write!(f, "new {}(", new.ty)?;
                write_separated(f, &new.arguments, ", ")?;
                f.write_str(")")?;
                if let Some(initializer) = &new.initializer {
                    f.write_str(" { ")?;
                    write_separated(f, initializer, ", ")?;
                    f.write_str(" }")?;
                }
                Ok(())
            }
            Expr::ArrayCreation(array) => {
                match &array.ty {
                    Some(ty) => write!(f, "new {} {{ ", ty)?,
                    None => f.write_str("new[] { ")?,
                }
                write_separated(f, &array.initializer, ", ")?;
                f.write_str(" }")
            }
            Expr::Parenthesized(p) => write!(f, "({})", p.inner),
            Expr::Assignment(a) => write!(f, "{} {} {}", a.left, a.operator.symbol(), a.right),
            Expr::MemberAccess(m) => {
                write!(f, "{}.{}", m.receiver, m.member.name)?;
                if !m.member.type_arguments.is_empty() {
                    f.write_str("<")?;
                    write_separated(f, &m.member.type_arguments, ", ")?;
                    f.write_str(">")?;
                }
                Ok(())
            }
            Expr::ElementAccess(e) => {
                write!(f, "{}[", e.receiver)?;
                write_separated(f, &e.arguments, ", ")?;
                f.write_str("]")
            }
            Expr::AnonymousMethod(m) => {
                f.write_str("delegate")?;
                if let Some(parameters) = &m.parameters {
                    f.write_str(" (")?;
                    write_separated(f, parameters, ", ")?;
                    f.write_str(")")?;
                }
                write!(f, " {}", m.body)
            }
            Expr::Lambda(lambda) => {
                f.write_str("(")?;
                write_separated(f, &lambda.parameters, ", ")?;
                f.write_str(") => ")?;
                match &lambda.body {
                    FunctionBody::Block(block) => write!(f, "{}", block),
                    FunctionBody::Expression(expr) => write!(f, "{}", expr),
                }
            }
            Expr::Cast(cast) => write!(f, "({}){}", cast.ty, cast.operand),
            Expr::Conditional(c) => {
                write!(f, "{} ? {} : {}", c.condition, c.when_true, c.when_false)
            }
            Expr::This => f.write_str("this"),
            Expr::Base => f.write_str("base"),
            Expr::Other(other) => f.write_str(&other.text),
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Numeric(n) => write!(f, "{}", n),
            LiteralValue::String(s) => write!(f, "\"{}\"", escape(s, '"')),
            LiteralValue::Character(c) => write!(f, "'{}'", escape(&c.to_string(), '\'')),
            LiteralValue::Boolean(b) => write!(f, "{}", b),
            LiteralValue::Null => f.write_str("null"),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{}: ", name)?;
        }
        if let Some(modifier) = &self.modifier {
            write!(f, "{} ", modifier)?;
        }
        write!(f, "{}", self.expression)
    }
}

/// Escape a string body for a quoted literal delimited by `quote`.
pub fn escape(s: &str, quote: char) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}
