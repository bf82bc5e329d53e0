//! Expression tree.
//!
//! The tree is a closed enum: every consumer (evaluator, folder, printer)
//! matches exhaustively over `ExprKind`, so adding a node kind is a compile
//! error everywhere it has to be handled.

use std::fmt;
use std::sync::Arc;

use crate::span::Span;
use crate::value::Value;

/// Identifier or function name.
pub type Name = Arc<str>;

/// An expression node with its location in the placeholder text.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// Literal as written in the source (`42`, `"text"`, `true`, `10min`).
    Literal(Value),
    /// Precomputed value of a folded subtree. Evaluates without touching
    /// the context.
    Constant(Value),
    /// Free identifier, looked up in the scope chain then the resolvers.
    Identifier(Name),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// `name(arg, ...)`; arity is checked by whoever resolves the call.
    Call {
        name: Name,
        args: Vec<Expr>,
    },
    /// `receiver.field`
    Field {
        receiver: Box<Expr>,
        field: Name,
    },
    /// `receiver[index]`
    Index {
        receiver: Box<Expr>,
        index: Box<Expr>,
    },
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// The precomputed value, if this node is a literal or folded constant.
    pub fn constant_value(&self) -> Option<&Value> {
        match &self.kind {
            ExprKind::Literal(value) | ExprKind::Constant(value) => Some(value),
            _ => None,
        }
    }

    /// `true` when evaluation never consults a context.
    pub fn is_constant(&self) -> bool {
        self.constant_value().is_some()
    }
}

/// Binary operators, listed from loosest to tightest binding group.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        }
    }

    /// Short-circuiting operators evaluate their right side lazily.
    pub const fn is_short_circuit(self) -> bool {
        matches!(self, BinaryOp::Or | BinaryOp::And)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}

/// Fully parenthesized rendering, used by `docfill parse` and in tests to
/// check grouping.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Literal(value) => write_value(f, value),
            ExprKind::Constant(value) => {
                f.write_str("const ")?;
                write_value(f, value)
            }
            ExprKind::Identifier(name) => f.write_str(name),
            ExprKind::Binary { op, left, right } => {
                write!(f, "({left} {} {right})", op.as_symbol())
            }
            ExprKind::Unary { op, operand } => write!(f, "({}{operand})", op.as_symbol()),
            ExprKind::Call { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            ExprKind::Field { receiver, field } => write!(f, "{receiver}.{field}"),
            ExprKind::Index { receiver, index } => write!(f, "{receiver}[{index}]"),
        }
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Number(n) => write!(f, "{n}"),
        Value::Str(s) => write!(f, "{s:?}"),
        Value::Temporal(t) => write!(f, "{t}"),
        Value::Period(p) => write!(f, "{p}"),
        Value::List(items) => {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, item)?;
            }
            f.write_str("]")
        }
        Value::Object(o) => write!(f, "<{}>", o.type_name()),
    }
}
