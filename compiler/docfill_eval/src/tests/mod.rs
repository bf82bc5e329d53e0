//! Evaluator tests. Expressions are built by hand; parsing is tested in
//! `docfill_parse`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod builtins_tests;
mod context_tests;

use docfill_ir::{BinaryOp, Expr, ExprKind, Span, UnaryOp, Value};

pub(crate) fn lit(value: impl Into<Value>) -> Expr {
    Expr::new(ExprKind::Literal(value.into()), Span::DUMMY)
}

pub(crate) fn ident(name: &str) -> Expr {
    ident_at(name, Span::DUMMY)
}

pub(crate) fn ident_at(name: &str, span: Span) -> Expr {
    Expr::new(ExprKind::Identifier(name.into()), span)
}

pub(crate) fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        Span::DUMMY,
    )
}

pub(crate) fn unary(op: UnaryOp, operand: Expr) -> Expr {
    Expr::new(
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
        },
        Span::DUMMY,
    )
}

pub(crate) fn call(name: &str, args: Vec<Expr>) -> Expr {
    Expr::new(
        ExprKind::Call {
            name: name.into(),
            args,
        },
        Span::DUMMY,
    )
}

pub(crate) fn field(receiver: Expr, name: &str) -> Expr {
    Expr::new(
        ExprKind::Field {
            receiver: Box::new(receiver),
            field: name.into(),
        },
        Span::DUMMY,
    )
}

pub(crate) fn index(receiver: Expr, index: Expr) -> Expr {
    Expr::new(
        ExprKind::Index {
            receiver: Box::new(receiver),
            index: Box::new(index),
        },
        Span::DUMMY,
    )
}
