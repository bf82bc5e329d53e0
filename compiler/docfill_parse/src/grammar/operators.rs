//! Operator matching helpers.

use docfill_ir::{BinaryOp, UnaryOp};
use docfill_lexer::TokenKind;

use crate::Parser;

impl Parser<'_> {
    pub(crate) fn match_or_op(&self) -> Option<BinaryOp> {
        match self.cursor.current_kind()? {
            TokenKind::PipePipe => Some(BinaryOp::Or),
            _ => None,
        }
    }

    pub(crate) fn match_and_op(&self) -> Option<BinaryOp> {
        match self.cursor.current_kind()? {
            TokenKind::AndAnd => Some(BinaryOp::And),
            _ => None,
        }
    }

    pub(crate) fn match_equality_op(&self) -> Option<BinaryOp> {
        match self.cursor.current_kind()? {
            TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::NotEq => Some(BinaryOp::NotEq),
            _ => None,
        }
    }

    pub(crate) fn match_comparison_op(&self) -> Option<BinaryOp> {
        match self.cursor.current_kind()? {
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::LtEq => Some(BinaryOp::LtEq),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::GtEq => Some(BinaryOp::GtEq),
            _ => None,
        }
    }

    pub(crate) fn match_additive_op(&self) -> Option<BinaryOp> {
        match self.cursor.current_kind()? {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        }
    }

    pub(crate) fn match_multiplicative_op(&self) -> Option<BinaryOp> {
        match self.cursor.current_kind()? {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Mod),
            _ => None,
        }
    }

    pub(crate) fn match_unary_op(&self) -> Option<UnaryOp> {
        match self.cursor.current_kind()? {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Bang => Some(UnaryOp::Not),
            _ => None,
        }
    }
}
