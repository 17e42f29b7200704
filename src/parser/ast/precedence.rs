//! Operator precedence table for expressions.
//!
//! This module centralizes binding power definitions for prefix and infix
//! operators. Higher numbers bind tighter. Postfix selection, field access and
//! calls are handled before any entry here is consulted, and concatenation is
//! a bracketed primary, so neither needs a binding power.

use crate::SyntaxKind;

use super::{BinaryOp, UnaryOp};

/// Left binding power of `?:`. The else branch is parsed at this power so the
/// operator associates to the right.
pub(crate) const COND_BP: u8 = 10;

const UNARY_BP: u8 = 130;

#[derive(Debug, Clone, Copy)]
pub(crate) struct PrefixEntry {
    pub bp: u8,
    pub op: UnaryOp,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct InfixEntry {
    pub l_bp: u8,
    pub r_bp: u8,
    pub op: BinaryOp,
}

const fn prefix(op: UnaryOp) -> PrefixEntry {
    PrefixEntry { bp: UNARY_BP, op }
}

/// Every binary operator is left associative.
const fn left(l_bp: u8, op: BinaryOp) -> InfixEntry {
    InfixEntry {
        l_bp,
        r_bp: l_bp + 1,
        op,
    }
}

const PREFIX_TABLE: &[(SyntaxKind, PrefixEntry)] = &[
    (SyntaxKind::T_PLUS, prefix(UnaryOp::Plus)),
    (SyntaxKind::T_MINUS, prefix(UnaryOp::Neg)),
    (SyntaxKind::T_BANG, prefix(UnaryOp::Not)),
    (SyntaxKind::T_TILDE, prefix(UnaryOp::BitNot)),
    (SyntaxKind::T_AMP, prefix(UnaryOp::ReduceAnd)),
    (SyntaxKind::T_TILDE_AMP, prefix(UnaryOp::ReduceNand)),
    (SyntaxKind::T_PIPE, prefix(UnaryOp::ReduceOr)),
    (SyntaxKind::T_TILDE_PIPE, prefix(UnaryOp::ReduceNor)),
    (SyntaxKind::T_CARET, prefix(UnaryOp::ReduceXor)),
    (SyntaxKind::T_CARET_TILDE, prefix(UnaryOp::ReduceXnor)),
    (SyntaxKind::T_TILDE_CARET, prefix(UnaryOp::ReduceXnor)),
];

const INFIX_TABLE: &[(SyntaxKind, InfixEntry)] = &[
    (SyntaxKind::T_STAR, left(120, BinaryOp::Mul)),
    (SyntaxKind::T_SLASH, left(120, BinaryOp::Div)),
    (SyntaxKind::T_PERCENT, left(120, BinaryOp::Mod)),
    (SyntaxKind::T_PLUS, left(110, BinaryOp::Add)),
    (SyntaxKind::T_MINUS, left(110, BinaryOp::Sub)),
    (SyntaxKind::T_SHL, left(100, BinaryOp::Shl)),
    (SyntaxKind::T_SHR, left(100, BinaryOp::Shr)),
    (SyntaxKind::T_LT, left(90, BinaryOp::Lt)),
    (SyntaxKind::T_LTE, left(90, BinaryOp::Lte)),
    (SyntaxKind::T_GT, left(90, BinaryOp::Gt)),
    (SyntaxKind::T_GTE, left(90, BinaryOp::Gte)),
    (SyntaxKind::T_EQEQ, left(80, BinaryOp::Eq)),
    (SyntaxKind::T_NEQ, left(80, BinaryOp::Neq)),
    (SyntaxKind::T_AMP, left(70, BinaryOp::BitAnd)),
    (SyntaxKind::T_CARET, left(60, BinaryOp::BitXor)),
    (SyntaxKind::T_CARET_TILDE, left(50, BinaryOp::BitXnor)),
    (SyntaxKind::T_TILDE_CARET, left(50, BinaryOp::BitXnor)),
    (SyntaxKind::T_PIPE, left(40, BinaryOp::BitOr)),
    (SyntaxKind::T_AMP_AMP, left(30, BinaryOp::And)),
    (SyntaxKind::T_PIPE_PIPE, left(20, BinaryOp::Or)),
];

#[must_use]
pub(crate) fn prefix_binding_power(kind: SyntaxKind) -> Option<PrefixEntry> {
    PREFIX_TABLE
        .iter()
        .find_map(|(k, e)| (*k == kind).then_some(*e))
}

#[must_use]
pub(crate) fn infix_binding_power(kind: SyntaxKind) -> Option<InfixEntry> {
    INFIX_TABLE
        .iter()
        .find_map(|(k, e)| (*k == kind).then_some(*e))
}
