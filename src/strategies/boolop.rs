// Copyright (c) The payload-forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `Bypass_BoolOp` strategies (`spec.md` §4.3).

use super::Context;
use crate::ast::{BinOpKind, BoolOpKind, Node};

pub(super) const ENTRIES: &[(&str, super::StrategyFn)] =
    &[("by_bitwise", by_bitwise), ("by_arithmetic", by_arithmetic)];

/// `and`/`or` rewritten as `&`/`|`. Value-preserving for any operand,
/// unlike `by_arithmetic`, since bitwise-and/-or on bools already behave
/// like their boolean counterparts (no short-circuiting difference matters
/// for side-effect-free operands, which is all this crate ever considers).
fn by_bitwise(node: &Node, _ctx: &Context<'_>) -> Option<Node> {
    let Node::BoolOp { op, values } = node else {
        return None;
    };
    let bin_op = match op {
        BoolOpKind::And => BinOpKind::BitAnd,
        BoolOpKind::Or => BinOpKind::BitOr,
    };
    Node::binop_chain(values.iter().cloned(), bin_op)
}

/// `and`/`or` rewritten as `*`/`+` over `bool(operand)` for each operand
/// (`spec.md` §4.3: "`a and b` -> `bool(a)*bool(b)`; `a or b` ->
/// `bool(a)+bool(b)`"). Only applicable when every operand is a known
/// numeric expression and the node itself sits in a context that already
/// coerces its result to a boolean/numeric value, since `bool(a)*bool(b)`
/// is not generally interchangeable with `a and b` for non-numeric `a`/`b`
/// or in a position where the node's own truthiness (not its value) is
/// what's tested.
fn by_arithmetic(node: &Node, ctx: &Context<'_>) -> Option<Node> {
    if !ctx.in_bool_context {
        return None;
    }
    let Node::BoolOp { op, values } = node else {
        return None;
    };
    if !values.iter().all(is_numeric_expr) {
        return None;
    }
    let bin_op = match op {
        BoolOpKind::And => BinOpKind::Mul,
        BoolOpKind::Or => BinOpKind::Add,
    };
    let wrapped = values
        .iter()
        .map(|v| Node::call1(Node::name("bool"), v.clone()));
    Node::binop_chain(wrapped, bin_op)
}

/// A conservative "this subtree only ever produces a number" check.
fn is_numeric_expr(node: &Node) -> bool {
    match node {
        Node::Int(_) | Node::Bool(_) => true,
        Node::UnaryOp {
            op: crate::ast::UnaryOpKind::Neg | crate::ast::UnaryOpKind::Invert,
            operand,
        } => is_numeric_expr(operand),
        Node::BinOp { left, right, .. } => is_numeric_expr(left) && is_numeric_expr(right),
        _ => false,
    }
}
