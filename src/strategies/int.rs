// Copyright (c) The payload-forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `Bypass_Int` strategies (`spec.md` §4.3).

use super::Context;
use crate::ast::Node;
use crate::synth;

pub(super) const ENTRIES: &[(&str, super::StrategyFn)] = &[
    ("by_trans", by_trans),
    ("by_cal", by_cal),
    ("by_unicode", by_unicode),
    ("by_hex", by_hex),
    ("by_bin", by_bin),
    ("by_ord", by_ord),
];

/// The literal itself. Always "succeeds" by returning the input unchanged;
/// harmless since the selector only keeps a candidate whose rendering the
/// oracle accepts, and an unchanged node renders to unchanged (still
/// rejected) text. Exists to exercise the selector pipeline end to end even
/// when no other `Bypass_Int` strategy is enabled.
fn by_trans(node: &Node, _ctx: &Context<'_>) -> Option<Node> {
    Some(node.clone())
}

/// Synthesize an arithmetic expression equal to `n` using only characters
/// the blacklist tolerates in isolation (`spec.md` §4.7).
fn by_cal(node: &Node, ctx: &Context<'_>) -> Option<Node> {
    let Node::Int(n) = node else { return None };
    let allowed = ctx.blacklist.allowed_alphabet().into_iter().collect();
    synth::synthesize_int(*n, &allowed)
}

/// `int('<sans-serif digits>')`, sign kept as an ASCII `-` outside the
/// string (`spec.md` §4.3: "digits substituted... sign preserved as ASCII
/// outside the quotes").
fn by_unicode(node: &Node, _ctx: &Context<'_>) -> Option<Node> {
    let Node::Int(n) = node else { return None };
    let digits = synth::sans_serif_digits(n.unsigned_abs());
    let call = Node::call1(Node::name("int"), Node::Str(digits));
    Some(if *n < 0 { Node::neg(call) } else { call })
}

/// A hexadecimal numeral, e.g. `-2024` -> `-0x7e8`.
fn by_hex(node: &Node, _ctx: &Context<'_>) -> Option<Node> {
    let Node::Int(n) = node else { return None };
    let raw = Node::RawNumeral(format!("0x{:x}", n.unsigned_abs()));
    Some(if *n < 0 { Node::neg(raw) } else { raw })
}

/// A binary numeral, e.g. `5` -> `0b101`.
fn by_bin(node: &Node, _ctx: &Context<'_>) -> Option<Node> {
    let Node::Int(n) = node else { return None };
    let raw = Node::RawNumeral(format!("0b{:b}", n.unsigned_abs()));
    Some(if *n < 0 { Node::neg(raw) } else { raw })
}

/// `ord('<char>')`, only applicable when `n`'s absolute value is a valid
/// Unicode scalar value (`spec.md` §4.3: "only applicable for values that
/// correspond to a single Unicode codepoint").
fn by_ord(node: &Node, _ctx: &Context<'_>) -> Option<Node> {
    let Node::Int(n) = node else { return None };
    let codepoint: u32 = (*n).unsigned_abs().try_into().ok()?;
    let c = char::from_u32(codepoint)?;
    let call = Node::call1(Node::name("ord"), Node::Str(c.to_string()));
    Some(if *n < 0 { Node::neg(call) } else { call })
}
