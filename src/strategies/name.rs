// Copyright (c) The payload-forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `Bypass_Name` strategies (`spec.md` §4.3).

use super::Context;
use crate::ast::Node;

pub(super) const ENTRIES: &[(&str, super::StrategyFn)] =
    &[("by_unicode", by_unicode), ("by_builtins", by_builtins)];

/// Substitute Unicode confusables into just enough character positions of
/// the identifier to stop the forbidden pattern from matching, escalating
/// one position per non-overlapping match until the oracle accepts
/// (`spec.md` §4.3 `by_unicode`: "the minimum number of substitutions... in
/// the absence of a further tie-break rule, substitute the rightmost
/// character of each offending match first").
fn by_unicode(node: &Node, ctx: &Context<'_>) -> Option<Node> {
    let Node::Name(id) = node else { return None };
    if super::is_protected(id) {
        return None;
    }
    super::substitute_escalating(id, ctx).map(Node::Name)
}

/// `__builtins__.<name>`, only for names the interpreter actually exposes
/// as builtins.
fn by_builtins(node: &Node, _ctx: &Context<'_>) -> Option<Node> {
    let Node::Name(id) = node else { return None };
    if !super::BUILTIN_NAMES.contains(&id.as_str()) {
        return None;
    }
    Some(Node::attr(Node::name("__builtins__"), id.clone()))
}
