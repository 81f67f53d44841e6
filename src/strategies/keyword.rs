// Copyright (c) The payload-forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `Bypass_Keyword` strategies (`spec.md` §4.3).
//!
//! A `Node::Keyword` is `arg=value` inside a call's argument list; only
//! `arg` (the parameter name) is ever rewritten here; `value` is a separate
//! child the visitor recurses into on its own.

use super::Context;
use crate::ast::Node;

pub(super) const ENTRIES: &[(&str, super::StrategyFn)] = &[("by_unicode", by_unicode)];

/// Same escalating-substitution algorithm as the `Name` strategy of the
/// same name, applied to the keyword-argument name instead of a bare
/// identifier reference (`spec.md` §4.3: "declines on protected dunder
/// parameter names").
fn by_unicode(node: &Node, ctx: &Context<'_>) -> Option<Node> {
    let Node::Keyword { arg, value } = node else {
        return None;
    };
    if super::is_protected(arg) {
        return None;
    }
    let new_arg = super::substitute_escalating(arg, ctx)?;
    Some(Node::Keyword {
        arg: new_arg,
        value: value.clone(),
    })
}
