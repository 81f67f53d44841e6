// Copyright (c) The payload-forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `Bypass_Attribute` strategies (`spec.md` §4.3).
//!
//! All three rewrite `target.attr` into a call that reaches the same
//! attribute through a different syntax. `by_vars` and `by_dict_attr` only
//! fire when `target` is a bare `Name` — `vars(<target>)`/`<target>.__dict__`
//! read as a statement about *that name's* namespace, which doesn't
//! generalize to an arbitrary target expression (Scenario 6: `(1+1).system`
//! is passed through unchanged under `by_vars`).
//!
//! `by_getattr` carries no such restriction: `getattr(<target>, 'attr')` is
//! valid for any `target` expression, which is exactly what lets a chained
//! access like `__import__('os').popen('whoami').read()` decompose one
//! `Attribute` layer at a time even though every target past the first is
//! itself a `Call`, not a `Name` (Scenario 7).

use super::Context;
use crate::ast::Node;

pub(super) const ENTRIES: &[(&str, super::StrategyFn)] = &[
    ("by_getattr", by_getattr),
    ("by_vars", by_vars),
    ("by_dict_attr", by_dict_attr),
];

fn target_attr(node: &Node) -> Option<(&Node, &str)> {
    let Node::Attribute { target, attr } = node else {
        return None;
    };
    Some((target.as_ref(), attr.as_str()))
}

fn target_name(node: &Node) -> Option<(&Node, &str)> {
    let (target, attr) = target_attr(node)?;
    match target {
        Node::Name(_) => Some((target, attr)),
        _ => None,
    }
}

/// `getattr(target, 'attr')`.
fn by_getattr(node: &Node, _ctx: &Context<'_>) -> Option<Node> {
    let (target, attr) = target_attr(node)?;
    Some(Node::call(
        Node::name("getattr"),
        vec![target.clone(), Node::Str(attr.to_string())],
    ))
}

/// `vars(target)['attr']`.
fn by_vars(node: &Node, _ctx: &Context<'_>) -> Option<Node> {
    let (target, attr) = target_name(node)?;
    let vars_call = Node::call1(Node::name("vars"), target.clone());
    Some(Node::subscript(vars_call, Node::Str(attr.to_string())))
}

/// `target.__dict__['attr']`.
fn by_dict_attr(node: &Node, _ctx: &Context<'_>) -> Option<Node> {
    let (target, attr) = target_name(node)?;
    let dict_attr = Node::attr(target.clone(), "__dict__");
    Some(Node::subscript(dict_attr, Node::Str(attr.to_string())))
}
