// Copyright (c) The payload-forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The traversal driver (`spec.md` §4.5): walks the tree top-down,
//! consulting the oracle before ever consulting a strategy, and re-enters
//! newly synthesized subtrees so a rewrite that introduces a fresh
//! forbidden character gets a chance to be rewritten again itself.

use crate::ast::Node;
use crate::config::Config;
use crate::errors::RewriteError;
use crate::render;
use crate::selector;
use crate::strategies::Context;

/// Rewrite `node` under `config`'s depth budget. Deterministic,
/// left-to-right, and a pure function of its inputs (`spec.md` §3: "no
/// hidden state").
pub(crate) fn visit(node: &Node, config: &Config, depth: u32, in_bool_context: bool) -> Result<Node, RewriteError> {
    let text = render::render(node);
    let fast_path = config.blacklist().accept(&text);
    tracing::trace!(
        category = node.category().map(|c| c.config_name()),
        depth,
        fast_path,
        "visiting node"
    );
    if fast_path {
        // Fast path (`spec.md` §4.5 step 1): the whole rendered subtree is
        // already acceptable, so nothing under it needs visiting.
        return Ok(node.clone());
    }
    if depth == 0 {
        return Ok(node.clone());
    }

    let Some(category) = node.category() else {
        return reconstruct(node, config, depth, in_bool_context);
    };
    let enabled = config.enabled_strategies(category);
    if enabled.is_empty() {
        return reconstruct(node, config, depth, in_bool_context);
    }

    let ctx = Context {
        blacklist: config.blacklist(),
        in_bool_context,
    };
    for (name, candidate) in selector::candidates(category, node, &enabled, &ctx) {
        let raw_text = render::render(&candidate);
        if raw_text.is_empty() {
            return Err(RewriteError::EmptyCandidate {
                strategy: name.to_string(),
                category: category.config_name(),
            });
        }
        // Re-enter the full visitor on the synthesized candidate rather
        // than just its children: a strategy's output can still carry
        // forbidden text that only a *different* category's strategy can
        // clean up (`by_builtins`'s dotted form is itself an `Attribute`
        // that `by_getattr` gets a further pass at), and the oracle can
        // only judge the candidate once that's happened (`spec.md` §4.5
        // step 3, read together with §4.4's "first candidate the oracle
        // accepts").
        let scrubbed = visit(&candidate, config, depth - 1, in_bool_context)?;
        if config.blacklist().accept(&render::render(&scrubbed)) {
            tracing::debug!(strategy = name, %category, "strategy accepted");
            return Ok(scrubbed);
        }
        tracing::debug!(strategy = name, %category, "strategy candidate rejected by oracle");
    }
    reconstruct(node, config, depth, in_bool_context)
}

/// Recurse into `node`'s children, threading the "does this child sit in a
/// numeric-boolean position" flag through the slots that can carry it
/// (`spec.md` §4.3 `by_arithmetic`'s context restriction): an `if`/`else`
/// test, a direct argument to `bool(...)`, and — since the truth value of
/// an `and`/`or` chain used only for its truthiness is inherited by any
/// nested `and`/`or` operand — a `BoolOp`'s own operands when `node` itself
/// was visited in bool context (`examples/original_source/test_case.py`'s
/// `test_BoolOp`: a nested chain inside `if (a and (b or c)) or (d and e)`
/// only gets `by_arithmetic`'s numeric rewrite once this is threaded
/// through correctly).
fn reconstruct(node: &Node, config: &Config, depth: u32, in_bool_context: bool) -> Result<Node, RewriteError> {
    let recurse = |child: &Node, bool_ctx: bool| visit(child, config, depth, bool_ctx);
    Ok(match node {
        Node::Attribute { target, attr } => Node::Attribute {
            target: Box::new(recurse(target, false)?),
            attr: attr.clone(),
        },
        Node::Keyword { arg, value } => Node::Keyword {
            arg: arg.clone(),
            value: Box::new(recurse(value, false)?),
        },
        Node::BoolOp { op, values } => Node::BoolOp {
            op: *op,
            values: values
                .iter()
                .map(|v| recurse(v, in_bool_context))
                .collect::<Result<_, _>>()?,
        },
        Node::Call { func, args, keywords } => {
            let is_bool_call = matches!(func.as_ref(), Node::Name(n) if n == "bool");
            Node::Call {
                func: Box::new(recurse(func, false)?),
                args: args
                    .iter()
                    .map(|a| recurse(a, is_bool_call))
                    .collect::<Result<_, _>>()?,
                keywords: keywords
                    .iter()
                    .map(|k| recurse(k, false))
                    .collect::<Result<_, _>>()?,
            }
        }
        Node::BinOp { left, op, right } => Node::BinOp {
            left: Box::new(recurse(left, false)?),
            op: *op,
            right: Box::new(recurse(right, false)?),
        },
        Node::UnaryOp { op, operand } => Node::UnaryOp {
            op: *op,
            operand: Box::new(recurse(operand, false)?),
        },
        Node::Subscript { target, index } => Node::Subscript {
            target: Box::new(recurse(target, false)?),
            index: Box::new(recurse(index, false)?),
        },
        Node::Slice { lower, upper, step } => Node::Slice {
            lower: lower.as_ref().map(|n| recurse(n, false)).transpose()?.map(Box::new),
            upper: upper.as_ref().map(|n| recurse(n, false)).transpose()?.map(Box::new),
            step: step.as_ref().map(|n| recurse(n, false)).transpose()?.map(Box::new),
        },
        Node::Tuple(items) => Node::Tuple(items.iter().map(|i| recurse(i, false)).collect::<Result<_, _>>()?),
        Node::List(items) => Node::List(items.iter().map(|i| recurse(i, false)).collect::<Result<_, _>>()?),
        Node::IfExp { test, body, orelse } => Node::IfExp {
            test: Box::new(recurse(test, true)?),
            body: Box::new(recurse(body, false)?),
            orelse: Box::new(recurse(orelse, false)?),
        },
        Node::Paren(inner) => Node::Paren(Box::new(recurse(inner, false)?)),
        leaf => leaf.clone(),
    })
}
