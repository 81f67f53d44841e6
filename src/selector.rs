// Copyright (c) The payload-forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The selector (`spec.md` §4.4): enumerates each enabled strategy in
//! configured order and yields the candidate it proposes, skipping any
//! that decline (return `None`) or name a strategy unknown to this
//! category. No ranking among what's produced — declared order is the
//! only tie-break, and it's the caller's job to decide which candidate,
//! if any, is actually usable (`spec.md` §4.4: "no backtracking past the
//! first acceptance" is a property of the caller's loop, not of this
//! enumeration).

use crate::ast::{Category, Node};
use crate::strategies::{self, Context};

pub(crate) fn candidates<'a>(
    category: Category,
    node: &'a Node,
    enabled: &'a [&'a str],
    ctx: &'a Context<'a>,
) -> impl Iterator<Item = (&'a str, Node)> + 'a {
    enabled.iter().filter_map(move |&name| {
        let strategy = strategies::lookup(category, name);
        if strategy.is_none() {
            tracing::debug!(strategy = name, %category, "unknown strategy name, ignoring");
        }
        let candidate = strategy?(node, ctx)?;
        Some((name, candidate))
    })
}
