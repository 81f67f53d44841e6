// Copyright (c) The payload-forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for the three universal properties `spec.md` §8 states
//! beyond the worked scenarios (idempotence under an empty blacklist, the
//! depth-cap property, and monotone applicability), generated over small
//! arbitrary ASTs the way `nextest-filtering/src/proptest_helpers.rs`
//! generates arbitrary `ParsedExpr` trees for its own property tests.

use payload_forge::ast::{BinOpKind, BoolOpKind, Node};
use payload_forge::blacklist::Blacklist;
use payload_forge::config::Config;
use payload_forge::{rewrite, rewrite_text};
use proptest::prelude::*;
use std::collections::HashMap;

/// Arbitrary small expression tree: integer/bool/name leaves, one level of
/// `BinOp`/`BoolOp` nesting over them. Deliberately shallow — these
/// properties hold at any depth, and a small tree keeps failures readable.
fn arb_node() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        (-50i128..50).prop_map(Node::Int),
        any::<bool>().prop_map(Node::Bool),
        "[a-z][a-z0-9_]{0,5}".prop_map(Node::name),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Node::binop(l, BinOpKind::Add, r)),
            prop::collection::vec(inner, 2..4).prop_map(|values| Node::BoolOp {
                op: BoolOpKind::And,
                values,
            }),
        ]
    })
}

fn never_matches() -> Blacklist {
    // `$^` never matches any nonempty text: `$` only lands at the very end
    // of the haystack, and `^` right after it only lands at the very
    // start, so the two can only coincide on an empty string. Every node
    // this module renders is nonempty.
    Blacklist::new("$^", vec![]).unwrap()
}

proptest! {
    /// Depth cap (`spec.md` §8): a depth-0 budget never rewrites anything,
    /// for any node and any enabled strategy set.
    #[test]
    fn depth_zero_is_always_a_no_op(node in arb_node()) {
        let blacklist = Blacklist::new("[0-9]|and", vec![]).unwrap();
        let mut white = HashMap::new();
        white.insert(payload_forge::ast::Category::Int, vec!["by_cal".to_string()]);
        white.insert(payload_forge::ast::Category::Name, vec!["by_unicode".to_string()]);
        white.insert(payload_forge::ast::Category::BoolOp, vec!["by_bitwise".to_string()]);
        let config = Config::new(white, vec![], 0, blacklist);

        let rewritten = rewrite(&node, &config).unwrap();
        prop_assert_eq!(rewritten, node);
    }

    /// Idempotence under an empty blacklist (`spec.md` §8): a forbidden
    /// pattern that can never match means every node already passes the
    /// fast path, so the rewrite is a no-op regardless of which strategies
    /// are enabled.
    #[test]
    fn empty_blacklist_never_rewrites(node in arb_node()) {
        let mut white = HashMap::new();
        white.insert(payload_forge::ast::Category::Int, vec!["by_cal".to_string(), "by_hex".to_string()]);
        white.insert(payload_forge::ast::Category::Name, vec!["by_unicode".to_string(), "by_builtins".to_string()]);
        white.insert(payload_forge::ast::Category::BoolOp, vec!["by_bitwise".to_string(), "by_arithmetic".to_string()]);
        let config = Config::new(white, vec![], 5, never_matches());

        let rewritten = rewrite(&node, &config).unwrap();
        prop_assert_eq!(rewritten, node);
    }

    /// Monotone applicability (`spec.md` §8): "enabling an additional
    /// strategy can only change outputs that the stricter configuration
    /// left unchanged; it never changes an output that had already been
    /// rewritten successfully." Declared order is preserved when a
    /// strategy list grows, so if the first-listed strategy already
    /// produces an oracle-accepted candidate, appending a second strategy
    /// after it must not change the result — the loop in `visitor::visit`
    /// never reaches the appended strategy.
    #[test]
    fn appending_a_strategy_never_changes_an_already_accepted_output(n in -500i128..500) {
        let blacklist = Blacklist::new("7", vec![]).unwrap();
        let node = Node::Int(n);

        let mut subset = HashMap::new();
        subset.insert(payload_forge::ast::Category::Int, vec!["by_cal".to_string()]);
        let subset_config = Config::new(subset, vec![], 6, blacklist.clone());

        let mut superset = HashMap::new();
        superset.insert(
            payload_forge::ast::Category::Int,
            vec!["by_cal".to_string(), "by_hex".to_string()],
        );
        let superset_config = Config::new(superset, vec![], 6, blacklist.clone());

        let subset_text = rewrite_text(&node, &subset_config).unwrap();
        if subset_config.blacklist().accept(&subset_text) {
            let superset_text = rewrite_text(&node, &superset_config).unwrap();
            prop_assert_eq!(superset_text, subset_text);
        }
    }
}
