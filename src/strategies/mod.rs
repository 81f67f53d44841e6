// Copyright (c) The payload-forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The bypass strategy registry (`spec.md` §4.3).
//!
//! Each strategy is a plain function from `(&Node, &Context)` to an
//! `Option<Node>`: `Some` is a value-preserving rewrite candidate, `None` is
//! a declaration "this strategy does not apply here". There is no dynamic
//! dispatch; [`lookup`] is a static table keyed on `(Category, name)`, since
//! the set of strategies is closed and known at compile time.

mod attribute;
mod boolop;
mod int;
mod keyword;
mod name;
mod string;

use crate::ast::{Category, Node};
use crate::blacklist::Blacklist;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Shared context every strategy is invoked with.
pub struct Context<'a> {
    pub blacklist: &'a Blacklist,
    /// `true` when this node occupies a position where Python implicitly
    /// coerces to `bool` and back to a number is lossless — an `if`/`else`
    /// test, or a direct argument to `bool(...)` (`spec.md` §4.3
    /// `by_arithmetic`: "only safe... in a context that already coerces to
    /// a boolean/numeric result").
    pub in_bool_context: bool,
}

pub(crate) type StrategyFn = fn(&Node, &Context) -> Option<Node>;

/// The full strategy dispatch table, built once and shared for the life of
/// the process (`spec.md` §5: "strategies are stateless values created at
/// registry init and live for the process"), the same
/// build-once-share-immutably pattern the wider workspace uses for its own
/// static lookup tables.
static REGISTRY: LazyLock<HashMap<(Category, &'static str), StrategyFn>> = LazyLock::new(|| {
    let tables: &[(Category, &[(&'static str, StrategyFn)])] = &[
        (Category::Int, int::ENTRIES),
        (Category::String, string::ENTRIES),
        (Category::Name, name::ENTRIES),
        (Category::Attribute, attribute::ENTRIES),
        (Category::Keyword, keyword::ENTRIES),
        (Category::BoolOp, boolop::ENTRIES),
    ];
    tables
        .iter()
        .flat_map(|(category, entries)| entries.iter().map(move |&(name, f)| ((*category, name), f)))
        .collect()
});

/// Look up a named strategy for `category`. Returns `None` for an unknown
/// name, which the caller (the selector, `spec.md` §4.6) treats as "ignore
/// silently", not an error.
pub fn lookup(category: Category, name: &str) -> Option<StrategyFn> {
    REGISTRY.get(&(category, name)).copied()
}

/// Identifiers the Name/Keyword `by_unicode` substitution must never touch,
/// because corrupting them would break every other strategy that depends on
/// them rendering literally (`by_builtins`, `by_getattr`, `by_vars`, the
/// synthesizer's own `len`/`str`/`bool`/`chr` calls). Centralized here per
/// `spec.md` §4.3's note that this predicate "should be centralized and
/// documented".
pub(crate) const PROTECTED_NAMES: &[&str] = &[
    "__import__",
    "__builtins__",
    "__dict__",
    "__class__",
    "__bases__",
    "__subclasses__",
    "__globals__",
    "__code__",
    "__closure__",
    "__base__",
    "__mro__",
    "len",
    "str",
    "bool",
    "chr",
    "ord",
    "bytes",
    "dict",
    "list",
    "vars",
    "getattr",
];

pub(crate) fn is_protected(name: &str) -> bool {
    PROTECTED_NAMES.contains(&name)
}

/// A conservative list of Python builtins `by_builtins` (`spec.md` §4.3,
/// Name strategies) may route through `__builtins__.<name>`.
pub(crate) const BUILTIN_NAMES: &[&str] = &[
    "__import__",
    "abs",
    "all",
    "any",
    "bool",
    "bytearray",
    "bytes",
    "callable",
    "chr",
    "classmethod",
    "compile",
    "complex",
    "delattr",
    "dict",
    "dir",
    "divmod",
    "enumerate",
    "eval",
    "exec",
    "filter",
    "float",
    "format",
    "frozenset",
    "getattr",
    "globals",
    "hasattr",
    "hash",
    "help",
    "id",
    "input",
    "int",
    "isinstance",
    "issubclass",
    "iter",
    "len",
    "list",
    "locals",
    "map",
    "max",
    "memoryview",
    "min",
    "next",
    "object",
    "open",
    "ord",
    "pow",
    "print",
    "property",
    "range",
    "repr",
    "reversed",
    "round",
    "set",
    "setattr",
    "slice",
    "sorted",
    "staticmethod",
    "str",
    "sum",
    "super",
    "tuple",
    "type",
    "vars",
    "zip",
];

/// `true` iff `text` is a valid Python identifier: an `XID_Start` (or `_`)
/// character followed by zero or more `XID_Continue` characters.
pub(crate) fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c == '_' || unicode_ident::is_xid_start(c) => {}
        _ => return false,
    }
    chars.all(unicode_ident::is_xid_continue)
}

/// The shared `by_unicode` substitution algorithm for `Name` and `Keyword`
/// identifiers (`spec.md` §4.3).
///
/// Finds every non-overlapping match of the forbidden pattern in `id`, then
/// escalates a substitution "depth" `k = 1, 2, 3, ...`: at depth `k`, the
/// `k`-th character from the end of each match is replaced by its Unicode
/// confusable, and the whole identifier is re-checked against the oracle.
/// The first depth whose substitution the oracle accepts wins. Gives up
/// once `k` exceeds the longest match (a match entirely made of characters
/// with no confusable can never be defeated this way).
pub(crate) fn substitute_escalating(id: &str, ctx: &Context<'_>) -> Option<String> {
    let chars: Vec<char> = id.chars().collect();
    let matches = ctx.blacklist.pattern_matches_in(id);
    if matches.is_empty() {
        return None;
    }
    let longest = matches.iter().map(|(start, end)| end - start).max()?;
    for k in 1..=longest {
        let mut candidate = chars.clone();
        for &(start, end) in &matches {
            let len = end - start;
            if k > len {
                continue;
            }
            let idx = end - k;
            if let Some(sub) = crate::synth::identifier_confusable(candidate[idx]) {
                candidate[idx] = sub;
            }
        }
        let text: String = candidate.iter().collect();
        if ctx.blacklist.accept(&text) {
            return Some(text);
        }
    }
    None
}
