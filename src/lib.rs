// Copyright (c) The payload-forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rewrites a scripting-language expression so it evaluates to the same
//! value while avoiding every match of a caller-supplied blacklist regex.
//!
//! The crate is built from a handful of small, independently testable
//! pieces: an [`ast::Node`] the caller constructs (there is no parser
//! here — bring your own, or build nodes directly), a [`render`] module
//! that turns a node back into source text, a [`blacklist::Blacklist`]
//! oracle that is the sole judge of whether a piece of text is acceptable,
//! a table of [`strategies`] that each try to re-express one AST node in a
//! different but value-equivalent way, and a [`visitor`] that drives the
//! whole thing top-down under a [`config::Config`]'s depth budget.
//!
//! ```
//! use payload_forge::{ast::Node, blacklist::Blacklist, config::Config, rewrite_text};
//! use std::collections::HashMap;
//!
//! let blacklist = Blacklist::new("[0-8]", vec![]).unwrap();
//! let mut white = HashMap::new();
//! white.insert(payload_forge::ast::Category::Int, vec!["by_cal".to_string()]);
//! let config = Config::new(white, vec![], 4, blacklist);
//!
//! let rewritten = rewrite_text(&Node::Int(1), &config).unwrap();
//! assert!(rewritten.chars().all(|c| !"012345678".contains(c)));
//! ```

pub mod ast;
pub mod blacklist;
pub mod config;
pub mod errors;
pub mod render;
mod selector;
pub mod strategies;
mod synth;
mod visitor;

#[cfg(test)]
mod eval_toy;

use ast::Node;
use config::Config;
use errors::RewriteError;

/// Rewrite `payload` under `config`, returning the rewritten AST.
///
/// This is a pure, total function of `(payload, config)`: no I/O, no
/// global or thread-local state, and no randomness (`spec.md` §3). The
/// only way it fails is [`errors::RewriteError::EmptyCandidate`], which
/// indicates a bug in a strategy rather than an ordinary "could not find a
/// bypass" outcome — the latter is not an error, it is simply the input
/// node returned unchanged.
pub fn rewrite(payload: &Node, config: &Config) -> Result<Node, RewriteError> {
    visitor::visit(payload, config, config.depth(), false)
}

/// [`rewrite`], followed by [`render::render`] on the result.
pub fn rewrite_text(payload: &Node, config: &Config) -> Result<String, RewriteError> {
    rewrite(payload, config).map(|node| render::render(&node))
}
