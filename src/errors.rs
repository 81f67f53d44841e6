// Copyright (c) The payload-forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types surfaced by this crate.
//!
//! Mirrors `nextest-filtering`'s split between a `thiserror`-derived enum
//! for ordinary, caller-facing failures and a `miette`-`Diagnostic`-derived
//! enum for configuration problems — useful to a CLI or config-file loader
//! built on top of this crate (out of scope here, but the hook costs
//! nothing to provide).

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// A malformed [`crate::config::Config`] or [`crate::blacklist::Blacklist`],
/// detected before any traversal begins (`spec.md` §4.8, §7: "a hard error
/// surfaced to the caller before any traversal begins").
#[derive(Debug, Error, Diagnostic)]
#[non_exhaustive]
pub enum ConfigError {
    /// `forbidden_regex` failed to compile.
    #[error("forbidden regex failed to compile: {source}")]
    #[diagnostic(code(payload_forge::config::invalid_regex))]
    InvalidRegex {
        #[source]
        source: regex::Error,
        /// The offending pattern, for diagnostics.
        pattern: String,
        #[label("this pattern")]
        span: Option<SourceSpan>,
    },
}

/// A bug in a bypass strategy: it returned AST the renderer or selector
/// considers malformed. `spec.md` §4.8 classifies this as an "internal
/// invariant violation" distinct from an ordinary decline; it should never
/// be observable from a correctly implemented strategy, but we surface it
/// instead of panicking so a caller embedding this crate in a long-running
/// service doesn't go down with it.
#[derive(Debug, Error, Diagnostic)]
#[non_exhaustive]
pub enum RewriteError {
    /// A strategy produced a candidate that renders to empty text, which
    /// can never be a value-preserving rewrite of anything.
    #[error("strategy `{strategy}` produced an empty rendering for a {category} node")]
    #[diagnostic(code(payload_forge::rewrite::empty_candidate))]
    EmptyCandidate {
        strategy: String,
        category: &'static str,
    },

    /// Configuration rejected before traversal (see [`ConfigError`]).
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}
