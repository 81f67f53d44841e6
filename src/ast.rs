// Copyright (c) The payload-forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The AST vocabulary the rewriter operates on.
//!
//! This is a small, Python-shaped expression grammar: just enough surface
//! to represent the literals, names, attribute accesses, keyword arguments
//! and boolean operators the rewriter rewrites, plus the handful of
//! pass-through variants (`BinOp`, `UnaryOp`, `Subscript`, `Tuple`, ...) it
//! must recurse into without mutating. There is no parser here — callers
//! construct `Node` values directly, or get them from a parser they bring
//! themselves.

use std::fmt;

/// A node in the source expression's abstract syntax tree.
///
/// Only six variants are ever rewritten by a [`crate::strategies`] bypass
/// strategy (see [`Category`]); the rest are carried through the visitor
/// unchanged except for recursing into their children.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An integer literal. Stored as `i128` so that `by_hex`/`by_bin`/`by_ord`
    /// have room for values outside `i64` (e.g. a raw Unicode codepoint up
    /// to `0x10FFFF` is always representable).
    Int(i128),
    /// `True` / `False`.
    Bool(bool),
    /// `None`.
    NoneLit,
    /// A string literal.
    Str(String),
    /// A bare identifier.
    Name(String),
    /// `target.attr`.
    Attribute { target: Box<Node>, attr: String },
    /// `arg=value` inside a call's keyword-argument list.
    Keyword { arg: String, value: Box<Node> },
    /// `and`/`or` chains, kept as an n-ary operand list the way Python's
    /// own `ast.BoolOp` does, rather than a binary tree.
    BoolOp { op: BoolOpKind, values: Vec<Node> },
    /// `func(*args, **keywords)`. Each element of `keywords` is itself a
    /// `Node::Keyword`.
    Call {
        func: Box<Node>,
        args: Vec<Node>,
        keywords: Vec<Node>,
    },
    /// A binary operator application, e.g. the arithmetic formulas
    /// synthesized by `by_cal`/`by_hex`/`by_bitwise`.
    BinOp {
        left: Box<Node>,
        op: BinOpKind,
        right: Box<Node>,
    },
    /// A unary operator application (`-x`, `not x`, `~x`).
    UnaryOp { op: UnaryOpKind, operand: Box<Node> },
    /// `target[index]`.
    Subscript { target: Box<Node>, index: Box<Node> },
    /// `target[lower:upper:step]`.
    Slice {
        lower: Option<Box<Node>>,
        upper: Option<Box<Node>>,
        step: Option<Box<Node>>,
    },
    /// `(a, b, ...)`.
    Tuple(Vec<Node>),
    /// `[a, b, ...]`.
    List(Vec<Node>),
    /// `body if test else orelse`. Exists solely to give `by_arithmetic`
    /// (`spec.md` §4.3 BoolOp strategies) a concrete "numeric-boolean
    /// position" to gate on, per its context restriction.
    IfExp {
        test: Box<Node>,
        body: Box<Node>,
        orelse: Box<Node>,
    },
    /// A numeral written in a non-decimal base (`0x7e8`, `0b11111101000`),
    /// stored pre-rendered since the base is a lexical choice, not a value
    /// one. Produced by `by_hex`/`by_bin`, never by a caller directly.
    RawNumeral(String),
    /// A string literal forced to render with double quotes. Produced by
    /// `by_quote_trans`.
    StrDouble(String),
    /// A string literal whose body is *already* the literal escape-sequence
    /// text to place between quotes (e.g. `\x6d\x61\x63`), used by
    /// `by_hex_encode`/`by_unicode_encode` where every character must be
    /// escaped regardless of whether it needs to be.
    StrEscaped(String),
    /// A parenthesized sub-expression that always renders with its own
    /// parens, independent of the surrounding precedence context. Used by
    /// strategies (`by_char_add`, `by_char`, `by_bytes_single`, ...) whose
    /// expected output is grouped even when it wouldn't otherwise need to be.
    Paren(Box<Node>),
}

/// Boolean operator kind for [`Node::BoolOp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOpKind {
    And,
    Or,
}

/// Binary operator kind for [`Node::BinOp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Mod,
    Pow,
    BitAnd,
    BitOr,
}

/// Unary operator kind for [`Node::UnaryOp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOpKind {
    Neg,
    Not,
    Invert,
}

/// The syntactic category a node belongs to, for dispatch purposes.
///
/// `spec.md`'s `Bypass_Combo` is deliberately absent: it is a test-harness
/// convention meaning "several categories configured at once", not a
/// category strategies dispatch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Int,
    String,
    Name,
    Attribute,
    Keyword,
    BoolOp,
}

impl Category {
    /// The `Bypass_*` name used in configuration and diagnostics.
    pub fn config_name(self) -> &'static str {
        match self {
            Category::Int => "Bypass_Int",
            Category::String => "Bypass_String",
            Category::Name => "Bypass_Name",
            Category::Attribute => "Bypass_Attribute",
            Category::Keyword => "Bypass_Keyword",
            Category::BoolOp => "Bypass_BoolOp",
        }
    }

    pub fn from_config_name(name: &str) -> Option<Self> {
        Some(match name {
            "Bypass_Int" => Category::Int,
            "Bypass_String" => Category::String,
            "Bypass_Name" => Category::Name,
            "Bypass_Attribute" => Category::Attribute,
            "Bypass_Keyword" => Category::Keyword,
            "Bypass_BoolOp" => Category::BoolOp,
            _ => return None,
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_name())
    }
}

impl Node {
    /// The category this node dispatches under, or `None` for pass-through
    /// variants the visitor must recurse into but never hands to a
    /// selector directly.
    pub fn category(&self) -> Option<Category> {
        match self {
            Node::Int(_) => Some(Category::Int),
            Node::Str(_) => Some(Category::String),
            Node::Name(_) => Some(Category::Name),
            Node::Attribute { .. } => Some(Category::Attribute),
            Node::Keyword { .. } => Some(Category::Keyword),
            Node::BoolOp { .. } => Some(Category::BoolOp),
            _ => None,
        }
    }

    /// Builder helpers. These exist because callers (and this crate's own
    /// strategies) construct `Node` trees by hand far more often than they
    /// pattern-match one apart, and spelling out `Box::new` at every call
    /// site buries the shape of the tree being built.
    pub fn int(value: impl Into<i128>) -> Self {
        Node::Int(value.into())
    }

    pub fn name(id: impl Into<String>) -> Self {
        Node::Name(id.into())
    }

    pub fn call(func: Node, args: Vec<Node>) -> Self {
        Node::Call {
            func: Box::new(func),
            args,
            keywords: Vec::new(),
        }
    }

    pub fn call1(func: Node, arg: Node) -> Self {
        Node::call(func, vec![arg])
    }

    pub fn paren(inner: Node) -> Self {
        Node::Paren(Box::new(inner))
    }

    pub fn attr(target: Node, attr: impl Into<String>) -> Self {
        Node::Attribute {
            target: Box::new(target),
            attr: attr.into(),
        }
    }

    pub fn subscript(target: Node, index: Node) -> Self {
        Node::Subscript {
            target: Box::new(target),
            index: Box::new(index),
        }
    }

    pub fn neg(operand: Node) -> Self {
        Node::UnaryOp {
            op: UnaryOpKind::Neg,
            operand: Box::new(operand),
        }
    }

    pub fn binop(left: Node, op: BinOpKind, right: Node) -> Self {
        Node::BinOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Left-fold `values` into a chain of `op` applications, e.g.
    /// `[a, b, c]` with `Add` becomes `(a+b)+c`.
    pub fn binop_chain(mut values: impl Iterator<Item = Node>, op: BinOpKind) -> Option<Self> {
        let first = values.next()?;
        Some(values.fold(first, |acc, next| Node::binop(acc, op, next)))
    }
}
