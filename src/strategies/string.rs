// Copyright (c) The payload-forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `Bypass_String` strategies (`spec.md` §4.3).

use super::Context;
use crate::ast::{BinOpKind, Node};
use crate::synth;

pub(super) const ENTRIES: &[(&str, super::StrategyFn)] = &[
    ("by_empty_str", by_empty_str),
    ("by_quote_trans", by_quote_trans),
    ("by_dict", by_dict),
    ("by_char_add", by_char_add),
    ("by_hex_encode", by_hex_encode),
    ("by_unicode_encode", by_unicode_encode),
    ("by_char_format", by_char_format),
    ("by_format", by_format),
    ("by_char", by_char),
    ("by_reverse", by_reverse),
    ("by_bytes_single", by_bytes_single),
    ("by_bytes_full", by_bytes_full),
];

fn as_str(node: &Node) -> Option<&str> {
    match node {
        Node::Str(value) => Some(value),
        _ => None,
    }
}

/// `str()`, only applicable to the empty string.
fn by_empty_str(node: &Node, _ctx: &Context<'_>) -> Option<Node> {
    let value = as_str(node)?;
    if value.is_empty() {
        Some(Node::call(Node::name("str"), vec![]))
    } else {
        None
    }
}

/// The same content, rendered with double quotes instead of single.
fn by_quote_trans(node: &Node, _ctx: &Context<'_>) -> Option<Node> {
    let value = as_str(node)?;
    Some(Node::StrDouble(value.to_string()))
}

/// `list(dict(<ident>=()))[0]`, only applicable when the string's content
/// is itself a valid identifier (`spec.md` §4.3: "applicable only when the
/// value is a legal Python identifier").
fn by_dict(node: &Node, _ctx: &Context<'_>) -> Option<Node> {
    let value = as_str(node)?;
    if !super::is_identifier(value) {
        return None;
    }
    let inner = Node::Call {
        func: Box::new(Node::name("dict")),
        args: vec![],
        keywords: vec![Node::Keyword {
            arg: value.to_string(),
            value: Box::new(Node::Tuple(vec![])),
        }],
    };
    let wrapped = Node::call1(Node::name("list"), inner);
    Some(Node::subscript(wrapped, Node::Int(0)))
}

/// A chain of single-character literals joined by `+`, falling back to
/// `''.join((...))` when `+` itself is forbidden (`spec.md` §4.3).
fn by_char_add(node: &Node, ctx: &Context<'_>) -> Option<Node> {
    let value = as_str(node)?;
    if value.is_empty() {
        return None;
    }
    let chars: Vec<Node> = value.chars().map(|c| Node::Str(c.to_string())).collect();
    if ctx.blacklist.accept("+") {
        let chain = Node::binop_chain(chars.into_iter(), BinOpKind::Add)?;
        Some(Node::paren(chain))
    } else {
        let join = Node::attr(Node::Str(String::new()), "join");
        Some(Node::call1(join, Node::Tuple(chars)))
    }
}

/// A single string literal whose body is the `\xHH` escape of every byte,
/// via UTF-8 byte values (`spec.md` §4.3 `by_hex_encode`).
fn by_hex_encode(node: &Node, _ctx: &Context<'_>) -> Option<Node> {
    let value = as_str(node)?;
    let escaped: String = value.bytes().map(|b| format!("\\x{b:02x}")).collect();
    Some(Node::StrEscaped(escaped))
}

/// A single string literal whose body is the `\uHHHH` escape of every
/// codepoint (`spec.md` §4.3 `by_unicode_encode`).
fn by_unicode_encode(node: &Node, _ctx: &Context<'_>) -> Option<Node> {
    let value = as_str(node)?;
    let escaped: String = value.chars().map(|c| format!("\\u{:04x}", c as u32)).collect();
    Some(Node::StrEscaped(escaped))
}

/// `'%c%c...'%(n0, n1, ...)`.
fn by_char_format(node: &Node, _ctx: &Context<'_>) -> Option<Node> {
    let value = as_str(node)?;
    if value.is_empty() {
        return None;
    }
    let template = Node::Str("%c".repeat(value.chars().count()));
    let codes = value.chars().map(|c| Node::Int(c as i128)).collect();
    Some(Node::binop(template, BinOpKind::Mod, Node::Tuple(codes)))
}

/// `'{}{}...'.format(chr(n0), chr(n1), ...)`.
fn by_format(node: &Node, _ctx: &Context<'_>) -> Option<Node> {
    let value = as_str(node)?;
    if value.is_empty() {
        return None;
    }
    let template = Node::Str("{}".repeat(value.chars().count()));
    let args = value
        .chars()
        .map(|c| Node::call1(Node::name("chr"), Node::Int(c as i128)))
        .collect();
    let format_attr = Node::attr(template, "format");
    Some(Node::Call {
        func: Box::new(format_attr),
        args,
        keywords: vec![],
    })
}

/// `(chr(n0)+chr(n1)+...)`.
fn by_char(node: &Node, _ctx: &Context<'_>) -> Option<Node> {
    let value = as_str(node)?;
    if value.is_empty() {
        return None;
    }
    let calls = value
        .chars()
        .map(|c| Node::call1(Node::name("chr"), Node::Int(c as i128)));
    let chain = Node::binop_chain(calls, BinOpKind::Add)?;
    Some(Node::paren(chain))
}

/// `'<reversed>'[::-1]`.
fn by_reverse(node: &Node, _ctx: &Context<'_>) -> Option<Node> {
    let value = as_str(node)?;
    if value.is_empty() {
        return None;
    }
    let reversed: String = value.chars().rev().collect();
    let slice = Node::Slice {
        lower: None,
        upper: None,
        step: Some(Box::new(Node::Int(-1))),
    };
    Some(Node::subscript(Node::Str(reversed), slice))
}

/// `(str(bytes([n0]))[2]+str(bytes([n1]))[2]+...)`, ASCII-only
/// (`spec.md` §4.3: "applicable to ASCII-range content only").
fn by_bytes_single(node: &Node, _ctx: &Context<'_>) -> Option<Node> {
    let value = as_str(node)?;
    if value.is_empty() || !value.is_ascii() {
        return None;
    }
    let terms = value.bytes().map(|b| {
        let bytes_call = Node::call1(Node::name("bytes"), Node::List(vec![Node::Int(b as i128)]));
        let str_call = Node::call1(Node::name("str"), bytes_call);
        Node::subscript(str_call, Node::Int(2))
    });
    let chain = Node::binop_chain(terms, BinOpKind::Add)?;
    Some(Node::paren(chain))
}

/// `bytes([n0, n1, ...]).decode()`, ASCII-only.
fn by_bytes_full(node: &Node, _ctx: &Context<'_>) -> Option<Node> {
    let value = as_str(node)?;
    if value.is_empty() || !value.is_ascii() {
        return None;
    }
    let codes = value.bytes().map(|b| Node::Int(b as i128)).collect();
    let bytes_call = Node::call1(Node::name("bytes"), Node::List(codes));
    let decode_attr = Node::attr(bytes_call, "decode");
    Some(Node::call(decode_attr, vec![]))
}
