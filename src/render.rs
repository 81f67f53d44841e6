// Copyright (c) The payload-forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Unparses a [`Node`] back into valid source text.
//!
//! The renderer is the one piece every other component depends on: the
//! [`crate::blacklist::Blacklist`] oracle only ever sees rendered text, and
//! the final output of [`crate::rewrite_text`] is exactly what this module
//! produces. Precedence is tracked so that `parse(render(node))` would
//! re-derive a node of equivalent evaluation — we never emit redundant
//! parentheses around atoms, but we never omit a needed one either.

use crate::ast::{BinOpKind, BoolOpKind, Node, UnaryOpKind};
use std::fmt::Write as _;

/// Render `node` to its canonical textual form.
pub fn render(node: &Node) -> String {
    let mut out = String::new();
    write_prec(&mut out, node, 0);
    out
}

/// Binding power of the node's outermost operator. Higher binds tighter.
/// Atoms (literals, names, calls, attribute/subscript access) report
/// [`u8::MAX`] since they never need parenthesizing on their own account.
fn precedence(node: &Node) -> u8 {
    match node {
        Node::BoolOp { op: BoolOpKind::Or, .. } => 1,
        Node::BoolOp { op: BoolOpKind::And, .. } => 2,
        Node::UnaryOp { op: UnaryOpKind::Not, .. } => 3,
        Node::BinOp { op: BinOpKind::BitOr, .. } => 4,
        Node::BinOp { op: BinOpKind::BitAnd, .. } => 5,
        Node::BinOp {
            op: BinOpKind::Add | BinOpKind::Sub,
            ..
        } => 6,
        Node::BinOp {
            op: BinOpKind::Mul | BinOpKind::Mod,
            ..
        } => 7,
        Node::UnaryOp {
            op: UnaryOpKind::Neg | UnaryOpKind::Invert,
            ..
        } => 8,
        Node::BinOp { op: BinOpKind::Pow, .. } => 9,
        Node::IfExp { .. } => 0,
        _ => u8::MAX,
    }
}

/// Write `node`, parenthesizing it if its precedence is lower than the
/// `min` precedence required by its parent context.
fn write_prec(out: &mut String, node: &Node, min: u8) {
    let prec = precedence(node);
    let needs_parens = prec < min;
    if needs_parens {
        out.push('(');
    }
    write_node(out, node);
    if needs_parens {
        out.push(')');
    }
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Int(value) => {
            let _ = write!(out, "{value}");
        }
        Node::Bool(value) => out.push_str(if *value { "True" } else { "False" }),
        Node::NoneLit => out.push_str("None"),
        Node::Str(value) => write_str_literal(out, value),
        Node::Name(id) => out.push_str(id),
        Node::Attribute { target, attr } => {
            write_prec(out, target, precedence(node));
            out.push('.');
            out.push_str(attr);
        }
        Node::Keyword { arg, value } => {
            out.push_str(arg);
            out.push('=');
            write_prec(out, value, 0);
        }
        Node::BoolOp { op, values } => {
            let prec = precedence(node);
            let sep = match op {
                BoolOpKind::And => " and ",
                BoolOpKind::Or => " or ",
            };
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    out.push_str(sep);
                }
                // BoolOp is left-associative in rendering; any operand
                // with strictly lower precedence needs parens.
                write_prec(out, value, prec + 1);
            }
        }
        Node::Call { func, args, keywords } => {
            write_prec(out, func, u8::MAX);
            out.push('(');
            let mut first = true;
            for arg in args {
                if !first {
                    out.push_str(", ");
                }
                write_prec(out, arg, 0);
                first = false;
            }
            for kw in keywords {
                if !first {
                    out.push_str(", ");
                }
                write_prec(out, kw, 0);
                first = false;
            }
            out.push(')');
        }
        Node::BinOp { left, op, right } => {
            let prec = precedence(node);
            let (sym, right_min) = match op {
                BinOpKind::Add => ("+", prec + 1),
                BinOpKind::Sub => ("-", prec + 1),
                BinOpKind::Mul => ("*", prec + 1),
                BinOpKind::Mod => ("%", prec + 1),
                BinOpKind::BitAnd => ("&", prec + 1),
                BinOpKind::BitOr => ("|", prec + 1),
                // `**` is right-associative in Python.
                BinOpKind::Pow => ("**", prec),
            };
            write_prec(out, left, prec + 1);
            out.push_str(sym);
            write_prec(out, right, right_min);
        }
        Node::UnaryOp { op, operand } => {
            let prec = precedence(node);
            match op {
                UnaryOpKind::Neg => out.push('-'),
                UnaryOpKind::Invert => out.push('~'),
                UnaryOpKind::Not => out.push_str("not "),
            }
            write_prec(out, operand, prec);
        }
        Node::Subscript { target, index } => {
            write_prec(out, target, u8::MAX);
            out.push('[');
            write_prec(out, index, 0);
            out.push(']');
        }
        Node::Slice { lower, upper, step } => {
            if let Some(lower) = lower {
                write_prec(out, lower, 0);
            }
            out.push(':');
            if let Some(upper) = upper {
                write_prec(out, upper, 0);
            }
            if let Some(step) = step {
                out.push(':');
                write_prec(out, step, 0);
            }
        }
        Node::Tuple(items) => {
            out.push('(');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_prec(out, item, 0);
            }
            if items.len() == 1 {
                out.push(',');
            }
            out.push(')');
        }
        Node::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_prec(out, item, 0);
            }
            out.push(']');
        }
        Node::IfExp { test, body, orelse } => {
            write_prec(out, body, 1);
            out.push_str(" if ");
            write_prec(out, test, 1);
            out.push_str(" else ");
            write_prec(out, orelse, 0);
        }
        Node::RawNumeral(text) => out.push_str(text),
        Node::StrDouble(value) => out.push_str(&render_str_double_quoted(value)),
        Node::StrEscaped(escaped) => {
            out.push('\'');
            out.push_str(escaped);
            out.push('\'');
        }
        Node::Paren(inner) => {
            out.push('(');
            write_prec(out, inner, 0);
            out.push(')');
        }
    }
}

/// Write a single-quoted string literal, escaping the quote character,
/// backslashes, and control characters the way Python's `repr` would.
fn write_str_literal(out: &mut String, value: &str) {
    out.push('\'');
    for c in value.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
}

/// Render a string literal with double quotes instead of single — used by
/// `by_quote_trans`.
pub fn render_str_double_quoted(value: &str) -> String {
    let mut out = String::from("\"");
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Node;

    #[test]
    fn renders_attribute_chain() {
        let node = Node::Attribute {
            target: Box::new(Node::Name("os".into())),
            attr: "path".into(),
        };
        assert_eq!(render(&node), "os.path");
    }

    #[test]
    fn parenthesizes_boolop_inside_arithmetic_context() {
        let node = Node::BinOp {
            left: Box::new(Node::BoolOp {
                op: BoolOpKind::Or,
                values: vec![Node::Int(1), Node::Int(0)],
            }),
            op: BinOpKind::Add,
            right: Box::new(Node::Int(2)),
        };
        assert_eq!(render(&node), "(1 or 0)+2");
    }

    #[test]
    fn call_with_keyword() {
        let node = Node::Call {
            func: Box::new(Node::Name("dict".into())),
            args: vec![],
            keywords: vec![Node::Keyword {
                arg: "abc".into(),
                value: Box::new(Node::Tuple(vec![])),
            }],
        };
        assert_eq!(render(&node), "dict(abc=())");
    }

    #[test]
    fn single_element_tuple_has_trailing_comma() {
        assert_eq!(render(&Node::Tuple(vec![Node::Int(1)])), "(1,)");
    }
}
