// Copyright (c) The payload-forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A tiny, test-only evaluator for the arithmetic subset of [`crate::ast::Node`]
//! that [`crate::synth::synthesize_int`] emits.
//!
//! This is emphatically not the "execution of payloads" `spec.md` §1 rules
//! out as a Non-goal for the crate itself — it exists purely so unit tests
//! can assert the synthesizer's *value-preservation* property without
//! shelling out to an actual interpreter.

#![cfg(test)]

use crate::ast::{BinOpKind, Node, UnaryOpKind};

pub fn eval_int(node: &Node) -> i128 {
    match node {
        Node::Int(value) => *value,
        Node::Bool(value) => *value as i128,
        Node::UnaryOp { op: UnaryOpKind::Neg, operand } => -eval_int(operand),
        Node::UnaryOp { op: UnaryOpKind::Invert, operand } => !eval_int(operand),
        Node::UnaryOp { op: UnaryOpKind::Not, operand } => (eval_int(operand) == 0) as i128,
        Node::BinOp { left, op, right } => {
            let (l, r) = (eval_int(left), eval_int(right));
            match op {
                BinOpKind::Add => l + r,
                BinOpKind::Sub => l - r,
                BinOpKind::Mul => l * r,
                BinOpKind::Pow => l.pow(r as u32),
                BinOpKind::BitAnd => l & r,
                BinOpKind::BitOr => l | r,
            }
        }
        Node::Call { func, args, .. } => match func.as_ref() {
            Node::Name(name) if name == "len" => {
                // Only `len(str(()))` is ever synthesized here, which is 1.
                let _ = args;
                1
            }
            other => panic!("eval_toy cannot evaluate call to {other:?}"),
        },
        other => panic!("eval_toy cannot evaluate {other:?}"),
    }
}
