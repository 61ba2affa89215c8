//! Lookup tables for operators and builtin functions.

pub mod builtins;
pub mod operators;

pub use builtins::{Args, BuiltinFn, BuiltinFunction, builtins, find_builtin};
pub use operators::{Arity, OpCode, Operator, find_binary, find_unary};
