//! Builtin function registry.
//!
//! The standard library declares its functions in no particular order; the
//! registry sorts them once, on first use, and looks names up with a
//! case-insensitive binary search.

use once_cell::sync::Lazy;
use smallvec::SmallVec;

use crate::env::Environment;
use crate::evaluator::EvalError;
use crate::values::Value;

/// Arguments of a builtin call, in source order.
pub type Args = SmallVec<[Value; 4]>;

pub type BuiltinFn = fn(&dyn Environment, Args) -> Result<Value, EvalError>;

#[derive(Clone, Copy)]
pub struct BuiltinFunction {
    /// Lower-case name.
    pub name: &'static str,
    pub min_args: usize,
    /// `None` accepts any number of arguments from `min_args` up.
    pub max_args: Option<usize>,
    /// The result depends only on the arguments.
    pub is_constant: bool,
    pub func: BuiltinFn,
}

impl BuiltinFunction {
    pub const fn new(name: &'static str, min_args: usize, max_args: usize, func: BuiltinFn) -> Self {
        Self {
            name,
            min_args,
            max_args: Some(max_args),
            is_constant: true,
            func,
        }
    }

    pub const fn variadic(name: &'static str, min_args: usize, func: BuiltinFn) -> Self {
        Self {
            name,
            min_args,
            max_args: None,
            is_constant: true,
            func,
        }
    }

    /// Mark the function as depending on something other than its
    /// arguments, such as the clock.
    pub const fn non_constant(mut self) -> Self {
        self.is_constant = false;
        self
    }

    pub fn check_arity(&self, nargs: usize) -> Result<(), EvalError> {
        if nargs < self.min_args {
            Err(EvalError::TooFewArgs)
        } else if self.max_args.is_some_and(|max| nargs > max) {
            Err(EvalError::TooManyArgs)
        } else {
            Ok(())
        }
    }

    pub fn call(&self, env: &dyn Environment, args: Args) -> Result<Value, EvalError> {
        self.check_arity(args.len())?;
        (self.func)(env, args)
    }
}

impl core::fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BuiltinFunction")
            .field("name", &self.name)
            .field("min_args", &self.min_args)
            .field("max_args", &self.max_args)
            .field("is_constant", &self.is_constant)
            .finish()
    }
}

static BUILTINS: Lazy<Vec<BuiltinFunction>> = Lazy::new(|| {
    let mut table = crate::stdlib::declarations();
    table.sort_unstable_by(|a, b| a.name.cmp(b.name));
    table
});

/// Every builtin, sorted by name.
pub fn builtins() -> &'static [BuiltinFunction] {
    &BUILTINS
}

pub fn find_builtin(name: &str) -> Option<&'static BuiltinFunction> {
    let table = builtins();
    table
        .binary_search_by(|f| {
            f.name
                .bytes()
                .cmp(name.bytes().map(|b| b.to_ascii_lowercase()))
        })
        .ok()
        .map(|idx| &table[idx])
}
