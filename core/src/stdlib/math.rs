//! Integer functions: `abs`, `sgn`, `max`, `min`.

use core::cmp::Ordering;

use super::int_arg;
use crate::env::Environment;
use crate::evaluator::EvalError;
use crate::registry::{Args, BuiltinFunction};
use crate::values::{Value, ValueKind};

pub static FUNCTIONS: &[BuiltinFunction] = &[
    BuiltinFunction::new("abs", 1, 1, abs),
    BuiltinFunction::new("sgn", 1, 1, sgn),
    BuiltinFunction::variadic("max", 1, max),
    BuiltinFunction::variadic("min", 1, min),
];

/// Absolute value. `abs(i64::MIN)` does not fit and is `TooHigh`.
fn abs(_env: &dyn Environment, args: Args) -> Result<Value, EvalError> {
    let n = int_arg(&args[0])?;
    n.checked_abs().map(Value::Int).ok_or(EvalError::TooHigh)
}

/// -1, 0 or 1.
fn sgn(_env: &dyn Environment, args: Args) -> Result<Value, EvalError> {
    Ok(Value::Int(int_arg(&args[0])?.signum()))
}

fn max(_env: &dyn Environment, args: Args) -> Result<Value, EvalError> {
    extreme(args, Ordering::Greater)
}

fn min(_env: &dyn Environment, args: Args) -> Result<Value, EvalError> {
    extreme(args, Ordering::Less)
}

/// The argument that compares as `wanted` against all others. All arguments
/// must share one kind; strings compare byte-wise.
fn extreme(args: Args, wanted: Ordering) -> Result<Value, EvalError> {
    let mut args = args.into_iter();
    let mut best = args.next().ok_or(EvalError::TooFewArgs)?;
    if best.kind() == ValueKind::Error {
        return Err(EvalError::BadType);
    }
    for arg in args {
        if arg.kind() != best.kind() {
            return Err(EvalError::BadType);
        }
        let ordering = match (&arg, &best) {
            (Value::Str(a), Value::Str(b)) => a.as_bytes().cmp(b.as_bytes()),
            (a, b) => a.as_raw_int().cmp(&b.as_raw_int()),
        };
        if ordering == wanted {
            best = arg;
        }
    }
    Ok(best)
}
