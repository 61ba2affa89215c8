//! String functions.
//!
//! Lengths and positions count characters, not bytes. Positions are
//! 1-based.

use super::{int_arg, position_arg, str_arg};
use crate::env::Environment;
use crate::evaluator::EvalError;
use crate::registry::{Args, BuiltinFunction};
use crate::values::Value;

pub static FUNCTIONS: &[BuiltinFunction] = &[
    BuiltinFunction::new("strlen", 1, 1, strlen),
    BuiltinFunction::new("upper", 1, 1, upper),
    BuiltinFunction::new("lower", 1, 1, lower),
    BuiltinFunction::new("substr", 2, 3, substr),
    BuiltinFunction::new("index", 2, 3, index),
];

fn strlen(_env: &dyn Environment, args: Args) -> Result<Value, EvalError> {
    let s = str_arg(&args[0])?;
    Ok(Value::Int(s.chars().count() as i64))
}

fn upper(_env: &dyn Environment, args: Args) -> Result<Value, EvalError> {
    Ok(Value::Str(str_arg(&args[0])?.to_uppercase()))
}

fn lower(_env: &dyn Environment, args: Args) -> Result<Value, EvalError> {
    Ok(Value::Str(str_arg(&args[0])?.to_lowercase()))
}

/// `substr(s, start[, end])`: characters `start..=end`. `end` defaults to
/// the end of the string; an `end` before `start` gives `""`.
fn substr(_env: &dyn Environment, args: Args) -> Result<Value, EvalError> {
    let s = str_arg(&args[0])?;
    let start = position_arg(&args[1])?;
    let end = match args.get(2) {
        Some(end) => int_arg(end)?,
        None => i64::MAX,
    };
    let take = usize::try_from(end)
        .unwrap_or(0)
        .saturating_sub(start - 1);
    Ok(Value::Str(s.chars().skip(start - 1).take(take).collect()))
}

/// `index(s, needle[, start])`: position of the first `needle` at or
/// after `start`, or 0.
fn index(_env: &dyn Environment, args: Args) -> Result<Value, EvalError> {
    let s = str_arg(&args[0])?;
    let needle = str_arg(&args[1])?;
    let start = match args.get(2) {
        Some(start) => position_arg(start)?,
        None => 1,
    };

    let Some((offset, _)) = s.char_indices().nth(start - 1) else {
        return Ok(Value::Int(0));
    };
    let found = s[offset..]
        .find(needle)
        .map(|at| s[..offset + at].chars().count() as i64 + 1)
        .unwrap_or(0);
    Ok(Value::Int(found))
}
