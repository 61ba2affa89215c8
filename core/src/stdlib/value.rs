//! Kind inspection and conversion: `coerce`, `typeof`, `iif`.

use super::str_arg;
use crate::casting;
use crate::env::Environment;
use crate::evaluator::EvalError;
use crate::registry::{Args, BuiltinFunction};
use crate::values::{Value, ValueKind};

pub static FUNCTIONS: &[BuiltinFunction] = &[
    BuiltinFunction::new("coerce", 2, 2, coerce),
    BuiltinFunction::new("typeof", 1, 1, type_of),
    BuiltinFunction::variadic("iif", 3, iif),
];

/// `coerce("date", v)`: convert `v` to the named kind.
fn coerce(env: &dyn Environment, args: Args) -> Result<Value, EvalError> {
    let mut args = args.into_iter();
    let (Some(name), Some(value)) = (args.next(), args.next()) else {
        return Err(EvalError::TooFewArgs);
    };
    let kind = ValueKind::from_name(str_arg(&name)?).ok_or(EvalError::CantCoerce)?;
    casting::coerce(kind, value, env.settings())
}

fn type_of(_env: &dyn Environment, args: Args) -> Result<Value, EvalError> {
    Ok(Value::from(args[0].kind().name()))
}

/// `iif(c1, v1, c2, v2, ..., otherwise)`: the value after the first true
/// condition, or the last argument.
fn iif(_env: &dyn Environment, args: Args) -> Result<Value, EvalError> {
    if args.len() % 2 == 0 {
        return Err(EvalError::Domain);
    }
    let mut args = args.into_iter();
    while let Some(condition) = args.next() {
        let Some(value) = args.next() else {
            // `condition` is the trailing default.
            return Ok(condition);
        };
        if condition.is_true() {
            return Ok(value);
        }
    }
    Err(EvalError::TooFewArgs)
}
