//! Standard library.
//!
//! Each module declares its builtins in a `FUNCTIONS` table; the
//! [registry](crate::registry) collects them with [`declarations`] and sorts
//! them once. Argument counts are checked by the registry before a function
//! runs, so implementations may index `args` up to `min_args` freely.
//!
//! - [`math`]: `abs`, `sgn`, `max`, `min`
//! - [`string`]: `strlen`, `upper`, `lower`, `substr`, `index`
//! - [`value`]: `coerce`, `typeof`, `iif`
//! - [`date`]: calendar constructors and accessors, `today`, `now`

use crate::evaluator::EvalError;
use crate::registry::BuiltinFunction;
use crate::values::Value;

pub mod date;
pub mod math;
pub mod string;
pub mod value;

/// Every builtin of the standard library, unsorted.
pub fn declarations() -> Vec<BuiltinFunction> {
    [
        math::FUNCTIONS,
        string::FUNCTIONS,
        value::FUNCTIONS,
        date::FUNCTIONS,
    ]
    .concat()
}

// ============================================================================
// Argument helpers
// ============================================================================

/// An `INT` argument.
pub(crate) fn int_arg(value: &Value) -> Result<i64, EvalError> {
    value.as_int().ok_or(EvalError::BadType)
}

/// A `STRING` argument.
pub(crate) fn str_arg(value: &Value) -> Result<&str, EvalError> {
    value.as_str().ok_or(EvalError::BadType)
}

/// A 1-based position argument; must be at least 1.
pub(crate) fn position_arg(value: &Value) -> Result<usize, EvalError> {
    let n = int_arg(value)?;
    if n < 1 {
        return Err(EvalError::TooLow);
    }
    usize::try_from(n).map_err(|_| EvalError::TooHigh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::find_builtin;

    #[test]
    fn test_declarations_are_registered() {
        let declared = declarations();
        assert!(!declared.is_empty());
        for f in &declared {
            assert!(find_builtin(f.name).is_some(), "{} is not registered", f.name);
        }
    }

    #[test]
    fn test_arity_bounds_are_consistent() {
        for f in declarations() {
            if let Some(max) = f.max_args {
                assert!(f.min_args <= max, "{}", f.name);
            }
        }
    }

    #[test]
    fn test_position_arg() {
        assert_eq!(position_arg(&Value::Int(3)), Ok(3));
        assert_eq!(position_arg(&Value::Int(0)), Err(EvalError::TooLow));
        assert_eq!(position_arg(&Value::from("3")), Err(EvalError::BadType));
    }
}
