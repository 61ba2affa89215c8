//! Binary and unary operator implementations.
//!
//! Integer arithmetic is checked: results that do not fit in an `i64` are
//! reported as [`EvalError::TooHigh`], never wrapped. Date arithmetic that
//! leaves the representable (non-negative) range is
//! [`EvalError::DateOverflow`].

use core::cmp::Ordering;

use crate::api::Settings;
use crate::calendar::MINUTES_PER_DAY;
use crate::casting::to_plain_string;
use crate::evaluator::EvalError;
use crate::registry::OpCode;
use crate::values::Value;

/// Apply a binary operator. `left` and `right` are consumed.
pub(crate) fn apply_binary(
    op: OpCode,
    left: Value,
    right: Value,
    settings: &Settings,
) -> Result<Value, EvalError> {
    match op {
        OpCode::Add => add(left, right, settings),
        OpCode::Subtract => subtract(left, right),
        OpCode::Multiply => int_op(left, right, |a, b| a.checked_mul(b).ok_or(EvalError::TooHigh)),
        OpCode::Divide => int_op(left, right, |a, b| {
            if b == 0 {
                Err(EvalError::DivisionByZero)
            } else {
                a.checked_div(b).ok_or(EvalError::TooHigh)
            }
        }),
        OpCode::Mod => int_op(left, right, |a, b| {
            if b == 0 {
                Err(EvalError::DivisionByZero)
            } else {
                // i64::MIN % -1 is mathematically 0.
                Ok(a.wrapping_rem(b))
            }
        }),
        OpCode::Eq | OpCode::Ne | OpCode::Lt | OpCode::Gt | OpCode::Le | OpCode::Ge => {
            compare(op, &left, &right)
        }
        OpCode::And | OpCode::Or => logical(op, left, right),
        OpCode::Negate | OpCode::Not => Err(EvalError::StackError),
    }
}

/// Apply a unary operator to the value in place.
pub(crate) fn apply_unary(op: OpCode, value: &mut Value) -> Result<(), EvalError> {
    let Value::Int(n) = value else {
        return Err(EvalError::BadType);
    };
    *n = match op {
        OpCode::Negate => n.checked_neg().ok_or(EvalError::TooHigh)?,
        OpCode::Not => (*n == 0) as i64,
        _ => return Err(EvalError::StackError),
    };
    Ok(())
}

fn int_op(
    left: Value,
    right: Value,
    f: impl FnOnce(i64, i64) -> Result<i64, EvalError>,
) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => f(a, b).map(Value::Int),
        _ => Err(EvalError::BadType),
    }
}

/// A date or datetime offset must stay representable and non-negative.
fn date_offset(result: Option<i64>) -> Result<i64, EvalError> {
    result.filter(|&n| n >= 0).ok_or(EvalError::DateOverflow)
}

fn time_add(time: i64, minutes: i64) -> i64 {
    (time.rem_euclid(MINUTES_PER_DAY) + minutes.rem_euclid(MINUTES_PER_DAY)) % MINUTES_PER_DAY
}

fn time_sub(time: i64, minutes: i64) -> i64 {
    (time.rem_euclid(MINUTES_PER_DAY) - minutes.rem_euclid(MINUTES_PER_DAY)).rem_euclid(MINUTES_PER_DAY)
}

fn add(left: Value, right: Value, settings: &Settings) -> Result<Value, EvalError> {
    use Value::*;
    match (left, right) {
        (Error, _) | (_, Error) => Err(EvalError::BadType),
        (Int(a), Int(b)) => a.checked_add(b).map(Int).ok_or(EvalError::TooHigh),
        (Date(d), Int(n)) | (Int(n), Date(d)) => date_offset(d.checked_add(n)).map(Date),
        (DateTime(dt), Int(n) | Time(n)) | (Int(n) | Time(n), DateTime(dt)) => {
            date_offset(dt.checked_add(n)).map(DateTime)
        }
        (Time(t), Int(n) | Time(n)) | (Int(n), Time(t)) => Ok(Time(time_add(t, n))),
        (left @ Str(_), right) | (left, right @ Str(_)) => concat(left, right, settings),
        _ => Err(EvalError::BadType),
    }
}

fn subtract(left: Value, right: Value) -> Result<Value, EvalError> {
    use Value::*;
    match (left, right) {
        (Int(a), Int(b)) => a.checked_sub(b).map(Int).ok_or(EvalError::TooHigh),
        (Date(d), Int(n)) => date_offset(d.checked_sub(n)).map(Date),
        (DateTime(dt), Int(n) | Time(n)) => date_offset(dt.checked_sub(n)).map(DateTime),
        (Time(t), Int(n)) => Ok(Time(time_sub(t, n))),
        (Time(a), Time(b)) | (DateTime(a), DateTime(b)) | (Date(a), Date(b)) => {
            a.checked_sub(b).map(Int).ok_or(EvalError::DateOverflow)
        }
        _ => Err(EvalError::BadType),
    }
}

fn concat(left: Value, right: Value, settings: &Settings) -> Result<Value, EvalError> {
    let mut s = match left {
        Value::Str(s) => s,
        other => to_plain_string(&other, settings),
    };
    let right = match right {
        Value::Str(r) => r,
        other => to_plain_string(&other, settings),
    };
    let len = s.len() + right.len();
    if settings.max_string_len > 0 && len > settings.max_string_len {
        return Err(EvalError::StringTooLong);
    }
    s.try_reserve(right.len()).map_err(|_| EvalError::OutOfMemory)?;
    s.push_str(&right);
    Ok(Value::Str(s))
}

fn compare(op: OpCode, left: &Value, right: &Value) -> Result<Value, EvalError> {
    if matches!(left, Value::Error) || matches!(right, Value::Error) {
        return Err(EvalError::BadType);
    }
    if left.kind() != right.kind() {
        return match op {
            OpCode::Eq => Ok(Value::Int(0)),
            OpCode::Ne => Ok(Value::Int(1)),
            _ => Err(EvalError::BadType),
        };
    }

    let ordering = match (left, right) {
        (Value::Str(a), Value::Str(b)) => a.as_bytes().cmp(b.as_bytes()),
        _ => left.as_raw_int().cmp(&right.as_raw_int()),
    };
    let result = match op {
        OpCode::Eq => ordering == Ordering::Equal,
        OpCode::Ne => ordering != Ordering::Equal,
        OpCode::Lt => ordering == Ordering::Less,
        OpCode::Gt => ordering == Ordering::Greater,
        OpCode::Le => ordering != Ordering::Greater,
        OpCode::Ge => ordering != Ordering::Less,
        _ => return Err(EvalError::StackError),
    };
    Ok(Value::from(result))
}

/// `&&` and `||` pass one of their operands through unchanged.
fn logical(op: OpCode, left: Value, right: Value) -> Result<Value, EvalError> {
    if left.kind() != right.kind() {
        return Err(EvalError::BadType);
    }
    let Some(l) = left.as_raw_int() else {
        return Err(EvalError::BadType);
    };
    let take_right = match op {
        OpCode::And => l != 0,
        _ => l == 0,
    };
    Ok(if take_right { right } else { left })
}
