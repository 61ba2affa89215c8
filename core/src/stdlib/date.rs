//! Date and time functions.
//!
//! Months are 1-based here, as users write them; `monnum('2024-03-15')` is
//! 3.

use super::int_arg;
use crate::calendar::{MINUTES_PER_DAY, from_julian, is_leap_year, julian, weekday};
use crate::env::Environment;
use crate::evaluator::EvalError;
use crate::registry::{Args, BuiltinFunction};
use crate::values::Value;

pub static FUNCTIONS: &[BuiltinFunction] = &[
    BuiltinFunction::new("date", 3, 3, date),
    BuiltinFunction::new("time", 2, 2, time),
    BuiltinFunction::new("datetime", 2, 5, datetime),
    BuiltinFunction::new("year", 1, 1, year),
    BuiltinFunction::new("monnum", 1, 1, monnum),
    BuiltinFunction::new("day", 1, 1, day),
    BuiltinFunction::new("hour", 1, 1, hour),
    BuiltinFunction::new("minute", 1, 1, minute),
    BuiltinFunction::new("wkdaynum", 1, 1, wkdaynum),
    BuiltinFunction::new("isleap", 1, 1, isleap),
    BuiltinFunction::new("today", 0, 0, today).non_constant(),
    BuiltinFunction::new("now", 0, 0, now).non_constant(),
];

// ============================================================================
// Constructors
// ============================================================================

/// Julian day of a year / 1-based month / day, or `Domain`.
fn make_date(y: &Value, m: &Value, d: &Value) -> Result<i64, EvalError> {
    let (y, m, d) = (int_arg(y)?, int_arg(m)?, int_arg(d)?);
    julian(y, m.saturating_sub(1), d).ok_or(EvalError::Domain)
}

fn make_time(h: &Value, m: &Value) -> Result<i64, EvalError> {
    let (h, m) = (int_arg(h)?, int_arg(m)?);
    if !(0..24).contains(&h) || !(0..60).contains(&m) {
        return Err(EvalError::Domain);
    }
    Ok(h * 60 + m)
}

fn date(_env: &dyn Environment, args: Args) -> Result<Value, EvalError> {
    make_date(&args[0], &args[1], &args[2]).map(Value::Date)
}

fn time(_env: &dyn Environment, args: Args) -> Result<Value, EvalError> {
    make_time(&args[0], &args[1]).map(Value::Time)
}

/// `datetime(date, time)` or `datetime(y, m, d, h, mi)`.
fn datetime(_env: &dyn Environment, args: Args) -> Result<Value, EvalError> {
    let (jul, minutes) = match args.as_slice() {
        [Value::Date(jul), Value::Time(minutes)] => (*jul, *minutes),
        [_, _] => return Err(EvalError::BadType),
        [y, m, d, h, mi] => (make_date(y, m, d)?, make_time(h, mi)?),
        _ => return Err(EvalError::TooManyArgs),
    };
    Value::datetime(jul, minutes).ok_or(EvalError::DateOverflow)
}

// ============================================================================
// Accessors
// ============================================================================

/// Julian day of a `DATE` or `DATETIME`.
fn day_of(value: &Value) -> Result<i64, EvalError> {
    match value {
        Value::Date(jul) => Ok(*jul),
        Value::DateTime(dt) => Ok(dt.div_euclid(MINUTES_PER_DAY)),
        _ => Err(EvalError::BadType),
    }
}

/// Minutes since midnight of a `TIME` or `DATETIME`.
fn minutes_of(value: &Value) -> Result<i64, EvalError> {
    match value {
        Value::Time(t) => Ok(*t),
        Value::DateTime(dt) => Ok(dt.rem_euclid(MINUTES_PER_DAY)),
        _ => Err(EvalError::BadType),
    }
}

fn year(_env: &dyn Environment, args: Args) -> Result<Value, EvalError> {
    let (y, _, _) = from_julian(day_of(&args[0])?);
    Ok(Value::Int(y))
}

fn monnum(_env: &dyn Environment, args: Args) -> Result<Value, EvalError> {
    let (_, m, _) = from_julian(day_of(&args[0])?);
    Ok(Value::Int(m + 1))
}

fn day(_env: &dyn Environment, args: Args) -> Result<Value, EvalError> {
    let (_, _, d) = from_julian(day_of(&args[0])?);
    Ok(Value::Int(d))
}

fn hour(_env: &dyn Environment, args: Args) -> Result<Value, EvalError> {
    Ok(Value::Int(minutes_of(&args[0])? / 60))
}

fn minute(_env: &dyn Environment, args: Args) -> Result<Value, EvalError> {
    Ok(Value::Int(minutes_of(&args[0])? % 60))
}

/// 0 = Sunday.
fn wkdaynum(_env: &dyn Environment, args: Args) -> Result<Value, EvalError> {
    Ok(Value::Int(weekday(day_of(&args[0])?)))
}

/// Leap-year test for an `INT` year or the year of a date.
fn isleap(_env: &dyn Environment, args: Args) -> Result<Value, EvalError> {
    let y = match &args[0] {
        Value::Int(y) => *y,
        other => from_julian(day_of(other)?).0,
    };
    Ok(Value::from(is_leap_year(y)))
}

// ============================================================================
// Clock
// ============================================================================

fn today(env: &dyn Environment, _args: Args) -> Result<Value, EvalError> {
    Ok(Value::Date(env.today()))
}

fn now(env: &dyn Environment, _args: Args) -> Result<Value, EvalError> {
    Ok(Value::Time(env.now()))
}
