//! Value coercion.
//!
//! [`coerce`] is the single conversion routine behind mixed-kind operators
//! (string concatenation) and the `coerce()` builtin. The conversion matrix
//! is total: every pair of kinds either converts or fails with
//! [`EvalError::CantCoerce`].
//!
//! | to \ from  | INT          | TIME      | DATE       | DATETIME     | STRING          |
//! |------------|--------------|-----------|------------|--------------|-----------------|
//! | INT        | -            | minutes   | day number | minutes      | decimal parse   |
//! | TIME       | mod 1440     | -         | no         | mod 1440     | time literal    |
//! | DATE       | if >= 0      | no        | -          | / 1440       | date literal    |
//! | DATETIME   | if >= 0      | no        | * 1440     | -            | date[time] lit. |
//! | STRING     | decimal      | `HH:MM`   | `Y-M-D`    | `Y-M-D@H:M`  | -               |

use crate::api::Settings;
use crate::calendar::MINUTES_PER_DAY;
use crate::evaluator::EvalError;
use crate::literal::{parse_date, parse_time};
use crate::values::display::write_plain;
use crate::values::{Value, ValueKind};

/// Convert `value` to `kind`.
///
/// The input is consumed; a value already of the target kind is returned
/// unchanged.
pub fn coerce(kind: ValueKind, value: Value, settings: &Settings) -> Result<Value, EvalError> {
    if value.kind() == kind {
        return Ok(value);
    }

    match (kind, value) {
        (ValueKind::String, Value::Error) => Err(EvalError::CantCoerce),
        (ValueKind::String, value) => Ok(Value::Str(to_plain_string(&value, settings))),

        (ValueKind::Int, Value::Str(s)) => parse_int(&s).map(Value::Int),
        (ValueKind::Int, Value::Time(n) | Value::Date(n) | Value::DateTime(n)) => Ok(Value::Int(n)),

        (ValueKind::DateTime, Value::Int(n)) if n < 0 => Err(EvalError::TooLow),
        (ValueKind::DateTime, Value::Int(n)) => Ok(Value::DateTime(n)),
        (ValueKind::DateTime, Value::Date(jul)) => {
            Value::datetime(jul, 0).ok_or(EvalError::DateOverflow)
        }
        (ValueKind::DateTime, Value::Str(s)) => {
            let mut rest = s.as_str();
            let (jul, minutes) = parse_date(&mut rest, settings).map_err(|_| EvalError::CantCoerce)?;
            if !rest.is_empty() {
                return Err(EvalError::CantCoerce);
            }
            Value::datetime(jul, minutes.unwrap_or(0)).ok_or(EvalError::DateOverflow)
        }

        (ValueKind::Date, Value::Int(n)) if n < 0 => Err(EvalError::TooLow),
        (ValueKind::Date, Value::Int(n)) => Ok(Value::Date(n)),
        (ValueKind::Date, Value::DateTime(dt)) => Ok(Value::Date(dt.div_euclid(MINUTES_PER_DAY))),
        (ValueKind::Date, Value::Str(s)) => {
            let mut rest = s.as_str();
            match parse_date(&mut rest, settings) {
                Ok((jul, None)) if rest.is_empty() => Ok(Value::Date(jul)),
                _ => Err(EvalError::CantCoerce),
            }
        }

        (ValueKind::Time, Value::Int(n) | Value::DateTime(n)) => {
            Ok(Value::Time(n.rem_euclid(MINUTES_PER_DAY)))
        }
        (ValueKind::Time, Value::Str(s)) => {
            let mut rest = s.as_str();
            match parse_time(&mut rest, settings.time_sep) {
                Ok(minutes) if rest.is_empty() => Ok(Value::Time(minutes)),
                _ => Err(EvalError::CantCoerce),
            }
        }

        _ => Err(EvalError::CantCoerce),
    }
}

/// The text a value coerces to.
pub fn to_plain_string(value: &Value, settings: &Settings) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_plain(&mut out, value, settings);
    out
}

/// Optional `-` followed by decimal digits. The empty string is zero.
fn parse_int(s: &str) -> Result<i64, EvalError> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let mut n: i64 = 0;
    for c in digits.chars() {
        let d = c.to_digit(10).ok_or(EvalError::CantCoerce)? as i64;
        let next = n.checked_mul(10);
        n = if negative {
            next.and_then(|n| n.checked_sub(d))
        } else {
            next.and_then(|n| n.checked_add(d))
        }
        .ok_or(EvalError::TooHigh)?;
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::julian;
    use pretty_assertions::assert_eq;

    fn to(kind: ValueKind, value: Value) -> Result<Value, EvalError> {
        coerce(kind, value, &Settings::DEFAULT)
    }

    #[test]
    fn test_same_kind_is_noop() {
        assert_eq!(to(ValueKind::Int, Value::Int(5)), Ok(Value::Int(5)));
        assert_eq!(to(ValueKind::String, Value::from("x")), Ok(Value::from("x")));
    }

    #[test]
    fn test_to_string() {
        let jul = julian(2024, 2, 5).unwrap();
        assert_eq!(to(ValueKind::String, Value::Int(-12)), Ok(Value::from("-12")));
        assert_eq!(to(ValueKind::String, Value::Time(65)), Ok(Value::from("01:05")));
        assert_eq!(to(ValueKind::String, Value::Date(jul)), Ok(Value::from("2024-03-05")));
        assert_eq!(
            to(ValueKind::String, Value::DateTime(jul * 1440 + 600)),
            Ok(Value::from("2024-03-05@10:00"))
        );
        assert_eq!(to(ValueKind::String, Value::Error), Err(EvalError::CantCoerce));
    }

    #[test]
    fn test_to_string_uses_separators() {
        let settings = Settings {
            date_sep: '/',
            time_sep: '.',
            ..Settings::DEFAULT
        };
        assert_eq!(
            coerce(ValueKind::String, Value::Date(0), &settings),
            Ok(Value::from("1990/01/01"))
        );
        assert_eq!(
            coerce(ValueKind::String, Value::Time(61), &settings),
            Ok(Value::from("01.01"))
        );
    }

    #[test]
    fn test_to_int() {
        assert_eq!(to(ValueKind::Int, Value::from("42")), Ok(Value::Int(42)));
        assert_eq!(to(ValueKind::Int, Value::from("-42")), Ok(Value::Int(-42)));
        assert_eq!(to(ValueKind::Int, Value::from("")), Ok(Value::Int(0)));
        assert_eq!(
            to(ValueKind::Int, Value::from("-9223372036854775808")),
            Ok(Value::Int(i64::MIN))
        );
        assert_eq!(
            to(ValueKind::Int, Value::from("9223372036854775808")),
            Err(EvalError::TooHigh)
        );
        assert_eq!(to(ValueKind::Int, Value::from("4x")), Err(EvalError::CantCoerce));
        assert_eq!(to(ValueKind::Int, Value::from(" 4")), Err(EvalError::CantCoerce));
        assert_eq!(to(ValueKind::Int, Value::Time(90)), Ok(Value::Int(90)));
        assert_eq!(to(ValueKind::Int, Value::Date(3)), Ok(Value::Int(3)));
        assert_eq!(to(ValueKind::Int, Value::DateTime(3)), Ok(Value::Int(3)));
    }

    #[test]
    fn test_to_date() {
        assert_eq!(to(ValueKind::Date, Value::Int(10)), Ok(Value::Date(10)));
        assert_eq!(to(ValueKind::Date, Value::Int(-1)), Err(EvalError::TooLow));
        assert_eq!(to(ValueKind::Date, Value::DateTime(1440 * 3 + 5)), Ok(Value::Date(3)));
        assert_eq!(
            to(ValueKind::Date, Value::from("1990-01-11")),
            Ok(Value::Date(10))
        );
        assert_eq!(
            to(ValueKind::Date, Value::from("1990-01-11@10:00")),
            Err(EvalError::CantCoerce)
        );
        assert_eq!(
            to(ValueKind::Date, Value::from("1990-01-11 ")),
            Err(EvalError::CantCoerce)
        );
        assert_eq!(to(ValueKind::Date, Value::Time(5)), Err(EvalError::CantCoerce));
    }

    #[test]
    fn test_to_datetime() {
        assert_eq!(to(ValueKind::DateTime, Value::Int(100)), Ok(Value::DateTime(100)));
        assert_eq!(to(ValueKind::DateTime, Value::Date(2)), Ok(Value::DateTime(2880)));
        assert_eq!(
            to(ValueKind::DateTime, Value::from("1990-01-02")),
            Ok(Value::DateTime(1440))
        );
        assert_eq!(
            to(ValueKind::DateTime, Value::from("1990-01-02@00:01")),
            Ok(Value::DateTime(1441))
        );
        assert_eq!(
            to(ValueKind::DateTime, Value::from("1990-01-02@")),
            Err(EvalError::CantCoerce)
        );
        assert_eq!(
            to(ValueKind::DateTime, Value::Date(i64::MAX)),
            Err(EvalError::DateOverflow)
        );
        assert_eq!(to(ValueKind::DateTime, Value::Time(5)), Err(EvalError::CantCoerce));
    }

    #[test]
    fn test_to_time() {
        assert_eq!(to(ValueKind::Time, Value::Int(1441)), Ok(Value::Time(1)));
        assert_eq!(to(ValueKind::Time, Value::Int(-1)), Ok(Value::Time(1439)));
        assert_eq!(to(ValueKind::Time, Value::DateTime(1440 * 9 + 30)), Ok(Value::Time(30)));
        assert_eq!(to(ValueKind::Time, Value::from("7:45pm")), Ok(Value::Time(1185)));
        assert_eq!(to(ValueKind::Time, Value::from("7:45 pm")), Err(EvalError::CantCoerce));
        assert_eq!(to(ValueKind::Time, Value::Date(1)), Err(EvalError::CantCoerce));
    }

    #[test]
    fn test_string_date_round_trip() {
        for jul in [0, 59, 365, julian(2024, 1, 29).unwrap(), julian(5990, 11, 31).unwrap()] {
            let text = to(ValueKind::String, Value::Date(jul)).unwrap();
            assert_eq!(to(ValueKind::Date, text), Ok(Value::Date(jul)));
        }
    }

    #[test]
    fn test_error_kind_never_converts() {
        for kind in [ValueKind::Int, ValueKind::Date, ValueKind::Time, ValueKind::DateTime] {
            assert_eq!(to(kind, Value::Error), Err(EvalError::CantCoerce));
        }
        assert_eq!(to(ValueKind::Special, Value::Int(1)), Err(EvalError::CantCoerce));
    }
}
