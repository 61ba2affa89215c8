use core::fmt;

use crate::calendar::MINUTES_PER_DAY;

/// The kind of a [`Value`].
///
/// `Special` never tags a runtime value; it marks the descriptors of system
/// variables whose value is computed on access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Error,
    Int,
    Time,
    Date,
    DateTime,
    String,
    Special,
}

impl ValueKind {
    /// Upper-case name, as reported by `typeof()`.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Error => "ERROR",
            ValueKind::Int => "INT",
            ValueKind::Time => "TIME",
            ValueKind::Date => "DATE",
            ValueKind::DateTime => "DATETIME",
            ValueKind::String => "STRING",
            ValueKind::Special => "SPECIAL",
        }
    }

    /// Case-insensitive inverse of [`ValueKind::name`], limited to the kinds
    /// a value can be coerced to.
    pub fn from_name(name: &str) -> Option<ValueKind> {
        [
            ValueKind::Int,
            ValueKind::Time,
            ValueKind::Date,
            ValueKind::DateTime,
            ValueKind::String,
        ]
        .into_iter()
        .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A runtime value.
///
/// `Value` owns its string payload; dropping a value releases it. Copies are
/// only ever made through an explicit `clone()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Placeholder left behind by a failed operation.
    Error,
    Int(i64),
    /// Minutes since midnight, `0..1440`.
    Time(i64),
    /// Days since 1990-01-01.
    Date(i64),
    /// Days since 1990-01-01 times 1440, plus minutes since midnight.
    DateTime(i64),
    Str(String),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Error => ValueKind::Error,
            Value::Int(_) => ValueKind::Int,
            Value::Time(_) => ValueKind::Time,
            Value::Date(_) => ValueKind::Date,
            Value::DateTime(_) => ValueKind::DateTime,
            Value::Str(_) => ValueKind::String,
        }
    }

    /// Build a `DateTime` from a Julian day and minutes since midnight.
    ///
    /// Returns `None` when the combined count does not fit in an `i64`.
    pub fn datetime(jul: i64, minutes: i64) -> Option<Value> {
        jul.checked_mul(MINUTES_PER_DAY)
            .and_then(|m| m.checked_add(minutes))
            .map(Value::DateTime)
    }

    /// The integer representation of every non-string kind.
    pub fn as_raw_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) | Value::Time(n) | Value::Date(n) | Value::DateTime(n) => Some(*n),
            Value::Error | Value::Str(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Truth as seen by logical operators and `iif()`: non-zero integers
    /// and non-empty strings are true.
    pub fn is_true(&self) -> bool {
        match self {
            Value::Str(s) => !s.is_empty(),
            Value::Error => false,
            other => other.as_raw_int().is_some_and(|n| n != 0),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Int(b as i64)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}
