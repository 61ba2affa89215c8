//! System variables (`$Name`).
//!
//! Each entry maps a case-insensitive name to a getter over the symbol
//! table and, unless the variable is read-only, a setter that validates the
//! new value before storing it in the settings.

use super::SymbolTable;
use crate::api::Settings;
use crate::evaluator::EvalError;
use crate::values::{Value, ValueKind};

/// Characters `$DateSep` accepts.
pub const DATE_SEPARATORS: &[char] = &['-', '/'];
/// Characters `$TimeSep` accepts.
pub const TIME_SEPARATORS: &[char] = &[':', '.'];
/// Characters `$DateTimeSep` accepts.
pub const DATETIME_SEPARATORS: &[char] = &['@', 'T'];

type Getter = fn(&SymbolTable) -> Value;
type Setter = fn(&mut Settings, Value) -> Result<(), EvalError>;

pub struct SysVar {
    pub name: &'static str,
    /// `Special` for variables computed on every read.
    pub kind: ValueKind,
    get: Getter,
    set: Option<Setter>,
}

impl SysVar {
    pub fn is_read_only(&self) -> bool {
        self.set.is_none()
    }

    pub fn get(&self, symbols: &SymbolTable) -> Value {
        (self.get)(symbols)
    }

    pub fn set(&self, settings: &mut Settings, value: Value) -> Result<(), EvalError> {
        match self.set {
            Some(set) => set(settings, value),
            None => Err(EvalError::ReadOnlySysVar(self.name.to_string())),
        }
    }
}

impl core::fmt::Debug for SysVar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SysVar")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("read_only", &self.is_read_only())
            .finish()
    }
}

/// Sorted by lower-cased name.
pub static SYSTEM_VARIABLES: [SysVar; 5] = [
    SysVar {
        name: "DateSep",
        kind: ValueKind::String,
        get: |s| Value::Str(s.settings().date_sep.to_string()),
        set: Some(|settings, value| {
            settings.date_sep = separator(value, DATE_SEPARATORS)?;
            Ok(())
        }),
    },
    SysVar {
        name: "DateTimeSep",
        kind: ValueKind::String,
        get: |s| Value::Str(s.settings().datetime_sep.to_string()),
        set: Some(|settings, value| {
            settings.datetime_sep = separator(value, DATETIME_SEPARATORS)?;
            Ok(())
        }),
    },
    SysVar {
        name: "MaxStringLen",
        kind: ValueKind::Int,
        get: |s| Value::Int(i64::try_from(s.settings().max_string_len).unwrap_or(i64::MAX)),
        set: Some(|settings, value| {
            let n = value.as_int().ok_or(EvalError::BadType)?;
            settings.max_string_len = usize::try_from(n).map_err(|_| EvalError::Domain)?;
            Ok(())
        }),
    },
    SysVar {
        name: "TimeSep",
        kind: ValueKind::String,
        get: |s| Value::Str(s.settings().time_sep.to_string()),
        set: Some(|settings, value| {
            settings.time_sep = separator(value, TIME_SEPARATORS)?;
            Ok(())
        }),
    },
    SysVar {
        name: "Today",
        kind: ValueKind::Special,
        get: |s| Value::Date(s.today()),
        set: None,
    },
];

fn separator(value: Value, allowed: &[char]) -> Result<char, EvalError> {
    match value {
        Value::Str(s) => parse_separator(&s, allowed),
        _ => Err(EvalError::BadType),
    }
}

/// A one-character string drawn from `allowed`.
pub fn parse_separator(s: &str, allowed: &[char]) -> Result<char, EvalError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if allowed.contains(&c) => Ok(c),
        _ => Err(EvalError::Domain),
    }
}

pub fn find_sys_var(name: &str) -> Option<&'static SysVar> {
    SYSTEM_VARIABLES
        .binary_search_by(|v| {
            v.name
                .bytes()
                .map(|b| b.to_ascii_lowercase())
                .cmp(name.bytes().map(|b| b.to_ascii_lowercase()))
        })
        .ok()
        .map(|idx| &SYSTEM_VARIABLES[idx])
}
