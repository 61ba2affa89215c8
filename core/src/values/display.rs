//! Rendering of values.
//!
//! Two renderings exist. The *plain* one is what coercion to `STRING`
//! produces: dates and times use the configured separators and strings are
//! their own content. The *printed* one, used by `Display`, the debug trace
//! and the REPL, additionally quotes and escapes strings.

use core::fmt;

use super::value::Value;
use crate::api::Settings;
use crate::calendar::{MINUTES_PER_DAY, from_julian};
use crate::syntax::string_literal::escape_string;

/// Longest string shown in trace output before it is cut short.
pub const MAX_PRINT_LEN: usize = 40;

pub fn write_time(f: &mut impl fmt::Write, minutes: i64, time_sep: char) -> fmt::Result {
    let minutes = minutes.rem_euclid(MINUTES_PER_DAY);
    write!(f, "{:02}{}{:02}", minutes / 60, time_sep, minutes % 60)
}

pub fn write_date(f: &mut impl fmt::Write, jul: i64, date_sep: char) -> fmt::Result {
    let (year, month, day) = from_julian(jul);
    write!(
        f,
        "{:04}{sep}{:02}{sep}{:02}",
        year,
        month + 1,
        day,
        sep = date_sep
    )
}

pub fn write_datetime(f: &mut impl fmt::Write, dt: i64, settings: &Settings) -> fmt::Result {
    write_date(f, dt.div_euclid(MINUTES_PER_DAY), settings.date_sep)?;
    f.write_char(settings.datetime_sep)?;
    write_time(f, dt.rem_euclid(MINUTES_PER_DAY), settings.time_sep)
}

/// Write the plain rendering of `value`.
pub fn write_plain(f: &mut impl fmt::Write, value: &Value, settings: &Settings) -> fmt::Result {
    match value {
        Value::Error => f.write_str("ERROR"),
        Value::Int(n) => write!(f, "{}", n),
        Value::Time(t) => write_time(f, *t, settings.time_sep),
        Value::Date(d) => write_date(f, *d, settings.date_sep),
        Value::DateTime(dt) => write_datetime(f, *dt, settings),
        Value::Str(s) => f.write_str(s),
    }
}

/// A value paired with the settings used to print it.
///
/// Created by [`Value::printed`].
pub struct Printed<'a> {
    value: &'a Value,
    settings: &'a Settings,
    max_len: Option<usize>,
}

impl<'a> Printed<'a> {
    /// Cut strings longer than [`MAX_PRINT_LEN`] characters.
    pub fn truncated(mut self) -> Self {
        self.max_len = Some(MAX_PRINT_LEN);
        self
    }
}

impl fmt::Display for Printed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Str(s) => escape_string(f, s, self.max_len),
            other => write_plain(f, other, self.settings),
        }
    }
}

impl Value {
    pub fn printed<'a>(&'a self, settings: &'a Settings) -> Printed<'a> {
        Printed {
            value: self,
            settings,
            max_len: None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.printed(&Settings::DEFAULT), f)
    }
}
