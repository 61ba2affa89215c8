//! Literal parsing.
//!
//! Turns the text of a value token into a [`Value`], or classifies it as a
//! variable or system-variable reference for the evaluator to resolve.
//!
//! The date and time scanners work on a `&mut &str` so that callers (the
//! coercion engine in particular) can check what is left after them.

use crate::api::Settings;
use crate::calendar::julian;
use crate::evaluator::EvalError;
use crate::values::Value;

/// What a value token denotes.
#[derive(Debug, PartialEq, Eq)]
pub enum Literal<'t> {
    Value(Value),
    /// A variable name, resolved through local parameters first.
    Variable(&'t str),
    /// A system variable name, without the leading `$`.
    SystemVariable(&'t str),
}

pub fn parse_literal<'t>(token: &'t str, settings: &Settings) -> Result<Literal<'t>, EvalError> {
    let Some(first) = token.chars().next() else {
        return Err(EvalError::UnexpectedEnd);
    };

    match first {
        '"' => {
            let body = token[1..]
                .strip_suffix('"')
                .ok_or(EvalError::MissingQuote)?;
            Ok(Literal::Value(Value::Str(body.to_string())))
        }
        '\'' => {
            let mut rest = &token[1..];
            let (jul, minutes) = parse_date(&mut rest, settings)?;
            if !rest.starts_with('\'') {
                return Err(EvalError::BadDate);
            }
            let value = match minutes {
                None => Value::Date(jul),
                Some(m) => Value::datetime(jul, m).ok_or(EvalError::DateOverflow)?,
            };
            Ok(Literal::Value(value))
        }
        '0'..='9' => parse_number(token, settings).map(Literal::Value),
        '$' => Ok(Literal::SystemVariable(&token[1..])),
        _ => Ok(Literal::Variable(token)),
    }
}

/// An integer, or a time of day when the digits are followed by a time
/// separator.
fn parse_number(token: &str, settings: &Settings) -> Result<Value, EvalError> {
    let digits_end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    let mut n: i64 = 0;
    for b in token[..digits_end].bytes() {
        n = n
            .checked_mul(10)
            .and_then(|n| n.checked_add(i64::from(b - b'0')))
            .ok_or(EvalError::TooHigh)?;
    }

    let rest = &token[digits_end..];
    match rest.chars().next() {
        None => Ok(Value::Int(n)),
        Some(c) if is_time_sep(c, settings.time_sep) => {
            let mut rest = token;
            let minutes = parse_time(&mut rest, settings.time_sep)?;
            if !rest.is_empty() {
                return Err(EvalError::BadTime);
            }
            Ok(Value::Time(minutes))
        }
        Some(_) => Err(EvalError::BadNumber),
    }
}

fn is_time_sep(c: char, time_sep: char) -> bool {
    c == ':' || c == '.' || c == time_sep
}

fn is_date_sep(c: char, date_sep: char) -> bool {
    c == '/' || c == '-' || c == date_sep
}

/// Consume a run of ASCII digits. Saturates instead of overflowing; every
/// caller range-checks the result.
fn take_digits(s: &mut &str) -> Option<i64> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    let n = s[..end].bytes().fold(0i64, |n, b| {
        n.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    *s = &s[end..];
    Some(n)
}

/// Consume one character if it satisfies `pred`.
fn take_char(s: &mut &str, pred: impl Fn(char) -> bool) -> Option<char> {
    let c = s.chars().next().filter(|&c| pred(c))?;
    *s = &s[c.len_utf8()..];
    Some(c)
}

/// Parse `H<sep>M[am|pm]` into minutes since midnight.
pub fn parse_time(s: &mut &str, time_sep: char) -> Result<i64, EvalError> {
    let mut hour = take_digits(s).ok_or(EvalError::BadTime)?;
    take_char(s, |c| is_time_sep(c, time_sep)).ok_or(EvalError::BadTime)?;
    let minute = take_digits(s).ok_or(EvalError::BadTime)?;

    let ampm = take_char(s, |c| matches!(c, 'a' | 'A' | 'p' | 'P')).map(|c| c.to_ascii_lowercase());
    if ampm.is_some() {
        take_char(s, |c| c == 'm' || c == 'M');
    }

    if hour > 23 || minute > 59 {
        return Err(EvalError::BadTime);
    }
    match ampm {
        Some(_) if !(1..=12).contains(&hour) => return Err(EvalError::BadTime),
        Some('a') if hour == 12 => hour = 0,
        Some('p') if hour < 12 => hour += 12,
        _ => {}
    }
    Ok(hour * 60 + minute)
}

/// Parse `Y<sep>M<sep>D` with an optional time part introduced by a space,
/// `@`, `T` or `t`.
///
/// Returns the Julian day and, when a time part was present, the minutes
/// since midnight.
pub fn parse_date(s: &mut &str, settings: &Settings) -> Result<(i64, Option<i64>), EvalError> {
    let sep = |c| is_date_sep(c, settings.date_sep);

    let year = take_digits(s).ok_or(EvalError::BadDate)?;
    take_char(s, sep).ok_or(EvalError::BadDate)?;
    let month = take_digits(s).ok_or(EvalError::BadDate)? - 1;
    take_char(s, sep).ok_or(EvalError::BadDate)?;
    let day = take_digits(s).ok_or(EvalError::BadDate)?;

    let jul = julian(year, month, day).ok_or(EvalError::BadDate)?;

    let minutes = match take_char(s, |c| matches!(c, ' ' | '@' | 'T' | 't')) {
        Some(_) => Some(parse_time(s, settings.time_sep)?),
        None => None,
    };
    Ok((jul, minutes))
}
