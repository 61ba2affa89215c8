//! Calendar arithmetic.
//!
//! Dates are stored as Julian day numbers counted from 1990-01-01 (day 0).
//! Months are 0-based throughout this module, as they are in the internal
//! representation of dates; only rendering and literals use 1-based months.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

/// First year accepted by date literals and `date()`.
pub const BASE_YEAR: i64 = 1990;

/// Number of years after [`BASE_YEAR`] that are still valid.
pub const YEAR_RANGE: i64 = 4000;

pub const MINUTES_PER_DAY: i64 = 1440;

/// `num_days_from_ce` of 1990-01-01.
const BASE_DAYS_FROM_CE: i64 = 726_468;

const MONTH_DAYS: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in the 0-based `month` of `year`.
pub fn days_in_month(month: i64, year: i64) -> i64 {
    if month == 1 && is_leap_year(year) {
        29
    } else {
        MONTH_DAYS[month.clamp(0, 11) as usize]
    }
}

fn naive_date(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    if !(BASE_YEAR..=BASE_YEAR + YEAR_RANGE).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month.checked_add(1)?).ok()?,
        u32::try_from(day).ok()?,
    )
}

/// Check a year / 0-based month / day triple against the calendar and the
/// supported year range.
pub fn is_valid_date(year: i64, month: i64, day: i64) -> bool {
    naive_date(year, month, day).is_some()
}

/// Julian day number of a date, or `None` when [`is_valid_date`] rejects it.
pub fn julian(year: i64, month: i64, day: i64) -> Option<i64> {
    naive_date(year, month, day).map(|date| i64::from(date.num_days_from_ce()) - BASE_DAYS_FROM_CE)
}

/// Convert a Julian day number back into `(year, 0-based month, day)`.
///
/// Defined for every `i64`: day numbers beyond the range chrono can
/// represent saturate at its first or last date.
pub fn from_julian(jul: i64) -> (i64, i64, i64) {
    let min = i64::from(NaiveDate::MIN.num_days_from_ce());
    let max = i64::from(NaiveDate::MAX.num_days_from_ce());
    let days = jul.saturating_add(BASE_DAYS_FROM_CE).clamp(min, max);
    let date = i32::try_from(days)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .unwrap_or(NaiveDate::MAX);
    (i64::from(date.year()), i64::from(date.month0()), i64::from(date.day()))
}

/// Day of the week, 0 = Sunday. Day 0 (1990-01-01) was a Monday.
pub fn weekday(jul: i64) -> i64 {
    (jul.rem_euclid(7) + 1) % 7
}

/// `(julian day, minutes since midnight)` of a wall-clock date and time.
pub fn from_naive(datetime: NaiveDateTime) -> (i64, i64) {
    let day = i64::from(datetime.num_days_from_ce()) - BASE_DAYS_FROM_CE;
    let minutes = i64::from(datetime.hour() * 60 + datetime.minute());
    (day, minutes)
}
