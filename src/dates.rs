//! Calendar helpers shared by the statistics engine and the HTTP layer.
//!
//! Dates travel through the application as canonical `YYYY-MM-DD` strings (months as
//! `YYYY-MM`); the string is the identity of a day, so nothing here converts between
//! time zones.

use chrono::{Datelike, Duration, NaiveDate};
use thiserror::Error;

const DAY_LABELS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),
    #[error("date offset out of range")]
    OutOfRange,
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_month(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Parses a zero-padded `YYYY-MM-DD` string. Anything else, including
/// `2026-2-5` or an impossible day such as `2026-02-30`, is rejected.
pub fn parse_date(value: &str) -> Result<NaiveDate, DateError> {
    if !has_shape(value, &[4, 7], 10) {
        return Err(DateError::InvalidDate(value.to_string()));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| DateError::InvalidDate(value.to_string()))
}

/// Parses `YYYY-MM` into the first day of that month.
pub fn parse_month(value: &str) -> Result<NaiveDate, DateError> {
    let invalid = || DateError::InvalidMonth(value.to_string());
    if !has_shape(value, &[4], 7) {
        return Err(invalid());
    }
    let year: i32 = value[..4].parse().map_err(|_| invalid())?;
    let month: u32 = value[5..].parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)
}

/// Monday of the week containing `date`. Sunday belongs to the week that
/// started six days earlier.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + Duration::days(6)
}

/// Number of days in a month given by its zero-based index. Indexes past 11
/// roll over into the following years. Years outside the calendar's range give 0.
pub fn days_in_month(year: i32, month0: u32) -> u32 {
    let Some(year) = i32::try_from(month0 / 12)
        .ok()
        .and_then(|carry| year.checked_add(carry))
    else {
        return 0;
    };
    let month0 = month0 % 12;
    let first_of_next = if month0 == 11 {
        year.checked_add(1).and_then(|next| NaiveDate::from_ymd_opt(next, 1, 1))
    } else {
        NaiveDate::from_ymd_opt(year, month0 + 2, 1)
    };
    first_of_next
        .and_then(|date| date.pred_opt())
        .map_or(0, |last| last.day())
}

/// Every day of `month` (`YYYY-MM`), ascending.
pub fn month_dates(month: &str) -> Result<Vec<String>, DateError> {
    let first = parse_month(month)?;
    let days = days_in_month(first.year(), first.month0());
    Ok((1..=days)
        .filter_map(|day| first.with_day(day))
        .map(format_date)
        .collect())
}

/// Monday through Sunday of the week containing `date`.
pub fn week_dates(date: NaiveDate) -> Vec<String> {
    let start = week_start(date);
    (0..7)
        .map(|offset| format_date(start + Duration::days(offset)))
        .collect()
}

pub fn day_label(date: NaiveDate) -> &'static str {
    DAY_LABELS[date.weekday().num_days_from_sunday() as usize]
}

pub fn day_of_week(value: &str) -> Result<&'static str, DateError> {
    parse_date(value).map(day_label)
}

/// `2026-02-05` becomes `2/5(木)`.
pub fn format_display_date(value: &str) -> Result<String, DateError> {
    parse_date(value).map(display_date)
}

pub fn display_date(date: NaiveDate) -> String {
    format!("{}/{}({})", date.month(), date.day(), day_label(date))
}

/// `2026-02` becomes `2026年2月`.
pub fn format_display_month(month: &str) -> Result<String, DateError> {
    let first = parse_month(month)?;
    Ok(format!("{}年{}月", first.year(), first.month()))
}

pub fn add_days(value: &str, days: i64) -> Result<String, DateError> {
    let date = parse_date(value)?;
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .map(format_date)
        .ok_or(DateError::OutOfRange)
}

pub fn is_today(value: &str, today: NaiveDate) -> bool {
    value == format_date(today)
}

pub fn is_yesterday(value: &str, today: NaiveDate) -> bool {
    today
        .pred_opt()
        .is_some_and(|yesterday| value == format_date(yesterday))
}

fn has_shape(value: &str, dashes: &[usize], len: usize) -> bool {
    value.len() == len
        && value.bytes().enumerate().all(|(index, byte)| {
            if dashes.contains(&index) {
                byte == b'-'
            } else {
                byte.is_ascii_digit()
            }
        })
}
