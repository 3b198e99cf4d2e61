//! Time utilities
//!
//! Date and slot-time parsing happens at the API handler layer; the
//! scheduling subsystem only sees parsed values.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use shared::error::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Parse a slot time string (HH:MM)
pub fn parse_slot_time(time: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| AppError::validation(format!("Invalid time format: {}", time)))
}

/// The store takes appointments Monday through Saturday only
pub fn is_closed_day(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sun
}
