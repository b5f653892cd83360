//! Calendar-date rules for expiry handling
//!
//! Expiry dates are plain calendar dates in strict `YYYY-MM-DD` form. All
//! comparisons are at day granularity; the time of day never matters.

use chrono::{Local, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

/// The current calendar date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a strict `YYYY-MM-DD` date string
///
/// Accepts only 4-digit-year/2-digit-month/2-digit-day input that names a
/// real calendar date and re-serializes to the identical string. Returns
/// None for anything else ("2026/01/01", "26-1-1", "2026-02-30", ...).
pub fn parse_strict(input: &str) -> Option<NaiveDate> {
    static DATE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = DATE_REGEX
        .get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("failed to compile date regex"));

    if !regex.is_match(input) {
        return None;
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()?;

    // Reject non-canonical spellings of otherwise-parseable input.
    if date.format("%Y-%m-%d").to_string() != input {
        return None;
    }

    Some(date)
}

/// Whether `date` is on or after `today` (day granularity)
pub fn is_today_or_future(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today
}

/// Signed whole-day count from `today` to `expiry`
///
/// 0 for today, positive for future dates, negative once expired.
pub fn days_until_expiry(expiry: NaiveDate, today: NaiveDate) -> i64 {
    (expiry - today).num_days()
}

/// Human-readable remaining-days label (期限切れ / 本日 / あとN日)
pub fn remaining_label(days_remaining: i64) -> String {
    if days_remaining < 0 {
        "期限切れ".to_string()
    } else if days_remaining == 0 {
        "本日".to_string()
    } else {
        format!("あと{}日", days_remaining)
    }
}

/// Format a date in Japanese style, e.g. "2026年1月5日"
pub fn format_japanese(date: NaiveDate) -> String {
    use chrono::Datelike;
    format!("{}年{}月{}日", date.year(), date.month(), date.day())
}
