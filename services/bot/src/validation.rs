//! Input validation for the registration flow
//!
//! Each rule checks one field value independently and synchronously. A
//! validation failure never propagates out of the turn; the state machine
//! maps it to a re-prompt for the same state.

use chrono::NaiveDate;
use thiserror::Error;

use common::dates;
use common::models::Category;

/// Why a field value was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unknown category")]
    UnknownCategory,

    #[error("name is empty after trimming")]
    EmptyName,

    #[error("quantity must be an integer of 1 or more")]
    InvalidQuantity,

    #[error("date must be in YYYY-MM-DD format")]
    InvalidDateFormat,

    #[error("date must not be in the past")]
    PastDate,
}

/// Validate a category selection; exact wire-form match, no case folding
pub fn validate_category(input: &str) -> Result<Category, ValidationError> {
    Category::from_wire(input).ok_or(ValidationError::UnknownCategory)
}

/// Validate an item name, returning the trimmed form
pub fn validate_name(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

/// Validate a quantity: a full base-10 integer of at least 1
pub fn validate_quantity(input: &str) -> Result<i32, ValidationError> {
    let quantity: i32 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidQuantity)?;
    if quantity < 1 {
        return Err(ValidationError::InvalidQuantity);
    }
    Ok(quantity)
}

/// Validate an expiry date against `today`
///
/// The format check takes precedence over the past-date check.
pub fn validate_expiry(input: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let date = dates::parse_strict(input).ok_or(ValidationError::InvalidDateFormat)?;
    if !dates::is_today_or_future(date, today) {
        return Err(ValidationError::PastDate);
    }
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    #[test]
    fn category_membership_is_exact() {
        assert_eq!(validate_category("water"), Ok(Category::Water));
        assert_eq!(validate_category("other"), Ok(Category::Other));
        assert_eq!(validate_category("Water"), Err(ValidationError::UnknownCategory));
        assert_eq!(validate_category("飲み物"), Err(ValidationError::UnknownCategory));
    }

    #[test]
    fn name_must_survive_trimming() {
        assert_eq!(validate_name("  缶詰  "), Ok("缶詰".to_string()));
        assert_eq!(validate_name(""), Err(ValidationError::EmptyName));
        assert_eq!(validate_name("   "), Err(ValidationError::EmptyName));
    }

    #[test]
    fn quantity_must_be_positive_integer() {
        assert_eq!(validate_quantity("1"), Ok(1));
        assert_eq!(validate_quantity("10"), Ok(10));
        assert_eq!(validate_quantity("0"), Err(ValidationError::InvalidQuantity));
        assert_eq!(validate_quantity("-2"), Err(ValidationError::InvalidQuantity));
        assert_eq!(validate_quantity("3.5"), Err(ValidationError::InvalidQuantity));
        assert_eq!(validate_quantity("abc"), Err(ValidationError::InvalidQuantity));
        assert_eq!(validate_quantity(""), Err(ValidationError::InvalidQuantity));
        assert_eq!(validate_quantity("3個"), Err(ValidationError::InvalidQuantity));
    }

    #[test]
    fn expiry_rejects_bad_format_before_past_check() {
        // A past date in a bad format reports the format error.
        assert_eq!(
            validate_expiry("2020/01/01", today()),
            Err(ValidationError::InvalidDateFormat)
        );
        assert_eq!(
            validate_expiry("2026-13-01", today()),
            Err(ValidationError::InvalidDateFormat)
        );
        assert_eq!(
            validate_expiry("2026-02-30", today()),
            Err(ValidationError::InvalidDateFormat)
        );
        assert_eq!(
            validate_expiry("26-1-1", today()),
            Err(ValidationError::InvalidDateFormat)
        );
    }

    #[test]
    fn expiry_accepts_today_and_future() {
        assert_eq!(validate_expiry("2026-06-15", today()), Ok(today()));
        assert_eq!(
            validate_expiry("2026-12-31", today()),
            Ok(NaiveDate::from_ymd_opt(2026, 12, 31).unwrap())
        );
        assert_eq!(
            validate_expiry("2026-06-14", today()),
            Err(ValidationError::PastDate)
        );
        let yesterday = today() - Duration::days(1);
        assert_eq!(
            validate_expiry(&yesterday.format("%Y-%m-%d").to_string(), today()),
            Err(ValidationError::PastDate)
        );
    }
}
