//! Film field validation rules.
//!
//! Pure functions applied by the film service before any storage call.
//! Reference checks (MPA rating, genre ids) belong to the storage layer,
//! which owns the reference data.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::types::Date;

/// Cinema did not exist before this date (first public film screening).
pub const EARLIEST_RELEASE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1895, 12, 28) {
    Some(d) => d,
    None => unreachable!(),
};

/// Maximum film description length, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Validate that the film name is present and not blank.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Film name must not be blank".to_string(),
        ));
    }
    Ok(())
}

/// Validate that the description does not exceed [`MAX_DESCRIPTION_LEN`].
pub fn validate_description(description: Option<&str>) -> Result<(), CoreError> {
    if let Some(text) = description {
        let len = text.chars().count();
        if len > MAX_DESCRIPTION_LEN {
            return Err(CoreError::Validation(format!(
                "Description must not exceed {MAX_DESCRIPTION_LEN} characters (got {len})"
            )));
        }
    }
    Ok(())
}

/// Validate the release date against the floor and against `today`.
///
/// A release date before 1895-12-28 or after today is rejected.
pub fn validate_release_date(release_date: Date, today: Date) -> Result<(), CoreError> {
    if release_date < EARLIEST_RELEASE_DATE {
        return Err(CoreError::Validation(
            "Release date must not be earlier than 1895-12-28".to_string(),
        ));
    }
    if release_date > today {
        return Err(CoreError::Validation(
            "Release date must not be in the future".to_string(),
        ));
    }
    Ok(())
}

/// Validate that the duration is a positive number of minutes.
pub fn validate_duration(duration: i32) -> Result<(), CoreError> {
    if duration <= 0 {
        return Err(CoreError::Validation(
            "Duration must be a positive number of minutes".to_string(),
        ));
    }
    Ok(())
}

/// Run every film field rule against the given values.
pub fn validate_film(
    name: &str,
    description: Option<&str>,
    release_date: Date,
    duration: i32,
) -> Result<(), CoreError> {
    validate_name(name)?;
    validate_description(description)?;
    validate_release_date(release_date, chrono::Utc::now().date_naive())?;
    validate_duration(duration)?;
    Ok(())
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // -- validate_name --

    #[test]
    fn non_blank_name_accepted() {
        assert!(validate_name("Seven Samurai").is_ok());
    }

    #[test]
    fn empty_name_rejected() {
        assert_matches!(validate_name(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn whitespace_only_name_rejected() {
        assert_matches!(validate_name("   "), Err(CoreError::Validation(_)));
    }

    // -- validate_description --

    #[test]
    fn missing_description_accepted() {
        assert!(validate_description(None).is_ok());
    }

    #[test]
    fn description_at_limit_accepted() {
        let text = "x".repeat(MAX_DESCRIPTION_LEN);
        assert!(validate_description(Some(&text)).is_ok());
    }

    #[test]
    fn description_over_limit_rejected() {
        let text = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        let result = validate_description(Some(&text));
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("200"));
    }

    // -- validate_release_date --

    #[test]
    fn release_on_cinema_birthday_accepted() {
        assert!(validate_release_date(EARLIEST_RELEASE_DATE, date(2024, 1, 1)).is_ok());
    }

    #[test]
    fn release_before_cinema_birthday_rejected() {
        let result = validate_release_date(date(1895, 12, 27), date(2024, 1, 1));
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn release_in_future_rejected() {
        let result = validate_release_date(date(2025, 1, 2), date(2025, 1, 1));
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn release_today_accepted() {
        assert!(validate_release_date(date(2025, 1, 1), date(2025, 1, 1)).is_ok());
    }

    // -- validate_duration --

    #[test]
    fn positive_duration_accepted() {
        assert!(validate_duration(1).is_ok());
        assert!(validate_duration(120).is_ok());
    }

    #[test]
    fn zero_duration_rejected() {
        assert_matches!(validate_duration(0), Err(CoreError::Validation(_)));
    }

    #[test]
    fn negative_duration_rejected() {
        assert_matches!(validate_duration(-30), Err(CoreError::Validation(_)));
    }

    // -- validate_film --

    #[test]
    fn complete_valid_film_accepted() {
        let result = validate_film(
            "Test Film",
            Some("A film used in tests"),
            date(2023, 1, 1),
            120,
        );
        assert!(result.is_ok());
    }
}
