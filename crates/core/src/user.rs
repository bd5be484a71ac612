//! User field validation rules and the display-name fallback.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::CoreError;
use crate::types::{Date, DbId};

/// Minimal email shape: something@something.something, no whitespace.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern must compile"))
}

/// Validate that the login is present and contains no whitespace.
pub fn validate_login(login: &str) -> Result<(), CoreError> {
    if login.trim().is_empty() {
        return Err(CoreError::Validation(
            "Login must not be blank".to_string(),
        ));
    }
    if login.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(
            "Login must not contain whitespace".to_string(),
        ));
    }
    Ok(())
}

/// Validate that the email is present and has a plausible shape.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.trim().is_empty() {
        return Err(CoreError::Validation(
            "Email must not be blank".to_string(),
        ));
    }
    if !email_regex().is_match(email) {
        return Err(CoreError::Validation(format!(
            "Invalid email format: '{email}'"
        )));
    }
    Ok(())
}

/// Validate that the birthday is not after `today`.
pub fn validate_birthday(birthday: Date, today: Date) -> Result<(), CoreError> {
    if birthday > today {
        return Err(CoreError::Validation(
            "Birthday must not be in the future".to_string(),
        ));
    }
    Ok(())
}

/// Run every user field rule against the given values.
pub fn validate_user(login: &str, email: &str, birthday: Date) -> Result<(), CoreError> {
    validate_login(login)?;
    validate_email(email)?;
    validate_birthday(birthday, chrono::Utc::now().date_naive())?;
    Ok(())
}

/// Reject a friend request from a user to themselves.
pub fn validate_friend_pair(user_id: DbId, friend_id: DbId) -> Result<(), CoreError> {
    if user_id == friend_id {
        return Err(CoreError::Validation(
            "A user cannot add themselves as a friend".to_string(),
        ));
    }
    Ok(())
}

/// Resolve the display name: a blank or absent name falls back to the login.
///
/// The fallback is computed here, at read time, and is never stored.
pub fn display_name(name: Option<&str>, login: &str) -> String {
    match name {
        Some(n) if !n.trim().is_empty() => n.to_string(),
        _ => login.to_string(),
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
