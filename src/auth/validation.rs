//! Client-side checks run before anything reaches the network. Registration
//! rules are evaluated in a fixed order and only the first failure is
//! reported, so users with several problems always see the same message.

use regex::Regex;
use thiserror::Error;

/// Longest accepted username, in characters.
pub const MAX_USERNAME_LENGTH: usize = 25;
/// Shortest accepted registration password, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 10;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[a-zA-Z]{2,}$";

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Username is blank")]
    UsernameBlank,
    #[error("Username must be 25 character or less")]
    UsernameTooLong,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("Password must be 10 character or longer")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
}

#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(EMAIL_PATTERN).is_ok_and(|re| re.is_match(email))
}

/// Login only requires a username; everything else, whitespace-only names
/// included, is left to the backend.
///
/// # Errors
/// Returns `UsernameBlank` when the username is empty.
pub fn validate_login(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::UsernameBlank);
    }
    Ok(())
}

/// Runs the registration checks in priority order and stops at the first
/// failure.
///
/// # Errors
/// Returns the first rule the input violates.
pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
    confirmation: &str,
) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::UsernameBlank);
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooLong);
    }
    if !valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}
