//! Field-level validation for user input.
//!
//! A failure blocks only the action being attempted (saving a profile, submitting a
//! form); the message is meant to be shown inline as-is.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .unwrap_or_else(|e| panic!("invalid email pattern: {e}"))
});

const MIN_PHONE_DIGITS: usize = 10;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid phone number")]
    InvalidPhone,
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Please enter the verification code")]
    MissingCode,
}

impl ValidationError {
    /// Dialog title matching the message.
    pub fn title(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "Invalid Email",
            Self::InvalidPhone => "Invalid Phone Number",
            Self::MissingFields | Self::PasswordMismatch | Self::MissingCode => "Error",
        }
    }
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL.is_match(email.trim()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// At least ten digits; only digits, spaces and `+ - ( )` allowed.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let phone = phone.trim();
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'));
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if allowed && digits >= MIN_PHONE_DIGITS {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone)
    }
}

/// Sign-in form: both fields present.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    Ok(())
}

/// Sign-up form: both fields present and the confirmation matches.
pub fn validate_sign_up(email: &str, password: &str, confirm: &str) -> Result<(), ValidationError> {
    validate_credentials(email, password)?;
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}
