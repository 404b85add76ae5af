//! Phone and email validators
//!
//! Pure predicates over arbitrary text. The `validate_*` variants report the
//! matching [`Error`] so callers can propagate with `?`.

use std::sync::OnceLock;

use regex::Regex;

use crate::{Error, Result};

/// `+91` country code followed by exactly 10 ASCII digits
const PHONE_PATTERN: &str = r"^\+91[0-9]{10}$";

/// local-part `@` label `.` suffix
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$";

fn phone_regex() -> Option<&'static Regex> {
    static PHONE: OnceLock<Option<Regex>> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(PHONE_PATTERN).ok()).as_ref()
}

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).ok()).as_ref()
}

/// Check whether `phone` is `+91` followed by exactly 10 digits.
pub fn is_valid_phone(phone: &str) -> bool {
    phone_regex().is_some_and(|re| re.is_match(phone))
}

/// Check whether `email` looks like `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_some_and(|re| re.is_match(email))
}

/// Validate a phone number.
///
/// # Errors
///
/// Returns `Error::InvalidPhone` if the number is rejected.
pub fn validate_phone(phone: &str) -> Result<()> {
    if is_valid_phone(phone) {
        Ok(())
    } else {
        Err(Error::InvalidPhone(phone.to_string()))
    }
}

/// Validate an email address.
///
/// # Errors
///
/// Returns `Error::InvalidEmail` if the address is rejected.
pub fn validate_email(email: &str) -> Result<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(Error::InvalidEmail(email.to_string()))
    }
}
