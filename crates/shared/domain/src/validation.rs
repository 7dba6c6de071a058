//! Field validators for user input.
//!
//! Every validator runs all of its rules and reports each broken one, so a
//! single value can collect several violations. Message text and order are
//! stable; clients match on them.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{
    MAX_FULL_NAME_LENGTH, MAX_PASSWORD_LENGTH, MAX_PHONE_NO_LENGTH, MIN_FULL_NAME_LENGTH,
    MIN_PASSWORD_LENGTH, MIN_PHONE_NO_LENGTH, PHONE_COUNTRY_CODE,
};

/// Digits only, optionally preceded by the `+` of the country code
static ALL_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+*[0-9]+$").unwrap());

/// At least one digit
static HAS_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").unwrap());

/// At least one capital letter
static HAS_CAPITAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").unwrap());

/// At least one character that is not a letter or digit, in any script
static HAS_SPECIAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\W_]").unwrap());

fn length_within(value: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&value.chars().count())
}

/// Validate a phone number.
///
/// Checks, in order: length, `+62` prefix, digits-only body.
pub fn validate_phone_no(phone_no: &str) -> Vec<String> {
    let mut violations = Vec::new();

    if !length_within(phone_no, MIN_PHONE_NO_LENGTH, MAX_PHONE_NO_LENGTH) {
        violations.push(format!(
            "phone_no must be between {} and {} characters long",
            MIN_PHONE_NO_LENGTH, MAX_PHONE_NO_LENGTH
        ));
    }
    if !phone_no.starts_with(PHONE_COUNTRY_CODE) {
        violations.push(format!(
            "phone_no must start with indonesia country code (\"{}\")",
            PHONE_COUNTRY_CODE
        ));
    }
    if !ALL_DIGITS.is_match(phone_no) {
        violations.push("besides the country code, phone_no must only contain numbers".to_string());
    }

    violations
}

/// Validate a full name.
pub fn validate_full_name(full_name: &str) -> Vec<String> {
    let mut violations = Vec::new();

    if !length_within(full_name, MIN_FULL_NAME_LENGTH, MAX_FULL_NAME_LENGTH) {
        violations.push(format!(
            "full_name must be between {} and {} characters long",
            MIN_FULL_NAME_LENGTH, MAX_FULL_NAME_LENGTH
        ));
    }

    violations
}

/// Validate password strength.
///
/// Checks, in order: length, digit, capital letter, non-alphanumeric character.
pub fn validate_password(password: &str) -> Vec<String> {
    let mut violations = Vec::new();

    if !length_within(password, MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH) {
        violations.push(format!(
            "password must be between {} and {} characters long",
            MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
        ));
    }
    if !HAS_DIGIT.is_match(password) {
        violations.push("password must contains at least one number [0-9]".to_string());
    }
    if !HAS_CAPITAL.is_match(password) {
        violations.push("password must contains at least one capital letter [A-Z]".to_string());
    }
    if !HAS_SPECIAL.is_match(password) {
        violations.push("password must contains at least one non alphanumeric character".to_string());
    }

    violations
}
