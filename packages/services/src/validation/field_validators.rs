use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use super::field_value::FieldValue;
use super::input_validator::Validator;
use super::password::validate_password;
use super::result::ValidationResult;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

pub const DEFAULT_FIELD_NAME: &str = "This field";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailValidationError {
    Empty,
    Malformed,
}

impl fmt::Display for EmailValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmailValidationError::Empty => write!(f, "Email is required"),
            EmailValidationError::Malformed => write!(f, "Please enter a valid email address"),
        }
    }
}

impl std::error::Error for EmailValidationError {}

pub fn validate_required(value: &FieldValue, field_name: &str) -> ValidationResult {
    let blank = match value {
        FieldValue::Text(s) => s.trim().is_empty(),
        other => other.is_empty(),
    };
    if blank {
        return ValidationResult::invalid(format!("{} is required", field_name));
    }
    ValidationResult::Valid
}

/// The pattern is matched against the untrimmed input; only the emptiness
/// check trims.
pub fn validate_email(email: &str) -> Result<(), EmailValidationError> {
    if email.trim().is_empty() {
        return Err(EmailValidationError::Empty);
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(EmailValidationError::Malformed);
    }
    Ok(())
}

/// Empty input passes; pair with [`Required`] to reject it.
pub fn validate_min_length(value: &str, min_length: usize) -> ValidationResult {
    if value.is_empty() {
        return ValidationResult::Valid;
    }
    if value.chars().count() < min_length {
        return ValidationResult::invalid(format!("Must be at least {} characters long", min_length));
    }
    ValidationResult::Valid
}

pub fn validate_password_confirmation(original: &str, confirmation: &str) -> ValidationResult {
    if confirmation.trim().is_empty() {
        return ValidationResult::invalid("Please confirm your password");
    }
    if confirmation != original {
        return ValidationResult::invalid("Passwords do not match");
    }
    ValidationResult::Valid
}

#[derive(Debug, Clone)]
pub struct Required {
    field_name: Cow<'static, str>,
}

impl Required {
    pub fn named(field_name: impl Into<Cow<'static, str>>) -> Self {
        Required { field_name: field_name.into() }
    }
}

impl Default for Required {
    fn default() -> Self {
        Required::named(DEFAULT_FIELD_NAME)
    }
}

impl Validator for Required {
    fn evaluate(&self, value: &FieldValue) -> ValidationResult {
        validate_required(value, &self.field_name)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Email;

impl Validator for Email {
    fn evaluate(&self, value: &FieldValue) -> ValidationResult {
        validate_email(&value.text()).into()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Password;

impl Validator for Password {
    fn evaluate(&self, value: &FieldValue) -> ValidationResult {
        validate_password(&value.text()).into()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MinLength(pub usize);

impl Validator for MinLength {
    fn evaluate(&self, value: &FieldValue) -> ValidationResult {
        validate_min_length(&value.text(), self.0)
    }
}

/// Matches the confirmation against the password captured at construction.
#[derive(Debug, Clone)]
pub struct PasswordConfirmation {
    target: String,
}

impl PasswordConfirmation {
    pub fn new(target: impl Into<String>) -> Self {
        PasswordConfirmation { target: target.into() }
    }
}

impl Validator for PasswordConfirmation {
    fn evaluate(&self, value: &FieldValue) -> ValidationResult {
        validate_password_confirmation(&self.target, &value.text())
    }
}
