use std::fmt;

/// Characters that satisfy the special-character requirement.
pub const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Highest score [`password_strength`] reports, even when every criterion is met.
pub const MAX_STRENGTH: u8 = 4;

const STRENGTH_LABELS: [&str; 5] = ["Very Weak", "Weak", "Fair", "Good", "Strong"];

/// Various types of password validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordValidationError {
    /// Password is empty or whitespace only
    Empty,
    /// Password is too short
    TooShort,
    /// Password is missing an uppercase letter
    MissingUppercase,
    /// Password is missing a lowercase letter
    MissingLowercase,
    /// Password is missing a digit
    MissingDigit,
    /// Password is missing a special character
    MissingSpecialChar,
}

impl fmt::Display for PasswordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordValidationError::Empty =>
                write!(f, "Password is required"),
            PasswordValidationError::TooShort =>
                write!(f, "Password must be at least {} characters long", MIN_PASSWORD_LENGTH),
            PasswordValidationError::MissingUppercase =>
                write!(f, "Password must contain at least one uppercase letter"),
            PasswordValidationError::MissingLowercase =>
                write!(f, "Password must contain at least one lowercase letter"),
            PasswordValidationError::MissingDigit =>
                write!(f, "Password must contain at least one number"),
            PasswordValidationError::MissingSpecialChar =>
                write!(f, "Password must contain at least one special character"),
        }
    }
}

impl std::error::Error for PasswordValidationError {}

fn has_uppercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_uppercase())
}

fn has_lowercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
}

fn has_digit(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_digit())
}

fn has_special_char(password: &str) -> bool {
    password.chars().any(|c| SPECIAL_CHARS.contains(c))
}

fn long_enough(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

/// Validates a password against security requirements
///
/// Requirements are checked in a fixed order and the first unmet one is
/// reported: non-empty, length, uppercase, lowercase, digit, special character.
///
/// # Returns
/// * `Ok(())` if the password is valid
/// * `Err(PasswordValidationError)` if the password is invalid
pub fn validate_password(password: &str) -> Result<(), PasswordValidationError> {
    if password.trim().is_empty() {
        return Err(PasswordValidationError::Empty);
    }

    if !long_enough(password) {
        return Err(PasswordValidationError::TooShort);
    }

    if !has_uppercase(password) {
        return Err(PasswordValidationError::MissingUppercase);
    }

    if !has_lowercase(password) {
        return Err(PasswordValidationError::MissingLowercase);
    }

    if !has_digit(password) {
        return Err(PasswordValidationError::MissingDigit);
    }

    if !has_special_char(password) {
        return Err(PasswordValidationError::MissingSpecialChar);
    }

    Ok(())
}

/// Scores a password from 0 to [`MAX_STRENGTH`], one point per criterion met.
pub fn password_strength(password: &str) -> u8 {
    let score = [
        long_enough(password),
        has_uppercase(password),
        has_lowercase(password),
        has_digit(password),
        has_special_char(password),
    ]
    .iter()
    .filter(|met| **met)
    .count() as u8;

    score.min(MAX_STRENGTH)
}

pub fn password_strength_label(strength: u8) -> &'static str {
    STRENGTH_LABELS
        .get(strength as usize)
        .copied()
        .unwrap_or(STRENGTH_LABELS[0])
}
