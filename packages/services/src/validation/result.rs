use std::fmt;

/// Message recorded when a failing validator supplied none.
pub const FALLBACK_MESSAGE: &str = "Invalid value";

/// Outcome of a single validator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationResult {
    #[default]
    Valid,
    Invalid(Option<String>),
}

impl ValidationResult {
    pub fn invalid(message: impl Into<String>) -> Self {
        ValidationResult::Invalid(Some(message.into()))
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(message) => message.as_deref(),
        }
    }

    /// The message to surface for a failure. Missing and empty messages are
    /// replaced by [`FALLBACK_MESSAGE`]. `None` when valid.
    pub fn error_message(&self) -> Option<String> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(message) => Some(
                message
                    .as_deref()
                    .filter(|m| !m.is_empty())
                    .unwrap_or(FALLBACK_MESSAGE)
                    .to_string(),
            ),
        }
    }
}

impl<E: fmt::Display> From<Result<(), E>> for ValidationResult {
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => ValidationResult::Valid,
            Err(e) => ValidationResult::invalid(e.to_string()),
        }
    }
}
