use models::StandardApiError;
use std::fmt;

/// A failed authentication request: HTTP status plus the error payload, when
/// the server sent one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: u16,
    pub data: Option<StandardApiError>,
}

impl ApiError {
    pub fn new(status: u16, message: &str) -> Self {
        ApiError {
            status,
            data: Some(StandardApiError::new(status, message)),
        }
    }

    fn payload_message(&self) -> Option<&str> {
        self.data
            .as_ref()
            .map(|d| d.message.as_str())
            .filter(|m| !m.is_empty())
    }

    /// User-facing text for this error.
    pub fn message(&self) -> String {
        if self.data.is_none() {
            return "An unexpected error occurred".to_string();
        }

        let message = match self.status {
            400 => self.payload_message().unwrap_or("Bad request"),
            401 => "Please log in to continue",
            403 => "You do not have permission to perform this action",
            404 => "The requested resource was not found",
            422 => "Please check your input and try again",
            500 => "Server error. Please try again later",
            _ => self.payload_message().unwrap_or("An error occurred"),
        };
        message.to_string()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message().as_str())
    }
}

impl std::error::Error for ApiError {}
