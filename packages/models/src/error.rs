use serde::{Deserialize, Serialize};
use std::fmt;

/// Error payload carried by every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardApiError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
}

impl StandardApiError {
    pub fn new(code: u16, message: &str) -> Self {
        StandardApiError {
            message: message.to_string(),
            code: Some(code),
        }
    }
}

impl fmt::Display for StandardApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message.as_str())
    }
}
