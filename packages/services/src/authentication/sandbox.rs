use async_trait::async_trait;
use models::{
    ForgotRequestBody, LoginRequestBody, LoginResponse, MessageResponse, SignupRequestBody,
    SignupResponse, User,
};

use super::api::AuthApi;
use super::error::ApiError;

pub const SANDBOX_EMAIL: &str = "test@example.com";
pub const SANDBOX_PASSWORD: &str = "password123";
pub const SANDBOX_TOKEN: &str = "mock-token";
pub const TAKEN_EMAIL: &str = "already@exists.com";

/// In-process stand-in for the authentication backend, used for local
/// development and tests. Login and signup fail with a 500 at
/// `failure_rate`.
#[derive(Debug, Clone)]
pub struct SandboxAuthApi {
    failure_rate: f64,
}

impl SandboxAuthApi {
    pub fn new(failure_rate: f64) -> Self {
        SandboxAuthApi {
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }

    /// A sandbox that never injects failures.
    pub fn reliable() -> Self {
        Self::new(0.0)
    }

    fn server_fails(&self) -> bool {
        self.failure_rate > 0.0 && rand::random::<f64>() < self.failure_rate
    }

    fn authorized() -> LoginResponse {
        LoginResponse {
            token: Some(SANDBOX_TOKEN.to_string()),
            user: Some(User {
                name: "Test User".to_string(),
            }),
        }
    }
}

impl Default for SandboxAuthApi {
    fn default() -> Self {
        Self::new(0.25)
    }
}

#[async_trait]
impl AuthApi for SandboxAuthApi {
    async fn login(&self, body: LoginRequestBody) -> Result<LoginResponse, ApiError> {
        if body.email.is_empty() || body.password.is_empty() {
            return Err(ApiError::new(400, "Missing credentials"));
        }

        if self.server_fails() {
            tracing::debug!("sandbox injected login failure");
            return Err(ApiError::new(500, "Unexpected server error"));
        }

        if body.email != SANDBOX_EMAIL || body.password != SANDBOX_PASSWORD {
            return Err(ApiError::new(401, "Invalid credentials"));
        }

        Ok(Self::authorized())
    }

    async fn signup(&self, body: SignupRequestBody) -> Result<SignupResponse, ApiError> {
        if body.email.is_empty() || !body.email.contains('@') {
            return Err(ApiError::new(400, "Invalid email address"));
        }

        if body.password.chars().count() < 8 {
            return Err(ApiError::new(400, "Password must be at least 8 characters long"));
        }

        if body.password != body.password_confirmation {
            return Err(ApiError::new(400, "Passwords do not match"));
        }

        if body.email.to_lowercase() == TAKEN_EMAIL {
            return Err(ApiError::new(409, "Email already in use"));
        }

        if self.server_fails() {
            tracing::debug!("sandbox injected signup failure");
            return Err(ApiError::new(500, "Unexpected server error"));
        }

        Ok(Self::authorized())
    }

    async fn logout(&self) -> Result<MessageResponse, ApiError> {
        Ok(MessageResponse::new("Logged out"))
    }

    async fn forgot_password(&self, body: ForgotRequestBody) -> Result<MessageResponse, ApiError> {
        if body.email.is_empty() {
            return Err(ApiError::new(400, "Email is required"));
        }

        if body.email != SANDBOX_EMAIL {
            return Err(ApiError::new(404, "User not found"));
        }

        Ok(MessageResponse::new("Password reset email sent"))
    }
}
