use async_trait::async_trait;
use models::{
    ForgotRequestBody, LoginRequestBody, LoginResponse, MessageResponse, SignupRequestBody,
    SignupResponse,
};

use super::error::ApiError;

/// Client side of the authentication endpoints (`/api/login`, `/api/signup`,
/// `/api/logout`, `/api/forgot`).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, body: LoginRequestBody) -> Result<LoginResponse, ApiError>;

    async fn signup(&self, body: SignupRequestBody) -> Result<SignupResponse, ApiError>;

    async fn logout(&self) -> Result<MessageResponse, ApiError>;

    async fn forgot_password(&self, body: ForgotRequestBody) -> Result<MessageResponse, ApiError>;
}
