use std::sync::Arc;

use async_trait::async_trait;
use models::{
    ForgotRequestBody, LoginRequestBody, LoginResponse, MessageResponse, SignupRequestBody,
    SignupResponse,
};
use services::{ApiError, AuthApi, AuthSession, MemoryTokenStore, SandboxAuthApi};
use tokio::sync::Notify;

mockall::mock! {
    pub Api {}

    #[async_trait]
    impl AuthApi for Api {
        async fn login(&self, body: LoginRequestBody) -> Result<LoginResponse, ApiError>;
        async fn signup(&self, body: SignupRequestBody) -> Result<SignupResponse, ApiError>;
        async fn logout(&self) -> Result<MessageResponse, ApiError>;
        async fn forgot_password(&self, body: ForgotRequestBody) -> Result<MessageResponse, ApiError>;
    }
}

/// Transport whose login succeeds only once `release` is notified.
pub struct GatedApi {
    pub release: Arc<Notify>,
}

#[async_trait]
impl AuthApi for GatedApi {
    async fn login(&self, _body: LoginRequestBody) -> Result<LoginResponse, ApiError> {
        self.release.notified().await;
        Ok(LoginResponse {
            token: Some("mock-token".to_string()),
            user: None,
        })
    }

    async fn signup(&self, _body: SignupRequestBody) -> Result<SignupResponse, ApiError> {
        unimplemented!("signup is not gated")
    }

    async fn logout(&self) -> Result<MessageResponse, ApiError> {
        unimplemented!("logout is not gated")
    }

    async fn forgot_password(&self, _body: ForgotRequestBody) -> Result<MessageResponse, ApiError> {
        unimplemented!("forgot_password is not gated")
    }
}

pub fn session_with(api: impl AuthApi + 'static) -> Arc<AuthSession> {
    Arc::new(AuthSession::new(Arc::new(api), Arc::new(MemoryTokenStore::new())))
}

/// Session backed by a sandbox that never injects failures.
pub fn sandbox_session() -> Arc<AuthSession> {
    session_with(SandboxAuthApi::reliable())
}

/// Session whose transport panics on any call.
pub fn unreachable_session() -> Arc<AuthSession> {
    session_with(MockApi::new())
}
