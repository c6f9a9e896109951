use std::sync::{Arc, Mutex};

use models::{ForgotRequestBody, LoginRequestBody, MessageResponse, SignupRequestBody};

use super::api::AuthApi;
use super::error::ApiError;
use super::guard::Route;
use super::token::{TokenStore, TOKEN_KEY};
use crate::lock;

/// Client-side authentication state. The token is seeded from the store and
/// written through to it.
pub struct AuthSession {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn TokenStore>,
    token: Mutex<Option<String>>,
}

impl AuthSession {
    pub fn new(api: Arc<dyn AuthApi>, store: Arc<dyn TokenStore>) -> Self {
        let token = store.get(TOKEN_KEY).filter(|t| !t.is_empty());
        AuthSession {
            api,
            store,
            token: Mutex::new(token),
        }
    }

    pub fn token(&self) -> Option<String> {
        lock(&self.token).clone()
    }

    pub fn is_logged_in(&self) -> bool {
        lock(&self.token).is_some()
    }

    pub fn set_token(&self, token: &str) {
        *lock(&self.token) = Some(token.to_string());
        self.store.set(TOKEN_KEY, token);
    }

    pub fn clear_token(&self) {
        *lock(&self.token) = None;
        self.store.remove(TOKEN_KEY);
    }

    /// Logs in and returns where to go next. A successful response without
    /// a token leaves the session unchanged and yields no navigation.
    pub async fn login(&self, credentials: LoginRequestBody) -> Result<Option<Route>, ApiError> {
        let response = self.api.login(credentials).await.map_err(|e| {
            tracing::warn!(status = e.status, "login failed");
            e
        })?;

        match response.token.filter(|t| !t.is_empty()) {
            Some(token) => {
                self.set_token(&token);
                tracing::info!("login success");
                Ok(Some(Route::Home))
            }
            None => Ok(None),
        }
    }

    pub async fn signup(&self, user_data: SignupRequestBody) -> Result<Option<Route>, ApiError> {
        let response = self.api.signup(user_data).await.map_err(|e| {
            tracing::warn!(status = e.status, "signup failed");
            e
        })?;

        match response.token.filter(|t| !t.is_empty()) {
            Some(token) => {
                self.set_token(&token);
                tracing::info!("signup success");
                Ok(Some(Route::Welcome))
            }
            None => Ok(None),
        }
    }

    /// Logs out. The token is cleared even when the request fails, and the
    /// caller should navigate to [`Route::Login`] either way.
    pub async fn logout(&self) -> Result<Route, ApiError> {
        let result = self.api.logout().await;
        self.clear_token();
        tracing::info!("logout");

        match result {
            Ok(_) => Ok(Route::Login),
            Err(e) => {
                tracing::warn!(status = e.status, "logout request failed");
                Err(e)
            }
        }
    }

    pub async fn forgot_password(&self, data: ForgotRequestBody) -> Result<MessageResponse, ApiError> {
        self.api.forgot_password(data).await
    }
}
