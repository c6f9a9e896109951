use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use services::{ApiError, FormValidation};

mod forgot_password;
mod sign_in;
mod sign_up;

pub use forgot_password::ForgotPasswordScreen;
pub use sign_in::LoginScreen;
pub use sign_up::SignupScreen;

/// Submission state shared by every screen.
#[derive(Debug, Default)]
pub(crate) struct ScreenState {
    submitting: AtomicBool,
    api_error: Mutex<Option<String>>,
}

impl ScreenState {
    fn api_error_slot(&self) -> MutexGuard<'_, Option<String>> {
        self.api_error.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    pub(crate) fn api_error(&self) -> Option<String> {
        self.api_error_slot().clone()
    }

    pub(crate) fn dismiss_api_error(&self) {
        *self.api_error_slot() = None;
    }

    /// Awaits `request` with the submitting flag raised. A failure is kept as
    /// the screen's API error and returned as its user-facing message.
    pub(crate) async fn send<T, F>(&self, request: F) -> Result<T, String>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        self.dismiss_api_error();
        let result = {
            let _submitting = SubmittingFlag::raise(&self.submitting);
            request.await
        };

        result.map_err(|e| {
            let message = e.message();
            *self.api_error_slot() = Some(message.clone());
            message
        })
    }
}

/// Holds the submitting flag up until dropped, including when the submit
/// future itself is dropped mid-request.
struct SubmittingFlag<'a>(&'a AtomicBool);

impl<'a> SubmittingFlag<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        SubmittingFlag(flag)
    }
}

impl Drop for SubmittingFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Current text of a bound field, "" when unset.
pub(crate) fn field_text(form: &FormValidation, field: &str) -> String {
    form.value(field)
        .map(|v| v.text().into_owned())
        .unwrap_or_default()
}
