use std::sync::Arc;

use models::ForgotRequestBody;
use services::{AuthSession, FormValidation, ValidationOptions};

use super::{field_text, ScreenState};
use crate::errors::SubmitOutcome;
use crate::input_validators::{forgot_password_config, EMAIL};

pub struct ForgotPasswordScreen {
    form: FormValidation,
    session: Arc<AuthSession>,
    state: ScreenState,
}

impl ForgotPasswordScreen {
    pub fn new(session: Arc<AuthSession>, options: ValidationOptions) -> Self {
        let form = FormValidation::new([(EMAIL, "")], forgot_password_config(), options);
        ForgotPasswordScreen {
            form,
            session,
            state: ScreenState::default(),
        }
    }

    pub fn form(&self) -> &FormValidation {
        &self.form
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
    }

    pub fn api_error(&self) -> Option<String> {
        self.state.api_error()
    }

    pub async fn submit(&self) -> SubmitOutcome {
        // superseded by validate_all
        self.form.cancel_pending();
        if !self.form.validate_all() {
            return SubmitOutcome::Invalid;
        }

        let data = ForgotRequestBody {
            email: field_text(&self.form, EMAIL),
        };

        match self.state.send(self.session.forgot_password(data)).await {
            Ok(response) => {
                self.form.reset();
                tracing::info!("password reset requested");
                SubmitOutcome::Done(response.message)
            }
            Err(message) => SubmitOutcome::Failed(message),
        }
    }
}
