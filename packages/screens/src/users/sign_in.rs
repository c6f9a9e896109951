use std::sync::Arc;

use models::LoginRequestBody;
use services::{AuthSession, FormValidation, ValidationOptions};

use super::{field_text, ScreenState};
use crate::errors::SubmitOutcome;
use crate::input_validators::{login_config, EMAIL, PASSWORD};

pub struct LoginScreen {
    form: FormValidation,
    session: Arc<AuthSession>,
    state: ScreenState,
}

impl LoginScreen {
    pub fn new(session: Arc<AuthSession>, options: ValidationOptions) -> Self {
        let form = FormValidation::new([(EMAIL, ""), (PASSWORD, "")], login_config(), options);
        LoginScreen {
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

        let credentials = LoginRequestBody {
            email: field_text(&self.form, EMAIL),
            password: field_text(&self.form, PASSWORD),
        };

        match self.state.send(self.session.login(credentials)).await {
            Ok(route) => {
                self.form.reset();
                route.map_or(SubmitOutcome::Stay, SubmitOutcome::Navigate)
            }
            Err(message) => SubmitOutcome::Failed(message),
        }
    }
}
