use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use models::SignupRequestBody;
use services::validation::{password_strength, password_strength_label, FieldValue};
use services::{AuthSession, FormValidation, ValidationOptions};

use super::{field_text, ScreenState};
use crate::errors::SubmitOutcome;
use crate::input_validators::{
    signup_config, EMAIL, PASSWORD, PASSWORD_CONFIRMATION, SUBSCRIBE_TO_UPDATES,
};

pub struct SignupScreen {
    form: FormValidation,
    session: Arc<AuthSession>,
    state: ScreenState,
    password: Arc<Mutex<String>>,
}

impl SignupScreen {
    pub fn new(session: Arc<AuthSession>, options: ValidationOptions) -> Self {
        let password = Arc::new(Mutex::new(String::new()));
        let form = FormValidation::new(
            [
                (EMAIL, FieldValue::from("")),
                (PASSWORD, FieldValue::from("")),
                (PASSWORD_CONFIRMATION, FieldValue::from("")),
                (SUBSCRIBE_TO_UPDATES, FieldValue::from(false)),
            ],
            signup_config(Arc::clone(&password)),
            options,
        );
        SignupScreen {
            form,
            session,
            state: ScreenState::default(),
            password,
        }
    }

    pub fn form(&self) -> &FormValidation {
        &self.form
    }

    /// Binds a field value. Use this rather than writing to the form
    /// directly so the confirmation check sees the latest password.
    pub fn set_field(&self, field: &str, value: impl Into<FieldValue>) {
        let value = value.into();
        if field == PASSWORD {
            *self.password_target() = value.text().into_owned();
        }
        self.form.set_value(field, value);
    }

    fn password_target(&self) -> MutexGuard<'_, String> {
        self.password.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn sync_password_target(&self) {
        *self.password_target() = field_text(&self.form, PASSWORD);
    }

    /// Strength score of the current password and its label.
    pub fn password_strength(&self) -> (u8, &'static str) {
        let score = password_strength(&field_text(&self.form, PASSWORD));
        (score, password_strength_label(score))
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
    }

    pub fn api_error(&self) -> Option<String> {
        self.state.api_error()
    }

    pub async fn submit(&self) -> SubmitOutcome {
        self.sync_password_target();
        // superseded by validate_all
        self.form.cancel_pending();
        if !self.form.validate_all() {
            return SubmitOutcome::Invalid;
        }

        let subscribe = matches!(self.form.value(SUBSCRIBE_TO_UPDATES), Some(FieldValue::Bool(true)));
        let user_data = SignupRequestBody {
            email: field_text(&self.form, EMAIL),
            password: field_text(&self.form, PASSWORD),
            password_confirmation: field_text(&self.form, PASSWORD_CONFIRMATION),
            subscribe_to_updates: subscribe,
        };

        match self.state.send(self.session.signup(user_data)).await {
            Ok(route) => {
                self.form.reset();
                self.sync_password_target();
                route.map_or(SubmitOutcome::Stay, SubmitOutcome::Navigate)
            }
            Err(message) => SubmitOutcome::Failed(message),
        }
    }
}
