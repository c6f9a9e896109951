use std::sync::{Arc, Mutex, PoisonError};

use services::validation::{
    validate_password_confirmation, Email, FieldValue, Password, Required, ValidatorChain,
};
use services::FieldValidationConfig;

pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";
pub const PASSWORD_CONFIRMATION: &str = "passwordConfirmation";
pub const SUBSCRIBE_TO_UPDATES: &str = "subscribeToUpdates";

fn email_chain() -> ValidatorChain {
    ValidatorChain::new().then(Required::default()).then(Email)
}

pub fn login_config() -> FieldValidationConfig {
    FieldValidationConfig::new()
        .field(EMAIL, email_chain())
        .field(PASSWORD, ValidatorChain::new().then(Required::default()))
}

/// The confirmation is checked against whatever `password` currently holds.
pub fn signup_config(password: Arc<Mutex<String>>) -> FieldValidationConfig {
    let matches_password = move |value: &FieldValue| {
        let password = password.lock().unwrap_or_else(PoisonError::into_inner);
        validate_password_confirmation(&password, &value.text())
    };

    FieldValidationConfig::new()
        .field(EMAIL, email_chain())
        .field(
            PASSWORD,
            ValidatorChain::new().then(Required::default()).then(Password),
        )
        .field(
            PASSWORD_CONFIRMATION,
            ValidatorChain::new()
                .then(Required::default())
                .then(matches_password),
        )
}

pub fn forgot_password_config() -> FieldValidationConfig {
    FieldValidationConfig::new().field(EMAIL, email_chain())
}
