pub mod errors;
pub mod input_validators;
pub mod users;

#[cfg(test)]
pub mod test_helpers;

pub use errors::SubmitOutcome;
pub use users::{ForgotPasswordScreen, LoginScreen, SignupScreen};
