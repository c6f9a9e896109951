pub mod field_validators;
pub mod field_value;
pub mod input_validator;
pub mod password;
pub mod result;

// Re-export common types and functions
pub use field_validators::{
    validate_email, validate_min_length, validate_password_confirmation, validate_required,
    Email, EmailValidationError, MinLength, Password, PasswordConfirmation, Required,
};
pub use field_value::FieldValue;
pub use input_validator::{ErrorMap, ErrorMapExt, Validator, ValidatorChain};
pub use password::{password_strength, password_strength_label, validate_password, PasswordValidationError};
pub use result::{ValidationResult, FALLBACK_MESSAGE};
