//! Reactive form validation.
//!
//! [`FormValidation`] owns a form's field values, runs each field's validator
//! chain on demand or after a per-field debounce, and tracks per-field errors.
//!
//! ```ignore
//! let form = FormValidation::new(
//!     [("email", ""), ("password", "")],
//!     FieldValidationConfig::new()
//!         .field("email", ValidatorChain::new().then(Required::default()).then(Email))
//!         .field("password", ValidatorChain::new().then(Required::default()).then(Password)),
//!     ValidationOptions::default(),
//! );
//!
//! form.set_value("email", "user@example.com");
//! if form.validate_all() {
//!     // submit
//! }
//! ```

pub mod config;
pub mod debounce;
pub mod engine;
pub mod events;

pub use config::{FieldValidationConfig, ValidationOptions};
pub use debounce::Debouncer;
pub use engine::FormValidation;
pub use events::FormEvent;
