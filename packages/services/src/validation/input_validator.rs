use std::collections::HashMap;
use std::sync::Arc;

use super::field_value::FieldValue;
use super::result::ValidationResult;

/// Per-field validation state. A missing key means the field has not been
/// validated yet, `None` means it passed, `Some(message)` means it failed.
pub type ErrorMap = HashMap<String, Option<String>>;

/// A single validation rule. Implementations must be pure and total.
pub trait Validator: Send + Sync {
    fn evaluate(&self, value: &FieldValue) -> ValidationResult;

    fn is_valid(&self, value: &FieldValue) -> bool {
        self.evaluate(value).is_valid()
    }
}

impl<F> Validator for F
where
    F: Fn(&FieldValue) -> ValidationResult + Send + Sync,
{
    fn evaluate(&self, value: &FieldValue) -> ValidationResult {
        self(value)
    }
}

/// Ordered list of validators for one field.
#[derive(Clone, Default)]
pub struct ValidatorChain {
    validators: Vec<Arc<dyn Validator>>,
}

impl ValidatorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validator; it runs after the ones already in the chain.
    pub fn then<V: Validator + 'static>(mut self, validator: V) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Runs the chain until the first failure and returns its message, with
    /// the fallback applied. `None` when every validator passes.
    pub fn check(&self, value: &FieldValue) -> Option<String> {
        for validator in &self.validators {
            let result = validator.evaluate(value);
            if !result.is_valid() {
                if result.message().map_or(true, str::is_empty) {
                    tracing::warn!("validator failed without a message");
                }
                return result.error_message();
            }
        }
        None
    }
}

impl std::fmt::Debug for ValidatorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorChain")
            .field("len", &self.validators.len())
            .finish()
    }
}

// Helper trait for reading and writing error maps
pub trait ErrorMapExt {
    fn record(&mut self, field: &str, error: Option<String>);
    fn record_valid(&mut self, field: &str);
    fn has_errors(&self) -> bool;
    fn error_for(&self, field: &str) -> Option<&str>;
}

impl ErrorMapExt for ErrorMap {
    fn record(&mut self, field: &str, error: Option<String>) {
        self.insert(field.to_string(), error);
    }

    fn record_valid(&mut self, field: &str) {
        self.record(field, None);
    }

    fn has_errors(&self) -> bool {
        self.values().any(Option::is_some)
    }

    fn error_for(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(|e| e.as_deref())
    }
}
