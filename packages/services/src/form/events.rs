use crate::validation::FieldValue;

/// Emitted by the engine after each state change.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    FieldChanged { field: String, value: FieldValue },
    FieldValidated { field: String, error: Option<String> },
    Validated { valid: bool },
    ErrorCleared { field: String },
    Reset,
}
