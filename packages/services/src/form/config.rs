use std::collections::HashMap;
use std::time::Duration;

use crate::validation::ValidatorChain;

/// Debounce used when none (or zero) is configured.
pub const FALLBACK_DEBOUNCE: Duration = Duration::from_millis(300);

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Field name to ordered validator chain. Fixed once the engine is built.
#[derive(Clone, Default, Debug)]
pub struct FieldValidationConfig {
    fields: HashMap<String, ValidatorChain>,
}

impl FieldValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, chain: ValidatorChain) -> Self {
        self.fields.insert(name.into(), chain);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ValidatorChain> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidatorChain)> {
        self.fields.iter().map(|(name, chain)| (name.as_str(), chain))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    pub debounce: Option<Duration>,
}

impl ValidationOptions {
    pub fn with_debounce(debounce: Duration) -> Self {
        ValidationOptions { debounce: Some(debounce) }
    }

    pub fn debounce_interval(&self) -> Duration {
        match self.debounce {
            Some(d) if !d.is_zero() => d,
            _ => FALLBACK_DEBOUNCE,
        }
    }
}

impl Default for ValidationOptions {
    fn default() -> Self {
        ValidationOptions::with_debounce(DEFAULT_DEBOUNCE)
    }
}
