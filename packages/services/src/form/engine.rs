use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::broadcast;

use super::config::{FieldValidationConfig, ValidationOptions};
use super::debounce::Debouncer;
use super::events::FormEvent;
use crate::lock;
use crate::validation::{ErrorMap, ErrorMapExt, FieldValue};

const EVENT_CAPACITY: usize = 64;

#[derive(Default)]
struct FormState {
    values: HashMap<String, FieldValue>,
    errors: ErrorMap,
    is_validating: bool,
    // Bumped by reset and validate_all. Debounced results from an older
    // epoch are discarded.
    epoch: u64,
}

struct Inner {
    initial: HashMap<String, FieldValue>,
    config: FieldValidationConfig,
    debounce: Duration,
    state: Mutex<FormState>,
    debouncer: Debouncer,
    events: broadcast::Sender<FormEvent>,
}

/// Validation state for one form.
///
/// Cloning yields another handle to the same form. Pending debounced
/// validations are cancelled when the last handle is dropped.
#[derive(Clone)]
pub struct FormValidation {
    inner: Arc<Inner>,
}

impl FormValidation {
    pub fn new<I, K, V>(initial: I, config: FieldValidationConfig, options: ValidationOptions) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let initial: HashMap<String, FieldValue> = initial
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        let state = FormState {
            values: initial.clone(),
            ..FormState::default()
        };

        FormValidation {
            inner: Arc::new(Inner {
                initial,
                config,
                debounce: options.debounce_interval(),
                state: Mutex::new(state),
                debouncer: Debouncer::new(),
                events,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        lock(&self.inner.state)
    }

    fn emit(&self, event: FormEvent) {
        // No subscribers is fine.
        let _ = self.inner.events.send(event);
    }

    /// Receives a [`FormEvent`] after every state change.
    pub fn subscribe(&self) -> broadcast::Receiver<FormEvent> {
        self.inner.events.subscribe()
    }

    pub fn value(&self, field: &str) -> Option<FieldValue> {
        self.state().values.get(field).cloned()
    }

    pub fn values(&self) -> HashMap<String, FieldValue> {
        self.state().values.clone()
    }

    /// Binds a new value to `field`. When the field has validators and the
    /// value actually changed, its debounced validation is rescheduled.
    pub fn set_value(&self, field: &str, value: impl Into<FieldValue>) {
        let value = value.into();
        let changed = {
            let mut state = self.state();
            let previous = state.values.insert(field.to_string(), value.clone());
            previous.as_ref() != Some(&value)
        };
        if !changed {
            return;
        }

        self.emit(FormEvent::FieldChanged {
            field: field.to_string(),
            value: value.clone(),
        });

        if self.inner.config.contains(field) {
            self.schedule_validation(field, value);
        }
    }

    fn schedule_validation(&self, field: &str, value: FieldValue) {
        let form = Arc::downgrade(&self.inner);
        let key = field.to_string();
        let scheduled_value = value.clone();
        let epoch = self.state().epoch;

        let scheduled = self.inner.debouncer.schedule(field, self.inner.debounce, async move {
            if let Some(inner) = form.upgrade() {
                FormValidation { inner }.apply_debounced(&key, &scheduled_value, epoch);
            }
        });

        if scheduled {
            tracing::debug!(field, delay = ?self.inner.debounce, "validation scheduled");
        } else {
            tracing::debug!(field, "no runtime available, validating immediately");
            self.validate_field(field, &value);
        }
    }

    /// Runs the field's chain against `value` and records the outcome.
    /// Fields without validators are always valid and leave no entry.
    pub fn validate_field(&self, field: &str, value: &FieldValue) -> bool {
        let Some(chain) = self.inner.config.get(field) else {
            return true;
        };

        let error = chain.check(value);
        let valid = error.is_none();
        tracing::debug!(field, valid, "field validated");

        self.state().errors.record(field, error.clone());
        self.emit_validated(field, error);
        valid
    }

    /// Timer path of [`Self::validate_field`]. The result is dropped when the
    /// form was reset or fully revalidated after the timer was scheduled, or
    /// when the field has since been bound to another value.
    fn apply_debounced(&self, field: &str, value: &FieldValue, epoch: u64) {
        let Some(chain) = self.inner.config.get(field) else {
            return;
        };
        let error = chain.check(value);

        {
            let mut state = self.state();
            if state.epoch != epoch || state.values.get(field) != Some(value) {
                tracing::debug!(field, "superseded validation discarded");
                return;
            }
            state.errors.record(field, error.clone());
        }
        tracing::debug!(field, valid = error.is_none(), "field validated");
        self.emit_validated(field, error);
    }

    fn emit_validated(&self, field: &str, error: Option<String>) {
        self.emit(FormEvent::FieldValidated {
            field: field.to_string(),
            error,
        });
    }

    /// Validates every configured field that currently has a value and
    /// replaces the error map with the results.
    pub fn validate_all(&self) -> bool {
        let values = {
            let mut state = self.state();
            state.is_validating = true;
            state.epoch += 1;
            state.values.clone()
        };

        let mut errors = ErrorMap::new();
        for (field, chain) in self.inner.config.iter() {
            // Fields with no bound value are left unvalidated.
            let Some(value) = values.get(field) else {
                continue;
            };
            errors.record(field, chain.check(value));
        }
        let valid = !errors.has_errors();

        {
            let mut state = self.state();
            state.errors = errors;
            state.is_validating = false;
        }

        tracing::debug!(valid, "form validated");
        self.emit(FormEvent::Validated { valid });
        valid
    }

    /// Validates the field's current value, as on blur.
    pub fn handle_field_blur(&self, field: &str) {
        let value = self.value(field).unwrap_or_default();
        self.validate_field(field, &value);
    }

    /// Marks `field` as error-free without running its validators.
    pub fn clear_error(&self, field: &str) {
        self.state().errors.record_valid(field);
        self.emit(FormEvent::ErrorCleared {
            field: field.to_string(),
        });
    }

    /// Cancels pending validations, restores initial values and forgets all
    /// validation results. Fields added after construction reset to "".
    pub fn reset(&self) {
        self.inner.debouncer.cancel_all();
        {
            let mut state = self.state();
            let initial = &self.inner.initial;
            for (field, value) in state.values.iter_mut() {
                *value = initial
                    .get(field)
                    .cloned()
                    .unwrap_or_else(|| FieldValue::Text(String::new()));
            }
            state.errors.clear();
            state.epoch += 1;
        }
        tracing::debug!("form reset");
        self.emit(FormEvent::Reset);
    }

    /// Cancels every pending debounced validation.
    pub fn cancel_pending(&self) {
        self.inner.debouncer.cancel_all();
    }

    pub fn pending_validations(&self) -> usize {
        self.inner.debouncer.pending()
    }

    pub fn errors(&self) -> ErrorMap {
        self.state().errors.clone()
    }

    /// The field's error message, if it failed its last validation.
    pub fn error(&self, field: &str) -> Option<String> {
        self.state().errors.error_for(field).map(str::to_string)
    }

    /// Whether the field has been validated since construction or the last reset.
    pub fn is_validated(&self, field: &str) -> bool {
        self.state().errors.contains_key(field)
    }

    pub fn has_errors(&self) -> bool {
        self.state().errors.has_errors()
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn is_validating(&self) -> bool {
        self.state().is_validating
    }
}

impl std::fmt::Debug for FormValidation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("FormValidation")
            .field("values", &state.values)
            .field("errors", &state.errors)
            .field("debounce", &self.inner.debounce)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::mpsc;

    fn login_config() -> FieldValidationConfig {
        FieldValidationConfig::new()
            .field("email", ValidatorChain::new().then(Required::default()).then(Email))
            .field("password", ValidatorChain::new().then(Required::default()).then(Password))
    }

    fn login_form(email: &str, password: &str) -> FormValidation {
        FormValidation::new(
            [("email", email), ("password", password)],
            login_config(),
            ValidationOptions::default(),
        )
    }

    #[test]
    fn test_initial_state() {
        let form = login_form("", "");
        assert_eq!(form.value("email"), Some(FieldValue::from("")));
        assert!(form.errors().is_empty());
        assert!(form.is_valid());
        assert!(!form.is_validating());
    }

    #[test]
    fn test_validate_all_valid() {
        let form = login_form("test@example.com", "StrongPass123!");
        assert!(form.validate_all());
        assert_eq!(form.errors().get("email"), Some(&None));
        assert_eq!(form.errors().get("password"), Some(&None));
        assert!(form.is_valid());
    }

    #[test]
    fn test_validate_all_reports_each_field() {
        let form = login_form("invalid-email", "weak");
        assert!(!form.validate_all());
        assert_eq!(form.error("email").as_deref(), Some("Please enter a valid email address"));
        assert_eq!(
            form.error("password").as_deref(),
            Some("Password must be at least 8 characters long")
        );
        assert!(form.has_errors());
        assert!(!form.is_valid());
        assert!(!form.is_validating());
    }

    #[test]
    fn test_required_runs_first() {
        let form = FormValidation::new(
            [("password", "")],
            FieldValidationConfig::new()
                .field("password", ValidatorChain::new().then(Required::default()).then(Password)),
            ValidationOptions::default(),
        );
        assert!(!form.validate_all());
        assert_eq!(form.error("password").as_deref(), Some("This field is required"));
    }

    #[test]
    fn test_validate_all_skips_unbound_fields() {
        let form = FormValidation::new(
            [("email", "")],
            login_config(),
            ValidationOptions::default(),
        );
        assert!(!form.validate_all());
        assert!(form.is_validated("email"));
        assert!(!form.is_validated("password"));
    }

    #[test]
    fn test_validate_all_rebuilds_error_map() {
        let form = login_form("", "");
        form.clear_error("stale");
        assert!(form.is_validated("stale"));

        form.validate_all();
        assert!(!form.is_validated("stale"));
    }

    #[test]
    fn test_password_confirmation_in_form() {
        let config = FieldValidationConfig::new()
            .field("password", ValidatorChain::new().then(Required::default()).then(Password))
            .field(
                "confirmPassword",
                ValidatorChain::new()
                    .then(Required::default())
                    .then(PasswordConfirmation::new("MyPassword123!")),
            );

        let matching = FormValidation::new(
            [("password", "MyPassword123!"), ("confirmPassword", "MyPassword123!")],
            config.clone(),
            ValidationOptions::default(),
        );
        assert!(matching.validate_all());

        let mismatched = FormValidation::new(
            [("password", "MyPassword123!"), ("confirmPassword", "DifferentPassword123!")],
            config,
            ValidationOptions::default(),
        );
        assert!(!mismatched.validate_all());
        assert_eq!(mismatched.error("password"), None);
        assert_eq!(mismatched.error("confirmPassword").as_deref(), Some("Passwords do not match"));
    }

    #[test]
    fn test_validate_field_is_idempotent() {
        let form = login_form("", "");
        let value = FieldValue::from("nope");
        assert!(!form.validate_field("email", &value));
        let first = form.errors();
        assert!(!form.validate_field("email", &value));
        assert_eq!(form.errors(), first);
    }

    #[test]
    fn test_validate_field_short_circuits() {
        let config = FieldValidationConfig::new().field(
            "name",
            ValidatorChain::new()
                .then(|_: &FieldValue| ValidationResult::invalid("A"))
                .then(|_: &FieldValue| ValidationResult::invalid("B")),
        );
        let form = FormValidation::new([("name", "")], config, ValidationOptions::default());
        form.validate_field("name", &FieldValue::Null);
        assert_eq!(form.error("name").as_deref(), Some("A"));
    }

    #[test]
    fn test_unconfigured_field_is_always_valid() {
        let form = login_form("", "");
        assert!(form.validate_field("nickname", &FieldValue::Null));
        assert!(form.errors().is_empty());

        form.handle_field_blur("nonExistentField");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_blur_validates_current_value() {
        let form = login_form("", "");
        form.set_value("email", "test@example.com");
        form.handle_field_blur("email");
        assert_eq!(form.errors().get("email"), Some(&None));
        assert!(!form.is_validated("password"));
        assert!(form.is_valid());

        form.set_value("email", "invalid-email");
        form.handle_field_blur("email");
        assert!(!form.is_valid());
    }

    #[test]
    fn test_clear_error() {
        let form = login_form("", "");
        form.validate_all();
        assert!(form.error("email").is_some());

        form.clear_error("email");
        assert_eq!(form.errors().get("email"), Some(&None));
        // password still failing
        assert!(form.has_errors());
    }

    #[test]
    fn test_reset_restores_values_and_clears_errors() {
        let form = login_form("seed@example.com", "");
        form.set_value("email", "changed");
        form.set_value("nickname", "late");
        form.validate_all();
        assert!(form.has_errors());

        form.reset();
        assert_eq!(form.value("email"), Some(FieldValue::from("seed@example.com")));
        assert_eq!(form.value("nickname"), Some(FieldValue::from("")));
        assert!(form.errors().is_empty());
        assert!(form.is_valid());
    }

    #[test]
    fn test_missing_message_falls_back() {
        let config = FieldValidationConfig::new()
            .field("code", ValidatorChain::new().then(|_: &FieldValue| ValidationResult::Invalid(None)));
        let form = FormValidation::new([("code", "x")], config, ValidationOptions::default());
        form.validate_all();
        assert_eq!(form.error("code").as_deref(), Some(FALLBACK_MESSAGE));
    }

    #[test]
    fn test_set_value_without_runtime_validates_immediately() {
        let form = login_form("", "");
        form.set_value("email", "bad");
        assert_eq!(form.error("email").as_deref(), Some("Please enter a valid email address"));
    }

    fn counting_config(calls: &Arc<AtomicUsize>, seen: &Arc<Mutex<Vec<String>>>) -> FieldValidationConfig {
        let calls = Arc::clone(calls);
        let seen = Arc::clone(seen);
        FieldValidationConfig::new().field(
            "name",
            ValidatorChain::new().then(move |value: &FieldValue| {
                calls.fetch_add(1, Ordering::SeqCst);
                seen.lock().unwrap().push(value.to_string());
                validate_min_length(&value.text(), 3)
            }),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_collapses_rapid_changes() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let form = FormValidation::new(
            [("name", "")],
            counting_config(&calls, &seen),
            ValidationOptions::with_debounce(Duration::from_millis(100)),
        );

        form.set_value("name", "a");
        tokio::time::sleep(Duration::from_millis(20)).await;
        form.set_value("name", "ab");
        tokio::time::sleep(Duration::from_millis(20)).await;
        form.set_value("name", "abc");
        assert_eq!(form.pending_validations(), 1);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*seen.lock().unwrap(), vec!["abc".to_string()]);
        assert_eq!(form.errors().get("name"), Some(&None));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unchanged_value_does_not_schedule() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let form = FormValidation::new([("name", "abc")], counting_config(&calls, &seen), ValidationOptions::default());

        form.set_value("name", "abc");
        assert_eq!(form.pending_validations(), 0);

        form.set_value("other", "x");
        assert_eq!(form.pending_validations(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounced_failure_is_recorded() {
        let form = login_form("", "");
        form.set_value("email", "user@@domain");
        assert!(form.is_valid());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(form.error("email").as_deref(), Some("Please enter a valid email address"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_cancels_pending_validation() {
        let form = login_form("", "");
        form.set_value("email", "bad");
        form.set_value("password", "bad");
        assert_eq!(form.pending_validations(), 2);

        form.reset();
        assert_eq!(form.pending_validations(), 0);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(form.errors().is_empty());
        assert!(form.is_valid());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_validation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let form = FormValidation::new([("name", "")], counting_config(&calls, &seen), ValidationOptions::default());

        form.set_value("name", "abc");
        drop(form);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_pending_keeps_values() {
        let form = login_form("", "");
        form.set_value("email", "bad");
        assert_eq!(form.pending_validations(), 1);

        form.cancel_pending();
        assert_eq!(form.pending_validations(), 0);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(!form.is_validated("email"));
        assert_eq!(form.value("email"), Some(FieldValue::from("bad")));
    }

    /// Form whose "name" validator parks on its first "slow" run until
    /// released, then fails with "stale". Every other run passes. Returns the
    /// form, a receiver signalled when the validator has parked and a sender
    /// that releases it.
    fn parked_validation_form() -> (FormValidation, mpsc::Receiver<()>, mpsc::Sender<()>) {
        let (started_tx, started_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let release_rx = Mutex::new(release_rx);
        let parked = AtomicBool::new(false);

        let config = FieldValidationConfig::new().field(
            "name",
            ValidatorChain::new().then(move |value: &FieldValue| {
                if value.text() != "slow" || parked.swap(true, Ordering::SeqCst) {
                    return ValidationResult::Valid;
                }
                started_tx.send(()).unwrap();
                release_rx.lock().unwrap().recv().unwrap();
                ValidationResult::invalid("stale")
            }),
        );
        let form = FormValidation::new(
            [("name", "")],
            config,
            ValidationOptions::with_debounce(Duration::from_millis(10)),
        );
        (form, started_rx, release_tx)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_running_validation_does_not_write_after_reset() {
        let (form, started, release) = parked_validation_form();
        form.set_value("name", "slow");

        let handle = form.clone();
        tokio::task::spawn_blocking(move || {
            started.recv_timeout(Duration::from_secs(5)).unwrap();
            handle.reset();
            release.send(()).unwrap();
        })
        .await
        .unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(form.errors().is_empty(), "errors after reset: {:?}", form.errors());
        assert!(form.is_valid());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_running_validation_does_not_overwrite_validate_all() {
        let (form, started, release) = parked_validation_form();
        form.set_value("name", "slow");

        let handle = form.clone();
        tokio::task::spawn_blocking(move || {
            started.recv_timeout(Duration::from_secs(5)).unwrap();
            assert!(handle.validate_all());
            release.send(()).unwrap();
        })
        .await
        .unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(form.errors().get("name"), Some(&None));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_running_validation_does_not_overwrite_newer_value() {
        let (form, started, release) = parked_validation_form();
        form.set_value("name", "slow");

        let handle = form.clone();
        tokio::task::spawn_blocking(move || {
            started.recv_timeout(Duration::from_secs(5)).unwrap();
            handle.set_value("name", "fresh");
            // let the newer timer fire before the older run finishes
            std::thread::sleep(Duration::from_millis(100));
            release.send(()).unwrap();
        })
        .await
        .unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(form.errors().get("name"), Some(&None));
    }

    #[tokio::test]
    async fn test_events_follow_mutations() {
        let form = login_form("", "");
        let mut events = form.subscribe();

        form.validate_all();
        form.clear_error("email");
        form.reset();

        assert_eq!(events.recv().await.unwrap(), FormEvent::Validated { valid: false });
        assert_eq!(
            events.recv().await.unwrap(),
            FormEvent::ErrorCleared { field: "email".to_string() }
        );
        assert_eq!(events.recv().await.unwrap(), FormEvent::Reset);
    }
}
