pub mod authentication;
pub mod form;
pub mod validation;

pub use authentication::*;
pub use form::*;
pub use validation::*;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks a mutex, recovering the guard if a previous holder panicked.
/// Validators never run while these locks are held, so the data stays
/// consistent.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
