//! Lock helpers
//!
//! Listeners run outside every lock and panics are caught at the dispatch
//! boundary, so a poisoned mutex only means some earlier caller panicked while
//! holding it. The guarded data is still structurally valid, so we keep going.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering the guard from a poisoned lock
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
