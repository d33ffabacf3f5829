use std::sync::{Mutex, PoisonError};
#[cfg(test)]
use std::sync::TryLockError;

use super::ScopedLock;

/// A blocking lock for targets that cannot perform an atomic swap.
///
/// The closure run under the lock never panics in practice (it is one load and
/// one store), so a poisoned mutex is simply recovered.
pub(crate) struct MutexLock {
    inner: Mutex<()>,
}

impl MutexLock {
    /// Creates an unlocked mutex lock.
    pub(crate) const fn new() -> Self {
        Self {
            inner: Mutex::new(()),
        }
    }

    /// Checks whether another holder has the lock. A poisoned but free mutex
    /// counts as unlocked.
    #[cfg(test)]
    pub(crate) fn is_locked(&self) -> bool {
        matches!(self.inner.try_lock(), Err(TryLockError::WouldBlock))
    }
}

impl ScopedLock for MutexLock {
    const KIND: &'static str = "mutex";

    #[inline]
    fn with_lock<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }
}
