#![cfg_attr(not(any(interlock_locked, loom)), allow(dead_code))]

use super::{spin, AtomicBool, Ordering, ScopedLock};
use crossbeam_utils::Backoff;

/// A test-and-set spin lock.
///
/// Critical sections under this lock are a single load and store, so waiters
/// spin (with [`Backoff`]) instead of parking. Not re-entrant.
pub(crate) struct RawSpinLock {
    locked: AtomicBool,
}

impl RawSpinLock {
    /// Creates an unlocked spin lock.
    #[cfg(not(loom))]
    pub(crate) const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    /// Creates an unlocked spin lock.
    #[cfg(loom)]
    pub(crate) fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    #[inline]
    pub(crate) fn lock(&self) {
        if self
            .locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
        {
            return;
        }
        self.lock_slow();
    }

    #[cold]
    fn lock_slow(&self) {
        let backoff = Backoff::new();
        loop {
            // Wait on a plain load so contended waiters don't bounce the line.
            while self.locked.load(Ordering::Relaxed) {
                spin(&backoff);
            }
            if !self.locked.swap(true, Ordering::Acquire) {
                return;
            }
        }
    }

    /// Attempts to take the lock without waiting.
    #[cfg_attr(not(test), allow(dead_code))]
    #[inline]
    pub(crate) fn try_lock(&self) -> bool {
        !self.locked.swap(true, Ordering::Acquire)
    }

    /// Releases the lock.
    ///
    /// # Safety
    /// The caller must hold the lock.
    #[inline]
    pub(crate) unsafe fn unlock(&self) {
        self.locked.store(false, Ordering::Release);
    }

    /// Checks whether the lock is currently held.
    #[cfg_attr(not(test), allow(dead_code))]
    #[inline]
    pub(crate) fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }
}

/// Releases the spin lock on drop.
struct SpinGuard<'a> {
    lock: &'a RawSpinLock,
}

impl Drop for SpinGuard<'_> {
    #[inline]
    fn drop(&mut self) {
        // SAFETY: a guard only exists while its lock is held.
        unsafe { self.lock.unlock() }
    }
}

impl ScopedLock for RawSpinLock {
    const KIND: &'static str = "spin";

    #[inline]
    fn with_lock<R>(&self, f: impl FnOnce() -> R) -> R {
        self.lock();
        let _guard = SpinGuard { lock: self };
        f()
    }
}
