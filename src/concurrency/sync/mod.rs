//! Raw locks backing the locked interlocked back-end.
//!
//! Both locks guard no data of their own: they only serialize the single
//! read-modify-write passed to [`ScopedLock::with_lock`]. The lock is taken
//! on entry and released on exit, so it can never span two operations.
//!
//! The spin lock needs a byte-wide atomic swap; targets without one get only
//! the mutex lock. Under `cfg(loom)` the spin lock's atomics come from loom so
//! the lock can be model checked.

#[cfg(any(loom, target_has_atomic = "8"))]
mod spin_lock;
#[cfg(any(test, not(target_has_atomic = "8")))]
mod mutex_lock;


#[cfg(any(loom, target_has_atomic = "8"))]
#[cfg_attr(not(any(test, loom, interlock_locked)), allow(unused_imports))]
pub(crate) use spin_lock::RawSpinLock;
#[cfg(any(test, not(target_has_atomic = "8")))]
pub(crate) use mutex_lock::MutexLock;

#[cfg(loom)]
pub(crate) use loom::sync::atomic::{AtomicBool, Ordering};
#[cfg(all(not(loom), target_has_atomic = "8"))]
pub(crate) use core::sync::atomic::{AtomicBool, Ordering};

/// A lock that is held exactly for the duration of one closure.
pub(crate) trait ScopedLock {
    /// Short name used in diagnostics.
    const KIND: &'static str;

    /// Runs `f` with the lock held and releases it afterwards, even if `f`
    /// unwinds.
    fn with_lock<R>(&self, f: impl FnOnce() -> R) -> R;
}

/// Pause inside a contended spin loop.
#[cfg(any(loom, target_has_atomic = "8"))]
#[inline]
pub(crate) fn spin(backoff: &crossbeam_utils::Backoff) {
    #[cfg(loom)]
    {
        let _ = backoff;
        loom::thread::yield_now();
    }
    #[cfg(not(loom))]
    backoff.snooze();
}
