//! Global-lock back-end: one process-wide lock serializes every operation.
//!
//! The lock is a `static`, initialized at compile time and never reset. It is
//! taken for exactly one read-modify-write and released before returning, and
//! SeqCst fences on both sides make each operation a full barrier.

use core::sync::atomic::{fence, Ordering::SeqCst};

#[cfg(not(target_has_atomic = "8"))]
use crate::concurrency::sync::MutexLock as GlobalLock;
#[cfg(target_has_atomic = "8")]
use crate::concurrency::sync::RawSpinLock as GlobalLock;
use crate::concurrency::sync::ScopedLock;

use super::{debug_check_location, Backend, Word};

#[cfg(loom)]
compile_error!("loom models need the native back-end; build without `lock-fallback`");

pub(super) const BACKEND: Backend = Backend::GlobalLock;

static GLOBAL_LOCK: GlobalLock = GlobalLock::new();

#[inline]
fn serialized<R>(f: impl FnOnce() -> R) -> R {
    #[cfg(feature = "tracing")]
    announce();

    GLOBAL_LOCK.with_lock(|| {
        fence(SeqCst);
        let result = f();
        fence(SeqCst);
        result
    })
}

#[cfg(feature = "tracing")]
#[cold]
fn announce() {
    static ANNOUNCED: std::sync::Once = std::sync::Once::new();
    ANNOUNCED.call_once(|| {
        tracing::debug!(
            lock = <GlobalLock as ScopedLock>::KIND,
            "interlocked operations are serialized through a process-wide lock"
        );
    });
}

macro_rules! locked_word {
    ($word:ty) => {
        impl Word for $word {
            #[inline]
            unsafe fn raw_add(location: *mut Self, delta: Self) -> Self {
                debug_check_location(location);
                serialized(|| {
                    let updated = location.read().wrapping_add(delta);
                    location.write(updated);
                    updated
                })
            }

            #[inline]
            unsafe fn raw_exchange(location: *mut Self, value: Self) -> Self {
                debug_check_location(location);
                serialized(|| location.replace(value))
            }

            #[inline]
            unsafe fn raw_load(location: *mut Self) -> Self {
                debug_check_location(location);
                serialized(|| location.read())
            }
        }
    };
}

locked_word!(i32);
#[cfg(target_pointer_width = "64")]
locked_word!(i64);

#[inline]
pub(super) unsafe fn exchange_pointer<T>(slot: *mut *mut T, value: *mut T) -> *mut T {
    serialized(|| slot.replace(value))
}

#[inline]
pub(super) unsafe fn compare_exchange_pointer<T>(
    slot: *mut *mut T,
    expected: *mut T,
    new: *mut T,
) -> *mut T {
    serialized(|| {
        let previous = slot.read();
        if previous == expected {
            slot.write(new);
        }
        previous
    })
}

#[inline]
pub(super) unsafe fn load_pointer<T>(slot: *mut *mut T) -> *mut T {
    serialized(|| slot.read())
}
