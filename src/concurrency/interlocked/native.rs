//! Native back-end: every operation is one `SeqCst` atomic instruction.

use core::mem::align_of;
#[cfg(target_pointer_width = "64")]
use core::sync::atomic::AtomicI64;
use core::sync::atomic::{AtomicI32, AtomicPtr, Ordering::SeqCst};

use super::{debug_check_location, Backend, Word};

pub(super) const BACKEND: Backend = Backend::Native;

// `from_ptr` needs the plain integer to be as aligned as its atomic twin.
const _: () = {
    assert!(align_of::<i32>() == align_of::<AtomicI32>());
    #[cfg(target_pointer_width = "64")]
    assert!(align_of::<i64>() == align_of::<AtomicI64>());
    assert!(align_of::<*mut u8>() == align_of::<AtomicPtr<u8>>());
};

macro_rules! native_word {
    ($word:ty, $atomic:ty) => {
        impl Word for $word {
            #[inline(always)]
            unsafe fn raw_add(location: *mut Self, delta: Self) -> Self {
                debug_check_location(location);
                <$atomic>::from_ptr(location)
                    .fetch_add(delta, SeqCst)
                    .wrapping_add(delta)
            }

            #[inline(always)]
            unsafe fn raw_exchange(location: *mut Self, value: Self) -> Self {
                debug_check_location(location);
                <$atomic>::from_ptr(location).swap(value, SeqCst)
            }

            #[inline(always)]
            unsafe fn raw_load(location: *mut Self) -> Self {
                debug_check_location(location);
                <$atomic>::from_ptr(location).load(SeqCst)
            }
        }
    };
}

native_word!(i32, AtomicI32);
#[cfg(target_pointer_width = "64")]
native_word!(i64, AtomicI64);

#[inline(always)]
pub(super) unsafe fn exchange_pointer<T>(slot: *mut *mut T, value: *mut T) -> *mut T {
    AtomicPtr::from_ptr(slot).swap(value, SeqCst)
}

#[inline(always)]
pub(super) unsafe fn compare_exchange_pointer<T>(
    slot: *mut *mut T,
    expected: *mut T,
    new: *mut T,
) -> *mut T {
    match AtomicPtr::from_ptr(slot).compare_exchange(expected, new, SeqCst, SeqCst) {
        Ok(previous) | Err(previous) => previous,
    }
}

#[inline(always)]
pub(super) unsafe fn load_pointer<T>(slot: *mut *mut T) -> *mut T {
    AtomicPtr::from_ptr(slot).load(SeqCst)
}
