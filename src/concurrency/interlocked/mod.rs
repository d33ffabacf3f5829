//! Sequentially-consistent interlocked operations.
//!
//! Every operation here is a full barrier and is atomic with respect to every
//! other interlocked operation on the same location, whichever back-end the
//! target compiles in:
//!
//! - **native**: the language atomics (`core::sync::atomic`), which lower to
//!   the target's own interlocked instructions or compiler built-ins;
//! - **global lock**: a single process-wide lock around a plain
//!   read-modify-write, for targets without the needed atomics or when the
//!   `lock-fallback` feature is enabled.
//!
//! The choice is made by the build script and is visible only through
//! [`backend()`]; results are identical either way.
//!
//! Locations can be used two ways:
//! - through the typed cells [`Interlocked`] and [`InterlockedPtr`], which are
//!   naturally aligned by construction and need no `unsafe`;
//! - through the raw functions ([`add`], [`exchange`], ...) on caller-owned
//!   memory. These check alignment and non-null with `debug_assert!`.
//!
//! ```rust
//! use interlock::concurrency::interlocked::{self, Interlocked};
//!
//! let hits = Interlocked::new(0i32);
//! assert_eq!(hits.increment(), 1);
//! assert_eq!(hits.add(41), 42);
//!
//! let mut raw = 10i32;
//! let prev = unsafe { interlocked::exchange(&mut raw, 20) };
//! assert_eq!((prev, raw), (10, 20));
//! ```

mod cell;

#[cfg(not(interlock_locked))]
mod native;
#[cfg(not(interlock_locked))]
use native as imp;

#[cfg(interlock_locked)]
mod locked;
#[cfg(interlock_locked)]
use locked as imp;


use core::fmt;
use core::mem::align_of;

pub use cell::{Interlocked, InterlockedPtr};

/// The mechanism compiled in for interlocked operations on this target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Hardware atomics through `core::sync::atomic`.
    Native,
    /// A single process-wide lock around each operation.
    GlobalLock,
}

impl Backend {
    /// Short human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Backend::Native => "native",
            Backend::GlobalLock => "global-lock",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the back-end compiled in for the current target.
#[inline]
pub const fn backend() -> Backend {
    imp::BACKEND
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for i32 {}
    #[cfg(target_pointer_width = "64")]
    impl Sealed for i64 {}
}

/// An integer width supported by the interlocked operations.
///
/// Implemented for `i32`, and for `i64` on targets with 64-bit pointers.
/// Arithmetic wraps on overflow. The hidden `raw_*` methods are the back-end
/// entry points; each one checks its location the same way the public
/// functions document.
pub trait Word:
    sealed::Sealed
    + num_traits::PrimInt
    + num_traits::Signed
    + fmt::Debug
    + Send
    + Sync
    + 'static
{
    #[doc(hidden)]
    unsafe fn raw_add(location: *mut Self, delta: Self) -> Self;

    #[doc(hidden)]
    unsafe fn raw_exchange(location: *mut Self, value: Self) -> Self;

    #[doc(hidden)]
    unsafe fn raw_load(location: *mut Self) -> Self;
}

#[inline(always)]
fn debug_check_location<T>(location: *const T) {
    debug_assert!(!location.is_null(), "interlocked operation on a null location");
    debug_assert!(
        (location as usize) & (align_of::<T>() - 1) == 0,
        "interlocked location {:p} is not aligned to {} bytes",
        location,
        align_of::<T>()
    );
}

/// Atomically adds `delta` to `*location` and returns the **new** value.
///
/// # Safety
/// `location` must be valid for reads and writes, naturally aligned, and only
/// accessed concurrently through interlocked operations.
#[inline]
pub unsafe fn add<W: Word>(location: *mut W, delta: W) -> W {
    W::raw_add(location, delta)
}

/// Atomically increments `*location` and returns the new value.
///
/// # Safety
/// Same contract as [`add`].
#[inline]
pub unsafe fn increment<W: Word>(location: *mut W) -> W {
    add(location, W::one())
}

/// Atomically decrements `*location` and returns the new value.
///
/// # Safety
/// Same contract as [`add`].
#[inline]
pub unsafe fn decrement<W: Word>(location: *mut W) -> W {
    add(location, -W::one())
}

/// Atomically stores `value` and returns the value held immediately before.
///
/// # Safety
/// Same contract as [`add`].
#[inline]
pub unsafe fn exchange<W: Word>(location: *mut W, value: W) -> W {
    W::raw_exchange(location, value)
}

/// Reads `*location` with the same ordering as the other operations.
///
/// # Safety
/// Same contract as [`add`].
#[inline]
pub unsafe fn load<W: Word>(location: *mut W) -> W {
    W::raw_load(location)
}

/// Atomically stores `value` into the pointer slot and returns the previous
/// pointer.
///
/// # Safety
/// `slot` must be valid for reads and writes, pointer-aligned, and only
/// accessed concurrently through interlocked operations.
#[inline]
pub unsafe fn exchange_pointer<T>(slot: *mut *mut T, value: *mut T) -> *mut T {
    debug_check_location(slot);
    imp::exchange_pointer(slot, value)
}

/// Stores `new` into the slot if it currently holds `expected`.
///
/// Always returns the pointer the slot held at the moment of comparison; the
/// exchange happened iff that equals `expected`.
///
/// # Safety
/// Same contract as [`exchange_pointer`].
#[inline]
pub unsafe fn compare_exchange_pointer<T>(
    slot: *mut *mut T,
    expected: *mut T,
    new: *mut T,
) -> *mut T {
    debug_check_location(slot);
    imp::compare_exchange_pointer(slot, expected, new)
}

/// Reads the pointer slot with the same ordering as the other operations.
///
/// # Safety
/// Same contract as [`exchange_pointer`].
#[inline]
pub unsafe fn load_pointer<T>(slot: *mut *mut T) -> *mut T {
    debug_check_location(slot);
    imp::load_pointer(slot)
}
