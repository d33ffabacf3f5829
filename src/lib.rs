//! # `interlock` - Portable Interlocked Operations
//!
//! A small portability layer providing the same sequentially-consistent
//! atomic operations on every target, plus the address-to-text conversion
//! that some platforms lack.
//!
//! ## Interlocked Operations
//!
//! Add, increment, decrement and exchange on 32-bit words (and 64-bit words on
//! targets with 64-bit pointers), exchange and compare-exchange on pointer
//! slots. Every operation:
//! - is atomic with respect to every other interlocked operation on the same
//!   location;
//! - is a full barrier (`SeqCst`);
//! - completes in bounded time and cannot fail.
//!
//! Exactly one back-end is compiled in per target. Targets with the needed
//! atomics use them directly; others (or builds with the `lock-fallback`
//! feature) serialize every operation through one process-wide lock. Callers
//! cannot tell the difference except through [`concurrency::backend`].
//!
//! ## Address Formatting
//!
//! [`net::format_address`] renders a raw IPv4 or IPv6 address into a caller
//! buffer, returning `None` on failure.
//!
//! ## Feature Flags
//!
//! - `tracing`: debug events for the lock fallback and failed conversions.
//! - `lock-fallback`: force the global-lock back-end.
//!
//! `cargo run -p xtask -- test` runs the test suite under every feature
//! combination, so both back-ends are exercised on any host; add `--loom`
//! for the model-checked spin lock.
//!
//! ## Example
//!
//! ```rust
//! use interlock::{Interlocked, InterlockedPtr};
//! use std::thread;
//!
//! let hits = Interlocked::new(0i32);
//! thread::scope(|s| {
//!     for _ in 0..4 {
//!         s.spawn(|| {
//!             for _ in 0..1000 {
//!                 hits.increment();
//!             }
//!         });
//!     }
//! });
//! assert_eq!(hits.load(), 4000);
//!
//! let mut value = 5u8;
//! let target: *mut u8 = &mut value;
//! let slot = InterlockedPtr::null();
//! assert!(slot.compare_exchange(std::ptr::null_mut(), target).is_null());
//! assert_eq!(slot.load(), target);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod concurrency;
pub mod net;

pub use concurrency::interlocked::{backend, Backend, Interlocked, InterlockedPtr, Word};
pub use net::{format_address, AddressFamily, NtopError};

// Compile-time assertions for the layout promises made by the cells.
const _: () = {
    use core::mem;

    assert!(mem::size_of::<Interlocked<i32>>() == mem::size_of::<i32>());
    assert!(mem::align_of::<Interlocked<i32>>() == mem::align_of::<i32>());
    assert!(mem::size_of::<InterlockedPtr<u8>>() == mem::size_of::<*mut u8>());
    assert!(mem::align_of::<InterlockedPtr<u8>>() == mem::align_of::<*mut u8>());

    #[cfg(target_pointer_width = "64")]
    assert!(mem::align_of::<Interlocked<i64>>() == 8);
};
