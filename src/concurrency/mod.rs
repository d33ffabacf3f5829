//! Concurrency primitives.
//!
//! [`interlocked`] is the public facility; `sync` holds the raw locks its
//! global-lock back-end is built from.

pub mod interlocked;
pub(crate) mod sync;

pub use interlocked::{backend, Backend, Interlocked, InterlockedPtr, Word};
