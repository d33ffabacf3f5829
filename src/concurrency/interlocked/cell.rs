use core::cell::UnsafeCell;
use core::fmt;
use core::ptr;

use super::Word;

/// An integer location that is only ever touched through interlocked
/// operations.
///
/// `#[repr(transparent)]` over the plain integer, so it has the integer's
/// natural alignment and can be shared with code using the raw functions
/// through [`as_ptr`](Self::as_ptr).
#[repr(transparent)]
pub struct Interlocked<W: Word> {
    value: UnsafeCell<W>,
}

// SAFETY: all shared access goes through interlocked operations.
unsafe impl<W: Word> Sync for Interlocked<W> {}

impl<W: Word> Interlocked<W> {
    /// Creates a new location holding `value`.
    #[inline(always)]
    pub const fn new(value: W) -> Self {
        Self {
            value: UnsafeCell::new(value),
        }
    }

    /// Adds `delta` and returns the new value.
    #[inline(always)]
    pub fn add(&self, delta: W) -> W {
        // SAFETY: the cell is aligned by construction and only accessed atomically.
        unsafe { super::add(self.as_ptr(), delta) }
    }

    /// Adds one and returns the new value.
    #[inline(always)]
    pub fn increment(&self) -> W {
        unsafe { super::increment(self.as_ptr()) }
    }

    /// Subtracts one and returns the new value.
    #[inline(always)]
    pub fn decrement(&self) -> W {
        unsafe { super::decrement(self.as_ptr()) }
    }

    /// Stores `value` and returns the previous value.
    #[inline(always)]
    pub fn exchange(&self, value: W) -> W {
        unsafe { super::exchange(self.as_ptr(), value) }
    }

    /// Reads the current value.
    #[inline(always)]
    pub fn load(&self) -> W {
        unsafe { super::load(self.as_ptr()) }
    }

    /// Returns a mutable reference to the value; no other thread can observe it.
    #[inline]
    pub fn get_mut(&mut self) -> &mut W {
        self.value.get_mut()
    }

    /// Consumes the cell and returns the value.
    #[inline]
    pub fn into_inner(self) -> W {
        self.value.into_inner()
    }

    /// Raw pointer to the location, for use with the free functions.
    #[inline(always)]
    pub const fn as_ptr(&self) -> *mut W {
        self.value.get()
    }
}

impl<W: Word> Default for Interlocked<W> {
    fn default() -> Self {
        Self::new(W::zero())
    }
}

impl<W: Word> From<W> for Interlocked<W> {
    fn from(value: W) -> Self {
        Self::new(value)
    }
}

impl<W: Word> fmt::Debug for Interlocked<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Interlocked").field(&self.load()).finish()
    }
}

/// A pointer slot that is only ever touched through interlocked operations.
#[repr(transparent)]
pub struct InterlockedPtr<T> {
    slot: UnsafeCell<*mut T>,
}

// SAFETY: same reasoning as `AtomicPtr`: the slot holds an address, never a `T`.
unsafe impl<T> Send for InterlockedPtr<T> {}
unsafe impl<T> Sync for InterlockedPtr<T> {}

impl<T> InterlockedPtr<T> {
    /// Creates a new slot holding `ptr`.
    #[inline(always)]
    pub const fn new(ptr: *mut T) -> Self {
        Self {
            slot: UnsafeCell::new(ptr),
        }
    }

    /// Creates a slot holding the null pointer.
    #[inline(always)]
    pub const fn null() -> Self {
        Self::new(ptr::null_mut())
    }

    /// Stores `value` and returns the previous pointer.
    #[inline(always)]
    pub fn exchange(&self, value: *mut T) -> *mut T {
        // SAFETY: the slot is aligned by construction and only accessed atomically.
        unsafe { super::exchange_pointer(self.as_ptr(), value) }
    }

    /// Stores `new` if the slot holds `expected`; returns the pointer observed
    /// at the comparison.
    ///
    /// The exchange took place iff the returned pointer equals `expected`.
    #[inline(always)]
    pub fn compare_exchange(&self, expected: *mut T, new: *mut T) -> *mut T {
        unsafe { super::compare_exchange_pointer(self.as_ptr(), expected, new) }
    }

    /// Reads the current pointer.
    #[inline(always)]
    pub fn load(&self) -> *mut T {
        unsafe { super::load_pointer(self.as_ptr()) }
    }

    /// Returns a mutable reference to the pointer.
    #[inline]
    pub fn get_mut(&mut self) -> &mut *mut T {
        self.slot.get_mut()
    }

    /// Consumes the slot and returns the pointer.
    #[inline]
    pub fn into_inner(self) -> *mut T {
        self.slot.into_inner()
    }

    /// Raw pointer to the slot, for use with the free functions.
    #[inline(always)]
    pub const fn as_ptr(&self) -> *mut *mut T {
        self.slot.get()
    }
}

impl<T> Default for InterlockedPtr<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> fmt::Debug for InterlockedPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InterlockedPtr").field(&self.load()).finish()
    }
}
