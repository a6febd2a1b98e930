//! Mutex-guarded value cell.
//!
//! A [`ValueMutex`] guards exactly one fixed-size value that some task
//! already owns. It borrows the value for its whole life and never copies,
//! allocates or frees it; [`ValueMutex::into_inner`] hands the borrow back.
//!
//! Access is exclusive: [`ValueMutex::acquire`] returns a [`ValueLease`] that
//! dereferences to the value, and the lock is released by passing the lease
//! back to [`ValueMutex::release`] (or by dropping it). A lease issued by a
//! different value mutex is refused and nothing is unlocked.

use core::fmt;
use core::ops::{Deref, DerefMut};

use thiserror::Error;

use crate::sync::{Mutex, MutexGuard};
use crate::Timeout;

/// Exclusive, scoped access to one borrowed value.
pub struct ValueMutex<'a, T: ?Sized> {
    value: Mutex<&'a mut T>,
    size: usize,
}

/// Proof of exclusive access handed out by [`ValueMutex::acquire`].
#[must_use = "dropping a lease releases the value mutex immediately"]
pub struct ValueLease<'m, 'a, T: ?Sized> {
    guard: MutexGuard<'m, &'a mut T>,
    owner: *const (),
}

/// A lease was returned to a value mutex that did not issue it.
///
/// The lease is carried back to the caller untouched; its own mutex stays
/// locked until it is released there.
#[derive(Error)]
#[error("lease was issued by a different value mutex")]
pub struct ReleaseError<'m, 'a, T: ?Sized> {
    lease: ValueLease<'m, 'a, T>,
}

impl<'m, 'a, T: ?Sized> ReleaseError<'m, 'a, T> {
    pub fn into_lease(self) -> ValueLease<'m, 'a, T> {
        self.lease
    }
}

impl<'m, 'a, T: ?Sized> fmt::Debug for ReleaseError<'m, 'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReleaseError").finish_non_exhaustive()
    }
}

impl<'a, T: ?Sized> ValueMutex<'a, T> {
    /// Wraps `value` without taking ownership of it.
    pub fn new(value: &'a mut T) -> Self {
        let size = core::mem::size_of_val(&*value);
        Self {
            value: Mutex::new(value),
            size,
        }
    }

    /// In-memory size of the guarded `T`, as `size_of_val` reports it.
    ///
    /// For byte containers such as `Vec<u8>` this is the size of the
    /// container itself; [`ValueMutex::byte_len`] gives the length that
    /// `read` and `write` work with.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Locks the value within `timeout`.
    ///
    /// `None` means the timeout expired; that is a normal outcome the caller
    /// is expected to handle.
    pub fn acquire(&self, timeout: impl Into<Timeout>) -> Option<ValueLease<'_, 'a, T>> {
        let guard = match timeout.into() {
            Timeout::NoWait => self.value.try_lock()?,
            Timeout::After(duration) => self.value.try_lock_for(duration)?,
            Timeout::Forever => self.value.lock(),
        };
        Some(ValueLease {
            guard,
            owner: self.id(),
        })
    }

    /// Unlocks the value, provided `lease` was issued by this mutex.
    pub fn release<'m, 'b>(
        &self,
        lease: ValueLease<'m, 'b, T>,
    ) -> Result<(), ReleaseError<'m, 'b, T>> {
        if lease.owner != self.id() {
            log::warn!("value mutex release refused: foreign lease");
            return Err(ReleaseError { lease });
        }
        drop(lease);
        Ok(())
    }

    /// Runs `f` with exclusive access. `None` on timeout.
    pub fn with<R>(&self, timeout: impl Into<Timeout>, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut lease = self.acquire(timeout)?;
        let result = f(&mut lease);
        self.release_own(lease);
        Some(result)
    }

    /// Advisory: whether some task currently holds the lock.
    pub fn is_locked(&self) -> bool {
        self.value.is_locked()
    }

    /// Gives the borrowed value back to its owner.
    pub fn into_inner(self) -> &'a mut T {
        self.value.into_inner()
    }

    fn id(&self) -> *const () {
        self as *const Self as *const ()
    }

    fn release_own(&self, lease: ValueLease<'_, 'a, T>) {
        let released = self.release(lease).is_ok();
        fault::check!(released, "value mutex refused its own lease");
    }
}

impl<'a, T: Clone> ValueMutex<'a, T> {
    /// Copies the value out. `None` on timeout.
    pub fn load(&self, timeout: impl Into<Timeout>) -> Option<T> {
        self.with(timeout, |value| value.clone())
    }

    /// Replaces the value. `false` on timeout.
    pub fn store(&self, new_value: T, timeout: impl Into<Timeout>) -> bool {
        self.with(timeout, move |value| *value = new_value).is_some()
    }
}

impl<'a, T: AsRef<[u8]> + AsMut<[u8]> + ?Sized> ValueMutex<'a, T> {
    /// Number of bytes `read` and `write` can reach. `None` on timeout.
    pub fn byte_len(&self, timeout: impl Into<Timeout>) -> Option<usize> {
        self.with(timeout, |value| AsRef::<[u8]>::as_ref(value).len())
    }

    /// Copies up to `len` bytes of the value into `dest`.
    ///
    /// `len == 0` copies all [`ValueMutex::byte_len`] bytes. Returns `false` on timeout. `dest`
    /// must be large enough for the bytes being copied.
    pub fn read(&self, dest: &mut [u8], len: usize, timeout: impl Into<Timeout>) -> bool {
        let Some(lease) = self.acquire(timeout) else {
            return false;
        };
        let src = AsRef::<[u8]>::as_ref(&*lease);
        let count = copy_len(len, src.len());
        fault::check!(
            dest.len() >= count,
            "value mutex read of {count} bytes into a {} byte buffer",
            dest.len()
        );
        dest[..count].copy_from_slice(&src[..count]);
        self.release_own(lease);
        true
    }

    /// Copies up to `len` bytes from `src` into the value.
    ///
    /// `len == 0` writes all [`ValueMutex::byte_len`] bytes. Returns `false` on timeout. `src`
    /// must hold the bytes being copied.
    pub fn write(&self, src: &[u8], len: usize, timeout: impl Into<Timeout>) -> bool {
        let Some(mut lease) = self.acquire(timeout) else {
            return false;
        };
        let dest = AsMut::<[u8]>::as_mut(&mut *lease);
        let count = copy_len(len, dest.len());
        fault::check!(
            src.len() >= count,
            "value mutex write of {count} bytes from a {} byte buffer",
            src.len()
        );
        dest[..count].copy_from_slice(&src[..count]);
        self.release_own(lease);
        true
    }
}

fn copy_len(requested: usize, size: usize) -> usize {
    if requested == 0 {
        size
    } else {
        requested.min(size)
    }
}

impl<'a, T: ?Sized> fmt::Debug for ValueMutex<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueMutex")
            .field("size", &self.size)
            .field("locked", &self.is_locked())
            .finish()
    }
}

impl<'m, 'a, T: ?Sized> Deref for ValueLease<'m, 'a, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &**self.guard
    }
}

impl<'m, 'a, T: ?Sized> DerefMut for ValueLease<'m, 'a, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut **self.guard
    }
}
