//! Locking building blocks.
//!
//! Every primitive in this crate is a `parking_lot` mutex, optionally paired
//! with a condition variable. Poisoning does not exist here: a task that
//! faults while holding a lock halts the system anyway.

use parking_lot::Condvar;

use crate::Timeout;

pub use parking_lot::{Mutex, MutexGuard};

/// Mutex-protected state with a condition variable signalled on change.
pub(crate) struct Gate<T> {
    state: Mutex<T>,
    changed: Condvar,
}

impl<T> Gate<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            state: Mutex::new(value),
            changed: Condvar::new(),
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, T> {
        self.state.lock()
    }

    pub(crate) fn notify_one(&self) {
        self.changed.notify_one();
    }

    pub(crate) fn notify_all(&self) {
        self.changed.notify_all();
    }

    /// Suspends while `pending` holds, at most for `timeout`.
    ///
    /// The lock is released while suspended and re-acquired before `pending`
    /// is evaluated again. Returns `true` when `pending` turned false, which
    /// is checked once more when the timeout expires.
    pub(crate) fn wait_while<F>(
        &self,
        guard: &mut MutexGuard<'_, T>,
        timeout: Timeout,
        mut pending: F,
    ) -> bool
    where
        F: FnMut(&mut T) -> bool,
    {
        match timeout {
            Timeout::NoWait => !pending(&mut **guard),
            Timeout::After(duration) => {
                let result = self.changed.wait_while_for(guard, &mut pending, duration);
                !result.timed_out() || !pending(&mut **guard)
            }
            Timeout::Forever => {
                self.changed.wait_while(guard, pending);
                true
            }
        }
    }
}
