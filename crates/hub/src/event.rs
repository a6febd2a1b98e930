//! Binary-semaphore event.
//!
//! An [`Event`] is a one-shot gate between tasks: one side calls
//! [`Event::signal`], the other blocks in [`Event::wait`] until it does. The
//! count is clamped to {0, 1}, so several signals before a wait collapse into
//! one, and a successful wait consumes the signal.
//!
//! ```
//! use hub::Event;
//!
//! let done = Event::new();
//! let worker = done.clone();
//! std::thread::spawn(move || worker.signal());
//! done.wait();
//! ```

use std::sync::Arc;

use crate::sync::Gate;
use crate::Timeout;

/// Binary semaphore; clones share the same semaphore.
#[derive(Clone)]
pub struct Event {
    inner: Arc<Gate<bool>>,
}

impl Event {
    /// Creates an unsignaled event.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Gate::new(false)),
        }
    }

    /// Sets the event. Signalling an already signaled event is a no-op.
    pub fn signal(&self) {
        let mut signaled = self.inner.lock();
        if !*signaled {
            *signaled = true;
            log::trace!("event signaled");
        }
        drop(signaled);
        self.inner.notify_one();
    }

    /// Blocks until signaled, consuming the signal.
    pub fn wait(&self) {
        self.wait_timeout(Timeout::Forever);
    }

    /// Blocks until signaled or `timeout` elapses.
    ///
    /// Returns `true` if the signal was consumed, `false` on timeout.
    pub fn wait_timeout(&self, timeout: impl Into<Timeout>) -> bool {
        let mut signaled = self.inner.lock();
        let consumed = self
            .inner
            .wait_while(&mut signaled, timeout.into(), |signaled| !*signaled);
        if consumed {
            *signaled = false;
        }
        consumed
    }

    /// Consumes a pending signal without blocking.
    pub fn try_wait(&self) -> bool {
        self.wait_timeout(Timeout::NoWait)
    }

    /// Advisory peek at the semaphore; may be stale on return.
    pub fn is_signaled(&self) -> bool {
        *self.inner.lock()
    }
}

impl Default for Event {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("signaled", &self.is_signaled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::{Duration, Instant};

    #[test]
    fn starts_unsignaled() {
        let event = Event::new();
        assert!(!event.is_signaled());
        assert!(!event.try_wait());
    }

    #[test]
    fn double_signal_collapses_into_one() {
        let event = Event::new();
        event.signal();
        event.signal();
        assert!(event.wait_timeout(Timeout::NoWait));
        assert!(!event.wait_timeout(Duration::from_millis(20)));
    }

    #[test]
    fn wait_consumes_the_signal() {
        let event = Event::new();
        event.signal();
        event.wait();
        assert!(!event.is_signaled());
    }

    #[test]
    fn wait_timeout_expires() {
        let event = Event::new();
        let start = Instant::now();
        assert!(!event.wait_timeout(Timeout::from_millis(30)));
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn signal_from_another_task_wakes_waiter() {
        let event = Event::new();
        let remote = event.clone();
        let signaller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            remote.signal();
        });
        assert!(event.wait_timeout(Duration::from_secs(5)));
        signaller.join().unwrap();
    }
}
