//! Synchronous publish/subscribe bus.
//!
//! A [`PubSub`] keeps an ordered list of callbacks. [`PubSub::publish`] calls
//! each of them in subscription order on the publisher's thread and returns
//! once the last one has returned. The list lock is held for the whole
//! fan-out, so a concurrent [`PubSub::unsubscribe`] waits for an in-flight
//! publish to finish and the removed callback never fires after it returns.
//!
//! Touching the same bus (subscribe, unsubscribe or publish) from inside one
//! of its own callbacks would deadlock; it is detected and raised as a fault.

use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, ThreadId};

use thiserror::Error;

use crate::sync::Mutex;

static NEXT_BUS_ID: AtomicUsize = AtomicUsize::new(1);

type Callback<T> = Box<dyn FnMut(&T) + Send>;

/// Subscribing failed; the bus is unchanged.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PubSubError {
    #[error("subscriber limit of {capacity} reached")]
    Exhausted { capacity: usize },
    #[error("out of memory for a new subscriber")]
    OutOfMemory,
}

/// Handle returned by [`PubSub::subscribe`]; pass it back to unsubscribe.
#[must_use = "a subscription that is dropped can never be unsubscribed"]
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    bus: usize,
    id: u64,
}

struct Subscriber<T: ?Sized> {
    id: u64,
    callback: Callback<T>,
}

struct State<T: ?Sized> {
    subscribers: Vec<Subscriber<T>>,
    next_id: u64,
}

/// Ordered, synchronous notification bus carrying `&T`.
pub struct PubSub<T: ?Sized> {
    id: usize,
    capacity: Option<usize>,
    state: Mutex<State<T>>,
    dispatching: Mutex<Option<ThreadId>>,
}

impl<T: ?Sized> PubSub<T> {
    /// Creates an empty bus with no subscriber limit.
    pub fn new() -> Self {
        Self::with_capacity(None)
    }

    /// Creates an empty bus accepting at most `capacity` subscribers.
    pub fn bounded(capacity: usize) -> Self {
        Self::with_capacity(Some(capacity))
    }

    fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            id: NEXT_BUS_ID.fetch_add(1, Ordering::Relaxed),
            capacity,
            state: Mutex::new(State {
                subscribers: Vec::with_capacity(capacity.unwrap_or(0)),
                next_id: 0,
            }),
            dispatching: Mutex::new(None),
        }
    }

    /// Appends `callback` to the subscriber list.
    ///
    /// The closure carries whatever context it needs. It is called with every
    /// value published after this returns.
    #[track_caller]
    pub fn subscribe<F>(&self, callback: F) -> Result<Subscription, PubSubError>
    where
        F: FnMut(&T) + Send + 'static,
    {
        self.check_not_dispatching("subscribe");
        let mut state = self.state.lock();
        if let Some(capacity) = self.capacity {
            if state.subscribers.len() >= capacity {
                return Err(PubSubError::Exhausted { capacity });
            }
        }
        state
            .subscribers
            .try_reserve(1)
            .map_err(|_| PubSubError::OutOfMemory)?;

        let id = state.next_id;
        state.next_id += 1;
        state.subscribers.push(Subscriber {
            id,
            callback: Box::new(callback),
        });
        log::debug!("pubsub#{}: subscriber {id} added", self.id);
        Ok(Subscription { bus: self.id, id })
    }

    /// Removes a subscriber.
    ///
    /// Waits for an in-flight publish on another task to complete. A handle
    /// from a different bus, or one already removed, is a contract violation.
    #[track_caller]
    pub fn unsubscribe(&self, subscription: Subscription) {
        fault::check!(
            subscription.bus == self.id,
            "subscription of pubsub#{} passed to pubsub#{}",
            subscription.bus,
            self.id
        );
        self.check_not_dispatching("unsubscribe");
        let mut state = self.state.lock();
        let position = state
            .subscribers
            .iter()
            .position(|subscriber| subscriber.id == subscription.id);
        let Some(position) = position else {
            fault::crash!("pubsub#{}: unknown subscriber {}", self.id, subscription.id)
        };
        state.subscribers.remove(position);
        log::debug!("pubsub#{}: subscriber {} removed", self.id, subscription.id);
    }

    /// Delivers `value` to every subscriber, in subscription order.
    #[track_caller]
    pub fn publish(&self, value: &T) {
        self.check_not_dispatching("publish");
        let mut state = self.state.lock();
        *self.dispatching.lock() = Some(thread::current().id());
        let _dispatch = DispatchGuard(&self.dispatching);

        log::trace!(
            "pubsub#{}: publish to {} subscriber(s)",
            self.id,
            state.subscribers.len()
        );
        for subscriber in state.subscribers.iter_mut() {
            (subscriber.callback)(value);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.lock().subscribers.len()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    #[track_caller]
    fn check_not_dispatching(&self, operation: &str) {
        let dispatcher = *self.dispatching.lock();
        fault::check!(
            dispatcher != Some(thread::current().id()),
            "pubsub#{}: {operation} from inside its own callback",
            self.id
        );
    }
}

impl<T: ?Sized> Default for PubSub<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Drop for PubSub<T> {
    fn drop(&mut self) {
        if thread::panicking() {
            return;
        }
        let remaining = self.state.get_mut().subscribers.len();
        fault::check!(
            remaining == 0,
            "pubsub#{} dropped with {remaining} live subscriber(s)",
            self.id
        );
    }
}

impl<T: ?Sized> fmt::Debug for PubSub<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PubSub")
            .field("id", &self.id)
            .field("capacity", &self.capacity)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Clears the dispatching marker, also when a callback faults.
struct DispatchGuard<'a>(&'a Mutex<Option<ThreadId>>);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        *self.0.lock() = None;
    }
}
