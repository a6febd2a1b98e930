//! # hub
//!
//! Inter-task coordination for firmware tasks sharing one address space.
//!
//! ## Module Overview
//! - [`registry`]    – Named record registry with blocking open.
//! - [`pubsub`]      – Ordered, synchronous publish/subscribe bus.
//! - [`value_mutex`] – Mutex guarding one borrowed value.
//! - [`event`]       – Binary-semaphore signal/wait gate.
//! - [`records`]     – Well-known record names.
//!
//! Suspension points ([`RecordsExt::open_timeout`], [`ValueMutex::acquire`],
//! [`Event::wait_timeout`]) take a [`Timeout`]. Running out of time is an
//! ordinary outcome reported through the return value. Contract violations
//! halt through the [`fault`] crate instead.
//!
//! ```
//! use hub::{records, PubSub, Records, RecordsExt, Registry};
//!
//! let registry = Registry::new();
//! let bus: &'static PubSub<u8> = Box::leak(Box::new(PubSub::new()));
//! registry.create(records::INPUT_EVENTS, bus);
//!
//! let input = registry.open::<PubSub<u8>>(records::INPUT_EVENTS);
//! let sub = input.subscribe(|key| println!("key {key}")).unwrap();
//! input.publish(&3);
//! input.unsubscribe(sub);
//! registry.close(records::INPUT_EVENTS);
//! assert!(registry.destroy(records::INPUT_EVENTS).is_ok());
//! ```

pub mod config;
pub mod event;
pub mod pubsub;
pub mod records;
pub mod registry;
pub mod sync;
pub mod timeout;
pub mod value_mutex;

pub use config::{RegistryConfig, RegistryConfigBuilder};
pub use event::Event;
pub use pubsub::{PubSub, PubSubError, Subscription};
pub use registry::{RecordError, RecordValue, Records, RecordsExt, Registry};
pub use timeout::Timeout;
pub use value_mutex::{ReleaseError, ValueLease, ValueMutex};
#[cfg(test)]
mod tests;
