//! Scripted input service.
//!
//! Owns the `input_events` record: a bus of key presses that applications
//! open and subscribe to.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use hub::{records, PubSub, Records, RecordsExt, Registry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Ok,
    Back,
}

pub type InputBus = PubSub<Key>;

const KEY_INTERVAL: Duration = Duration::from_millis(120);
const POLL: Duration = Duration::from_millis(10);

/// Registers the input bus, plays `script` once someone listens, then
/// tears the record down as soon as every client has closed it.
pub fn run(registry: Arc<Registry>, script: Vec<Key>) {
    let bus: &'static InputBus = Box::leak(Box::new(PubSub::new()));
    registry.create(records::INPUT_EVENTS, bus);

    while bus.subscriber_count() == 0 {
        thread::sleep(POLL);
    }

    for key in script {
        thread::sleep(KEY_INTERVAL);
        log::debug!("input: {key:?}");
        bus.publish(&key);
    }

    while registry.open_count(records::INPUT_EVENTS) != Some(0) {
        thread::sleep(POLL);
    }
    match registry.destroy(records::INPUT_EVENTS) {
        Ok(()) => log::info!("input service stopped"),
        Err(err) => log::error!("input: {err}"),
    }
}
