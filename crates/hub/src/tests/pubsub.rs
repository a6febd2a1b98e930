use std::sync::{Arc, Mutex};

use crate::pubsub::{PubSub, PubSubError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Up,
    Ok,
    Back,
}

fn recorder() -> (Arc<Mutex<Vec<(usize, Key)>>>, impl Fn(usize) -> Box<dyn FnMut(&Key) + Send>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    let make = move |tag: usize| -> Box<dyn FnMut(&Key) + Send> {
        let sink = sink.clone();
        Box::new(move |key: &Key| sink.lock().unwrap().push((tag, *key)))
    };
    (log, make)
}

#[test]
fn publish_reaches_subscribers_in_subscription_order() {
    let bus = PubSub::<Key>::new();
    let (log, make) = recorder();

    let first = bus.subscribe(make(1)).unwrap();
    let second = bus.subscribe(make(2)).unwrap();
    assert_eq!(bus.subscriber_count(), 2);

    bus.publish(&Key::Up);
    bus.publish(&Key::Ok);

    assert_eq!(
        *log.lock().unwrap(),
        vec![(1, Key::Up), (2, Key::Up), (1, Key::Ok), (2, Key::Ok)]
    );

    bus.unsubscribe(first);
    bus.unsubscribe(second);
}

#[test]
fn unsubscribed_callback_no_longer_fires() {
    let bus = PubSub::<Key>::new();
    let (log, make) = recorder();

    let first = bus.subscribe(make(1)).unwrap();
    let second = bus.subscribe(make(2)).unwrap();
    bus.unsubscribe(first);
    bus.publish(&Key::Back);

    assert_eq!(*log.lock().unwrap(), vec![(2, Key::Back)]);
    bus.unsubscribe(second);
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn publish_without_subscribers_is_a_no_op() {
    let bus = PubSub::<str>::new();
    bus.publish("nobody listens");
}

#[test]
fn bounded_bus_reports_exhaustion() {
    let bus = PubSub::<Key>::bounded(1);
    assert_eq!(bus.capacity(), Some(1));

    let only = bus.subscribe(|_| {}).unwrap();
    assert_eq!(
        bus.subscribe(|_| {}).unwrap_err(),
        PubSubError::Exhausted { capacity: 1 }
    );
    assert_eq!(bus.subscriber_count(), 1);

    bus.unsubscribe(only);
    let again = bus.subscribe(|_| {}).unwrap();
    bus.unsubscribe(again);
}

#[test]
#[should_panic(expected = "passed to pubsub#")]
fn foreign_subscription_is_a_fault() {
    let a = PubSub::<Key>::new();
    let b = PubSub::<Key>::new();
    let sub = a.subscribe(|_| {}).unwrap();
    b.unsubscribe(sub);
}

#[test]
#[should_panic(expected = "publish from inside its own callback")]
fn publishing_from_a_callback_is_a_fault() {
    let bus: &'static PubSub<Key> = Box::leak(Box::new(PubSub::new()));
    let _sub = bus
        .subscribe(move |key| {
            if *key == Key::Up {
                bus.publish(&Key::Ok);
            }
        })
        .unwrap();
    bus.publish(&Key::Up);
}

#[test]
#[should_panic(expected = "dropped with 1 live subscriber(s)")]
fn dropping_a_bus_with_subscribers_is_a_fault() {
    let bus = PubSub::<Key>::new();
    let _sub = bus.subscribe(|_| {}).unwrap();
    drop(bus);
}
