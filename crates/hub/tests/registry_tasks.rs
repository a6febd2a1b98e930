//! Registry shared between a service task and its clients.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use hub::{records, Event, PubSub, Records, RecordsExt, Registry, Timeout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Left,
    Right,
}

#[test]
fn clients_started_before_the_service_receive_its_events() {
    let registry = Arc::new(Registry::new());
    let got_key = Event::new();

    let client = {
        let registry = registry.clone();
        let got_key = got_key.clone();
        thread::spawn(move || {
            let input = registry.open::<PubSub<Key>>(records::INPUT_EVENTS);
            let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
            let sink = seen.clone();
            let signal = got_key.clone();
            let sub = input
                .subscribe(move |key: &Key| {
                    sink.lock().unwrap().push(*key);
                    signal.signal();
                })
                .unwrap();
            registry.close(records::INPUT_EVENTS);
            (sub, seen)
        })
    };

    thread::sleep(Duration::from_millis(10));
    let bus: &'static PubSub<Key> = Box::leak(Box::new(PubSub::new()));
    registry.create(records::INPUT_EVENTS, bus);

    let (sub, seen) = client.join().unwrap();
    bus.publish(&Key::Left);
    bus.publish(&Key::Right);
    assert!(got_key.wait_timeout(Duration::from_secs(1)));
    assert_eq!(*seen.lock().unwrap(), vec![Key::Left, Key::Right]);

    bus.unsubscribe(sub);
    assert_eq!(registry.open_count(records::INPUT_EVENTS), Some(0));
    assert!(registry.destroy(records::INPUT_EVENTS).is_ok());
}

#[test]
fn many_openers_wake_on_one_create() {
    static CLI_READY: u32 = 0xC11;
    let registry = Registry::new();

    thread::scope(|scope| {
        let openers: Vec<_> = (0..5)
            .map(|_| {
                scope.spawn(|| {
                    registry
                        .open_timeout::<u32>(records::CLI, Duration::from_secs(5))
                        .copied()
                })
            })
            .collect();

        thread::sleep(Duration::from_millis(10));
        registry.create(records::CLI, &CLI_READY);
        for opener in openers {
            assert_eq!(opener.join().unwrap(), Some(0xC11));
        }
    });

    assert_eq!(registry.open_count(records::CLI), Some(5));
    assert!(registry.destroy(records::CLI).is_err());
    for _ in 0..5 {
        registry.close(records::CLI);
    }
    assert!(registry.destroy(records::CLI).is_ok());
    assert!(!registry.exists(records::CLI));
    assert!(registry.open_timeout::<u32>(records::CLI, Timeout::NoWait).is_none());
}

#[test]
fn service_destroys_once_after_the_last_client_closes() {
    let bus: &'static PubSub<Key> = Box::leak(Box::new(PubSub::new()));
    let registry = Registry::new();
    registry.create(records::INPUT_EVENTS, bus);
    let opened = Event::new();

    thread::scope(|scope| {
        let client = scope.spawn(|| {
            let _bus = registry.open::<PubSub<Key>>(records::INPUT_EVENTS);
            opened.signal();
            thread::sleep(Duration::from_millis(30));
            registry.close(records::INPUT_EVENTS);
        });

        assert!(opened.wait_timeout(Duration::from_secs(1)));
        let mut polls = 0;
        while registry.open_count(records::INPUT_EVENTS) != Some(0) {
            polls += 1;
            thread::sleep(Duration::from_millis(5));
        }
        assert!(polls > 0);
        assert!(registry.destroy(records::INPUT_EVENTS).is_ok());
        assert!(!registry.exists(records::INPUT_EVENTS));
        client.join().unwrap();
    });
}
