//! Menu demo.
//!
//! Two tasks coordinate through the hub:
//! - the input service creates the `input_events` record and publishes a
//!   scripted sequence of key presses;
//! - the GUI task opens that record, subscribes, queues keys through a
//!   `ValueMutex` and wakes itself with an `Event`, then drives a three-scene
//!   menu until Back is pressed on the root scene.

mod input;
mod scenes;

use std::collections::VecDeque;
use std::error::Error;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use hub::{records, Event, Records, RecordsExt, Registry, RegistryConfig, Timeout, ValueMutex};
use log::{Level, LevelFilter, Log, Metadata, Record};
use scene::Scenes;

use input::{InputBus, Key};
use scenes::{MenuApp, MenuEvent, MenuScene};

const TICK: Duration = Duration::from_millis(50);

struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{:>5} {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

fn main() -> Result<(), Box<dyn Error>> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(LevelFilter::Debug);

    let registry = Arc::new(Registry::with_config(
        RegistryConfig::builder().name("hub").capacity(8).build(),
    ));

    let script = vec![
        Key::Ok,
        Key::Ok,
        Key::Back,
        Key::Down,
        Key::Ok,
        Key::Back,
        Key::Back,
    ];
    let service = {
        let registry = registry.clone();
        thread::Builder::new()
            .name("input".into())
            .spawn(move || input::run(registry, script))?
    };

    let gui = {
        let registry = registry.clone();
        thread::Builder::new()
            .name("gui".into())
            .spawn(move || run_gui(&*registry))?
    };

    let mut app = gui.join().map_err(|_| "gui task halted")??;
    if service.join().is_err() {
        return Err("input task halted".into());
    }

    let selection = app.get_scene_state(MenuScene::Start);
    println!(
        "menu closed: backlight {}, last selection {selection}",
        if app.backlight { "on" } else { "off" },
    );
    Ok(())
}

fn run_gui(registry: &dyn Records) -> Result<MenuApp, hub::PubSubError> {
    let queue: &'static ValueMutex<'static, VecDeque<Key>> =
        Box::leak(Box::new(ValueMutex::new(Box::leak(Box::new(VecDeque::new())))));
    let ready = Event::new();

    let input = registry.open::<InputBus>(records::INPUT_EVENTS);
    let subscription = {
        let ready = ready.clone();
        input.subscribe(move |key: &Key| {
            queue.with(Timeout::Forever, |pending| pending.push_back(*key));
            ready.signal();
        })?
    };

    let mut app = MenuApp::new();
    app.next_scene(MenuScene::Start);

    'running: loop {
        if !ready.wait_timeout(TICK) {
            app.handle_tick_event();
            continue;
        }
        let keys: Vec<Key> = queue
            .with(Timeout::Forever, |pending| pending.drain(..).collect())
            .unwrap_or_default();
        for key in keys {
            let handled = match MenuEvent::from_key(key) {
                Some(event) => app.handle_custom_event(event as u32),
                None => app.handle_back_event(),
            };
            if !handled && key == Key::Back {
                break 'running;
            }
        }
    }

    app.stop();
    input.unsubscribe(subscription);
    registry.close(records::INPUT_EVENTS);
    Ok(app)
}
