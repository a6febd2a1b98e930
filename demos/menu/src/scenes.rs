//! The three menu scenes.

use scene::{scene_table, SceneApp, SceneEvent, SceneManager, Scenes};

use crate::input::Key;

/// Custom event codes carried in [`SceneEvent::Custom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum MenuEvent {
    Up = 0,
    Down = 1,
    Ok = 2,
}

impl MenuEvent {
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Up => Some(Self::Up),
            Key::Down => Some(Self::Down),
            Key::Ok => Some(Self::Ok),
            Key::Back => None,
        }
    }

    fn decode(event: SceneEvent) -> Option<Self> {
        match event {
            SceneEvent::Custom(0) => Some(Self::Up),
            SceneEvent::Custom(1) => Some(Self::Down),
            SceneEvent::Custom(2) => Some(Self::Ok),
            _ => None,
        }
    }
}

pub struct MenuApp {
    scenes: SceneManager<MenuApp, MenuScene>,
    pub selected: u32,
    pub backlight: bool,
    pub ticks: u32,
}

impl MenuApp {
    pub fn new() -> Self {
        Self {
            scenes: SceneManager::new(&MENU_SCENES),
            selected: 0,
            backlight: true,
            ticks: 0,
        }
    }
}

impl SceneApp for MenuApp {
    type Scene = MenuScene;

    fn scene_manager(&mut self) -> &mut SceneManager<MenuApp, MenuScene> {
        &mut self.scenes
    }
}

scene_table! {
    pub enum MenuScene in MENU_SCENES for MenuApp {
        Start => start,
        Settings => settings,
        About => about,
    }
}

mod start {
    use super::*;

    const ITEMS: [(&str, MenuScene); 2] = [
        ("Settings", MenuScene::Settings),
        ("About", MenuScene::About),
    ];

    fn draw(app: &MenuApp) {
        for (index, (label, _)) in ITEMS.iter().enumerate() {
            let marker = if index as u32 == app.selected { '>' } else { ' ' };
            println!("  {marker} {label}");
        }
    }

    pub fn on_enter(app: &mut MenuApp, need_restore: bool) {
        app.selected = if need_restore {
            app.get_scene_state(MenuScene::Start)
        } else {
            0
        };
        println!("[menu]");
        draw(app);
    }

    pub fn on_event(app: &mut MenuApp, event: SceneEvent) -> bool {
        let count = ITEMS.len() as u32;
        match MenuEvent::decode(event) {
            Some(MenuEvent::Up) => app.selected = (app.selected + count - 1) % count,
            Some(MenuEvent::Down) => app.selected = (app.selected + 1) % count,
            Some(MenuEvent::Ok) => {
                app.set_scene_state(MenuScene::Start, app.selected);
                let (_, next) = ITEMS[app.selected as usize];
                app.next_scene(next);
                return true;
            }
            None => return false,
        }
        draw(app);
        true
    }

    pub fn on_exit(_app: &mut MenuApp) {}
}

mod settings {
    use super::*;

    pub fn on_enter(app: &mut MenuApp, _need_restore: bool) {
        println!("[settings] backlight {}", on_off(app.backlight));
    }

    pub fn on_event(app: &mut MenuApp, event: SceneEvent) -> bool {
        if MenuEvent::decode(event) != Some(MenuEvent::Ok) {
            return false;
        }
        app.backlight = !app.backlight;
        println!("[settings] backlight {}", on_off(app.backlight));
        true
    }

    pub fn on_exit(_app: &mut MenuApp) {}

    fn on_off(value: bool) -> &'static str {
        if value {
            "on"
        } else {
            "off"
        }
    }
}

mod about {
    use super::*;

    pub fn on_enter(app: &mut MenuApp, _need_restore: bool) {
        app.ticks = 0;
        println!("[about] {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    }

    pub fn on_event(app: &mut MenuApp, event: SceneEvent) -> bool {
        if event == SceneEvent::Tick {
            app.ticks += 1;
            return true;
        }
        false
    }

    pub fn on_exit(app: &mut MenuApp) {
        log::debug!("about screen shown for {} ticks", app.ticks);
    }
}
