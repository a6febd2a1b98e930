//! # scene
//!
//! Stack-based scene dispatcher for application UI flows.
//!
//! An application lists its scenes once with [`scene_table!`]. The macro
//! generates the closed scene-id enum and a static table holding each scene's
//! `on_enter`, `on_event` and `on_exit` handlers, so every id has handlers by
//! construction and dispatch is an index into that table.
//!
//! ```
//! use scene::{scene_table, SceneApp, SceneEvent, SceneManager, Scenes};
//!
//! pub struct App {
//!     scenes: SceneManager<App, AppScene>,
//!     log: Vec<&'static str>,
//! }
//!
//! impl SceneApp for App {
//!     type Scene = AppScene;
//!     fn scene_manager(&mut self) -> &mut SceneManager<App, AppScene> {
//!         &mut self.scenes
//!     }
//! }
//!
//! mod start {
//!     use super::*;
//!     pub fn on_enter(app: &mut App, _restore: bool) { app.log.push("start") }
//!     pub fn on_event(app: &mut App, event: SceneEvent) -> bool {
//!         if event == SceneEvent::Custom(1) {
//!             app.next_scene(AppScene::About);
//!             return true;
//!         }
//!         false
//!     }
//!     pub fn on_exit(_app: &mut App) {}
//! }
//!
//! mod about {
//!     use super::*;
//!     pub fn on_enter(app: &mut App, _restore: bool) { app.log.push("about") }
//!     pub fn on_event(_app: &mut App, _event: SceneEvent) -> bool { false }
//!     pub fn on_exit(_app: &mut App) {}
//! }
//!
//! scene_table! {
//!     pub enum AppScene in APP_SCENES for App {
//!         Start => start,
//!         About => about,
//!     }
//! }
//!
//! fn main() {
//!     let mut app = App { scenes: SceneManager::new(&APP_SCENES), log: Vec::new() };
//!     app.next_scene(AppScene::Start);
//!     app.handle_custom_event(1);
//!     assert!(app.handle_back_event());
//!     assert!(!app.handle_back_event());
//!     assert_eq!(app.log, ["start", "about", "start"]);
//! }
//! ```

pub mod manager;
pub mod table;

pub use manager::{SceneApp, SceneManager, Scenes, DEFAULT_DEPTH};
pub use table::{SceneEvent, SceneHandlers, SceneId, SceneTable};

/// Declares a scene-id enum and its handler table.
///
/// Each entry `Variant => module` names a module in scope exporting
/// `on_enter(&mut App, bool)`, `on_event(&mut App, SceneEvent) -> bool` and
/// `on_exit(&mut App)`. The enum gets variants in list order and the table
/// becomes a `static` named after `in`, typed for the application after
/// `for`.
#[macro_export]
macro_rules! scene_table {
    (
        $vis:vis enum $name:ident in $table:ident for $app:ty {
            $( $variant:ident => $module:ident ),+ $(,)?
        }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $variant, )+
        }

        impl $name {
            /// Every scene, in table order.
            pub const ALL: &'static [$name] = &[$( $name::$variant, )+];
        }

        impl $crate::SceneId for $name {
            const COUNT: usize = $name::ALL.len();

            fn index(self) -> usize {
                self as usize
            }
        }

        $vis static $table: $crate::SceneTable<$app, $name> = {
            const HANDLERS: &[$crate::SceneHandlers<$app>] = &[
                $(
                    $crate::SceneHandlers {
                        on_enter: $module::on_enter,
                        on_event: $module::on_event,
                        on_exit: $module::on_exit,
                    },
                )+
            ];
            $crate::SceneTable::new(HANDLERS)
        };
    };
}

#[cfg(test)]
mod tests;
