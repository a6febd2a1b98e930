//! Scene manager: a pushdown automaton over scene ids.
//!
//! The manager keeps the current scene and a bounded navigation history. An
//! application owns exactly one manager and exposes it through [`SceneApp`];
//! all navigation is done through the [`Scenes`] extension methods so that
//! scene handlers receive the application itself and can navigate from inside
//! their own `on_event`.

use core::fmt;

use heapless::Vec as Stack;

use crate::table::{SceneEvent, SceneId, SceneTable};

/// Navigation history depth used when none is given.
pub const DEFAULT_DEPTH: usize = 16;

/// Current scene plus navigation history of one application.
pub struct SceneManager<A: 'static, S: SceneId, const DEPTH: usize = DEFAULT_DEPTH> {
    table: &'static SceneTable<A, S>,
    current: Option<S>,
    stack: Stack<S, DEPTH>,
    states: Vec<u32>,
}

impl<A: 'static, S: SceneId, const DEPTH: usize> SceneManager<A, S, DEPTH> {
    /// Creates a manager with no current scene and empty history.
    pub fn new(table: &'static SceneTable<A, S>) -> Self {
        Self {
            table,
            current: None,
            stack: Stack::new(),
            states: vec![0; S::COUNT],
        }
    }

    pub fn current_scene(&self) -> Option<S> {
        self.current
    }

    /// Navigation history, oldest first. Never contains the current scene.
    pub fn history(&self) -> &[S] {
        &self.stack
    }

    /// Per-scene state word; survives leaving and re-entering the scene.
    pub fn set_scene_state(&mut self, id: S, state: u32) {
        self.states[id.index()] = state;
    }

    pub fn get_scene_state(&self, id: S) -> u32 {
        self.states[id.index()]
    }

    /// Whether `id` is somewhere in the navigation history.
    pub fn has_previous_scene(&self, id: S) -> bool {
        self.stack.contains(&id)
    }
}

impl<A: 'static, S: SceneId, const DEPTH: usize> fmt::Debug for SceneManager<A, S, DEPTH> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneManager")
            .field("current", &self.current)
            .field("history", &self.stack.as_slice())
            .finish()
    }
}

/// Application that owns a [`SceneManager`] with scene handlers taking `Self`.
pub trait SceneApp<const DEPTH: usize = DEFAULT_DEPTH>: Sized + 'static {
    type Scene: SceneId;

    fn scene_manager(&mut self) -> &mut SceneManager<Self, Self::Scene, DEPTH>;
}

/// Navigation on any [`SceneApp`].
///
/// Handlers run with `&mut self`; the manager is not borrowed while they run,
/// so a handler may navigate again.
pub trait Scenes<const DEPTH: usize = DEFAULT_DEPTH>: SceneApp<DEPTH> {
    /// Leaves the current scene, pushes it onto the history and enters `id`.
    ///
    /// With no current scene (start-up) `id` is only entered. A full history
    /// is a fault.
    fn next_scene(&mut self, id: Self::Scene);

    /// Returns to the most recent scene in the history, entering it with
    /// `need_restore` set. `false` if the history is empty; nothing is called
    /// then.
    fn previous_scene(&mut self) -> bool;

    /// Finds the most recent history entry that is one of `ids`, discards
    /// everything above it and returns to it as [`Scenes::previous_scene`]
    /// does.
    ///
    /// When no entry matches nothing changes and `false` is returned, so the
    /// caller can try another search or pick its own fallback.
    fn search_and_switch_to_previous_scene(&mut self, ids: &[Self::Scene]) -> bool;

    /// Unwinds the history to its root scene and enters `id` on top of it.
    ///
    /// `id` is entered fresh. With an empty history the current scene becomes
    /// the root.
    fn search_and_switch_to_another_scene(&mut self, id: Self::Scene);

    /// Whether `id` is somewhere in the navigation history.
    fn has_previous_scene(&mut self, id: Self::Scene) -> bool;

    /// Dispatches `event` to the current scene. Returns whether it was
    /// consumed; `false` if there is no current scene.
    fn handle_event(&mut self, event: SceneEvent) -> bool;

    fn handle_custom_event(&mut self, event: u32) -> bool {
        self.handle_event(SceneEvent::Custom(event))
    }

    /// Delivers a tick to the current scene.
    fn handle_tick_event(&mut self) {
        self.handle_event(SceneEvent::Tick);
    }

    /// Delivers Back to the current scene; if the scene does not consume it
    /// the manager goes to the previous scene. `false` means there is nowhere
    /// to go back to and the application should exit.
    fn handle_back_event(&mut self) -> bool {
        self.handle_event(SceneEvent::Back) || self.previous_scene()
    }

    /// Leaves the current scene without entering another one. History is kept.
    fn stop(&mut self);

    fn current_scene(&mut self) -> Option<Self::Scene>;

    fn set_scene_state(&mut self, id: Self::Scene, state: u32) {
        self.scene_manager().set_scene_state(id, state);
    }

    fn get_scene_state(&mut self, id: Self::Scene) -> u32 {
        self.scene_manager().get_scene_state(id)
    }
}

impl<A: SceneApp<DEPTH>, const DEPTH: usize> Scenes<DEPTH> for A {
    fn next_scene(&mut self, id: A::Scene) {
        let manager = self.scene_manager();
        let table = manager.table;
        if let Some(current) = manager.current {
            (table.handlers(current).on_exit)(self);
            let manager = self.scene_manager();
            let pushed = manager.stack.push(current).is_ok();
            fault::check!(
                pushed,
                "scene history full ({} scenes) entering {:?}",
                DEPTH,
                id
            );
        }
        log::trace!("scene -> {id:?}");
        self.scene_manager().current = Some(id);
        (table.handlers(id).on_enter)(self, false);
    }

    fn previous_scene(&mut self) -> bool {
        let manager = self.scene_manager();
        let table = manager.table;
        let Some(&previous) = manager.stack.last() else {
            return false;
        };
        if let Some(current) = manager.current {
            (table.handlers(current).on_exit)(self);
        }
        let manager = self.scene_manager();
        manager.stack.pop();
        manager.current = Some(previous);
        log::trace!("scene <- {previous:?}");
        (table.handlers(previous).on_enter)(self, true);
        true
    }

    fn search_and_switch_to_previous_scene(&mut self, ids: &[A::Scene]) -> bool {
        let manager = self.scene_manager();
        let Some(position) = manager.stack.iter().rposition(|id| ids.contains(id)) else {
            log::debug!("none of {ids:?} found in scene history");
            return false;
        };
        manager.stack.truncate(position + 1);
        self.previous_scene()
    }

    fn search_and_switch_to_another_scene(&mut self, id: A::Scene) {
        let manager = self.scene_manager();
        let table = manager.table;
        if let Some(current) = manager.current {
            (table.handlers(current).on_exit)(self);
        }
        let manager = self.scene_manager();
        if !manager.stack.is_empty() {
            manager.stack.truncate(1);
        } else if let Some(current) = manager.current {
            let pushed = manager.stack.push(current).is_ok();
            fault::check!(pushed, "scene history has no room for its root");
        }
        manager.current = Some(id);
        log::trace!("scene => {id:?}");
        (table.handlers(id).on_enter)(self, false);
    }

    fn has_previous_scene(&mut self, id: A::Scene) -> bool {
        self.scene_manager().has_previous_scene(id)
    }

    fn handle_event(&mut self, event: SceneEvent) -> bool {
        let manager = self.scene_manager();
        let table = manager.table;
        match manager.current {
            Some(current) => (table.handlers(current).on_event)(self, event),
            None => false,
        }
    }

    fn stop(&mut self) {
        let manager = self.scene_manager();
        let table = manager.table;
        if let Some(current) = manager.current.take() {
            log::trace!("scene {current:?} stopped");
            (table.handlers(current).on_exit)(self);
        }
    }

    fn current_scene(&mut self) -> Option<A::Scene> {
        self.scene_manager().current
    }
}
