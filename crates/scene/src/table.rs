//! Scene ids and their handler table.

use core::fmt;
use core::hash::Hash;
use core::marker::PhantomData;

/// Events a scene can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneEvent {
    /// Application-defined event, usually a view callback code.
    Custom(u32),
    /// Navigation back key.
    Back,
    /// Periodic tick.
    Tick,
}

/// Closed set of scene ids, usually generated by [`scene_table!`](crate::scene_table).
pub trait SceneId: Copy + Eq + Hash + fmt::Debug + 'static {
    /// Number of scenes.
    const COUNT: usize;

    /// Position of this id in the handler table, below [`Self::COUNT`].
    fn index(self) -> usize;
}

/// The three handlers of one scene.
pub struct SceneHandlers<A> {
    /// Called when the scene becomes current. `true` when returning to it
    /// from a later scene, so it can restore its UI state.
    pub on_enter: fn(&mut A, bool),
    /// Called with each event while current. Returns whether it was consumed.
    pub on_event: fn(&mut A, SceneEvent) -> bool,
    /// Called when the scene stops being current.
    pub on_exit: fn(&mut A),
}

impl<A> Clone for SceneHandlers<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for SceneHandlers<A> {}

/// Handler table indexed by scene id.
pub struct SceneTable<A: 'static, S> {
    handlers: &'static [SceneHandlers<A>],
    _ids: PhantomData<fn() -> S>,
}

impl<A: 'static, S: SceneId> SceneTable<A, S> {
    /// Wraps `handlers`, one entry per id in id order.
    ///
    /// Evaluated in a `static`, a length mismatch fails the build.
    pub const fn new(handlers: &'static [SceneHandlers<A>]) -> Self {
        assert!(
            handlers.len() == S::COUNT,
            "scene table must have one handler set per scene id"
        );
        Self {
            handlers,
            _ids: PhantomData,
        }
    }

    /// Handlers for `id`.
    pub fn handlers(&self, id: S) -> SceneHandlers<A> {
        self.handlers[id.index()]
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<A: 'static, S> fmt::Debug for SceneTable<A, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneTable")
            .field("scenes", &self.handlers.len())
            .finish()
    }
}
