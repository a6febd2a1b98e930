use crate::{scene_table, SceneApp, SceneEvent, SceneManager, Scenes};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Enter(TestScene, bool),
    Event(TestScene, SceneEvent),
    Exit(TestScene),
}

pub struct Recorder {
    scenes: SceneManager<Recorder, TestScene, 4>,
    calls: Vec<Call>,
    consume_back: bool,
}

impl Recorder {
    fn new() -> Self {
        Self {
            scenes: SceneManager::new(&TEST_SCENES),
            calls: Vec::new(),
            consume_back: false,
        }
    }

    fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }
}

impl SceneApp<4> for Recorder {
    type Scene = TestScene;

    fn scene_manager(&mut self) -> &mut SceneManager<Self, TestScene, 4> {
        &mut self.scenes
    }
}

macro_rules! recording_scene {
    ($module:ident, $id:ident) => {
        mod $module {
            use super::{Call, Recorder, TestScene};
            use crate::SceneEvent;

            pub fn on_enter(app: &mut Recorder, need_restore: bool) {
                app.calls.push(Call::Enter(TestScene::$id, need_restore));
            }

            pub fn on_event(app: &mut Recorder, event: SceneEvent) -> bool {
                app.calls.push(Call::Event(TestScene::$id, event));
                event == SceneEvent::Back && app.consume_back
            }

            pub fn on_exit(app: &mut Recorder) {
                app.calls.push(Call::Exit(TestScene::$id));
            }
        }
    };
}

recording_scene!(scene_a, A);
recording_scene!(scene_b, B);
recording_scene!(scene_c, C);
recording_scene!(scene_x, X);
recording_scene!(scene_y, Y);

scene_table! {
    pub enum TestScene in TEST_SCENES for Recorder {
        A => scene_a,
        B => scene_b,
        C => scene_c,
        X => scene_x,
        Y => scene_y,
    }
}

use Call::{Enter, Event, Exit};
use TestScene::{A, B, C, X, Y};

#[test]
fn table_covers_every_scene() {
    use crate::SceneId;
    assert_eq!(TestScene::COUNT, 5);
    assert_eq!(TEST_SCENES.len(), 5);
    assert_eq!(TestScene::ALL, &[A, B, C, X, Y]);
    assert_eq!(Y.index(), 4);
}

#[test]
fn first_scene_is_only_entered() {
    let mut app = Recorder::new();
    app.next_scene(A);
    assert_eq!(app.take_calls(), vec![Enter(A, false)]);
    assert_eq!(app.current_scene(), Some(A));
    assert!(app.scene_manager().history().is_empty());
}

#[test]
fn next_then_previous_restores() {
    let mut app = Recorder::new();
    app.next_scene(A);
    app.next_scene(B);
    app.take_calls();

    assert!(app.previous_scene());
    assert_eq!(app.take_calls(), vec![Exit(B), Enter(A, true)]);
    assert_eq!(app.current_scene(), Some(A));

    assert!(!app.previous_scene());
    assert!(app.take_calls().is_empty());
    assert_eq!(app.current_scene(), Some(A));
}

#[test]
fn history_never_contains_current() {
    let mut app = Recorder::new();
    for id in [A, B, C] {
        app.next_scene(id);
        let current = app.current_scene().unwrap();
        assert!(!app.scene_manager().history().contains(&current));
    }
    assert_eq!(app.scene_manager().history(), &[A, B]);
}

#[test]
fn search_previous_discards_until_match() {
    let mut app = Recorder::new();
    for id in [A, Y, B, X, C] {
        app.next_scene(id);
    }
    app.take_calls();

    assert!(app.search_and_switch_to_previous_scene(&[X, Y]));
    assert_eq!(app.take_calls(), vec![Exit(C), Enter(X, true)]);
    assert_eq!(app.scene_manager().history(), &[A, Y, B]);

    assert!(app.search_and_switch_to_previous_scene(&[Y]));
    assert_eq!(app.take_calls(), vec![Exit(X), Enter(Y, true)]);
    assert_eq!(app.scene_manager().history(), &[A]);
}

#[test]
fn search_previous_without_match_changes_nothing() {
    let mut app = Recorder::new();
    app.next_scene(A);
    app.next_scene(B);
    app.take_calls();

    assert!(!app.search_and_switch_to_previous_scene(&[X]));
    assert!(app.take_calls().is_empty());
    assert_eq!(app.current_scene(), Some(B));
    assert_eq!(app.scene_manager().history(), &[A]);
}

#[test]
fn search_previous_falls_back_to_a_second_search() {
    let mut app = Recorder::new();
    for id in [A, B, C] {
        app.next_scene(id);
    }
    app.take_calls();

    assert!(!app.search_and_switch_to_previous_scene(&[X, Y]));
    assert_eq!(app.scene_manager().history(), &[A, B]);

    assert!(app.search_and_switch_to_previous_scene(&[A]));
    assert_eq!(app.take_calls(), vec![Exit(C), Enter(A, true)]);
    assert_eq!(app.current_scene(), Some(A));
    assert!(app.scene_manager().history().is_empty());
}

#[test]
fn another_scene_unwinds_to_root() {
    let mut app = Recorder::new();
    for id in [A, B, C] {
        app.next_scene(id);
    }
    app.take_calls();

    app.search_and_switch_to_another_scene(X);
    assert_eq!(app.take_calls(), vec![Exit(C), Enter(X, false)]);
    assert_eq!(app.scene_manager().history(), &[A]);
    assert!(app.has_previous_scene(A));
    assert!(!app.has_previous_scene(B));

    assert!(app.previous_scene());
    assert_eq!(app.current_scene(), Some(A));
}

#[test]
fn another_scene_from_root_keeps_root() {
    let mut app = Recorder::new();
    app.next_scene(A);
    app.search_and_switch_to_another_scene(B);
    assert_eq!(app.scene_manager().history(), &[A]);
    assert_eq!(app.current_scene(), Some(B));
}

#[test]
fn events_go_to_current_scene_only() {
    let mut app = Recorder::new();
    assert!(!app.handle_custom_event(7));

    app.next_scene(A);
    app.next_scene(B);
    app.take_calls();

    assert!(!app.handle_custom_event(7));
    app.handle_tick_event();
    assert_eq!(
        app.take_calls(),
        vec![
            Event(B, SceneEvent::Custom(7)),
            Event(B, SceneEvent::Tick)
        ]
    );
}

#[test]
fn unconsumed_back_goes_to_previous_scene() {
    let mut app = Recorder::new();
    app.next_scene(A);
    app.next_scene(B);
    app.take_calls();

    assert!(app.handle_back_event());
    assert_eq!(
        app.take_calls(),
        vec![Event(B, SceneEvent::Back), Exit(B), Enter(A, true)]
    );
    assert!(!app.handle_back_event());
}

#[test]
fn consumed_back_stays() {
    let mut app = Recorder::new();
    app.consume_back = true;
    app.next_scene(A);
    app.next_scene(B);
    assert!(app.handle_back_event());
    assert_eq!(app.current_scene(), Some(B));
}

#[test]
fn scene_state_survives_revisits() {
    let mut app = Recorder::new();
    app.next_scene(A);
    app.set_scene_state(A, 3);
    app.next_scene(B);
    app.previous_scene();
    assert_eq!(app.get_scene_state(A), 3);
    assert_eq!(app.get_scene_state(B), 0);
}

#[test]
fn stop_exits_current_scene() {
    let mut app = Recorder::new();
    app.next_scene(A);
    app.take_calls();
    app.stop();
    assert_eq!(app.take_calls(), vec![Exit(A)]);
    assert_eq!(app.current_scene(), None);
    app.stop();
    assert!(app.take_calls().is_empty());
}

#[test]
#[should_panic(expected = "scene history full (4 scenes)")]
fn history_overflow_is_a_fault() {
    let mut app = Recorder::new();
    for id in [A, B, C, X, Y, A] {
        app.next_scene(id);
    }
}
