// Host-side tests for path parsing and history reconciliation.

use lob_core::{
    CameraPose, Overlay, Route, RouteAction, RouteSync, SceneStore, Section,
    TransitionController, TransitionKind, TransitionOrigin, TransitionState,
};

#[test]
fn parses_paths() {
    assert_eq!(Route::parse("/"), Route::Home);
    assert_eq!(Route::parse(""), Route::Home);
    assert_eq!(Route::parse("/shop"), Route::Shop);
    assert_eq!(Route::parse("/shop/"), Route::Shop);
    assert_eq!(Route::parse("/shop?ref=nav"), Route::Shop);
    assert_eq!(Route::parse("/shop#top"), Route::Shop);
    assert_eq!(
        Route::parse("/shop/racket-42"),
        Route::Product("racket-42".to_string())
    );
    assert_eq!(Route::parse("/about"), Route::Unknown("/about".to_string()));
    assert_eq!(
        Route::parse("/shop/a/b"),
        Route::Unknown("/shop/a/b".to_string())
    );
}

#[test]
fn shop_family_and_paths() {
    assert!(Route::Shop.is_shop_family());
    assert!(Route::Product("x".into()).is_shop_family());
    assert!(!Route::Home.is_shop_family());
    assert!(!Route::Unknown("/shopping".into()).is_shop_family());
    assert_eq!(Route::Product("x".into()).to_string(), "/shop/x");
    assert_eq!(Route::Home.path(), "/");
}

struct World {
    sync: RouteSync,
    store: SceneStore,
    transitions: TransitionController,
    camera: CameraPose,
}

impl World {
    fn new() -> Self {
        Self {
            sync: RouteSync::default(),
            store: SceneStore::new(),
            transitions: TransitionController::default(),
            camera: CameraPose::HERO,
        }
    }

    fn navigate(&mut self, path: &str) -> RouteAction {
        let cam = self.camera;
        self.sync
            .on_location_change(path, &mut self.store, &mut self.transitions, &cam)
    }

    fn settle(&mut self) {
        for _ in 0..600 {
            self.transitions
                .tick(1.0 / 60.0, &mut self.store, &mut self.camera);
        }
        assert!(!self.transitions.is_running());
    }
}

#[test]
fn deep_link_opens_the_shop() {
    let mut w = World::new();
    let action = w.navigate("/shop/racket-42");
    assert!(matches!(action, RouteAction::OpenedShop(_)));
    assert_eq!(w.sync.current(), &Route::Product("racket-42".into()));
    let s = w.store.state();
    assert_eq!(s.current_section, Section::Shop);
    assert!(s.is_transitioning_to(Overlay::Shop));
    assert_eq!(
        w.transitions.active().map(|(_, _, origin)| origin),
        Some(TransitionOrigin::Navigation)
    );

    // a second shop path while opening changes nothing
    assert_eq!(w.navigate("/shop"), RouteAction::None);
    w.settle();
    assert!(w.store.state().is_visible(Overlay::Shop));
}

#[test]
fn moving_between_shop_paths_keeps_the_overlay() {
    let mut w = World::new();
    w.navigate("/shop");
    w.settle();
    assert_eq!(w.navigate("/shop/ball-7"), RouteAction::None);
    assert!(w.store.state().is_visible(Overlay::Shop));
    assert!(!w.transitions.is_running());
}

#[test]
fn back_from_shop_closes_like_home_click() {
    let mut w = World::new();
    w.navigate("/shop");
    w.settle();

    let action = w.navigate("/");
    assert!(matches!(action, RouteAction::ClosedShop(_)));
    let s = w.store.state();
    assert!(s.is_transitioning_from(Overlay::Shop));
    assert!(!s.is_visible(Overlay::Shop));
    assert_eq!(
        w.transitions.active().map(|(_, kind, origin)| (kind, origin)),
        Some((TransitionKind::Close(Overlay::Shop), TransitionOrigin::User))
    );

    w.settle();
    let s = w.store.state();
    assert_eq!(s.transition, TransitionState::Idle);
    assert_eq!(s.current_section, Section::Hero);
    assert_eq!(w.camera, CameraPose::HERO);
}

#[test]
fn back_during_shop_opening_returns_home() {
    let mut w = World::new();
    let cam = w.camera;
    w.transitions
        .request_open(Overlay::Shop, &mut w.store, &cam)
        .expect("opens from idle");
    w.sync.observe("/shop");
    for _ in 0..10 {
        w.transitions
            .tick(1.0 / 60.0, &mut w.store, &mut w.camera);
    }
    assert!(w.store.state().is_transitioning_to(Overlay::Shop));
    assert!(!w.store.state().is_visible(Overlay::Shop));

    let action = w.navigate("/");
    assert!(matches!(action, RouteAction::ClosedShop(_)));
    assert!(w.store.state().is_transitioning_from(Overlay::Shop));

    w.settle();
    let s = w.store.state();
    assert_eq!(s.transition, TransitionState::Idle);
    assert!(!s.is_visible(Overlay::Shop));
    assert_eq!(s.current_section, Section::Hero);
    assert_eq!(w.camera, CameraPose::HERO);
}

#[test]
fn back_pre_empts_a_running_transition() {
    let mut w = World::new();
    w.navigate("/shop");
    w.settle();
    // user starts opening schedule; that hides the shop, so leaving the
    // shop path has nothing left to close
    let cam = w.camera;
    w.transitions
        .open(Overlay::Schedule, &mut w.store, &cam, TransitionOrigin::User);
    assert_eq!(w.navigate("/"), RouteAction::None);
    assert!(w.store.state().is_transitioning_to(Overlay::Schedule));
}

#[test]
fn non_shop_paths_are_ignored_when_shop_is_closed() {
    let mut w = World::new();
    assert_eq!(w.navigate("/"), RouteAction::None);
    assert_eq!(w.navigate("/about"), RouteAction::None);
    assert_eq!(w.store.state().current_section, Section::Hero);
    assert!(!w.transitions.is_running());
}

#[test]
fn observe_records_without_reconciling() {
    let mut w = World::new();
    w.sync.observe("/shop");
    assert_eq!(w.sync.current(), &Route::Shop);
    assert!(!w.transitions.is_running());
    assert!(!w.store.state().is_visible(Overlay::Shop));
}
