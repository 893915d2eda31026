// Host-side tests for the overlay transition state machine.

use lob_core::{
    CameraPose, Overlay, OverlayTable, SceneStore, Section, TransitionController,
    TransitionEvent, TransitionKind, TransitionOrigin, TransitionState,
};

const DT: f32 = 1.0 / 60.0;

struct Rig {
    ctrl: TransitionController,
    store: SceneStore,
    camera: CameraPose,
    events: Vec<TransitionEvent>,
}

impl Rig {
    fn new() -> Self {
        Self {
            ctrl: TransitionController::default(),
            store: SceneStore::new(),
            camera: CameraPose::HERO,
            events: Vec::new(),
        }
    }

    fn open(&mut self, o: Overlay) -> bool {
        let cam = self.camera;
        self.ctrl
            .open(o, &mut self.store, &cam, TransitionOrigin::Navigation)
            .is_some()
    }

    fn close(&mut self, o: Overlay) -> bool {
        let cam = self.camera;
        self.ctrl
            .close(o, &mut self.store, &cam, TransitionOrigin::Navigation)
            .is_some()
    }

    fn run(&mut self, secs: f32) {
        let steps = (secs / DT).round() as usize;
        for _ in 0..steps {
            let evs = self.ctrl.tick(DT, &mut self.store, &mut self.camera);
            self.events.extend(evs);
        }
    }

    fn settle(&mut self) {
        self.run(5.0);
        assert!(!self.ctrl.is_running());
    }

    fn completed(&self) -> Vec<TransitionKind> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TransitionEvent::Completed { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect()
    }

    fn cancelled(&self) -> Vec<TransitionKind> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TransitionEvent::Cancelled { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect()
    }
}

#[test]
fn open_runs_to_completion() {
    let mut rig = Rig::new();
    assert!(rig.open(Overlay::Shop));
    let s = rig.store.state();
    assert_eq!(s.transition, TransitionState::Opening(Overlay::Shop));
    assert_eq!(s.current_section, Section::ShopTransition);
    assert!(!s.is_visible(Overlay::Shop));

    rig.settle();
    let s = rig.store.state();
    assert_eq!(s.transition, TransitionState::Idle);
    assert!(s.is_visible(Overlay::Shop));
    assert_eq!(s.current_section, Section::Shop);
    assert_eq!(rig.camera, OverlayTable::default().get(Overlay::Shop).camera);
    assert_eq!(rig.completed(), vec![TransitionKind::Open(Overlay::Shop)]);
}

#[test]
fn overlay_becomes_visible_at_reveal_fraction() {
    let mut rig = Rig::new();
    rig.open(Overlay::Shop);
    // shop opens over 1.2 s and reveals at 60%
    rig.run(0.6);
    assert!(!rig.store.state().is_visible(Overlay::Shop));
    rig.run(0.2);
    assert!(rig.store.state().is_visible(Overlay::Shop));
    assert!(rig.ctrl.is_running());
    assert!(rig
        .events
        .iter()
        .any(|e| matches!(e, TransitionEvent::Revealed { overlay: Overlay::Shop, .. })));
}

#[test]
fn opening_shop_pre_empts_schedule() {
    let mut rig = Rig::new();
    rig.open(Overlay::Schedule);
    rig.run(0.3);
    assert!(rig.store.state().is_transitioning_to(Overlay::Schedule));

    assert!(rig.open(Overlay::Shop));
    let s = rig.store.state();
    assert!(s.is_transitioning_to(Overlay::Shop));
    assert!(!s.is_transitioning_to(Overlay::Schedule));
    assert!(!s.is_visible(Overlay::Schedule));

    rig.settle();
    let s = rig.store.state();
    assert!(s.is_visible(Overlay::Shop));
    assert!(!s.is_visible(Overlay::Schedule));
    assert_eq!(s.current_section, Section::Shop);
    assert_eq!(rig.cancelled(), vec![TransitionKind::Open(Overlay::Schedule)]);
    assert_eq!(rig.completed(), vec![TransitionKind::Open(Overlay::Shop)]);
}

#[test]
fn pre_empting_after_reveal_hides_the_previous_overlay() {
    let mut rig = Rig::new();
    rig.open(Overlay::Schedule);
    rig.run(0.8);
    assert!(rig.store.state().is_visible(Overlay::Schedule));

    rig.open(Overlay::Words);
    assert!(!rig.store.state().is_visible(Overlay::Schedule));
    rig.settle();
    let visible: Vec<_> = Overlay::ALL
        .into_iter()
        .filter(|o| rig.store.state().is_visible(*o))
        .collect();
    assert_eq!(visible, vec![Overlay::Words]);
}

#[test]
fn close_before_open_completes_never_fires_open_completion() {
    let mut rig = Rig::new();
    rig.open(Overlay::Shop);
    rig.run(0.5);
    assert!(rig.close(Overlay::Shop));

    let s = rig.store.state();
    assert!(s.is_transitioning_from(Overlay::Shop));
    assert!(!s.is_transitioning_to(Overlay::Shop));
    assert!(!s.is_visible(Overlay::Shop));

    rig.settle();
    let s = rig.store.state();
    assert_eq!(s.transition, TransitionState::Idle);
    assert_eq!(s.current_section, Section::Hero);
    assert!(!s.is_visible(Overlay::Shop));
    assert_eq!(rig.camera, CameraPose::HERO);
    assert_eq!(rig.completed(), vec![TransitionKind::Close(Overlay::Shop)]);
    assert_eq!(rig.cancelled(), vec![TransitionKind::Open(Overlay::Shop)]);
}

#[test]
fn close_hides_immediately_and_waits_before_moving() {
    let mut rig = Rig::new();
    rig.open(Overlay::Shop);
    rig.settle();
    let open_pose = rig.camera;

    assert!(rig.close(Overlay::Shop));
    assert!(!rig.store.state().is_visible(Overlay::Shop));
    // inside the close delay the camera holds
    rig.run(0.1);
    assert_eq!(rig.camera, open_pose);
    rig.settle();
    assert_eq!(rig.camera, CameraPose::HERO);
}

#[test]
fn open_and_close_are_no_ops_when_redundant() {
    let mut rig = Rig::new();
    assert!(!rig.close(Overlay::Shop), "nothing to close");
    assert!(rig.open(Overlay::Shop));
    assert!(!rig.open(Overlay::Shop), "already opening");
    rig.settle();
    assert!(!rig.open(Overlay::Shop), "already open");
    assert!(rig.close(Overlay::Shop));
    assert!(!rig.close(Overlay::Shop), "already closing");
    assert!(rig.cancelled().is_empty());
}

#[test]
fn click_requests_are_gated_while_busy() {
    let mut rig = Rig::new();
    let cam = rig.camera;
    assert!(rig
        .ctrl
        .request_close(Overlay::Words, &mut rig.store, &cam)
        .is_none());
    assert!(rig
        .ctrl
        .request_open(Overlay::Words, &mut rig.store, &cam)
        .is_some());
    // busy: a second click is ignored rather than pre-empting
    assert!(rig
        .ctrl
        .request_open(Overlay::Shop, &mut rig.store, &cam)
        .is_none());
    assert!(rig.store.state().is_transitioning_to(Overlay::Words));

    rig.settle();
    let cam = rig.camera;
    assert!(rig
        .ctrl
        .request_open(Overlay::Words, &mut rig.store, &cam)
        .is_none());
    assert!(rig
        .ctrl
        .request_close(Overlay::Words, &mut rig.store, &cam)
        .is_some());
    assert_eq!(
        rig.ctrl.active().map(|(_, kind, origin)| (kind, origin)),
        Some((TransitionKind::Close(Overlay::Words), TransitionOrigin::User))
    );
}

#[test]
fn started_events_carry_origin_and_user_mark_applies() {
    let mut rig = Rig::new();
    rig.open(Overlay::Schedule);
    rig.run(DT);
    assert!(matches!(
        rig.events.first(),
        Some(TransitionEvent::Started {
            kind: TransitionKind::Open(Overlay::Schedule),
            origin: TransitionOrigin::Navigation,
            ..
        })
    ));
    assert!(rig.ctrl.mark_user_requested());
    assert_eq!(
        rig.ctrl.active().map(|(_, _, origin)| origin),
        Some(TransitionOrigin::User)
    );
    rig.settle();
    assert!(!rig.ctrl.mark_user_requested());
}

#[test]
fn overlay_table_rejects_bad_rows() {
    let mut rows = [
        lob_core::SHOP,
        lob_core::SCHEDULE,
        lob_core::WORDS,
    ];
    assert!(OverlayTable::new(rows, CameraPose::HERO).is_ok());
    rows[1].reveal_at = 1.5;
    assert!(OverlayTable::new(rows, CameraPose::HERO).is_err());
    rows[1].reveal_at = 0.6;
    rows[2].close.duration = -1.0;
    assert!(OverlayTable::new(rows, CameraPose::HERO).is_err());
}
