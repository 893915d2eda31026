// Host-side tests for the per-frame scene pipeline.

use glam::{Mat4, Vec2};
use lob_core::{
    CameraPose, FrameOutput, Overlay, Route, Scene, ScrollPath, Section, SoundCue,
    TransitionEvent, TransitionKind, TransitionOrigin, JUMBOTRON_FOCUS_POSE,
};

const DT: f32 = 1.0 / 60.0;
const CENTRE: Vec2 = Vec2::new(400.0, 300.0);

fn scene() -> Scene {
    let mut s = Scene::default();
    s.set_viewport(800.0, 600.0);
    s
}

/// Tick `n` frames, returning every frame output.
fn run(scene: &mut Scene, n: usize) -> Vec<FrameOutput> {
    (0..n).map(|_| scene.tick(DT)).collect()
}

fn history(frames: &[FrameOutput]) -> Vec<String> {
    frames.iter().filter_map(|f| f.history_push.clone()).collect()
}

fn scroll_into_shop(scene: &mut Scene) -> Vec<FrameOutput> {
    assert!(scene.on_wheel(3000.0));
    run(scene, 300)
}

#[test]
fn starts_at_the_hero_pose() {
    let mut s = scene();
    let out = s.tick(DT);
    assert_eq!(out.camera, ScrollPath::default().sample(0.0));
    assert_eq!(out.camera.position, CameraPose::HERO.position);
    assert!(out.events.is_empty());
    assert!(s.in_scroll_regime());
}

#[test]
fn scrolling_to_the_end_opens_the_shop() {
    let mut s = scene();
    let frames = scroll_into_shop(&mut s);

    let started: Vec<_> = frames
        .iter()
        .flat_map(|f| f.events.iter())
        .filter_map(|e| match e {
            TransitionEvent::Started { kind, origin, .. } => Some((*kind, *origin)),
            _ => None,
        })
        .collect();
    assert_eq!(
        started,
        vec![(TransitionKind::Open(Overlay::Shop), TransitionOrigin::Scroll)]
    );
    let state = s.store().state();
    assert!(state.is_visible(Overlay::Shop));
    assert_eq!(state.current_section, Section::Shop);
    assert_eq!(history(&frames), vec!["/shop".to_string()]);
    assert_eq!(s.route(), &Route::Shop);
    assert!(!s.in_scroll_regime());

    // wheel is inert once the shop is open
    assert!(!s.on_wheel(-500.0));
}

#[test]
fn closing_the_shop_returns_to_the_top() {
    let mut s = scene();
    scroll_into_shop(&mut s);
    assert!(s.request_close(Overlay::Shop).is_some());
    let frames = run(&mut s, 200);

    let state = s.store().state();
    assert_eq!(state.current_section, Section::Hero);
    assert_eq!(state.scroll_progress, 0.0);
    assert_eq!(s.scroll().target(), 0.0);
    assert!(s.in_scroll_regime());
    assert_eq!(s.camera(), ScrollPath::default().sample(0.0));
    assert_eq!(history(&frames), vec!["/".to_string()]);
}

#[test]
fn nav_clicks_push_history_only_for_shop_moves() {
    let mut s = scene();
    assert!(s.request_open(Overlay::Schedule).is_some());
    let frames = run(&mut s, 120);
    assert!(history(&frames).is_empty());
    assert!(s.store().state().is_visible(Overlay::Schedule));

    assert!(s.request_open(Overlay::Shop).is_some());
    let frames = run(&mut s, 120);
    assert_eq!(history(&frames), vec!["/shop".to_string()]);
    assert!(!s.store().state().is_visible(Overlay::Schedule));

    // leaving the shop for another overlay goes back to "/"
    assert!(s.request_open(Overlay::Words).is_some());
    let frames = run(&mut s, 120);
    assert_eq!(history(&frames), vec!["/".to_string()]);
}

#[test]
fn history_navigation_does_not_echo_into_history() {
    let mut s = scene();
    s.on_location_change("/shop");
    let frames = run(&mut s, 120);
    assert!(history(&frames).is_empty());
    assert!(s.store().state().is_visible(Overlay::Shop));

    s.on_location_change("/");
    let frames = run(&mut s, 200);
    assert!(history(&frames).is_empty());
    assert_eq!(s.store().state().current_section, Section::Hero);
}

#[test]
fn every_transition_start_queues_a_swoosh() {
    let mut s = scene();
    s.request_open(Overlay::Words);
    run(&mut s, 120);
    s.go_home();
    run(&mut s, 120);
    let cues = s.drain_cues();
    assert_eq!(cues.as_slice(), &[SoundCue::Swoosh, SoundCue::Swoosh]);
    assert!(s.drain_cues().is_empty());
}

#[test]
fn grab_stretch_release_queues_cues_and_reveals() {
    let mut s = scene();
    s.tick(DT);
    assert!(!s.grab(Vec2::new(10.0, 10.0)), "missed the ball");
    assert!(s.grab(CENTRE));
    assert!(!s.grab(CENTRE), "already grabbing");
    assert!(s.drag_move(CENTRE + Vec2::new(350.0, 0.0)).is_some());
    assert!(s.drag_move(CENTRE + Vec2::new(360.0, 0.0)).is_none());
    assert!(s.store().state().is_revealed());
    assert!(s.release());

    assert_eq!(
        s.drain_cues().as_slice(),
        &[SoundCue::Grab, SoundCue::Pop, SoundCue::Thud]
    );

    // auto reset after the snap-back and hold
    run(&mut s, 90);
    assert!(!s.store().state().is_revealed());
}

#[test]
fn cancelled_gesture_snaps_back_silently() {
    let mut s = scene();
    s.tick(DT);
    assert!(s.grab(CENTRE));
    s.drain_cues();
    s.drag_move(CENTRE + Vec2::new(30.0, 0.0));
    assert!(s.cancel_gesture());
    assert!(s.drain_cues().is_empty());
    let out = run(&mut s, 90).pop().expect("frame");
    assert_eq!(out.deform.grab_strength, 0.0);
}

#[test]
fn escape_closes_overlay_then_dismisses_reveal() {
    let mut s = scene();
    s.tick(DT);
    s.grab(CENTRE);
    s.drag_move(CENTRE + Vec2::new(350.0, 0.0));
    s.release();
    s.escape();
    assert!(!s.store().state().is_revealed());

    s.request_open(Overlay::Words);
    run(&mut s, 120);
    s.escape();
    assert!(s.store().state().is_transitioning_from(Overlay::Words));
}

#[test]
fn ball_cannot_be_grabbed_behind_an_overlay() {
    let mut s = scene();
    s.request_open(Overlay::Schedule);
    run(&mut s, 120);
    assert!(!s.grab(CENTRE));
    s.hover(CENTRE);
    assert!(!s.store().state().ball_hovered);
}

#[test]
fn hover_tracks_the_ball() {
    let mut s = scene();
    s.tick(DT);
    s.hover(CENTRE);
    assert!(s.store().state().ball_hovered);
    s.hover(Vec2::new(5.0, 5.0));
    assert!(!s.store().state().ball_hovered);
}

#[test]
fn jumbotron_focus_blends_and_auto_releases() {
    let mut s = scene();
    assert!(!s.toggle_jumbotron(), "not in the jumbotron section yet");

    s.on_wheel(1250.0);
    run(&mut s, 150);
    assert_eq!(s.store().state().current_section, Section::Jumbotron);
    assert!(s.toggle_jumbotron());
    assert!(s.store().state().jumbotron_focused);
    run(&mut s, 60);
    let cam = s.camera();
    assert!(cam.position.distance(JUMBOTRON_FOCUS_POSE.position) < 1e-4);
    assert!(cam.look_at.distance(JUMBOTRON_FOCUS_POSE.look_at) < 1e-4);

    // scrolling out of the section drops the focus
    s.on_wheel(-1250.0);
    run(&mut s, 200);
    assert_ne!(s.store().state().current_section, Section::Jumbotron);
    assert!(!s.store().state().jumbotron_focused);
    assert_eq!(s.camera(), ScrollPath::default().sample(s.store().state().scroll_progress));
}

#[test]
fn reduced_motion_stops_the_idle_spin() {
    let mut s = scene();
    run(&mut s, 60);
    assert_ne!(s.ball_model(), Mat4::IDENTITY);
    s.set_reduced_motion(true);
    assert_eq!(s.tick(DT).ball_model, Mat4::IDENTITY);
}

#[test]
fn sound_toggle_flips_the_flag() {
    let mut s = scene();
    assert!(!s.store().state().sound_enabled);
    s.toggle_sound();
    assert!(s.store().state().sound_enabled);
    s.toggle_sound();
    assert!(!s.store().state().sound_enabled);
}

#[test]
fn non_finite_dt_is_ignored() {
    let mut s = scene();
    let before = s.camera();
    let out = s.tick(f32::NAN);
    assert_eq!(out.camera, before);
    s.set_viewport(f32::NAN, 0.0);
    assert_eq!(s.viewport(), Vec2::new(800.0, 600.0));
}
