// Host-side tests for tuning constants and DOM hook names.
// The web crate is wasm-only, so its constants module is included directly.

#![allow(dead_code)]
mod web_constants {
    include!("../src/constants.rs");
}

use lob_core::constants::*;
use web_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn scroll_constants_are_within_reasonable_bounds() {
    assert!(WHEEL_DELTA_SCALE > 0.0);
    // damping is a per-tick fraction
    assert!(SCROLL_DAMPING > 0.0 && SCROLL_DAMPING < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn stretch_constants_have_logical_relationships() {
    assert!(MAX_STRETCH > 0.0);
    assert!(OVER_STRETCH_THRESHOLD > 0.0 && OVER_STRETCH_THRESHOLD < 1.0);
    assert!(over_stretch_magnitude() < MAX_STRETCH);
    assert!((over_stretch_magnitude() - 0.425).abs() < 1e-6);

    // the reveal resets only after the snap-back has finished
    assert!(reveal_reset_secs() > SNAP_BACK_SECS);
    assert!((reveal_reset_secs() - 1.2).abs() < 1e-6);

    assert!(GRAB_FADE_DELAY_SECS + GRAB_FADE_SECS >= SNAP_BACK_SECS);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn transition_constants_are_sane() {
    assert!(OVERLAY_REVEAL_FRACTION > 0.0 && OVERLAY_REVEAL_FRACTION < 1.0);
    assert!(OVERLAY_CLOSE_DELAY_SECS >= 0.0);
    assert!(JUMBOTRON_FOCUS_SECS > 0.0);
    assert!(CAMERA_ZNEAR > 0.0 && CAMERA_ZFAR > CAMERA_ZNEAR);
    assert!(HERO_CAMERA_Z > BALL_RADIUS);
}

#[test]
fn overlay_element_ids_follow_naming() {
    for name in ["shop", "schedule", "words"] {
        let overlay = format!("{name}{OVERLAY_SUFFIX}");
        let close = format!("{name}{CLOSE_SUFFIX}");
        assert_ne!(overlay, close);
        assert!(overlay.ends_with("-overlay"));
    }
    assert!(!CANVAS_ID.is_empty());
    assert!(REDUCED_MOTION_QUERY.starts_with('(') && REDUCED_MOTION_QUERY.ends_with(')'));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn frame_dt_clamp_is_positive() {
    assert!(MAX_FRAME_DT_SEC > 0.0 && MAX_FRAME_DT_SEC < 1.0);
}
