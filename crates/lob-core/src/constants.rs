/// Scroll, drag and transition tuning constants.
///
/// These express intended behavior (damping factors, clamp limits, delays)
/// and keep magic numbers out of the controller code.

// Wheel scroll
pub const WHEEL_DELTA_SCALE: f32 = 0.0004; // offset units per wheel deltaY pixel
pub const SCROLL_DAMPING: f32 = 0.08; // fraction of remaining distance covered per tick

// Ball grab / stretch
pub const MAX_STRETCH: f32 = 0.5; // max local-space drag delta length
pub const OVER_STRETCH_THRESHOLD: f32 = 0.85; // fraction of MAX_STRETCH that fires the reveal
pub const SNAP_BACK_SECS: f32 = 0.8; // elastic return of the drag delta
pub const SNAP_ELASTIC_AMPLITUDE: f32 = 1.0;
pub const SNAP_ELASTIC_PERIOD: f32 = 0.3;
pub const GRAB_FADE_DELAY_SECS: f32 = 0.4; // strength holds before fading
pub const GRAB_FADE_SECS: f32 = 0.6;

// Hidden-content reveal
pub const REVEAL_HOLD_SECS: f32 = 0.4; // extra time after snap-back before auto reset

// Ball
pub const BALL_RADIUS: f32 = 1.0;
pub const BALL_SPIN_RAD_PER_SEC: f32 = 0.15; // idle spin, disabled under reduced motion

// Overlay transitions
pub const OVERLAY_REVEAL_FRACTION: f32 = 0.6; // timeline progress at which the overlay fades in
pub const OVERLAY_CLOSE_DELAY_SECS: f32 = 0.15; // camera waits for the overlay fade-out

// Jumbotron focus
pub const JUMBOTRON_FOCUS_SECS: f32 = 0.8;

// Hero camera
pub const HERO_FOV_DEG: f32 = 45.0;
pub const HERO_CAMERA_Z: f32 = 6.0;
pub const CAMERA_ZNEAR: f32 = 0.05;
pub const CAMERA_ZFAR: f32 = 100.0;

#[inline]
pub fn over_stretch_magnitude() -> f32 {
    MAX_STRETCH * OVER_STRETCH_THRESHOLD
}

#[inline]
pub fn reveal_reset_secs() -> f32 {
    SNAP_BACK_SECS + REVEAL_HOLD_SECS
}
