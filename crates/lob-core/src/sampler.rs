use crate::constants::{SCROLL_DAMPING, WHEEL_DELTA_SCALE};
use crate::section::Section;

/// One damped scroll reading.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollSample {
    pub offset: f32,
    pub velocity: f32,
}

/// Wheel input accumulated into a clamped target, displayed through an
/// exponential damper.
///
/// Wheel events only move the target; `tick` moves the displayed offset one
/// damping step toward it. `tick` is stateful and must run exactly once per
/// frame.
#[derive(Clone, Debug)]
pub struct ScrollSampler {
    target: f32,
    current: f32,
    wheel_scale: f32,
    damping: f32,
}

impl Default for ScrollSampler {
    fn default() -> Self {
        Self::new(WHEEL_DELTA_SCALE, SCROLL_DAMPING)
    }
}

impl ScrollSampler {
    pub fn new(wheel_scale: f32, damping: f32) -> Self {
        Self {
            target: 0.0,
            current: 0.0,
            wheel_scale,
            damping: damping.clamp(1e-4, 1.0),
        }
    }

    /// Feed one wheel event. Returns false when the event was ignored
    /// (terminal overlay section, or a malformed delta).
    pub fn on_wheel(&mut self, delta_y: f32, section: Section) -> bool {
        if section.suppresses_wheel() || !delta_y.is_finite() {
            return false;
        }
        self.target = (self.target + delta_y * self.wheel_scale).clamp(0.0, 1.0);
        true
    }

    /// Set the target directly (clamped). Used for programmatic scrolls.
    pub fn set_target(&mut self, target: f32) {
        if target.is_finite() {
            self.target = target.clamp(0.0, 1.0);
        }
    }

    /// Advance the damper by one frame.
    pub fn tick(&mut self) -> ScrollSample {
        let previous = self.current;
        self.current += (self.target - self.current) * self.damping;
        self.current = self.current.clamp(0.0, 1.0);
        ScrollSample {
            offset: self.current,
            velocity: self.current - previous,
        }
    }

    /// Jump both target and displayed offset.
    pub fn reset(&mut self, offset: f32) {
        let o = if offset.is_finite() {
            offset.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.target = o;
        self.current = o;
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }
}
