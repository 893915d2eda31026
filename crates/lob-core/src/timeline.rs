//! Explicit animation timelines advanced by the frame loop.
//!
//! A timeline interpolates a value from `from` to `to` over a delay plus a
//! duration, optionally flags a cue once its progress crosses a fraction,
//! and reports completion exactly once. Cancelling makes every later
//! `step` a no-op, so a cancelled timeline can never report completion.

use crate::camera::CameraPose;
use crate::easing::{lerp, Ease};
use crate::overlay::Leg;
use glam::Vec3;

/// Values a timeline can interpolate.
pub trait Tween: Copy {
    fn tween(&self, to: &Self, t: f32) -> Self;
}

impl Tween for f32 {
    #[inline]
    fn tween(&self, to: &Self, t: f32) -> Self {
        lerp(*self, *to, t)
    }
}

impl Tween for Vec3 {
    #[inline]
    fn tween(&self, to: &Self, t: f32) -> Self {
        // elastic curves overshoot, so no clamping of t here
        *self + (*to - *self) * t
    }
}

impl Tween for CameraPose {
    #[inline]
    fn tween(&self, to: &Self, t: f32) -> Self {
        self.lerp(to, t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimelineState {
    Running,
    Completed,
    Cancelled,
}

/// Outcome of advancing a running timeline by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineStep<T> {
    pub value: T,
    /// Linear time progress in [0, 1], excluding the delay.
    pub progress: f32,
    /// The cue fraction was crossed during this step.
    pub cue_crossed: bool,
    /// The timeline finished during this step.
    pub completed: bool,
}

#[derive(Clone, Debug)]
pub struct Timeline<T: Tween> {
    from: T,
    to: T,
    delay: f32,
    duration: f32,
    ease: Ease,
    elapsed: f32,
    cue: Option<f32>,
    cue_fired: bool,
    state: TimelineState,
}

impl<T: Tween> Timeline<T> {
    pub fn new(from: T, to: T, leg: Leg) -> Self {
        Self {
            from,
            to,
            delay: leg.delay.max(0.0),
            duration: leg.duration.max(0.0),
            ease: leg.ease,
            elapsed: 0.0,
            cue: None,
            cue_fired: false,
            state: TimelineState::Running,
        }
    }

    /// Flag `cue_crossed` on the step where progress first reaches `at`.
    pub fn with_cue(mut self, at: f32) -> Self {
        self.cue = Some(at.clamp(0.0, 1.0));
        self
    }

    #[inline]
    pub fn state(&self) -> TimelineState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == TimelineState::Running
    }

    /// Stop without completing. Idempotent; a completed timeline stays
    /// completed.
    pub fn cancel(&mut self) {
        if self.state == TimelineState::Running {
            self.state = TimelineState::Cancelled;
        }
    }

    pub fn progress(&self) -> f32 {
        let active = (self.elapsed - self.delay).max(0.0);
        if self.duration <= f32::EPSILON {
            return if self.elapsed >= self.delay { 1.0 } else { 0.0 };
        }
        (active / self.duration).clamp(0.0, 1.0)
    }

    /// Interpolated value at the current elapsed time.
    pub fn value(&self) -> T {
        match self.state {
            TimelineState::Completed => self.to,
            _ => self.from.tween(&self.to, self.ease.apply(self.progress())),
        }
    }

    /// Advance by `dt` seconds. Returns `None` once the timeline is no
    /// longer running.
    pub fn step(&mut self, dt: f32) -> Option<TimelineStep<T>> {
        if self.state != TimelineState::Running {
            return None;
        }
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        let progress = self.progress();
        let cue_crossed = match self.cue {
            Some(at) if !self.cue_fired && progress >= at && self.elapsed >= self.delay => {
                self.cue_fired = true;
                true
            }
            _ => false,
        };
        let completed = progress >= 1.0;
        let value = if completed {
            self.to
        } else {
            self.from.tween(&self.to, self.ease.apply(progress))
        };
        if completed {
            self.state = TimelineState::Completed;
        }
        Some(TimelineStep {
            value,
            progress,
            cue_crossed,
            completed,
        })
    }
}
