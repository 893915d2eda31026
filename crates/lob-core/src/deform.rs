//! One-shot latch that reveals hidden content when the ball is over-stretched.

use crate::constants::{over_stretch_magnitude, reveal_reset_secs};
use crate::store::SceneStore;

/// Returned by the latch on the single call that fires it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeformFired {
    pub magnitude: f32,
}

#[derive(Clone, Debug)]
pub struct DeformLatch {
    threshold: f32,
    reset_after: f32,
    fired: bool,
    pending_reset: Option<f32>,
}

impl Default for DeformLatch {
    fn default() -> Self {
        Self::new(over_stretch_magnitude(), reveal_reset_secs())
    }
}

impl DeformLatch {
    pub fn new(threshold: f32, reset_after: f32) -> Self {
        Self {
            threshold,
            reset_after: reset_after.max(0.0),
            fired: false,
            pending_reset: None,
        }
    }

    /// Re-arm at the start of a grab. A reset scheduled by an earlier
    /// gesture keeps counting down.
    pub fn arm(&mut self) {
        self.fired = false;
    }

    #[inline]
    pub fn fired(&self) -> bool {
        self.fired
    }

    #[inline]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    #[inline]
    pub fn reset_pending(&self) -> bool {
        self.pending_reset.is_some()
    }

    /// Check the current drag magnitude; fires at most once per gesture.
    pub fn check(&mut self, magnitude: f32, store: &mut SceneStore) -> Option<DeformFired> {
        if self.fired || magnitude.is_nan() || magnitude <= self.threshold {
            return None;
        }
        self.fired = true;
        store.set_ball_deform_amount(1.0);
        log::info!("[deform] over-stretch {:.3} > {:.3}", magnitude, self.threshold);
        Some(DeformFired { magnitude })
    }

    /// Schedule the automatic reset if this gesture fired. Restarts any
    /// countdown left by an earlier gesture.
    pub fn on_release(&mut self) {
        if self.fired {
            self.pending_reset = Some(self.reset_after);
        }
    }

    /// Count down a scheduled reset. Returns true on the tick the reset
    /// was applied.
    pub fn tick(&mut self, dt: f32, store: &mut SceneStore) -> bool {
        let Some(remaining) = self.pending_reset.as_mut() else {
            return false;
        };
        if dt.is_finite() && dt > 0.0 {
            *remaining -= dt;
        }
        if *remaining > 0.0 {
            return false;
        }
        self.pending_reset = None;
        // an explicit dismissal already cleared it
        if store.state().is_revealed() {
            store.set_ball_deform_amount(0.0);
            log::debug!("[deform] reveal auto-reset");
            return true;
        }
        false
    }

    /// User closed the revealed content. Idempotent.
    pub fn dismiss(&mut self, store: &mut SceneStore) {
        self.pending_reset = None;
        store.set_ball_deform_amount(0.0);
    }
}
