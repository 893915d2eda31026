//! Easing curves used by timelines and the drag snap-back.
//!
//! Names follow the tweening vocabulary the site was designed with
//! (`power2.inOut`, `elastic.out(1, 0.3)`, ...). All curves take and clamp
//! `t` to [0, 1] and map 0 → 0 and 1 → 1.

use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    /// Cubic ease-out (`power2` counts from power0 = linear).
    Power2Out,
    /// Cubic ease-in-out.
    Power2InOut,
    /// Quartic ease-in-out.
    Power3InOut,
    /// Overshooting spring with the given amplitude and period.
    ElasticOut { amplitude: f32, period: f32 },
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Ease::Linear => t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power2InOut => power_in_out(t, 3),
            Ease::Power3InOut => power_in_out(t, 4),
            Ease::ElasticOut { amplitude, period } => elastic_out(t, amplitude, period),
        }
    }
}

#[inline]
fn power_in_out(t: f32, exp: i32) -> f32 {
    if t < 0.5 {
        0.5 * (2.0 * t).powi(exp)
    } else {
        1.0 - 0.5 * (2.0 * (1.0 - t)).powi(exp)
    }
}

fn elastic_out(t: f32, amplitude: f32, period: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let a = amplitude.max(1.0);
    let p = period.max(1e-3);
    let s = p / TAU * (1.0 / a).asin();
    a * 2f32.powf(-10.0 * t) * ((t - s) * TAU / p).sin() + 1.0
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
