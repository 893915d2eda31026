//! Camera path scrubbed by the scroll offset.

use crate::camera::CameraPose;
use crate::constants::HERO_FOV_DEG;
use crate::easing::Ease;
use crate::error::ConfigError;
use glam::Vec3;
use smallvec::SmallVec;

/// Hero, court approach, court overhead, jumbotron, jumbotron close-up,
/// pull back to the ball.
const DEFAULT_KEYFRAMES: [CameraPose; 6] = [
    key(0.0, 0.0, 6.0, Vec3::ZERO),
    key(0.0, 3.0, 5.0, Vec3::new(0.0, -1.0, -5.0)),
    key(0.0, 5.0, 2.0, Vec3::new(0.0, 0.0, -8.0)),
    key(4.0, 3.0, -4.0, Vec3::new(0.0, 2.0, -12.0)),
    key(0.0, 2.5, -6.0, Vec3::new(0.0, 3.0, -15.0)),
    key(0.0, 0.0, 4.0, Vec3::ZERO),
];

const fn key(x: f32, y: f32, z: f32, look_at: Vec3) -> CameraPose {
    CameraPose::new(x, y, z, HERO_FOV_DEG).looking_at(look_at)
}

/// Keyframes spread evenly over the scroll range, each segment eased.
#[derive(Clone, Debug)]
pub struct ScrollPath {
    keys: SmallVec<[CameraPose; 8]>,
    ease: Ease,
}

impl Default for ScrollPath {
    fn default() -> Self {
        Self {
            keys: SmallVec::from_slice(&DEFAULT_KEYFRAMES),
            ease: Ease::Power2InOut,
        }
    }
}

impl ScrollPath {
    pub fn new(
        keys: impl IntoIterator<Item = CameraPose>,
        ease: Ease,
    ) -> Result<Self, ConfigError> {
        let keys: SmallVec<[CameraPose; 8]> = keys.into_iter().collect();
        if keys.len() < 2 {
            return Err(ConfigError::ShortScrollPath(keys.len()));
        }
        Ok(Self { keys, ease })
    }

    #[inline]
    pub fn keyframes(&self) -> &[CameraPose] {
        &self.keys
    }

    /// Pose at scroll `offset` in [0, 1].
    pub fn sample(&self, offset: f32) -> CameraPose {
        let o = if offset.is_finite() {
            offset.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let segments = self.keys.len() - 1;
        let scaled = o * segments as f32;
        let index = (scaled.floor() as usize).min(segments - 1);
        let local = scaled - index as f32;
        self.keys[index].lerp(&self.keys[index + 1], self.ease.apply(local))
    }
}
