//! Full-screen overlays and the table that configures their transitions.

use crate::camera::CameraPose;
use crate::constants::{OVERLAY_CLOSE_DELAY_SECS, OVERLAY_REVEAL_FRACTION};
use crate::easing::Ease;
use crate::error::ConfigError;
use crate::section::Section;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Overlay {
    Shop,
    Schedule,
    Words,
}

impl Overlay {
    pub const ALL: [Overlay; 3] = [Overlay::Shop, Overlay::Schedule, Overlay::Words];
    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Overlay::Shop => 0,
            Overlay::Schedule => 1,
            Overlay::Words => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Overlay::Shop => "shop",
            Overlay::Schedule => "schedule",
            Overlay::Words => "words",
        }
    }

    /// Section the scene sits in while this overlay is animating in.
    pub fn transition_section(self) -> Section {
        match self {
            Overlay::Shop => Section::ShopTransition,
            Overlay::Schedule => Section::ScheduleTransition,
            Overlay::Words => Section::WordsTransition,
        }
    }

    /// Section the scene rests in once this overlay is open.
    pub fn section(self) -> Section {
        match self {
            Overlay::Shop => Section::Shop,
            Overlay::Schedule => Section::Schedule,
            Overlay::Words => Section::Words,
        }
    }
}

impl fmt::Display for Overlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One leg of an overlay transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Leg {
    pub delay: f32,
    pub duration: f32,
    pub ease: Ease,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayConfig {
    /// Camera pose the opening transition flies to.
    pub camera: CameraPose,
    pub open: Leg,
    pub close: Leg,
    /// Fraction of the opening timeline at which the overlay becomes visible.
    pub reveal_at: f32,
}

/// Per-overlay transition data. Adding an overlay means adding a row here,
/// not a new branch in the controller.
#[derive(Clone, Debug)]
pub struct OverlayTable {
    rows: [OverlayConfig; Overlay::COUNT],
    home: CameraPose,
}

impl OverlayTable {
    pub fn new(
        rows: [OverlayConfig; Overlay::COUNT],
        home: CameraPose,
    ) -> Result<Self, ConfigError> {
        for o in Overlay::ALL {
            validate_row(o, &rows[o.index()])?;
        }
        Ok(Self { rows, home })
    }

    #[inline]
    pub fn get(&self, overlay: Overlay) -> &OverlayConfig {
        &self.rows[overlay.index()]
    }

    /// Pose the closing transitions return to.
    #[inline]
    pub fn home(&self) -> CameraPose {
        self.home
    }
}

impl Default for OverlayTable {
    fn default() -> Self {
        Self {
            rows: [SHOP, SCHEDULE, WORDS],
            home: CameraPose::HERO,
        }
    }
}

// Narrow fov at close range reads as flying into the ball.
pub const SHOP: OverlayConfig = OverlayConfig {
    camera: CameraPose::new(0.0, 0.0, 0.3, 15.0),
    open: Leg {
        delay: 0.0,
        duration: 1.2,
        ease: Ease::Power3InOut,
    },
    close: Leg {
        delay: OVERLAY_CLOSE_DELAY_SECS,
        duration: 1.0,
        ease: Ease::Power2InOut,
    },
    reveal_at: OVERLAY_REVEAL_FRACTION,
};

pub const SCHEDULE: OverlayConfig = OverlayConfig {
    camera: CameraPose::new(0.0, 1.2, 9.5, 55.0),
    open: Leg {
        delay: 0.0,
        duration: 1.0,
        ease: Ease::Power2InOut,
    },
    close: Leg {
        delay: OVERLAY_CLOSE_DELAY_SECS,
        duration: 0.9,
        ease: Ease::Power2InOut,
    },
    reveal_at: OVERLAY_REVEAL_FRACTION,
};

pub const WORDS: OverlayConfig = OverlayConfig {
    camera: CameraPose::new(0.0, -1.2, 9.5, 55.0),
    open: Leg {
        delay: 0.0,
        duration: 1.0,
        ease: Ease::Power2InOut,
    },
    close: Leg {
        delay: OVERLAY_CLOSE_DELAY_SECS,
        duration: 0.9,
        ease: Ease::Power2InOut,
    },
    reveal_at: OVERLAY_REVEAL_FRACTION,
};

fn validate_row(overlay: Overlay, row: &OverlayConfig) -> Result<(), ConfigError> {
    let bad = |reason: &str| ConfigError::InvalidOverlay {
        overlay: overlay.name(),
        reason: reason.to_string(),
    };
    if !(0.0..=1.0).contains(&row.reveal_at) {
        return Err(bad("reveal fraction must be within [0, 1]"));
    }
    for leg in [row.open, row.close] {
        if !(leg.duration.is_finite() && leg.duration >= 0.0) {
            return Err(bad("durations must be finite and non-negative"));
        }
        if !(leg.delay.is_finite() && leg.delay >= 0.0) {
            return Err(bad("delays must be finite and non-negative"));
        }
    }
    if !(row.camera.fov > 0.0 && row.camera.fov < 180.0) {
        return Err(bad("camera fov must be within (0, 180) degrees"));
    }
    Ok(())
}
