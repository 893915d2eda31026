//! Discrete scroll sections and the offset → section classifier.

use crate::error::ConfigError;
use crate::overlay::Overlay;
use smallvec::SmallVec;
use std::fmt;

/// Named phase of the scroll narrative, or an overlay phase entered through
/// the transition controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Hero,
    Court,
    Jumbotron,
    ShopTransition,
    Shop,
    ScheduleTransition,
    Schedule,
    WordsTransition,
    Words,
}

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Hero => "hero",
            Section::Court => "court",
            Section::Jumbotron => "jumbotron",
            Section::ShopTransition => "shop-transition",
            Section::Shop => "shop",
            Section::ScheduleTransition => "schedule-transition",
            Section::Schedule => "schedule",
            Section::WordsTransition => "words-transition",
            Section::Words => "words",
        }
    }

    /// Overlay this section belongs to, if it is an overlay's resting section.
    pub fn terminal_overlay(self) -> Option<Overlay> {
        match self {
            Section::Shop => Some(Overlay::Shop),
            Section::Schedule => Some(Overlay::Schedule),
            Section::Words => Some(Overlay::Words),
            _ => None,
        }
    }

    /// Wheel input must not leak into overlay scrolling.
    #[inline]
    pub fn suppresses_wheel(self) -> bool {
        self.terminal_overlay().is_some()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionRange {
    pub section: Section,
    pub start: f32,
    pub end: f32,
}

/// Ordered, contiguous ranges covering [0, 1]. The last range is
/// right-inclusive so 1.0 always classifies.
#[derive(Clone, Debug)]
pub struct SectionMap {
    ranges: SmallVec<[SectionRange; 8]>,
}

impl SectionMap {
    pub fn new(
        ranges: impl IntoIterator<Item = (Section, f32, f32)>,
    ) -> Result<Self, ConfigError> {
        let ranges: SmallVec<[SectionRange; 8]> = ranges
            .into_iter()
            .map(|(section, start, end)| SectionRange {
                section,
                start,
                end,
            })
            .collect();
        validate(&ranges)?;
        Ok(Self { ranges })
    }

    /// Return the section containing `offset`. Out-of-range and NaN offsets
    /// are clamped into [0, 1] first.
    pub fn classify(&self, offset: f32) -> Section {
        let o = if offset.is_nan() {
            0.0
        } else {
            offset.clamp(0.0, 1.0)
        };
        for r in &self.ranges {
            if o >= r.start && o < r.end {
                return r.section;
            }
        }
        // validated non-empty
        self.ranges[self.ranges.len() - 1].section
    }

    pub fn ranges(&self) -> &[SectionRange] {
        &self.ranges
    }

    pub fn range_of(&self, section: Section) -> Option<SectionRange> {
        self.ranges.iter().copied().find(|r| r.section == section)
    }
}

impl Default for SectionMap {
    fn default() -> Self {
        Self {
            ranges: SmallVec::from_slice(&DEFAULT_SECTIONS),
        }
    }
}

pub const DEFAULT_SECTIONS: [SectionRange; 5] = [
    SectionRange {
        section: Section::Hero,
        start: 0.0,
        end: 0.2,
    },
    SectionRange {
        section: Section::Court,
        start: 0.2,
        end: 0.4,
    },
    SectionRange {
        section: Section::Jumbotron,
        start: 0.4,
        end: 0.65,
    },
    SectionRange {
        section: Section::ShopTransition,
        start: 0.65,
        end: 0.85,
    },
    SectionRange {
        section: Section::Shop,
        start: 0.85,
        end: 1.0,
    },
];

fn validate(ranges: &[SectionRange]) -> Result<(), ConfigError> {
    let (first, last) = match (ranges.first(), ranges.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Err(ConfigError::EmptySections),
    };
    if first.start != 0.0 {
        return Err(ConfigError::SectionsStartAfterZero {
            section: first.section,
            start: first.start,
        });
    }
    if last.end != 1.0 {
        return Err(ConfigError::SectionsEndBeforeOne {
            section: last.section,
            end: last.end,
        });
    }
    for r in ranges {
        let ordered = r.start < r.end;
        if !ordered {
            return Err(ConfigError::InvertedRange {
                section: r.section,
                start: r.start,
                end: r.end,
            });
        }
    }
    for pair in ranges.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if next.start > prev.end {
            return Err(ConfigError::SectionGap {
                previous: prev.section,
                previous_end: prev.end,
                next: next.section,
                next_start: next.start,
            });
        }
        if next.start < prev.end {
            return Err(ConfigError::SectionOverlap {
                previous: prev.section,
                previous_end: prev.end,
                next: next.section,
                next_start: next.start,
            });
        }
    }
    Ok(())
}
