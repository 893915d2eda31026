use crate::section::Section;
use thiserror::Error;

/// Configuration mistakes in the data tables that drive the controller.
///
/// These are programming errors in a table, not runtime conditions; the
/// default tables are checked by the test suite.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("section map is empty")]
    EmptySections,
    #[error("section map must start at 0.0 (first range `{section}` starts at {start})")]
    SectionsStartAfterZero { section: Section, start: f32 },
    #[error("section map must end at 1.0 (last range `{section}` ends at {end})")]
    SectionsEndBeforeOne { section: Section, end: f32 },
    #[error("section `{section}` has an empty or inverted range [{start}, {end})")]
    InvertedRange { section: Section, start: f32, end: f32 },
    #[error("gap between `{previous}` (ends {previous_end}) and `{next}` (starts {next_start})")]
    SectionGap {
        previous: Section,
        previous_end: f32,
        next: Section,
        next_start: f32,
    },
    #[error("`{previous}` (ends {previous_end}) overlaps `{next}` (starts {next_start})")]
    SectionOverlap {
        previous: Section,
        previous_end: f32,
        next: Section,
        next_start: f32,
    },
    #[error("overlay `{overlay}`: {reason}")]
    InvalidOverlay { overlay: &'static str, reason: String },
    #[error("scroll path needs at least two keyframes, got {0}")]
    ShortScrollPath(usize),
}

/// Failures while decoding an upstream feed. Always degraded to an empty
/// list by the caller.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("feed body is empty")]
    EmptyBody,
}
