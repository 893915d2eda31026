//! Upcoming events and blog posts shown in the schedule and words overlays.
//!
//! Both feeds are static JSON produced at build time. A missing or broken
//! feed degrades to the empty state and is never fatal.

use crate::error::FeedError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub name: String,
    pub start_at: String,
    pub end_at: String,
    #[serde(default)]
    pub cover_url: Option<String>,
    pub url: String,
    #[serde(default)]
    pub location: String,
}

impl EventRecord {
    pub fn starts(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.start_at)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub link: String,
    pub published_at: String,
    #[serde(default)]
    pub cover_url: Option<String>,
}

impl PostRecord {
    pub fn published(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.published_at)
    }
}

/// What an overlay list shows.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum FeedState<T> {
    #[default]
    Loading,
    Empty,
    Ready(Vec<T>),
}

impl<T> FeedState<T> {
    pub fn from_items(items: Vec<T>) -> Self {
        if items.is_empty() {
            FeedState::Empty
        } else {
            FeedState::Ready(items)
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            FeedState::Ready(items) => items,
            _ => &[],
        }
    }
}

pub fn decode_events(body: &str) -> Result<Vec<EventRecord>, FeedError> {
    if body.trim().is_empty() {
        return Err(FeedError::EmptyBody);
    }
    let mut events: Vec<EventRecord> = serde_json::from_str(body)?;
    // soonest first; unparseable dates sink to the end
    events.sort_by_key(|e| e.starts().map_or(i64::MAX, |d| d.timestamp()));
    Ok(events)
}

pub fn decode_posts(body: &str) -> Result<Vec<PostRecord>, FeedError> {
    if body.trim().is_empty() {
        return Err(FeedError::EmptyBody);
    }
    Ok(serde_json::from_str(body)?)
}

pub fn parse_events(body: &str) -> FeedState<EventRecord> {
    match decode_events(body) {
        Ok(events) => FeedState::from_items(events),
        Err(e) => {
            log::warn!("[feed] events unavailable: {}", e);
            FeedState::Empty
        }
    }
}

pub fn parse_posts(body: &str) -> FeedState<PostRecord> {
    match decode_posts(body) {
        Ok(posts) => FeedState::from_items(posts),
        Err(e) => {
            log::warn!("[feed] posts unavailable: {}", e);
            FeedState::Empty
        }
    }
}

/// Feed link usable as an `href`: only `http:` and `https:` pass.
pub fn safe_link(raw: &str) -> Option<&str> {
    let link = raw.trim();
    let scheme = link.split_once(':').map(|(s, _)| s.to_ascii_lowercase());
    match scheme.as_deref() {
        Some("http" | "https") => Some(link),
        _ => None,
    }
}

/// RFC 3339 (event API) or RFC 2822 (RSS `pubDate`).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// "Sat, Mar 8"
pub fn format_event_date(raw: &str) -> String {
    format_or_raw(raw, "%a, %b %-d")
}

/// "7:00 PM"
pub fn format_event_time(raw: &str) -> String {
    format_or_raw(raw, "%-I:%M %p")
}

/// "Sat, Mar 8, 2025"
pub fn format_post_date(raw: &str) -> String {
    format_or_raw(raw, "%a, %b %-d, %Y")
}

fn format_or_raw(raw: &str, fmt: &str) -> String {
    match parse_timestamp(raw) {
        Some(d) => d.format(fmt).to_string(),
        None => raw.to_string(),
    }
}
