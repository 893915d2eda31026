use crate::constants::*;
use crate::dom;
use lob_core::feed::{self, EventRecord, FeedState, PostRecord};
use lob_core::{Overlay, SceneField, SceneState, SceneStore};
use web_sys as web;

fn overlay_id(overlay: Overlay) -> String {
    format!("{}{}", overlay.name(), OVERLAY_SUFFIX)
}

pub fn close_button_id(overlay: Overlay) -> String {
    format!("{}{}", overlay.name(), CLOSE_SUFFIX)
}

/// Mirror store changes onto the page. Also applies the current state once.
pub fn bind(document: &web::Document, store: &mut SceneStore) {
    apply_all(document, store.state());
    let doc = document.clone();
    store.subscribe(move |field, state| apply(&doc, field, state));
}

fn apply_all(document: &web::Document, state: &SceneState) {
    for o in Overlay::ALL {
        apply(document, SceneField::OverlayVisible(o), state);
    }
    for field in [
        SceneField::CurrentSection,
        SceneField::SoundEnabled,
        SceneField::BallDeformAmount,
        SceneField::BallHovered,
    ] {
        apply(document, field, state);
    }
}

fn apply(document: &web::Document, field: SceneField, state: &SceneState) {
    match field {
        SceneField::OverlayVisible(o) => {
            dom::set_class(document, &overlay_id(o), VISIBLE_CLASS, state.is_visible(o));
        }
        SceneField::CurrentSection => {
            dom::set_body_attr(document, SECTION_ATTR, state.current_section.as_str());
        }
        SceneField::SoundEnabled => {
            let value = if state.sound_enabled { "on" } else { "off" };
            dom::set_body_attr(document, SOUND_ATTR, value);
            if let Some(el) = document.get_element_by_id(SOUND_TOGGLE_ID) {
                _ = el.set_attribute("aria-pressed", &state.sound_enabled.to_string());
            }
        }
        SceneField::BallDeformAmount => {
            dom::set_class(document, REVEAL_LAYER_ID, VISIBLE_CLASS, state.is_revealed());
        }
        SceneField::BallHovered => {
            dom::set_body_class(document, HOVER_CLASS, state.ball_hovered);
        }
        _ => {}
    }
}

pub fn render_events(document: &web::Document, events: &FeedState<EventRecord>) {
    let html = match events {
        FeedState::Loading => loading_html(),
        FeedState::Empty => empty_html("No upcoming events. Check back soon."),
        FeedState::Ready(list) => list.iter().map(event_html).collect(),
    };
    set_list(document, EVENTS_LIST_ID, &html);
}

pub fn render_posts(document: &web::Document, posts: &FeedState<PostRecord>) {
    let html = match posts {
        FeedState::Loading => loading_html(),
        FeedState::Empty => empty_html("No posts yet."),
        FeedState::Ready(list) => list.iter().map(post_html).collect(),
    };
    set_list(document, POSTS_LIST_ID, &html);
}

fn set_list(document: &web::Document, id: &str, html: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_inner_html(html);
    }
}

fn loading_html() -> String {
    "<div class='feed-loading'>Loading…</div>".to_string()
}

fn empty_html(message: &str) -> String {
    format!("<div class='feed-empty'>{}</div>", escape(message))
}

fn event_html(ev: &EventRecord) -> String {
    let cover = ev
        .cover_url
        .as_deref()
        .and_then(feed::safe_link)
        .map(|url| format!("<img class='event-cover' src='{}' alt=''>", escape(url)))
        .unwrap_or_default();
    format!(
        "<a class='event-card' href='{}' target='_blank' rel='noopener'>{}\
         <div class='event-name'>{}</div>\
         <div class='event-when'>{} &middot; {}</div>\
         <div class='event-where'>{}</div></a>",
        escape(href(&ev.url)),
        cover,
        escape(&ev.name),
        escape(&feed::format_event_date(&ev.start_at)),
        escape(&feed::format_event_time(&ev.start_at)),
        escape(&ev.location),
    )
}

fn post_html(post: &PostRecord) -> String {
    let cover = post
        .cover_url
        .as_deref()
        .and_then(feed::safe_link)
        .map(|url| format!("<img class='post-cover' src='{}' alt=''>", escape(url)))
        .unwrap_or_default();
    format!(
        "<a class='post-card' href='{}' target='_blank' rel='noopener'>{}\
         <div class='post-date'>{}</div>\
         <div class='post-title'>{}</div>\
         <div class='post-description'>{}</div></a>",
        escape(href(&post.link)),
        cover,
        escape(&feed::format_post_date(&post.published_at)),
        escape(&post.title),
        escape(&post.description),
    )
}

fn href(raw: &str) -> &str {
    feed::safe_link(raw).unwrap_or("#")
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
