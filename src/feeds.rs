use crate::constants::{EVENTS_FEED_URL, POSTS_FEED_URL};
use crate::overlay;
use lob_core::feed::{self, EventRecord, FeedState, PostRecord};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {}: {:?}", url, e))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("fetch {}: not a Response: {:?}", url, e))?;
    if !resp.ok() {
        anyhow::bail!("fetch {}: HTTP {}", url, resp.status());
    }
    let text: js_sys::Promise = resp
        .text()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let text = JsFuture::from(text)
        .await
        .map_err(|e| anyhow::anyhow!("read {}: {:?}", url, e))?;
    Ok(text.as_string().unwrap_or_default())
}

async fn load_events() -> FeedState<EventRecord> {
    match fetch_text(EVENTS_FEED_URL).await {
        Ok(body) => feed::parse_events(&body),
        Err(e) => {
            log::warn!("[feed] {:?}", e);
            FeedState::Empty
        }
    }
}

async fn load_posts() -> FeedState<PostRecord> {
    match fetch_text(POSTS_FEED_URL).await {
        Ok(body) => feed::parse_posts(&body),
        Err(e) => {
            log::warn!("[feed] {:?}", e);
            FeedState::Empty
        }
    }
}

/// Show the loading state, then fill both lists in the background. The
/// scene never waits on this.
pub fn spawn_feed_loads(document: &web::Document) {
    overlay::render_events(document, &FeedState::Loading);
    overlay::render_posts(document, &FeedState::Loading);

    let doc = document.clone();
    spawn_local(async move {
        let events = load_events().await;
        log::info!("[feed] events: {}", events.items().len());
        overlay::render_events(&doc, &events);
    });
    let doc = document.clone();
    spawn_local(async move {
        let posts = load_posts().await;
        log::info!("[feed] posts: {}", posts.items().len());
        overlay::render_posts(&doc, &posts);
    });
}
