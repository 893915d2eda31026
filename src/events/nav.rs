use super::Wiring;
use crate::constants::*;
use crate::dom;
use crate::overlay::close_button_id;
use lob_core::Overlay;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Record an app-driven location change without a reload.
pub fn push_history(path: &str) {
    let Some(window) = web::window() else {
        return;
    };
    if window.location().pathname().ok().as_deref() == Some(path) {
        return;
    }
    match window.history() {
        Ok(history) => {
            if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(path)) {
                log::warn!("[route] pushState {} failed: {:?}", path, e);
            }
        }
        Err(e) => log::warn!("[route] no history: {:?}", e),
    }
}

pub fn wire_nav(w: &Wiring) {
    let doc = &w.document;

    let wh = w.clone();
    dom::add_click_listener(doc, NAV_HOME_ID, move || {
        wh.scene.borrow_mut().go_home();
    });

    for (id, overlay) in [
        (NAV_SHOP_ID, Overlay::Shop),
        (NAV_SCHEDULE_ID, Overlay::Schedule),
        (NAV_WORDS_ID, Overlay::Words),
    ] {
        let wo = w.clone();
        dom::add_click_listener(doc, id, move || {
            wo.scene.borrow_mut().request_open(overlay);
        });
    }

    for overlay in Overlay::ALL {
        let wc = w.clone();
        dom::add_click_listener(doc, &close_button_id(overlay), move || {
            wc.scene.borrow_mut().request_close(overlay);
        });
    }

    let ws = w.clone();
    dom::add_click_listener(doc, SOUND_TOGGLE_ID, move || {
        ws.scene.borrow_mut().toggle_sound();
        ws.sound.borrow_mut().unlock();
    });

    let wd = w.clone();
    dom::add_click_listener(doc, REVEAL_DISMISS_ID, move || {
        wd.scene.borrow_mut().dismiss_reveal();
    });

    let wj = w.clone();
    dom::add_click_listener(doc, JUMBOTRON_HOTSPOT_ID, move || {
        wj.scene.borrow_mut().toggle_jumbotron();
    });
}

/// Back/forward: reconcile overlays with the new location.
pub fn wire_popstate(w: &Wiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::PopStateEvent| {
        let path = dom::current_path();
        let action = w.scene.borrow_mut().on_location_change(&path);
        log::info!("[route] popstate {} -> {:?}", path, action);
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
