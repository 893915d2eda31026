use super::Wiring;
use crate::constants::REDUCED_MOTION_QUERY;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// True when the key press is aimed at a text field.
fn typing_into_field(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"))
        .unwrap_or(false)
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, w: &Wiring) {
    if ev.ctrl_key() || ev.meta_key() || ev.alt_key() || typing_into_field(ev) {
        return;
    }
    match ev.key().as_str() {
        "Escape" => {
            w.scene.borrow_mut().escape();
            ev.prevent_default();
        }
        "m" | "M" => {
            w.scene.borrow_mut().toggle_sound();
            w.sound.borrow_mut().unlock();
        }
        _ => {}
    }
}

pub fn wire_global_keydown(w: &Wiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_global_keydown(&ev, &w);
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Follow the OS reduced-motion preference, including live changes.
pub fn wire_reduced_motion(w: &Wiring) {
    let Some(mql) = web::window().and_then(|win| win.match_media(REDUCED_MOTION_QUERY).ok().flatten())
    else {
        return;
    };
    w.scene.borrow_mut().set_reduced_motion(mql.matches());

    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MediaQueryListEvent| {
        w.scene.borrow_mut().set_reduced_motion(ev.matches());
    }) as Box<dyn FnMut(_)>);
    _ = mql.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
    closure.forget();
}
