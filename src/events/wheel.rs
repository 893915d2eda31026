use super::Wiring;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// WheelEvent.deltaMode
const DOM_DELTA_LINE: u32 = 1;
const DOM_DELTA_PAGE: u32 = 2;
const LINE_HEIGHT_PX: f64 = 16.0;

/// Wheel delta normalized to pixels.
fn delta_px(ev: &web::WheelEvent) -> f32 {
    let dy = ev.delta_y();
    let px = match ev.delta_mode() {
        DOM_DELTA_LINE => dy * LINE_HEIGHT_PX,
        DOM_DELTA_PAGE => {
            let page = web::window()
                .and_then(|w| w.inner_height().ok())
                .and_then(|h| h.as_f64())
                .unwrap_or(800.0);
            dy * page
        }
        _ => dy,
    };
    px as f32
}

pub fn wire_wheel(w: &Wiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        if w.scene.borrow_mut().on_wheel(delta_px(&ev)) {
            ev.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(window) = web::window() {
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(false);
        _ = window.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            closure.as_ref().unchecked_ref(),
            &opts,
        );
    }
    closure.forget();
}
