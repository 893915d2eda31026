use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    match document.get_element_by_id(element_id) {
        Some(el) => {
            let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::Event| {
                ev.prevent_default();
                handler();
            }) as Box<dyn FnMut(_)>);
            _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        None => log::debug!("[dom] #{} not found, click not wired", element_id),
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Pointer position in canvas backing pixels.
#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let w = (rect.width() as f32).max(1.0);
    let h = (rect.height() as f32).max(1.0);
    Vec2::new(
        x_css / w * canvas.width() as f32,
        y_css / h * canvas.height() as f32,
    )
}

pub fn set_class(document: &web::Document, element_id: &str, class: &str, on: bool) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let cl = el.class_list();
        _ = if on { cl.add_1(class) } else { cl.remove_1(class) };
    }
}

pub fn set_body_attr(document: &web::Document, name: &str, value: &str) {
    if let Some(body) = document.body() {
        _ = body.set_attribute(name, value);
    }
}

pub fn set_body_class(document: &web::Document, class: &str, on: bool) {
    if let Some(body) = document.body() {
        let cl = body.class_list();
        _ = if on { cl.add_1(class) } else { cl.remove_1(class) };
    }
}

pub fn current_path() -> String {
    web::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}
