use super::Wiring;
use crate::dom;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

type PointerCb = Closure<dyn FnMut(web::PointerEvent)>;

/// Window-level listeners that track one grab gesture. Dropping the guard
/// detaches them, so every way a gesture can end cleans up the same way.
pub struct GestureListeners {
    window: web::Window,
    on_move: PointerCb,
    on_up: PointerCb,
    on_cancel: PointerCb,
    on_blur: Closure<dyn FnMut(web::Event)>,
}

impl Drop for GestureListeners {
    fn drop(&mut self) {
        let w = &self.window;
        _ = w.remove_event_listener_with_callback("pointermove", self.on_move.as_ref().unchecked_ref());
        _ = w.remove_event_listener_with_callback("pointerup", self.on_up.as_ref().unchecked_ref());
        _ = w.remove_event_listener_with_callback(
            "pointercancel",
            self.on_cancel.as_ref().unchecked_ref(),
        );
        _ = w.remove_event_listener_with_callback("blur", self.on_blur.as_ref().unchecked_ref());
        log::debug!("[drag] gesture listeners detached");
    }
}

type GestureSlot = Rc<RefCell<Option<GestureListeners>>>;

/// A listener must not free its own closure while it runs, so the guard is
/// dropped on the next microtask.
fn end_gesture(slot: &GestureSlot) {
    let guard = slot.borrow_mut().take();
    if guard.is_some() {
        spawn_local(async move {
            drop(guard);
        });
    }
}

fn attach_gesture(w: &Wiring, slot: &GestureSlot) -> Option<GestureListeners> {
    let window = web::window()?;

    let on_move = {
        let w = w.clone();
        Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let pos = dom::pointer_canvas_px(&ev, &w.canvas);
            w.scene.borrow_mut().drag_move(pos);
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>)
    };
    let on_up = {
        let w = w.clone();
        let slot = slot.clone();
        Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            w.scene.borrow_mut().release();
            end_gesture(&slot);
        }) as Box<dyn FnMut(_)>)
    };
    let on_cancel = {
        let w = w.clone();
        let slot = slot.clone();
        Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            w.scene.borrow_mut().cancel_gesture();
            end_gesture(&slot);
        }) as Box<dyn FnMut(_)>)
    };
    let on_blur = {
        let w = w.clone();
        let slot = slot.clone();
        Closure::wrap(Box::new(move |_ev: web::Event| {
            w.scene.borrow_mut().cancel_gesture();
            end_gesture(&slot);
        }) as Box<dyn FnMut(_)>)
    };

    _ = window.add_event_listener_with_callback("pointermove", on_move.as_ref().unchecked_ref());
    _ = window.add_event_listener_with_callback("pointerup", on_up.as_ref().unchecked_ref());
    _ = window.add_event_listener_with_callback("pointercancel", on_cancel.as_ref().unchecked_ref());
    _ = window.add_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref());

    Some(GestureListeners {
        window,
        on_move,
        on_up,
        on_cancel,
        on_blur,
    })
}

pub fn wire_pointer_handlers(w: &Wiring) {
    let slot: GestureSlot = Rc::new(RefCell::new(None));
    // a click that ends a drag must not also count as a jumbotron click
    let dragged = Rc::new(Cell::new(false));
    wire_pointerdown(w, &slot, &dragged);
    wire_hover(w, &slot);
    wire_click(w, &dragged);
}

fn wire_pointerdown(w: &Wiring, slot: &GestureSlot, dragged: &Rc<Cell<bool>>) {
    let w = w.clone();
    let slot = slot.clone();
    let dragged = dragged.clone();
    let canvas = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = dom::pointer_canvas_px(&ev, &w.canvas);
        let grabbed = w.scene.borrow_mut().grab(pos);
        dragged.set(grabbed);
        if !grabbed {
            return;
        }
        // a stale guard from a gesture that never saw its pointerup
        drop(slot.borrow_mut().take());
        let listeners = attach_gesture(&w, &slot);
        *slot.borrow_mut() = listeners;
        log::info!("[drag] grab at ({:.0},{:.0})", pos.x, pos.y);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_hover(w: &Wiring, slot: &GestureSlot) {
    let w = w.clone();
    let slot = slot.clone();
    let canvas = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if slot.borrow().is_some() {
            return;
        }
        let pos = dom::pointer_canvas_px(&ev, &w.canvas);
        w.scene.borrow_mut().hover(pos);
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_click(w: &Wiring, dragged: &Rc<Cell<bool>>) {
    let w = w.clone();
    let dragged = dragged.clone();
    let canvas = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
        if dragged.replace(false) {
            return;
        }
        if w.scene.borrow_mut().toggle_jumbotron() {
            log::info!("[jumbotron] focus toggled");
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}
