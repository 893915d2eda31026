pub mod keyboard;
pub mod nav;
pub mod pointer;
pub mod wheel;

use crate::audio::SoundBoard;
use lob_core::Scene;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Handles every listener closes over.
#[derive(Clone)]
pub struct Wiring {
    pub scene: Rc<RefCell<Scene>>,
    pub sound: Rc<RefCell<SoundBoard>>,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
}

pub fn wire_all(w: &Wiring) {
    pointer::wire_pointer_handlers(w);
    wheel::wire_wheel(w);
    nav::wire_nav(w);
    nav::wire_popstate(w);
    keyboard::wire_global_keydown(w);
    keyboard::wire_reduced_motion(w);
}
