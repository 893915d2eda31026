use crate::audio::SoundBoard;
use crate::constants::MAX_FRAME_DT_SEC;
use crate::events::nav;
use crate::render;
use instant::Instant;
use lob_core::{Scene, TransitionEvent};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub scene: Rc<RefCell<Scene>>,
    pub sound: Rc<RefCell<SoundBoard>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant)
            .as_secs_f32()
            .min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        let w = self.canvas.width();
        let h = self.canvas.height();

        let (out, cues, sound_on, revealed, hovered) = {
            let mut scene = self.scene.borrow_mut();
            scene.set_viewport(w as f32, h as f32);
            let out = scene.tick(dt_sec);
            let cues = scene.drain_cues();
            let state = scene.store().state();
            (
                out,
                cues,
                state.sound_enabled,
                state.is_revealed(),
                state.ball_hovered,
            )
        }; // scene borrow released before touching the DOM

        for ev in &out.events {
            match ev {
                TransitionEvent::Started { kind, origin, .. } => {
                    log::info!("[frame] transition {:?} started ({:?})", kind, origin)
                }
                TransitionEvent::Cancelled { kind, .. } => {
                    log::info!("[frame] transition {:?} cancelled", kind)
                }
                _ => {}
            }
        }
        if let Some(path) = out.history_push.as_deref() {
            nav::push_history(path);
        }
        if sound_on {
            let mut sound = self.sound.borrow_mut();
            for cue in cues {
                sound.play(cue);
            }
        }

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(w, h);
            if let Err(e) = g.render(dt_sec, &out, revealed, hovered) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

type RafSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_frame(slot: &RafSlot) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = slot.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: RafSlot = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
