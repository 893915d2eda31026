//! Per-frame pipeline owning the store and every controller.
//!
//! Input handlers only move targets. `tick` runs the fixed order: samplers,
//! section classification, transition step, camera composition. The web
//! layer calls it once per animation frame and renders the returned
//! `FrameOutput`.

use crate::camera::{ray_sphere, CameraPose};
use crate::constants::{BALL_RADIUS, BALL_SPIN_RAD_PER_SEC, JUMBOTRON_FOCUS_SECS};
use crate::deform::DeformFired;
use crate::drag::{world_to_local, DeformUniforms, DragSampler, DragView};
use crate::easing::Ease;
use crate::error::ConfigError;
use crate::overlay::{Leg, Overlay, OverlayTable};
use crate::route::{Route, RouteAction, RouteSync};
use crate::scroll_path::ScrollPath;
use crate::section::{Section, SectionMap};
use crate::sampler::ScrollSampler;
use crate::sound::SoundCue;
use crate::store::SceneStore;
use crate::timeline::Timeline;
use crate::transition::{
    TransitionController, TransitionEvent, TransitionEvents, TransitionId, TransitionKind,
    TransitionOrigin,
};
use glam::{Mat4, Vec2, Vec3};
use smallvec::SmallVec;

/// Front-on view of the jumbotron screen.
pub const JUMBOTRON_FOCUS_POSE: CameraPose =
    CameraPose::new(0.0, 3.0, -8.0, 45.0).looking_at(Vec3::new(0.0, 3.0, -15.0));

/// Data tables driving the scene.
#[derive(Clone, Debug, Default)]
pub struct SceneConfig {
    pub sections: SectionMap,
    pub overlays: OverlayTable,
    pub path: ScrollPath,
}

impl SceneConfig {
    pub fn new(
        sections: impl IntoIterator<Item = (Section, f32, f32)>,
        overlays: OverlayTable,
        path: ScrollPath,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            sections: SectionMap::new(sections)?,
            overlays,
            path,
        })
    }
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub camera: CameraPose,
    pub deform: DeformUniforms,
    pub ball_model: Mat4,
    pub events: TransitionEvents,
    /// Path the browser history should move to, when a transition the user
    /// started moved in or out of the shop.
    pub history_push: Option<String>,
}

pub type SoundCues = SmallVec<[SoundCue; 4]>;

pub struct Scene {
    store: SceneStore,
    sections: SectionMap,
    path: ScrollPath,
    scroll: ScrollSampler,
    drag: DragSampler,
    transitions: TransitionController,
    route: RouteSync,
    /// Written by transitions; follows the scroll path when idle.
    rig: CameraPose,
    /// Last composed camera, including the jumbotron blend.
    camera: CameraPose,
    focus: Option<Timeline<f32>>,
    focus_amount: f32,
    time: f32,
    viewport: Vec2,
    cues: SoundCues,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::default(), SceneStore::new())
    }
}

impl Scene {
    pub fn new(config: SceneConfig, store: SceneStore) -> Self {
        let rig = config.path.sample(store.state().scroll_progress);
        Self {
            store,
            sections: config.sections,
            path: config.path,
            scroll: ScrollSampler::default(),
            drag: DragSampler::default(),
            transitions: TransitionController::new(config.overlays),
            route: RouteSync::default(),
            rig,
            camera: rig,
            focus: None,
            focus_amount: 0.0,
            time: 0.0,
            viewport: Vec2::new(1.0, 1.0),
            cues: SoundCues::new(),
        }
    }

    #[inline]
    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    #[inline]
    pub fn store_mut(&mut self) -> &mut SceneStore {
        &mut self.store
    }

    #[inline]
    pub fn camera(&self) -> CameraPose {
        self.camera
    }

    #[inline]
    pub fn route(&self) -> &Route {
        self.route.current()
    }

    #[inline]
    pub fn transitions(&self) -> &TransitionController {
        &self.transitions
    }

    #[inline]
    pub fn drag(&self) -> &DragSampler {
        &self.drag
    }

    #[inline]
    pub fn scroll(&self) -> &ScrollSampler {
        &self.scroll
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            self.viewport = Vec2::new(width, height);
        }
    }

    #[inline]
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Scroll narrative drives the camera only while no overlay is open or
    /// animating.
    pub fn in_scroll_regime(&self) -> bool {
        let state = self.store.state();
        state.transition.is_idle() && !state.any_overlay_visible()
    }

    pub fn ball_model(&self) -> Mat4 {
        if self.store.state().reduced_motion {
            Mat4::IDENTITY
        } else {
            Mat4::from_rotation_y(self.time * BALL_SPIN_RAD_PER_SEC)
        }
    }

    // ---------------- input ----------------

    pub fn on_wheel(&mut self, delta_y: f32) -> bool {
        let section = self.store.state().current_section;
        self.scroll.on_wheel(delta_y, section)
    }

    /// Ray-cast the ball under `screen_pos` and hit-test it.
    fn hit_ball(&self, screen_pos: Vec2) -> Option<Vec3> {
        let cam = self.camera.camera(self.viewport.x / self.viewport.y);
        let (origin, dir) = cam.screen_ray(screen_pos.x, screen_pos.y, self.viewport.x, self.viewport.y);
        let center = self.ball_model().w_axis.truncate();
        ray_sphere(origin, dir, center, BALL_RADIUS).map(|t| origin + dir * t)
    }

    /// Pointer moved without a button held.
    pub fn hover(&mut self, screen_pos: Vec2) {
        let hovered = self.in_scroll_regime() && self.hit_ball(screen_pos).is_some();
        self.store.set_ball_hovered(hovered);
    }

    /// Pointer pressed. Returns true when the ball was grabbed; the caller
    /// should then track the pointer at window level until release.
    pub fn grab(&mut self, screen_pos: Vec2) -> bool {
        if !self.in_scroll_regime() || self.drag.is_grabbing() {
            return false;
        }
        let Some(hit) = self.hit_ball(screen_pos) else {
            return false;
        };
        let model = self.ball_model();
        let local = world_to_local(hit - model.w_axis.truncate(), &model);
        self.drag.grab_start(local, screen_pos);
        self.cues.push(SoundCue::Grab);
        true
    }

    pub fn drag_move(&mut self, screen_pos: Vec2) -> Option<DeformFired> {
        let view = DragView {
            viewport: self.viewport,
            camera: self.camera,
            object_world: self.ball_model(),
        };
        let fired = self.drag.drag_move(screen_pos, &view, &mut self.store);
        if fired.is_some() {
            self.cues.push(SoundCue::Pop);
        }
        fired
    }

    pub fn release(&mut self) -> bool {
        let released = self.drag.release();
        if released {
            self.cues.push(SoundCue::Thud);
        }
        released
    }

    /// Pointer cancelled or focus lost mid-gesture.
    pub fn cancel_gesture(&mut self) -> bool {
        self.drag.cancel()
    }

    pub fn dismiss_reveal(&mut self) {
        self.drag.dismiss_reveal(&mut self.store);
    }

    pub fn toggle_sound(&mut self) {
        self.store.toggle_sound();
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.store.set_reduced_motion(reduced);
    }

    /// Jumbotron clicked. Only reacts inside the jumbotron section.
    pub fn toggle_jumbotron(&mut self) -> bool {
        let state = self.store.state();
        if state.current_section != Section::Jumbotron || !self.in_scroll_regime() {
            return false;
        }
        let focused = !state.jumbotron_focused;
        self.set_focus(focused);
        true
    }

    fn set_focus(&mut self, focused: bool) {
        self.store.set_jumbotron_focused(focused);
        let target = if focused { 1.0 } else { 0.0 };
        self.focus = Some(Timeline::new(
            self.focus_amount,
            target,
            Leg {
                delay: 0.0,
                duration: JUMBOTRON_FOCUS_SECS,
                ease: Ease::Power2InOut,
            },
        ));
    }

    // ---------------- navigation ----------------

    /// Nav click to an overlay.
    pub fn request_open(&mut self, overlay: Overlay) -> Option<TransitionId> {
        self.transitions
            .request_open(overlay, &mut self.store, &self.camera)
    }

    /// Close button of an overlay.
    pub fn request_close(&mut self, overlay: Overlay) -> Option<TransitionId> {
        self.transitions
            .request_close(overlay, &mut self.store, &self.camera)
    }

    /// Home nav click or Escape: close whichever overlay is open.
    pub fn go_home(&mut self) -> Option<TransitionId> {
        let overlay = self.store.state().visible_overlay()?;
        self.request_close(overlay)
    }

    /// Escape key: close the open overlay, else dismiss revealed content.
    pub fn escape(&mut self) {
        if self.store.state().any_overlay_visible() {
            self.go_home();
        } else if self.store.state().is_revealed() {
            self.dismiss_reveal();
        }
    }

    /// Browser location changed outside the app (popstate, first load).
    pub fn on_location_change(&mut self, path: &str) -> RouteAction {
        self.route.on_location_change(
            path,
            &mut self.store,
            &mut self.transitions,
            &self.camera,
        )
    }

    // ---------------- frame ----------------

    pub fn drain_cues(&mut self) -> SoundCues {
        std::mem::take(&mut self.cues)
    }

    pub fn tick(&mut self, dt: f32) -> FrameOutput {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.time += dt;

        // 1. input sampling
        let sample = self.scroll.tick();
        self.store.set_scroll_progress(sample.offset);
        self.store.set_scroll_velocity(sample.velocity);
        self.drag.tick(dt, &mut self.store);

        // 2. classification
        if self.in_scroll_regime() {
            self.classify(sample.offset);
        }

        // 3. transitions
        let events = self
            .transitions
            .tick(dt, &mut self.store, &mut self.rig);
        let history_push = self.apply_events(&events);

        // 4. camera
        if self.store.state().jumbotron_focused
            && self.store.state().current_section != Section::Jumbotron
        {
            self.set_focus(false);
        }
        if let Some(focus) = self.focus.as_mut() {
            match focus.step(dt) {
                Some(step) => self.focus_amount = step.value,
                None => self.focus = None,
            }
        }
        if self.in_scroll_regime() {
            self.rig = self.path.sample(self.store.state().scroll_progress);
        }
        self.camera = self.rig.lerp(&JUMBOTRON_FOCUS_POSE, self.focus_amount);

        FrameOutput {
            camera: self.camera,
            deform: self.drag.uniforms(),
            ball_model: self.ball_model(),
            events,
            history_push,
        }
    }

    fn classify(&mut self, offset: f32) {
        let section = self.sections.classify(offset);
        let previous = self.store.state().current_section;
        if section == previous {
            return;
        }
        self.store.set_current_section(section);
        if section == Section::Shop {
            // the scroll narrative ends inside the shop
            self.transitions.open(
                Overlay::Shop,
                &mut self.store,
                &self.camera,
                TransitionOrigin::Scroll,
            );
        }
    }

    fn apply_events(&mut self, events: &[TransitionEvent]) -> Option<String> {
        let mut push = None;
        for event in events {
            match *event {
                TransitionEvent::Started { kind, origin, .. } => {
                    self.cues.push(SoundCue::Swoosh);
                    if origin != TransitionOrigin::Navigation {
                        push = self.history_for(kind).or(push);
                    }
                }
                TransitionEvent::Completed {
                    kind: TransitionKind::Close(_),
                    ..
                } => {
                    // back at the top of the narrative
                    self.scroll.reset(0.0);
                    self.store.set_scroll_progress(0.0);
                    self.store.set_scroll_velocity(0.0);
                }
                _ => {}
            }
        }
        push
    }

    /// Keep the location in step with shop transitions the app started.
    fn history_for(&mut self, kind: TransitionKind) -> Option<String> {
        let in_shop = self.route.current().is_shop_family();
        let path = match (kind, in_shop) {
            (TransitionKind::Open(Overlay::Shop), false) => "/shop",
            (TransitionKind::Open(Overlay::Shop), true) => return None,
            (TransitionKind::Open(_) | TransitionKind::Close(Overlay::Shop), true) => "/",
            _ => return None,
        };
        self.route.observe(path);
        Some(path.to_string())
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("store", &self.store)
            .field("route", self.route.current())
            .field("camera", &self.camera)
            .finish()
    }
}
