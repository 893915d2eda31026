//! Ball grab: screen-space pointer drag → local-space stretch vector.

use crate::camera::CameraPose;
use crate::constants::{
    GRAB_FADE_DELAY_SECS, GRAB_FADE_SECS, MAX_STRETCH, SNAP_BACK_SECS, SNAP_ELASTIC_AMPLITUDE,
    SNAP_ELASTIC_PERIOD,
};
use crate::deform::{DeformFired, DeformLatch};
use crate::easing::Ease;
use crate::overlay::Leg;
use crate::store::SceneStore;
use crate::timeline::Timeline;
use glam::{Mat3, Mat4, Vec2, Vec3};

/// What the un-projection needs to know about the view.
#[derive(Clone, Copy, Debug)]
pub struct DragView {
    /// Viewport size in the same pixel space as the pointer positions.
    pub viewport: Vec2,
    pub camera: CameraPose,
    pub object_world: Mat4,
}

impl DragView {
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y.max(1.0)
    }
}

/// Values the deform shader reads each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DeformUniforms {
    pub grab_point: Vec3,
    pub drag_delta: Vec3,
    pub grab_strength: f32,
}

#[derive(Clone, Debug)]
struct SnapBack {
    delta: Timeline<Vec3>,
    strength: Timeline<f32>,
}

#[derive(Clone, Debug)]
pub struct DragSampler {
    max_stretch: f32,
    grabbing: bool,
    grab_point: Vec3,
    drag_start: Vec2,
    delta: Vec3,
    strength: f32,
    latch: DeformLatch,
    snap: Option<SnapBack>,
}

impl Default for DragSampler {
    fn default() -> Self {
        Self::new(MAX_STRETCH, DeformLatch::default())
    }
}

impl DragSampler {
    pub fn new(max_stretch: f32, latch: DeformLatch) -> Self {
        Self {
            max_stretch: max_stretch.max(0.0),
            grabbing: false,
            grab_point: Vec3::ZERO,
            drag_start: Vec2::ZERO,
            delta: Vec3::ZERO,
            strength: 0.0,
            latch,
            snap: None,
        }
    }

    #[inline]
    pub fn is_grabbing(&self) -> bool {
        self.grabbing
    }

    #[inline]
    pub fn is_snapping_back(&self) -> bool {
        self.snap.is_some()
    }

    #[inline]
    pub fn latch(&self) -> &DeformLatch {
        &self.latch
    }

    #[inline]
    pub fn max_stretch(&self) -> f32 {
        self.max_stretch
    }

    pub fn uniforms(&self) -> DeformUniforms {
        DeformUniforms {
            grab_point: self.grab_point,
            drag_delta: self.delta,
            grab_strength: self.strength,
        }
    }

    /// Begin a gesture at `local_point` on the object, with the pointer at
    /// `screen_pos`.
    pub fn grab_start(&mut self, local_point: Vec3, screen_pos: Vec2) {
        self.grabbing = true;
        self.grab_point = local_point;
        self.drag_start = screen_pos;
        self.delta = Vec3::ZERO;
        self.strength = 1.0;
        self.snap = None;
        self.latch.arm();
        log::debug!(
            "[drag] grab at ({:.2},{:.2},{:.2})",
            local_point.x,
            local_point.y,
            local_point.z
        );
    }

    /// Pointer moved while grabbing. Returns the reveal event on the one
    /// move that crosses the over-stretch threshold.
    pub fn drag_move(
        &mut self,
        screen_pos: Vec2,
        view: &DragView,
        store: &mut SceneStore,
    ) -> Option<DeformFired> {
        if !self.grabbing || !screen_pos.is_finite() {
            return None;
        }
        let world = unproject_delta(screen_pos - self.drag_start, view);
        let local = world_to_local(world, &view.object_world);
        self.delta = local.clamp_length_max(self.max_stretch);
        self.latch.check(self.delta.length(), store)
    }

    /// End the gesture and start the elastic snap-back. Returns false if no
    /// gesture was active.
    pub fn release(&mut self) -> bool {
        if !self.grabbing {
            return false;
        }
        self.grabbing = false;
        self.snap = Some(SnapBack {
            delta: Timeline::new(
                self.delta,
                Vec3::ZERO,
                Leg {
                    delay: 0.0,
                    duration: SNAP_BACK_SECS,
                    ease: Ease::ElasticOut {
                        amplitude: SNAP_ELASTIC_AMPLITUDE,
                        period: SNAP_ELASTIC_PERIOD,
                    },
                },
            ),
            strength: Timeline::new(
                self.strength,
                0.0,
                Leg {
                    delay: GRAB_FADE_DELAY_SECS,
                    duration: GRAB_FADE_SECS,
                    ease: Ease::Power2Out,
                },
            ),
        });
        self.latch.on_release();
        true
    }

    /// Forced end of a gesture (pointer cancelled, window lost focus).
    pub fn cancel(&mut self) -> bool {
        self.release()
    }

    /// Dismiss revealed content.
    pub fn dismiss_reveal(&mut self, store: &mut SceneStore) {
        self.latch.dismiss(store);
    }

    /// Advance the snap-back and the reveal reset timer.
    pub fn tick(&mut self, dt: f32, store: &mut SceneStore) {
        if let Some(snap) = self.snap.as_mut() {
            if let Some(step) = snap.delta.step(dt) {
                self.delta = step.value;
            }
            if let Some(step) = snap.strength.step(dt) {
                self.strength = step.value;
            }
            if !snap.delta.is_running() && !snap.strength.is_running() {
                self.delta = Vec3::ZERO;
                self.strength = 0.0;
                self.snap = None;
            }
        }
        self.latch.tick(dt, store);
    }
}

/// World-space displacement under a screen-space pointer delta, measured in
/// the plane through the object's origin facing the camera.
pub fn unproject_delta(screen_delta: Vec2, view: &DragView) -> Vec3 {
    let cam = view.camera.camera(view.aspect());
    let object_pos = view.object_world.w_axis.truncate();
    let depth = (object_pos - cam.eye).dot(cam.forward()).max(cam.znear);
    let half_h = depth * (cam.fovy_radians * 0.5).tan();
    let half_w = half_h * cam.aspect;
    let ndc = Vec2::new(
        2.0 * screen_delta.x / view.viewport.x.max(1.0),
        -2.0 * screen_delta.y / view.viewport.y.max(1.0),
    );
    let (right, up) = cam.basis();
    right * (ndc.x * half_w) + up * (ndc.y * half_h)
}

/// Rotate (and unscale) a world-space vector into the object's local frame.
/// Length is kept in local units, not normalized.
pub fn world_to_local(world: Vec3, object_world: &Mat4) -> Vec3 {
    let linear = Mat3::from_mat4(*object_world);
    if linear.determinant().abs() < 1e-8 {
        return world;
    }
    linear.inverse() * world
}
