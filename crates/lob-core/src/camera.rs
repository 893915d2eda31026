//! Camera records shared between the scroll path, the transition
//! controller and the renderer.
//!
//! `CameraPose` is the mutable rig written every frame; `Camera` turns a
//! pose plus viewport aspect into the matrices the renderer and the drag
//! un-projection need.

use crate::constants::{CAMERA_ZFAR, CAMERA_ZNEAR, HERO_CAMERA_Z, HERO_FOV_DEG};
use crate::easing::lerp;
use glam::{Mat4, Vec3};

/// Position, look-at target and vertical field of view (degrees).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
    pub fov: f32,
}

impl CameraPose {
    pub const HERO: CameraPose = CameraPose {
        position: Vec3::new(0.0, 0.0, HERO_CAMERA_Z),
        look_at: Vec3::ZERO,
        fov: HERO_FOV_DEG,
    };

    pub const fn new(x: f32, y: f32, z: f32, fov: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            look_at: Vec3::ZERO,
            fov,
        }
    }

    pub const fn looking_at(self, look_at: Vec3) -> Self {
        Self {
            position: self.position,
            look_at,
            fov: self.fov,
        }
    }

    pub fn lerp(&self, other: &CameraPose, t: f32) -> CameraPose {
        CameraPose {
            position: self.position.lerp(other.position, t),
            look_at: self.look_at.lerp(other.look_at, t),
            fov: lerp(self.fov, other.fov, t),
        }
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.position,
            target: self.look_at,
            up: Vec3::Y,
            aspect: if aspect.is_finite() && aspect > 0.0 {
                aspect
            } else {
                1.0
            },
            fovy_radians: self.fov.clamp(1.0, 170.0).to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::HERO
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Unit forward vector; falls back to -Z when eye and target coincide.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    /// Right and up vectors of the view basis.
    pub fn basis(&self) -> (Vec3, Vec3) {
        let fwd = self.forward();
        let right = fwd.cross(self.up).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(fwd);
        (right, up)
    }

    /// World-space ray through a pixel of a `width` × `height` viewport.
    ///
    /// Returns `(ray_origin, ray_direction)`.
    pub fn screen_ray(&self, sx: f32, sy: f32, width: f32, height: f32) -> (Vec3, Vec3) {
        let w = width.max(1.0);
        let h = height.max(1.0);
        let ndc_x = (2.0 * sx / w) - 1.0;
        let ndc_y = 1.0 - (2.0 * sy / h);
        let half_h = (self.fovy_radians * 0.5).tan();
        let half_w = half_h * self.aspect;
        let (right, up) = self.basis();
        let dir = (self.forward() + right * (ndc_x * half_w) + up * (ndc_y * half_h)).normalize();
        (self.eye, dir)
    }
}

/// Nearest positive hit distance of a ray against a sphere.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}
