//! Camera and clock state shared with the web frontend.
//!
//! These types avoid referencing platform-specific APIs. The web frontend
//! consumes them to build camera matrices and to drive per-frame animation.

use crate::constants::{
    camera_eye_vec3, camera_target_vec3, CAMERA_FOVY_DEG, CAMERA_ZFAR, CAMERA_ZNEAR,
    FRAMING_MARGIN, FRAMING_TARGET_LIFT,
};
use crate::picking::Ray;
use crate::scene::Aabb;
use glam::{Mat4, Vec2, Vec3, Vec4};
use instant::Instant;

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
    /// Showcase default: high, narrow lens looking down at the origin.
    pub fn showcase(aspect: f32) -> Self {
        Self {
            eye: camera_eye_vec3(),
            target: camera_target_vec3(),
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// World-space ray from the eye through a point given in NDC.
    pub fn ray_through_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p_far = far.truncate() / far.w;
        Ray::new(self.eye, p_far - self.eye)
    }

    /// Project a world point to NDC; `None` when behind the eye.
    pub fn project(&self, p: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * p.extend(1.0);
        (clip.w > 0.0).then(|| Vec2::new(clip.x / clip.w, clip.y / clip.w))
    }

    /// Aim at `bounds` and pull back along the current view direction until
    /// its bounding sphere fits the vertical field of view.
    pub fn frame_bounds(&mut self, bounds: &Aabb) {
        let mut target = bounds.center();
        target.y += FRAMING_TARGET_LIFT;
        let dir = (self.eye - self.target).normalize_or_zero();
        let dir = if dir == Vec3::ZERO { Vec3::Z } else { dir };
        let half_fovy = self.fovy_radians * 0.5;
        let half_fovx = (half_fovy.tan() * self.aspect).atan();
        let half_fov = half_fovy.min(half_fovx);
        let fit = bounds.radius() * FRAMING_MARGIN / half_fov.sin().max(1e-3);
        let distance = fit.max((self.eye - self.target).length());
        self.target = target;
        self.eye = target + dir * distance;
    }
}

/// Frame delta source for the render loop.
#[derive(Clone, Debug)]
pub struct Clock {
    last: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Seconds since the previous tick.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last).as_secs_f32();
        self.last = now;
        dt
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_ray_points_at_target() {
        let cam = Camera::showcase(16.0 / 9.0);
        let ray = cam.ray_through_ndc(Vec2::ZERO);
        let expected = (cam.target - cam.eye).normalize();
        assert!((ray.direction - expected).length() < 1e-4);
        assert_eq!(ray.origin, cam.eye);
    }

    #[test]
    fn framing_keeps_view_direction_and_never_moves_closer() {
        let mut cam = Camera::showcase(1.5);
        let before = (cam.eye - cam.target).normalize();
        let dist_before = (cam.eye - cam.target).length();
        let bounds = Aabb {
            min: Vec3::new(-0.5, -0.1, -2.0),
            max: Vec3::new(0.5, 0.1, 0.2),
        };
        cam.frame_bounds(&bounds);
        let after = (cam.eye - cam.target).normalize();
        assert!((before - after).length() < 1e-4);
        assert!((cam.eye - cam.target).length() >= dist_before - 1e-3);
        assert!((cam.target.y - (bounds.center().y + FRAMING_TARGET_LIFT)).abs() < 1e-6);
    }
}
