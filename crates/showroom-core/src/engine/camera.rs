use glam::{Mat4, Vec3};
use std::f32::consts::PI;

use crate::constants::{BETA_EPSILON, CAMERA_FAR, CAMERA_NEAR, ORBIT_MAX_RADIUS, ORBIT_MIN_RADIUS};

/// Orbit pose: azimuth `alpha`, polar angle `beta` measured from +Y, distance
/// `radius` around `target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitPose {
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
    pub target: Vec3,
}

impl OrbitPose {
    pub fn position(&self) -> Vec3 {
        let (sa, ca) = self.alpha.sin_cos();
        let (sb, cb) = self.beta.sin_cos();
        self.target + self.radius * Vec3::new(ca * sb, cb, sa * sb)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraMode {
    /// Responds to user drag and wheel input.
    Orbit,
    /// Input bindings cleared; only presets move it.
    Static,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    pub pose: OrbitPose,
    pub mode: CameraMode,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub lower_radius_limit: f32,
    pub upper_radius_limit: f32,
    pub lower_beta_limit: f32,
    pub upper_beta_limit: f32,
}

impl OrbitCamera {
    pub fn new(pose: OrbitPose, mode: CameraMode, fov: f32) -> Self {
        Self {
            pose,
            mode,
            fov,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            lower_radius_limit: ORBIT_MIN_RADIUS,
            upper_radius_limit: ORBIT_MAX_RADIUS,
            lower_beta_limit: BETA_EPSILON,
            upper_beta_limit: PI - BETA_EPSILON,
        }
    }

    pub fn inputs_attached(&self) -> bool {
        self.mode == CameraMode::Orbit
    }

    pub fn position(&self) -> Vec3 {
        self.pose.position()
    }

    pub fn clamp_radius(&self, radius: f32) -> f32 {
        radius.clamp(self.lower_radius_limit, self.upper_radius_limit)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.pose.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect.max(1e-3), self.near, self.far)
    }
}
