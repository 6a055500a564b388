//! Camera controller: preset viewpoints as orbit poses, animated transitions
//! driven by the frame tick, autorotation and clamped zoom.

use glam::Vec3;
use std::f32::consts::{PI, TAU};

use crate::catalog::{CameraSettings, PresetCatalog};
use crate::constants::{
    BETA_EPSILON, DEFAULT_CAMERA_PRESET, DEGENERATE_RADIUS, TRANSITION_STEPS, TRANSITION_STEPS_PER_SEC,
};
use crate::engine::{OrbitPose, RenderEngine};
use crate::error::{PresetKind, Result, SceneError};
use crate::state::{Published, SubscriptionId};

/// Clamps a polar angle into `[eps, pi - eps]`.
#[inline]
pub fn clamp_beta(beta: f32) -> f32 {
    beta.clamp(BETA_EPSILON, PI - BETA_EPSILON)
}

/// Converts a Cartesian viewpoint into an orbit pose around `target`.
///
/// `radius = |position - target|`, `alpha = atan2(dz, dx)`,
/// `beta = acos(clamp(dy / radius, -1, 1))`. Beta is not clamped here.
pub fn cartesian_to_spherical(position: Vec3, target: Vec3) -> Result<OrbitPose> {
    let d = position - target;
    let radius = d.length();
    if !(radius > DEGENERATE_RADIUS) || !radius.is_finite() {
        return Err(SceneError::DegenerateOrbit);
    }
    Ok(OrbitPose {
        alpha: d.z.atan2(d.x),
        beta: (d.y / radius).clamp(-1.0, 1.0).acos(),
        radius,
        target,
    })
}

pub fn spherical_to_cartesian(pose: &OrbitPose) -> Vec3 {
    pose.position()
}

/// Signed angle in `(-pi, pi]` taking `from` to `to` the short way round.
fn shortest_delta(from: f32, to: f32) -> f32 {
    let d = (to - from).rem_euclid(TAU);
    if d > PI {
        d - TAU
    } else {
        d
    }
}

#[derive(Clone, Copy, Debug)]
struct Transition {
    from: OrbitPose,
    to: OrbitPose,
    step: u32,
    pending: f32,
}

impl Transition {
    fn pose_at(&self, t: f32) -> OrbitPose {
        OrbitPose {
            alpha: self.from.alpha + (self.to.alpha - self.from.alpha) * t,
            beta: self.from.beta + (self.to.beta - self.from.beta) * t,
            radius: self.from.radius + (self.to.radius - self.from.radius) * t,
            target: self.from.target.lerp(self.to.target, t),
        }
    }
}

#[derive(Default)]
pub struct CameraController {
    active_preset: Option<String>,
    settings: Option<CameraSettings>,
    transition: Option<Transition>,
    auto_rotate_speed: Option<f32>,
    state: Published<CameraSettings>,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a static (input-less) camera at the default preset's orbit.
    pub fn initialize_camera(&mut self, engine: &mut RenderEngine, catalog: &PresetCatalog) -> Result<()> {
        let preset = catalog.camera_preset(DEFAULT_CAMERA_PRESET).ok_or_else(|| {
            log::error!("[camera] default preset '{}' missing", DEFAULT_CAMERA_PRESET);
            SceneError::not_found(PresetKind::Camera, DEFAULT_CAMERA_PRESET)
        })?;
        let s = preset.settings;
        let pose = cartesian_to_spherical(s.position, s.target)?;
        log::debug!(
            "[camera] init alpha={:.3} beta={:.3} radius={:.3}",
            pose.alpha,
            pose.beta,
            pose.radius
        );
        engine.create_static_camera(pose.alpha, pose.beta, pose.radius, pose.target)?;
        let radius = self.apply_settings(engine, &s, pose.radius);
        self.transition = None;
        self.auto_rotate_speed = None;
        self.active_preset = Some(preset.id.to_string());
        self.publish(s, radius);
        Ok(())
    }

    /// Animates to a camera preset from the current (possibly mid-transition)
    /// pose. Unknown ids leave the camera untouched.
    pub fn apply_preset(&mut self, engine: &mut RenderEngine, catalog: &PresetCatalog, id: &str) -> Result<()> {
        let Some(preset) = catalog.camera_preset(id) else {
            log::error!("[camera] preset not found: {}", id);
            return Err(SceneError::not_found(PresetKind::Camera, id));
        };
        let s = preset.settings;
        let mut to = cartesian_to_spherical(s.position, s.target)?;
        to.beta = clamp_beta(to.beta);
        if let Some(z) = s.current_zoom {
            to.radius = z;
        }
        self.stop_auto_rotate();
        if engine.camera().is_none() {
            engine.create_static_camera(to.alpha, to.beta, to.radius, to.target)?;
        }
        to.radius = self.apply_settings(engine, &s, to.radius);
        self.start_transition(engine, to);
        if s.auto_rotate && s.auto_rotate_speed != 0.0 {
            self.auto_rotate_speed = Some(s.auto_rotate_speed);
        }
        log::debug!(
            "[camera] -> {} alpha={:.3} beta={:.3} radius={:.3}",
            id,
            to.alpha,
            to.beta,
            to.radius
        );
        self.active_preset = Some(preset.id.to_string());
        self.publish(s, to.radius);
        Ok(())
    }

    /// Animates to an arbitrary Cartesian viewpoint under the current limits.
    pub fn look_at(&mut self, engine: &mut RenderEngine, position: Vec3, target: Vec3) -> Result<()> {
        let mut to = cartesian_to_spherical(position, target)?;
        to.beta = clamp_beta(to.beta);
        let Some(camera) = engine.camera() else {
            return Err(SceneError::NotInitialized);
        };
        to.radius = camera.clamp_radius(to.radius);
        self.stop_auto_rotate();
        self.start_transition(engine, to);
        if let Some(mut s) = self.settings {
            s.position = position;
            s.target = target;
            s.auto_rotate = false;
            self.publish(s, to.radius);
        }
        Ok(())
    }

    /// Applies fov and zoom limits; returns `radius` clamped into them.
    fn apply_settings(&mut self, engine: &mut RenderEngine, s: &CameraSettings, radius: f32) -> f32 {
        let (lo, hi) = if s.min_zoom <= s.max_zoom {
            (s.min_zoom, s.max_zoom)
        } else {
            log::warn!("[camera] min zoom {} > max zoom {}; swapping", s.min_zoom, s.max_zoom);
            (s.max_zoom, s.min_zoom)
        };
        let lo = lo.max(DEGENERATE_RADIUS * 10.0);
        let hi = hi.max(lo);
        self.settings = Some(*s);
        let Some(camera) = engine.camera_mut() else {
            return radius.clamp(lo, hi);
        };
        camera.fov = s.fov_degrees.to_radians();
        camera.lower_radius_limit = lo;
        camera.upper_radius_limit = hi;
        camera.lower_beta_limit = BETA_EPSILON;
        camera.upper_beta_limit = PI - BETA_EPSILON;
        camera.pose.radius = camera.clamp_radius(camera.pose.radius);
        camera.pose.beta = clamp_beta(camera.pose.beta);
        camera.clamp_radius(radius)
    }

    fn start_transition(&mut self, engine: &RenderEngine, mut to: OrbitPose) {
        let Some(from) = engine.camera().map(|c| c.pose) else {
            return;
        };
        to.alpha = from.alpha + shortest_delta(from.alpha, to.alpha);
        self.transition = Some(Transition {
            from,
            to,
            step: 0,
            pending: 0.0,
        });
    }

    /// Advances the transition by whole steps (60 per second) or, when idle,
    /// autorotates by `speed * dt`.
    pub fn tick(&mut self, engine: &mut RenderEngine, dt_sec: f32) {
        let dt = dt_sec.max(0.0);
        let Some(camera) = engine.camera_mut() else {
            return;
        };
        if let Some(t) = self.transition.as_mut() {
            t.pending += dt * TRANSITION_STEPS_PER_SEC;
            // Tolerate rounding so 60 frames of 1/60 s land on exactly 60 steps.
            let whole = (t.pending + 1e-3).floor().min(TRANSITION_STEPS as f32);
            t.pending = (t.pending - whole).max(0.0);
            t.step = t.step.saturating_add(whole as u32).min(TRANSITION_STEPS);
            let pose = t.pose_at(t.step as f32 / TRANSITION_STEPS as f32);
            camera.pose = pose;
            if t.step >= TRANSITION_STEPS {
                camera.pose.alpha = camera.pose.alpha.rem_euclid(TAU);
                self.transition = None;
            }
            return;
        }
        if let Some(speed) = self.auto_rotate_speed {
            camera.pose.alpha = (camera.pose.alpha + speed * dt).rem_euclid(TAU);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn is_auto_rotating(&self) -> bool {
        self.auto_rotate_speed.is_some()
    }

    pub fn stop_auto_rotate(&mut self) {
        self.auto_rotate_speed = None;
    }

    pub fn zoom_in(&mut self, engine: &mut RenderEngine, amount: f32) {
        if let Some(r) = self.zoom(engine) {
            self.set_zoom(engine, r - amount.abs());
        }
    }

    pub fn zoom_out(&mut self, engine: &mut RenderEngine, amount: f32) {
        if let Some(r) = self.zoom(engine) {
            self.set_zoom(engine, r + amount.abs());
        }
    }

    /// Sets the orbit radius, clamped to the active preset's zoom limits.
    pub fn set_zoom(&mut self, engine: &mut RenderEngine, value: f32) {
        if !value.is_finite() {
            return;
        }
        let Some(camera) = engine.camera_mut() else {
            return;
        };
        let radius = camera.clamp_radius(value);
        camera.pose.radius = radius;
        if let Some(t) = self.transition.as_mut() {
            t.from.radius = radius;
            t.to.radius = radius;
        }
    }

    pub fn zoom(&self, engine: &RenderEngine) -> Option<f32> {
        engine.camera().map(|c| c.pose.radius)
    }

    /// Re-aims the camera immediately, cancelling any transition.
    pub fn set_target(&mut self, engine: &mut RenderEngine, target: Vec3) {
        self.transition = None;
        if let Some(camera) = engine.camera_mut() {
            camera.pose.target = target;
        }
    }

    pub fn target(&self, engine: &RenderEngine) -> Option<Vec3> {
        engine.camera().map(|c| c.pose.target)
    }

    pub fn position(&self, engine: &RenderEngine) -> Option<Vec3> {
        engine.camera().map(|c| c.position())
    }

    pub fn active_preset(&self) -> Option<&str> {
        self.active_preset.as_deref()
    }

    pub fn settings(&self) -> Option<&CameraSettings> {
        self.state.get()
    }

    pub fn subscribe(&mut self, f: impl FnMut(&CameraSettings) + 'static) -> SubscriptionId {
        self.state.subscribe(f)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    fn publish(&mut self, mut s: CameraSettings, radius: f32) {
        s.current_zoom = Some(radius);
        self.state.publish(s);
    }

    pub fn dispose(&mut self, engine: &mut RenderEngine) {
        self.transition = None;
        self.auto_rotate_speed = None;
        self.active_preset = None;
        self.settings = None;
        engine.dispose_camera();
        self.state.reset();
    }
}
