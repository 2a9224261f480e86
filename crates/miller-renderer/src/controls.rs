//! Orbit-style camera controls with optional damping.
//!
//! Input accumulates into pending motion. Each tick applies a share of it to
//! the spherical pose (yaw, pitch, distance around a target) and decays the
//! rest, which gives the camera inertia after the pointer is released.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use crate::camera::Camera;
use crate::config::ControlsConfig;

/// Keeps the eye off the poles, where the +Z up vector degenerates.
const MAX_PITCH: f32 = FRAC_PI_2 - 0.01;

/// Pending motion below this is dropped.
const SETTLE_EPSILON: f32 = 1e-5;

/// Reference tick rate for the damping factor.
const REFERENCE_HZ: f32 = 60.0;

#[derive(Debug, Clone)]
pub struct OrbitControls {
    config: ControlsConfig,
    target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    pending_yaw: f32,
    pending_pitch: f32,
    /// Log-scale zoom.
    pending_zoom: f32,
    pending_pan: Vec3,
}

impl OrbitControls {
    /// Create controls matching the camera's current pose.
    pub fn new(config: ControlsConfig, camera: &Camera) -> Self {
        let offset = camera.eye - camera.target;
        let distance = offset.length().max(f32::EPSILON);
        let pitch = (offset.z / distance).clamp(-1.0, 1.0).asin();
        let yaw = offset.y.atan2(offset.x);

        Self {
            target: camera.target,
            yaw,
            pitch: pitch.clamp(-MAX_PITCH, MAX_PITCH),
            distance: distance.clamp(config.min_distance, config.max_distance),
            config,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_zoom: 0.0,
            pending_pan: Vec3::ZERO,
        }
    }

    pub fn config(&self) -> &ControlsConfig {
        &self.config
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Orbit by a pointer drag in pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.pending_yaw -= dx * self.config.rotate_speed;
        self.pending_pitch += dy * self.config.rotate_speed;
    }

    /// Zoom by a scroll amount. Positive scrolls move closer.
    pub fn zoom(&mut self, scroll: f32) {
        self.pending_zoom -= scroll * self.config.zoom_speed;
    }

    /// Move the target by a pointer drag in pixels, in the view plane.
    pub fn pan(&mut self, dx: f32, dy: f32, camera: &Camera) {
        let right = camera.right();
        let up = right.cross(camera.forward()).normalize_or_zero();
        let scale = self.distance * self.config.pan_speed;
        self.pending_pan += (-right * dx + up * dy) * scale;
    }

    /// True when no motion is left to apply.
    pub fn is_settled(&self) -> bool {
        self.pending_yaw.abs() < SETTLE_EPSILON
            && self.pending_pitch.abs() < SETTLE_EPSILON
            && self.pending_zoom.abs() < SETTLE_EPSILON
            && self.pending_pan.length() < SETTLE_EPSILON
    }

    /// Advance by `dt` seconds and write the pose into `camera`.
    pub fn update(&mut self, camera: &mut Camera, dt: f32) {
        let share = if self.config.enable_damping {
            let factor = self.config.damping_factor.clamp(0.0, 1.0);
            1.0 - (1.0 - factor).powf(dt.max(0.0) * REFERENCE_HZ)
        } else {
            1.0
        };

        self.yaw += self.pending_yaw * share;
        self.pitch = (self.pitch + self.pending_pitch * share).clamp(-MAX_PITCH, MAX_PITCH);
        self.distance = (self.distance * (self.pending_zoom * share).exp())
            .clamp(self.config.min_distance, self.config.max_distance);
        self.target += self.pending_pan * share;

        let keep = 1.0 - share;
        self.pending_yaw *= keep;
        self.pending_pitch *= keep;
        self.pending_zoom *= keep;
        self.pending_pan *= keep;
        if self.is_settled() {
            self.pending_yaw = 0.0;
            self.pending_pitch = 0.0;
            self.pending_zoom = 0.0;
            self.pending_pan = Vec3::ZERO;
        }

        camera.target = self.target;
        camera.eye = self.target + self.offset();
    }

    fn offset(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(cp * cy, cp * sy, sp) * self.distance
    }
}
