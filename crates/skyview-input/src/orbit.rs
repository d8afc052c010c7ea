//! Orbit camera controller.
//!
//! The eye sits on a sphere around a target point. Left-drag rotates it;
//! scroll zoom and right-drag pan are available but off by default. Angles
//! follow the usual spherical convention with +Y up:
//!
//! ```text
//! x = r * sin(phi) * sin(theta)
//! y = r * cos(phi)
//! z = r * sin(phi) * cos(theta)
//! ```

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use tracing::debug;
use winit::event::MouseButton;

use crate::mouse::MouseState;

/// Keeps the polar angle off the poles, where the look-at basis degenerates.
const POLAR_EPSILON: f32 = 1e-6;

/// Scroll zoom factor per wheel line.
const ZOOM_STEP: f32 = 0.95;

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitSettings {
    /// Multiplier on drag rotation; 1.0 turns a full window-height drag into
    /// one revolution.
    pub rotate_speed: f32,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            rotate_speed: 1.0,
            enable_zoom: false,
            enable_pan: false,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrbitController {
    target: Vec3,
    radius: f32,
    /// Azimuth around +Y.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,
    settings: OrbitSettings,
}

impl OrbitController {
    /// Start orbiting `target` from `eye`.
    pub fn new(eye: Vec3, target: Vec3, settings: OrbitSettings) -> Self {
        let offset = eye - target;
        let radius = offset.length();
        let (theta, phi) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, PI / 2.0)
        };

        let mut controller = Self {
            target,
            radius,
            theta,
            phi,
            settings,
        };
        controller.clamp();
        debug!(
            radius = controller.radius,
            theta = controller.theta,
            phi = controller.phi,
            "Orbit controller initialized"
        );
        controller
    }

    pub fn settings(&self) -> &OrbitSettings {
        &self.settings
    }

    /// Apply this frame's mouse input. `viewport_height` is in physical
    /// pixels, matching the mouse deltas. Returns true when the eye moved.
    pub fn update(&mut self, mouse: &MouseState, viewport_height: u32) -> bool {
        let height = viewport_height.max(1) as f32;
        let delta = mouse.delta();
        let mut moved = false;

        if mouse.is_button_pressed(MouseButton::Left) && delta != Vec2::ZERO {
            self.rotate(delta, height);
            moved = true;
        }
        if self.settings.enable_pan
            && mouse.is_button_pressed(MouseButton::Right)
            && delta != Vec2::ZERO
        {
            self.pan(delta, height);
            moved = true;
        }
        if self.settings.enable_zoom && mouse.scroll() != 0.0 {
            self.zoom(mouse.scroll());
            moved = true;
        }
        moved
    }

    /// Rotate by a drag of `delta` pixels in a viewport `height` pixels tall.
    pub fn rotate(&mut self, delta: Vec2, height: f32) {
        let speed = self.settings.rotate_speed;
        self.theta -= TAU * delta.x / height * speed;
        self.phi -= TAU * delta.y / height * speed;
        self.clamp();
    }

    fn pan(&mut self, delta: Vec2, height: f32) {
        let forward = (self.target - self.eye()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        let scale = self.radius / height;
        self.target += (-right * delta.x + up * delta.y) * scale;
    }

    fn zoom(&mut self, scroll: f32) {
        self.radius *= ZOOM_STEP.powf(scroll);
        self.clamp();
    }

    fn clamp(&mut self) {
        self.phi = self.phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.radius = self
            .radius
            .clamp(self.settings.min_distance, self.settings.max_distance);
    }

    /// Current eye position in world space.
    pub fn eye(&self) -> Vec3 {
        let sin_phi = self.phi.sin();
        self.target
            + Vec3::new(
                self.radius * sin_phi * self.theta.sin(),
                self.radius * self.phi.cos(),
                self.radius * sin_phi * self.theta.cos(),
            )
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn polar_angle(&self) -> f32 {
        self.phi
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::{ElementState, MouseScrollDelta};

    const START: Vec3 = Vec3::new(0.0, 100.0, 2000.0);

    fn dragging(dx: f64, dy: f64) -> MouseState {
        let mut mouse = MouseState::new();
        mouse.on_cursor_moved(500.0, 500.0);
        mouse.on_button(MouseButton::Left, ElementState::Pressed);
        mouse.on_cursor_moved(500.0 + dx, 500.0 + dy);
        mouse
    }

    #[test]
    fn test_initial_eye_round_trips() {
        let orbit = OrbitController::new(START, Vec3::ZERO, OrbitSettings::default());
        assert!((orbit.eye() - START).length() < 1e-2);
        assert!((orbit.distance() - START.length()).abs() < 1e-3);
    }

    #[test]
    fn test_horizontal_drag_keeps_height_and_distance() {
        let mut orbit = OrbitController::new(START, Vec3::ZERO, OrbitSettings::default());
        let moved = orbit.update(&dragging(120.0, 0.0), 720);
        assert!(moved);
        let eye = orbit.eye();
        assert!((eye.y - START.y).abs() < 1e-2);
        assert!((eye.length() - START.length()).abs() < 1e-2);
        assert!(eye.x.abs() > 1.0);
    }

    #[test]
    fn test_full_height_drag_is_one_revolution() {
        let mut orbit = OrbitController::new(START, Vec3::ZERO, OrbitSettings::default());
        orbit.rotate(Vec2::new(720.0, 0.0), 720.0);
        assert!((orbit.eye() - START).length() < 0.5);
    }

    #[test]
    fn test_polar_angle_is_clamped() {
        let mut orbit = OrbitController::new(START, Vec3::ZERO, OrbitSettings::default());
        orbit.rotate(Vec2::new(0.0, 10_000.0), 720.0);
        assert!(orbit.polar_angle() >= POLAR_EPSILON);
        orbit.rotate(Vec2::new(0.0, -100_000.0), 720.0);
        assert!(orbit.polar_angle() <= PI - POLAR_EPSILON);
        assert!(orbit.eye().is_finite());
    }

    #[test]
    fn test_no_drag_without_button() {
        let mut orbit = OrbitController::new(START, Vec3::ZERO, OrbitSettings::default());
        let mut mouse = MouseState::new();
        mouse.on_cursor_moved(0.0, 0.0);
        mouse.on_cursor_moved(300.0, 40.0);
        assert!(!orbit.update(&mouse, 720));
        assert!((orbit.eye() - START).length() < 1e-2);
    }

    #[test]
    fn test_zoom_disabled_by_default() {
        let mut orbit = OrbitController::new(START, Vec3::ZERO, OrbitSettings::default());
        let mut mouse = MouseState::new();
        mouse.on_scroll(MouseScrollDelta::LineDelta(0.0, 3.0));
        assert!(!orbit.update(&mouse, 720));
        assert!((orbit.distance() - START.length()).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_when_enabled() {
        let settings = OrbitSettings {
            enable_zoom: true,
            min_distance: 500.0,
            ..OrbitSettings::default()
        };
        let mut orbit = OrbitController::new(START, Vec3::ZERO, settings);
        let mut mouse = MouseState::new();
        mouse.on_scroll(MouseScrollDelta::LineDelta(0.0, 100.0));
        assert!(orbit.update(&mouse, 720));
        assert!((orbit.distance() - 500.0).abs() < 1e-3);
    }

    #[test]
    fn test_pan_disabled_by_default() {
        let mut orbit = OrbitController::new(START, Vec3::ZERO, OrbitSettings::default());
        let mut mouse = MouseState::new();
        mouse.on_cursor_moved(0.0, 0.0);
        mouse.on_button(MouseButton::Right, ElementState::Pressed);
        mouse.on_cursor_moved(50.0, 50.0);
        orbit.update(&mouse, 720);
        assert_eq!(orbit.target(), Vec3::ZERO);
    }

    #[test]
    fn test_pan_moves_target_when_enabled() {
        let settings = OrbitSettings {
            enable_pan: true,
            ..OrbitSettings::default()
        };
        let mut orbit = OrbitController::new(START, Vec3::ZERO, settings);
        let mut mouse = MouseState::new();
        mouse.on_cursor_moved(0.0, 0.0);
        mouse.on_button(MouseButton::Right, ElementState::Pressed);
        mouse.on_cursor_moved(50.0, 0.0);
        assert!(orbit.update(&mouse, 720));
        assert!(orbit.target().x < 0.0);
    }

    #[test]
    fn test_eye_at_target_is_finite() {
        let orbit = OrbitController::new(Vec3::ZERO, Vec3::ZERO, OrbitSettings::default());
        assert!(orbit.eye().is_finite());
    }
}
