//! Keyboard camera panning
//!
//! Arrow keys only flip flags; the camera moves on a fixed-period tick
//! that reads them, independent of the frame rate.

pub mod interval;
pub mod key_flags;

use std::time::Duration;

use winit::{event::ElementState, keyboard::KeyCode};

use crate::{config::InputConfig, gfx::camera::OrbitCamera};

pub use interval::{IntervalTimer, MAX_CATCH_UP_TICKS};
pub use key_flags::{ArrowKeys, PanKey};

/// Arrow flags plus the tick that turns them into camera movement.
#[derive(Debug, Clone)]
pub struct KeyboardPan {
    pub keys: ArrowKeys,
    timer: IntervalTimer,
    step: f32,
}

impl KeyboardPan {
    pub fn new(period: Duration, step: f32) -> Self {
        Self {
            keys: ArrowKeys::default(),
            timer: IntervalTimer::new(period),
            step,
        }
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self::new(config.pan_interval(), config.pan_step)
    }

    pub fn handle_key(&mut self, code: KeyCode, state: ElementState) -> bool {
        self.keys.handle_key(code, state)
    }

    /// Runs every tick that fell due during `elapsed` and returns their count.
    ///
    /// Each tick moves eye and target together by `step` along the camera's
    /// ground-plane right and forward axes, so the view direction is kept.
    pub fn update(&mut self, elapsed: Duration, camera: &mut OrbitCamera) -> u32 {
        let ticks = self.timer.advance(elapsed);
        let (dx, dy) = self.keys.direction();
        if ticks > 0 && (dx != 0.0 || dy != 0.0) {
            let distance = self.step * ticks as f32;
            camera.pan_ground(distance * dx, distance * dy);
        }
        ticks
    }

    /// Drops every held key and the partial tick, as on focus loss.
    pub fn release_all(&mut self) {
        self.keys.release_all();
        self.timer.reset();
    }

    pub fn step(&self) -> f32 {
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::{InnerSpace, Vector3};

    fn camera() -> OrbitCamera {
        OrbitCamera::from_eye_target(
            Vector3::new(0.0, 50.0, -100.0),
            Vector3::new(0.0, 0.0, 0.0),
            1.5,
        )
    }

    #[test]
    fn test_no_keys_no_movement() {
        let mut pan = KeyboardPan::new(Duration::from_millis(10), 2.0);
        let mut cam = camera();
        let before = cam.eye;
        assert_eq!(pan.update(Duration::from_millis(50), &mut cam), 5);
        assert_eq!(cam.eye, before);
    }

    #[test]
    fn test_forward_pan_is_proportional_to_ticks() {
        let mut pan = KeyboardPan::new(Duration::from_millis(10), 2.0);
        pan.handle_key(KeyCode::ArrowUp, ElementState::Pressed);
        let mut cam = camera();
        let start_eye = cam.eye;
        let start_target = cam.target;

        assert_eq!(pan.update(Duration::from_millis(30), &mut cam), 3);

        // Camera looks towards +Z on the ground plane.
        assert_relative_eq!(cam.eye.z - start_eye.z, 6.0, epsilon = 1e-4);
        assert_relative_eq!(cam.target.z - start_target.z, 6.0, epsilon = 1e-4);
        assert_relative_eq!(cam.eye.y, start_eye.y, epsilon = 1e-4);
    }

    #[test]
    fn test_pan_keeps_view_direction() {
        let mut pan = KeyboardPan::new(Duration::from_millis(10), 1.0);
        pan.handle_key(KeyCode::ArrowRight, ElementState::Pressed);
        let mut cam = camera();
        let before = (cam.target - cam.eye).normalize();

        pan.update(Duration::from_millis(40), &mut cam);

        let after = (cam.target - cam.eye).normalize();
        assert_relative_eq!(before.dot(after), 1.0, epsilon = 1e-5);
        assert_relative_eq!(
            (cam.target - Vector3::new(0.0, 0.0, 0.0)).magnitude(),
            4.0,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_release_stops_movement() {
        let mut pan = KeyboardPan::new(Duration::from_millis(10), 1.0);
        let mut cam = camera();
        pan.handle_key(KeyCode::ArrowLeft, ElementState::Pressed);
        pan.update(Duration::from_millis(10), &mut cam);
        pan.handle_key(KeyCode::ArrowLeft, ElementState::Released);
        let held = cam.eye;
        pan.update(Duration::from_millis(100), &mut cam);
        assert_eq!(cam.eye, held);
    }

    #[test]
    fn test_release_all_drops_keys_and_partial_tick() {
        let mut pan = KeyboardPan::new(Duration::from_millis(10), 1.0);
        let mut cam = camera();
        pan.handle_key(KeyCode::ArrowUp, ElementState::Pressed);
        assert_eq!(pan.update(Duration::from_millis(7), &mut cam), 0);

        pan.release_all();
        assert_eq!(pan.keys, ArrowKeys::default());
        // The 7ms from before the release is gone.
        assert_eq!(pan.update(Duration::from_millis(3), &mut cam), 0);
        assert_eq!(pan.update(Duration::from_millis(7), &mut cam), 1);
    }
}
