use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use super::orbit_camera::OrbitCamera;

/// Mouse orbit controls: drag to rotate, shift-drag to pan, wheel to zoom.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    /// Cleared while the HUD owns the pointer.
    pub enabled: bool,
    is_shift_held: bool,
    is_mouse_pressed: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32, pan_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed,
            enabled: true,
            is_shift_held: false,
            is_mouse_pressed: false,
        }
    }

    pub fn process_events(
        &mut self,
        event: &DeviceEvent,
        window: &Window,
        camera: &mut OrbitCamera,
    ) {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed && self.enabled;
            }
            DeviceEvent::MouseWheel { delta } if self.enabled => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                camera.add_distance(scroll_amount * self.zoom_speed);
                window.request_redraw();
            }
            DeviceEvent::MouseMotion { delta } if self.is_mouse_pressed => {
                let (dx, dy) = self.drag_delta(*delta);
                if self.is_shift_held {
                    camera.pan((-dx * self.pan_speed, dy * self.pan_speed));
                } else {
                    camera.add_yaw(-dx * self.rotate_speed);
                    camera.add_pitch(dy * self.rotate_speed);
                }
                window.request_redraw();
            }
            _ => (),
        }
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent, camera: &mut OrbitCamera) {
        match event {
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight),
                state,
                ..
            } => {
                self.set_shift(*state == ElementState::Pressed);
            }
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::KeyC),
                state: ElementState::Pressed,
                ..
            } => {
                if self.is_shift_held {
                    log::info!("Resetting camera to its start position");
                    camera.reset_to_default();
                }
            }
            _ => (),
        }
    }

    fn set_shift(&mut self, held: bool) {
        if held != self.is_shift_held {
            log::debug!("Shift held: {}", held);
        }
        self.is_shift_held = held;
    }

    fn drag_delta(&self, delta: (f64, f64)) -> (f32, f32) {
        (delta.0 as f32, delta.1 as f32)
    }

    /// Returns true if currently panning
    pub fn is_panning(&self) -> bool {
        self.is_mouse_pressed && self.is_shift_held
    }

    /// Returns true if currently rotating
    pub fn is_rotating(&self) -> bool {
        self.is_mouse_pressed && !self.is_shift_held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_mode_follows_shift() {
        let mut controller = CameraController::new(0.005, 0.5, 0.01);
        controller.is_mouse_pressed = true;
        assert!(controller.is_rotating());
        controller.set_shift(true);
        assert!(controller.is_panning());
        assert!(!controller.is_rotating());
    }
}
