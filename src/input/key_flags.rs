//! Arrow-key state
//!
//! Each arrow owns one flag: pressed sets it, released clears it. The flags
//! always reflect the latest transition; repeats and ordering are ignored.

use winit::{event::ElementState, keyboard::KeyCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanKey {
    Left,
    Right,
    Up,
    Down,
}

impl PanKey {
    pub const ALL: [PanKey; 4] = [PanKey::Left, PanKey::Right, PanKey::Up, PanKey::Down];

    pub fn from_key_code(code: KeyCode) -> Option<PanKey> {
        match code {
            KeyCode::ArrowLeft => Some(PanKey::Left),
            KeyCode::ArrowRight => Some(PanKey::Right),
            KeyCode::ArrowUp => Some(PanKey::Up),
            KeyCode::ArrowDown => Some(PanKey::Down),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PanKey::Left => "Left",
            PanKey::Right => "Right",
            PanKey::Up => "Up",
            PanKey::Down => "Down",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArrowKeys {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

impl ArrowKeys {
    pub fn set(&mut self, key: PanKey, pressed: bool) {
        match key {
            PanKey::Left => self.left = pressed,
            PanKey::Right => self.right = pressed,
            PanKey::Up => self.up = pressed,
            PanKey::Down => self.down = pressed,
        }
    }

    pub fn is_pressed(&self, key: PanKey) -> bool {
        match key {
            PanKey::Left => self.left,
            PanKey::Right => self.right,
            PanKey::Up => self.up,
            PanKey::Down => self.down,
        }
    }

    /// Updates the flag for an arrow key. Returns false for any other key.
    pub fn handle_key(&mut self, code: KeyCode, state: ElementState) -> bool {
        match PanKey::from_key_code(code) {
            Some(key) => {
                self.set(key, state.is_pressed());
                true
            }
            None => false,
        }
    }

    /// `(right - left, up - down)`, each component in {-1, 0, 1}.
    pub fn direction(&self) -> (f32, f32) {
        let axis = |positive: bool, negative: bool| positive as i8 as f32 - negative as i8 as f32;
        (axis(self.right, self.left), axis(self.up, self.down))
    }

    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }

    /// Clears every flag, e.g. when the window loses focus mid-press.
    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_follow_latest_transition() {
        let mut keys = ArrowKeys::default();
        assert!(keys.handle_key(KeyCode::ArrowLeft, ElementState::Pressed));
        assert!(keys.is_pressed(PanKey::Left));

        // Key repeat delivers a second press; the flag stays set.
        keys.handle_key(KeyCode::ArrowLeft, ElementState::Pressed);
        assert!(keys.is_pressed(PanKey::Left));

        keys.handle_key(KeyCode::ArrowLeft, ElementState::Released);
        assert!(!keys.is_pressed(PanKey::Left));
        assert!(!keys.any());
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut keys = ArrowKeys::default();
        assert!(!keys.handle_key(KeyCode::KeyW, ElementState::Pressed));
        assert_eq!(keys, ArrowKeys::default());
    }

    #[test]
    fn test_direction_cancels_opposites() {
        let mut keys = ArrowKeys::default();
        keys.set(PanKey::Right, true);
        keys.set(PanKey::Up, true);
        assert_eq!(keys.direction(), (1.0, 1.0));

        keys.set(PanKey::Left, true);
        assert_eq!(keys.direction(), (0.0, 1.0));

        keys.set(PanKey::Up, false);
        keys.set(PanKey::Down, true);
        assert_eq!(keys.direction(), (0.0, -1.0));
    }

    #[test]
    fn test_release_all() {
        let mut keys = ArrowKeys::default();
        for key in PanKey::ALL {
            keys.set(key, true);
        }
        keys.release_all();
        assert!(!keys.any());
    }
}
