//! Frame-coherent keyboard state tracker.
//!
//! [`KeyboardState`] collects winit key events during a frame. Besides
//! held / just-pressed / just-released it records auto-repeat events, so a
//! held arrow key keeps stepping a panel value.

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Minimal description of a key event; lets tests feed input without winit.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    pub key: PhysicalKey,
    pub state: ElementState,
    pub repeat: bool,
}

impl RawKeyEvent {
    pub fn pressed(code: KeyCode) -> Self {
        Self {
            key: PhysicalKey::Code(code),
            state: ElementState::Pressed,
            repeat: false,
        }
    }

    pub fn released(code: KeyCode) -> Self {
        Self {
            key: PhysicalKey::Code(code),
            state: ElementState::Released,
            repeat: false,
        }
    }

    pub fn repeated(code: KeyCode) -> Self {
        Self {
            key: PhysicalKey::Code(code),
            state: ElementState::Pressed,
            repeat: true,
        }
    }
}

/// Per-frame keyboard state keyed by physical key.
///
/// Forward every [`KeyEvent`] to [`process_event`](Self::process_event), query
/// during the frame, then call [`clear_transients`](Self::clear_transients).
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<PhysicalKey>,
    just_pressed: HashSet<PhysicalKey>,
    just_released: HashSet<PhysicalKey>,
    repeated: HashSet<PhysicalKey>,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_event(&mut self, event: &KeyEvent) {
        self.process_raw(RawKeyEvent {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        });
    }

    pub fn process_raw(&mut self, event: RawKeyEvent) {
        match (event.state, event.repeat) {
            (ElementState::Pressed, true) => {
                self.repeated.insert(event.key);
            }
            (ElementState::Pressed, false) => {
                self.pressed.insert(event.key);
                self.just_pressed.insert(event.key);
            }
            (ElementState::Released, _) => {
                self.pressed.remove(&event.key);
                self.just_released.insert(event.key);
            }
        }
    }

    #[must_use]
    pub fn is_pressed(&self, code: KeyCode) -> bool {
        self.pressed.contains(&PhysicalKey::Code(code))
    }

    #[must_use]
    pub fn just_pressed(&self, code: KeyCode) -> bool {
        self.just_pressed.contains(&PhysicalKey::Code(code))
    }

    #[must_use]
    pub fn just_released(&self, code: KeyCode) -> bool {
        self.just_released.contains(&PhysicalKey::Code(code))
    }

    /// Pressed this frame, or auto-repeated while held.
    #[must_use]
    pub fn pressed_or_repeated(&self, code: KeyCode) -> bool {
        let key = PhysicalKey::Code(code);
        self.just_pressed.contains(&key) || self.repeated.contains(&key)
    }

    #[must_use]
    pub fn shift_held(&self) -> bool {
        self.is_pressed(KeyCode::ShiftLeft) || self.is_pressed(KeyCode::ShiftRight)
    }

    /// Forget every held key, e.g. when the window loses focus and release
    /// events will never arrive.
    pub fn release_all(&mut self) {
        self.just_released.extend(self.pressed.drain());
    }

    pub fn clear_transients(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.repeated.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_no_keys_pressed() {
        let kb = KeyboardState::new();
        for code in [KeyCode::Tab, KeyCode::ArrowLeft, KeyCode::Space] {
            assert!(!kb.is_pressed(code));
            assert!(!kb.just_pressed(code));
            assert!(!kb.just_released(code));
        }
    }

    #[test]
    fn test_press_then_release() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::pressed(KeyCode::KeyP));
        assert!(kb.is_pressed(KeyCode::KeyP));
        assert!(kb.just_pressed(KeyCode::KeyP));

        kb.process_raw(RawKeyEvent::released(KeyCode::KeyP));
        assert!(!kb.is_pressed(KeyCode::KeyP));
        assert!(kb.just_released(KeyCode::KeyP));
    }

    #[test]
    fn test_just_pressed_lasts_one_frame() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::pressed(KeyCode::Space));
        kb.clear_transients();
        assert!(!kb.just_pressed(KeyCode::Space));
        assert!(kb.is_pressed(KeyCode::Space));
    }

    #[test]
    fn test_repeat_is_not_a_fresh_press() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::pressed(KeyCode::ArrowRight));
        kb.clear_transients();
        kb.process_raw(RawKeyEvent::repeated(KeyCode::ArrowRight));
        assert!(!kb.just_pressed(KeyCode::ArrowRight));
        assert!(kb.pressed_or_repeated(KeyCode::ArrowRight));
        kb.clear_transients();
        assert!(!kb.pressed_or_repeated(KeyCode::ArrowRight));
    }

    #[test]
    fn test_shift_either_side() {
        let mut kb = KeyboardState::new();
        assert!(!kb.shift_held());
        kb.process_raw(RawKeyEvent::pressed(KeyCode::ShiftRight));
        assert!(kb.shift_held());
        kb.process_raw(RawKeyEvent::released(KeyCode::ShiftRight));
        kb.process_raw(RawKeyEvent::pressed(KeyCode::ShiftLeft));
        assert!(kb.shift_held());
    }

    #[test]
    fn test_release_all_on_focus_loss() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::pressed(KeyCode::ShiftLeft));
        kb.process_raw(RawKeyEvent::pressed(KeyCode::ArrowUp));
        kb.clear_transients();
        kb.release_all();
        assert!(!kb.shift_held());
        assert!(!kb.is_pressed(KeyCode::ArrowUp));
        assert!(kb.just_released(KeyCode::ArrowUp));
    }

    #[test]
    fn test_keys_tracked_independently() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::pressed(KeyCode::Tab));
        kb.process_raw(RawKeyEvent::pressed(KeyCode::KeyH));
        kb.process_raw(RawKeyEvent::released(KeyCode::Tab));
        assert!(!kb.is_pressed(KeyCode::Tab));
        assert!(kb.is_pressed(KeyCode::KeyH));
        assert!(kb.just_released(KeyCode::Tab));
        assert!(kb.just_pressed(KeyCode::KeyH));
    }
}
