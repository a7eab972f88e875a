//! Held-key tracking for the once-per-frame exit check.
//!
//! Keys are tracked by physical code so the exit key does not depend on the
//! keyboard layout.

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Key that closes the window when held at the start of a frame.
pub const EXIT_KEY: PhysicalKey = PhysicalKey::Code(KeyCode::Escape);

/// Minimal description of a key event for processing.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    pub key: PhysicalKey,
    pub state: ElementState,
    pub repeat: bool,
}

/// Set of physical keys currently held down.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<PhysicalKey>,
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

    /// Repeat events are ignored.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        match event.state {
            ElementState::Pressed => {
                self.pressed.insert(event.key);
            }
            ElementState::Released => {
                self.pressed.remove(&event.key);
            }
        }
    }

    #[must_use]
    pub fn is_pressed(&self, key: PhysicalKey) -> bool {
        self.pressed.contains(&key)
    }

    /// True while [`EXIT_KEY`] is held.
    #[must_use]
    pub fn exit_requested(&self) -> bool {
        self.is_pressed(EXIT_KEY)
    }

    /// Forget held keys, e.g. after focus loss when releases go unseen.
    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: KeyCode) -> RawKeyEvent {
        RawKeyEvent {
            key: PhysicalKey::Code(key),
            state: ElementState::Pressed,
            repeat: false,
        }
    }

    fn release(key: KeyCode) -> RawKeyEvent {
        RawKeyEvent {
            key: PhysicalKey::Code(key),
            state: ElementState::Released,
            repeat: false,
        }
    }

    #[test]
    fn test_escape_requests_exit_while_held() {
        let mut kb = KeyboardState::new();
        assert!(!kb.exit_requested());
        kb.process_raw(press(KeyCode::Escape));
        assert!(kb.exit_requested());
        kb.process_raw(release(KeyCode::Escape));
        assert!(!kb.exit_requested());
    }

    #[test]
    fn test_other_keys_do_not_exit() {
        let mut kb = KeyboardState::new();
        kb.process_raw(press(KeyCode::KeyQ));
        kb.process_raw(press(KeyCode::Space));
        assert!(!kb.exit_requested());
        assert!(kb.is_pressed(PhysicalKey::Code(KeyCode::KeyQ)));
    }

    #[test]
    fn test_repeat_events_ignored() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent {
            repeat: true,
            ..press(KeyCode::Escape)
        });
        assert!(!kb.exit_requested());
    }

    #[test]
    fn test_clear_forgets_held_keys() {
        let mut kb = KeyboardState::new();
        kb.process_raw(press(KeyCode::Escape));
        kb.clear();
        assert!(!kb.exit_requested());
    }
}
