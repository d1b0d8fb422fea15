//! Scripted keyboard input
//!
//! A list of key transitions keyed by frame number, used to drive the
//! headless loop the same way every run. Scripts are plain config files:
//!
//! ```ron
//! (events: [
//!     (frame: 0, key: Right, pressed: true),
//!     (frame: 30, key: Right, pressed: false),
//! ])
//! ```

use serde::{Deserialize, Serialize};

use super::{InputManager, KeyCode};
use crate::config::Config;

/// A key going down or up on a given frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Frame the transition happens on (0-based)
    pub frame: u64,
    /// Key affected
    pub key: KeyCode,
    /// `true` for press, `false` for release
    pub pressed: bool,
}

/// Ordered key transitions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputScript {
    /// Transitions; order within a frame is preserved
    pub events: Vec<KeyEvent>,
}

impl InputScript {
    /// Empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: press `key` on `frame`
    #[must_use]
    pub fn press(mut self, frame: u64, key: KeyCode) -> Self {
        self.events.push(KeyEvent { frame, key, pressed: true });
        self
    }

    /// Builder: release `key` on `frame`
    #[must_use]
    pub fn release(mut self, frame: u64, key: KeyCode) -> Self {
        self.events.push(KeyEvent { frame, key, pressed: false });
        self
    }

    /// Builder: hold `key` from `start` for `frames` frames
    #[must_use]
    pub fn hold(self, key: KeyCode, start: u64, frames: u64) -> Self {
        self.press(start, key).release(start + frames, key)
    }

    /// Apply every event scheduled for `frame`
    pub fn apply(&self, frame: u64, input: &mut InputManager) {
        for event in self.events.iter().filter(|event| event.frame == frame) {
            log::trace!("Frame {}: {:?} pressed={}", frame, event.key, event.pressed);
            input.handle_key_input(event.key, event.pressed);
        }
    }

    /// Last frame with an event, if any
    pub fn last_frame(&self) -> Option<u64> {
        self.events.iter().map(|event| event.frame).max()
    }
}

impl Config for InputScript {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_presses_then_releases() {
        let script = InputScript::new().hold(KeyCode::W, 2, 3);
        let mut input = InputManager::new();

        let mut held = Vec::new();
        for frame in 0..8 {
            input.update();
            script.apply(frame, &mut input);
            held.push(input.push_key(KeyCode::W));
        }

        assert_eq!(held, vec![false, false, true, true, true, false, false, false]);
        assert_eq!(script.last_frame(), Some(5));
    }

    #[test]
    fn test_parse_ron_script() {
        let script = InputScript::from_ron(
            "(events: [(frame: 0, key: Space, pressed: true), (frame: 1, key: Space, pressed: false)])",
        )
        .unwrap();
        assert_eq!(script, InputScript::new().press(0, KeyCode::Space).release(1, KeyCode::Space));
    }

    #[test]
    fn test_parse_toml_script() {
        let script = InputScript::from_toml(
            r#"
            [[events]]
            frame = 4
            key = "Left"
            pressed = true
            "#,
        )
        .unwrap();
        assert_eq!(script.events, vec![KeyEvent { frame: 4, key: KeyCode::Left, pressed: true }]);
    }
}
