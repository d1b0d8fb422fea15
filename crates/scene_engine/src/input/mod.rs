//! Input management system
//!
//! Keyboard state is double-buffered: the engine snapshots the current key
//! set into the previous one once the scene has updated, which is what makes
//! "pressed this frame" ([`InputManager::trigger_key`]) answerable.

pub mod script;

pub use script::{InputScript, KeyEvent};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Input manager
#[derive(Debug, Default, Clone)]
pub struct InputManager {
    current: HashSet<KeyCode>,
    previous: HashSet<KeyCode>,
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self::default()
    }

    /// End the frame: the current key set becomes the previous one
    pub fn update(&mut self) {
        self.previous.clone_from(&self.current);
    }

    /// Handle key input
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.current.insert(key);
        } else {
            self.current.remove(&key);
        }
    }

    /// Release every key (focus loss)
    pub fn clear(&mut self) {
        self.current.clear();
    }

    /// Key is held this frame
    pub fn push_key(&self, key: KeyCode) -> bool {
        self.current.contains(&key)
    }

    /// Key went down this frame
    pub fn trigger_key(&self, key: KeyCode) -> bool {
        self.current.contains(&key) && !self.previous.contains(&key)
    }

    /// Key went up this frame
    pub fn release_key(&self, key: KeyCode) -> bool {
        !self.current.contains(&key) && self.previous.contains(&key)
    }

    /// `+1` when `positive` is held, `-1` when `negative` is held, `0` for both or neither
    pub fn axis(&self, negative: KeyCode, positive: KeyCode) -> f32 {
        match (self.push_key(negative), self.push_key(positive)) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// 0 key
    Digit0,
    /// 1 key
    Digit1,
    /// 2 key
    Digit2,
    /// 3 key
    Digit3,
    /// 4 key
    Digit4,
    /// 5 key
    Digit5,
    /// 6 key
    Digit6,
    /// 7 key
    Digit7,
    /// 8 key
    Digit8,
    /// 9 key
    Digit9,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}
