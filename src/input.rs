//! Keyboard/touch input handling
//!
//! Key events land whenever the browser delivers them; the simulation only
//! looks at a snapshot of held actions once per frame.

use crate::sim::TickInput;

/// Logical player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Jump,
}

impl Action {
    /// Map a `KeyboardEvent.key` value to an action (case-insensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "a" | "arrowleft" => Some(Action::Left),
            "d" | "arrowright" => Some(Action::Right),
            "w" | " " | "arrowup" => Some(Action::Jump),
            _ => None,
        }
    }
}

/// Held-key state. A pressed key stays held until its release arrives.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    left: bool,
    right: bool,
    jump: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press or release an action directly (touch buttons)
    pub fn set(&mut self, action: Action, held: bool) {
        match action {
            Action::Left => self.left = held,
            Action::Right => self.right = held,
            Action::Jump => self.jump = held,
        }
    }

    /// Handle key down event. Returns true if the key is bound.
    pub fn key_down(&mut self, key: &str) -> bool {
        match Action::from_key(key) {
            Some(action) => {
                self.set(action, true);
                true
            }
            None => false,
        }
    }

    /// Handle key up event. Returns true if the key is bound.
    pub fn key_up(&mut self, key: &str) -> bool {
        match Action::from_key(key) {
            Some(action) => {
                self.set(action, false);
                true
            }
            None => false,
        }
    }

    /// Release everything (e.g. on window blur, where key-ups get lost)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    pub fn is_held(&self, action: Action) -> bool {
        match action {
            Action::Left => self.left,
            Action::Right => self.right,
            Action::Jump => self.jump,
        }
    }

    /// Snapshot for one simulation frame
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            jump: self.jump,
        }
    }
}
