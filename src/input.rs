//! Keyboard direction tracking
//!
//! Key listeners write here; the frame loop reads a snapshot at the start of
//! each tick. Last write wins, nothing is queued.

use crate::sim::TickInput;

/// Logical direction controlled by the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Map a `KeyboardEvent.key` value to a direction
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// The key that toggles sound on and off
pub fn is_mute_key(key: &str) -> bool {
    matches!(key, "m" | "M")
}

/// Current held state of the two directions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputTracker {
    left: bool,
    right: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down. Returns true if the key is one we track.
    pub fn press(&mut self, key: &str) -> bool {
        self.set_key(key, true)
    }

    /// Key went up. Returns true if the key is one we track.
    pub fn release(&mut self, key: &str) -> bool {
        self.set_key(key, false)
    }

    fn set_key(&mut self, key: &str, held: bool) -> bool {
        match Direction::from_key(key) {
            Some(direction) => {
                self.set(direction, held);
                true
            }
            None => false,
        }
    }

    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Drop all held keys (e.g. when the page loses focus)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Input for the next tick
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
        }
    }
}
