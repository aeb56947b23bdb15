//! Keyboard adapter
//!
//! Turns key presses and releases into the per-tick `TickInput`. Arrow keys
//! are held state; space, p and r are one-shot commands that are consumed by
//! the next tick.

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Keys the game responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    /// Start in prepare, shoot while playing
    Space,
    Pause,
    Restart,
}

impl Key {
    /// Map a browser `KeyboardEvent.key` value; unknown keys are ignored
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            " " => Some(Key::Space),
            "p" | "P" => Some(Key::Pause),
            "r" | "R" => Some(Key::Restart),
            _ => None,
        }
    }
}

/// A key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(Key),
    Released(Key),
}

/// Input buffer between key events and the next tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pending: TickInput,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Pressed(Key::Left) => self.pending.move_left = true,
            KeyEvent::Pressed(Key::Right) => self.pending.move_right = true,
            KeyEvent::Released(Key::Left) => self.pending.move_left = false,
            KeyEvent::Released(Key::Right) => self.pending.move_right = false,
            KeyEvent::Pressed(Key::Space) => {
                // The tick decides which one applies to the current phase
                self.pending.launch = true;
                self.pending.shoot = true;
            }
            KeyEvent::Pressed(Key::Pause) => self.pending.pause = true,
            KeyEvent::Pressed(Key::Restart) => self.pending.restart = true,
            KeyEvent::Released(_) => {}
        }
    }

    /// Convenience for browser-style string key events
    pub fn handle_named(&mut self, name: &str, pressed: bool) {
        if let Some(key) = Key::from_name(name) {
            self.handle(if pressed {
                KeyEvent::Pressed(key)
            } else {
                KeyEvent::Released(key)
            });
        }
    }

    /// Current input without consuming anything
    pub fn peek(&self) -> &TickInput {
        &self.pending
    }

    /// Input for the next tick; one-shot commands are cleared, held keys stay
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = self.pending.clone();
        self.pending.launch = false;
        self.pending.shoot = false;
        self.pending.pause = false;
        self.pending.restart = false;
        input
    }
}
