//! Input events and per-frame input state.

use std::collections::VecDeque;
use std::time::Duration;

use crate::types::Vec2;

/// Discrete key presses the game reacts to
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key {
    /// Back to the start menu
    Escape,
    /// Start/pause the match
    TogglePlay,
    /// Switch between default and full-height paddles
    ToggleTall,
}

/// Events delivered by the host, applied in arrival order
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    Key(Key),
    /// Pointer position in court units
    PointerMoved(Vec2),
    /// Primary button pressed at the last known pointer position
    Click,
    /// Window client area changed
    Resize { width: f32, height: f32 },
}

/// Movement keys currently held down
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct HeldKeys {
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
}

impl HeldKeys {
    pub fn none() -> Self {
        Self::default()
    }

    /// Requested left paddle moves, up first
    pub fn left_moves(&self) -> impl Iterator<Item = i8> {
        moves(self.left_up, self.left_down)
    }

    /// Requested right paddle moves, up first
    pub fn right_moves(&self) -> impl Iterator<Item = i8> {
        moves(self.right_up, self.right_down)
    }
}

// Up and down are applied independently, so holding both cancels out
fn moves(up: bool, down: bool) -> impl Iterator<Item = i8> {
    let up = up.then_some(-1);
    let down = down.then_some(1);
    up.into_iter().chain(down)
}

/// FIFO of pending input events, drained once per step
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn pop(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Per-frame input from the host
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// Real time elapsed since the previous frame
    pub dt: Duration,
    pub held: HeldKeys,
}

impl Frame {
    pub fn new(dt: Duration, held: HeldKeys) -> Self {
        Frame { dt, held }
    }

    /// A frame at the given rate with no keys held
    pub fn at_hz(hz: u16) -> Self {
        Frame {
            dt: Duration::from_secs(1) / u32::from(hz.max(1)),
            held: HeldKeys::none(),
        }
    }
}
