//! Pong core game engine - frame-driven single-process Pong simulation

pub mod config;
pub mod game;
pub mod input;
pub mod menu;
pub mod physics;
pub mod ramp;
pub mod types;

pub use config::{Config, ConfigError};
pub use game::Game;
pub use input::{Frame, HeldKeys, InputEvent, InputQueue, Key};
pub use menu::{MenuItem, MENU_ITEMS};
pub use ramp::DifficultyRamp;
pub use types::*;
