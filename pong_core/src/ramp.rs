//! Difficulty ramp: a wall-clock interval timer driven by frame time.

use std::time::Duration;

use crate::config::Config;
use crate::types::{Mode, Speeds};

/// Accumulates elapsed real time while running and reports whole intervals.
#[derive(Debug, Clone)]
pub struct DifficultyRamp {
    interval: Duration,
    elapsed: Duration,
    running: bool,
}

impl DifficultyRamp {
    pub fn new(interval: Duration) -> Self {
        DifficultyRamp {
            interval,
            elapsed: Duration::ZERO,
            running: false,
        }
    }

    /// Start timing from zero; no-op when already running
    pub fn start(&mut self) {
        if !self.running {
            log::debug!("difficulty ramp started");
            self.running = true;
            self.elapsed = Duration::ZERO;
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Time accumulated toward the next tick
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Add elapsed time and return how many intervals completed
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.running || self.interval.is_zero() {
            return 0;
        }

        self.elapsed += dt;
        let fired = self.elapsed.as_nanos() / self.interval.as_nanos();
        if fired == 0 {
            return 0;
        }
        // Below one interval, so it fits in u64 nanoseconds
        let remainder = self.elapsed.as_nanos() % self.interval.as_nanos();
        self.elapsed = Duration::from_nanos(remainder as u64);
        u32::try_from(fired).unwrap_or(u32::MAX)
    }
}

impl Speeds {
    /// Apply one ramp tick
    pub fn ramp(&mut self, mode: Mode, config: &Config) {
        self.ball += config.ball_speed_increment;
        self.left_paddle += config.left_paddle_speed_increment;
        self.right_paddle += config.right_paddle_ramp(mode);
    }
}
