//! Game configuration and validation.

use std::ops::{Range, RangeInclusive};
use std::time::Duration;

use thiserror::Error;

use crate::types::{Court, Mode, Side, Speeds};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{0} range is empty")]
    EmptyRange(&'static str),
    #[error("court {width}x{height} cannot fit a paddle of height {paddle_height}")]
    CourtTooSmall {
        width: f32,
        height: f32,
        paddle_height: f32,
    },
    #[cfg(feature = "serde")]
    #[error("failed to read config file {path}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[cfg(feature = "serde")]
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Game configuration
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Court size at startup
    pub court_width: f32,
    pub court_height: f32,
    /// Gap between window edge and border
    pub margin: f32,
    pub ball_radius: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Paddle distance from its court edge
    pub paddle_inset: f32,
    pub ball_speed: f32,
    pub left_paddle_speed: f32,
    pub right_paddle_speed: f32,
    pub ball_speed_increment: f32,
    pub left_paddle_speed_increment: f32,
    pub right_paddle_speed_increment: f32,
    /// Extra right-paddle increment when the computer plays it
    pub ai_speed_bonus: f32,
    pub ramp_interval_ms: u64,
    /// Frames the ball waits after a point
    pub serve_delay_ticks: u16,
    /// Bounce factor draw, in tenths, half-open
    pub bounce_tenths_min: i32,
    pub bounce_tenths_max: i32,
    /// Serve direction draw, inclusive; a draw > 0 serves positive
    pub serve_draw_min: i32,
    pub serve_draw_max: i32,
    pub menu_item_width: f32,
    pub menu_item_height: f32,
    /// Random seed; entropy when unset
    pub seed: Option<u64>,
    /// Frame rate (Hz) the hosts step the game at
    pub tick_hz: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            court_width: 800.0,
            court_height: 600.0,
            margin: 20.0,
            ball_radius: 20.0,
            paddle_width: 20.0,
            paddle_height: 160.0,
            paddle_inset: 40.0,
            ball_speed: 8.0,
            left_paddle_speed: 12.0,
            right_paddle_speed: 8.0,
            ball_speed_increment: 1.0,
            left_paddle_speed_increment: 0.5,
            right_paddle_speed_increment: 0.5,
            ai_speed_bonus: 0.35,
            ramp_interval_ms: 4000,
            serve_delay_ticks: 45, // 750 ms at 60 Hz
            bounce_tenths_min: 8,
            bounce_tenths_max: 12,
            serve_draw_min: -5,
            serve_draw_max: 5,
            menu_item_width: 300.0,
            menu_item_height: 40.0,
            seed: None,
            tick_hz: 60,
        }
    }
}

impl Config {
    /// Check that every value can produce a playable court
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("court_width", self.court_width),
            ("court_height", self.court_height),
            ("ball_radius", self.ball_radius),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_speed", self.ball_speed),
            ("left_paddle_speed", self.left_paddle_speed),
            ("right_paddle_speed", self.right_paddle_speed),
            ("menu_item_width", self.menu_item_width),
            ("menu_item_height", self.menu_item_height),
        ];
        for (field, value) in positive {
            // Also rejects NaN
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if self.margin < 0.0 {
            return Err(ConfigError::NotPositive {
                field: "margin",
                value: self.margin,
            });
        }
        if self.ramp_interval_ms == 0 {
            return Err(ConfigError::NotPositive {
                field: "ramp_interval_ms",
                value: 0.0,
            });
        }
        if self.tick_hz == 0 {
            return Err(ConfigError::NotPositive {
                field: "tick_hz",
                value: 0.0,
            });
        }
        if self.bounce_tenths_min >= self.bounce_tenths_max {
            return Err(ConfigError::EmptyRange("bounce_tenths"));
        }
        if self.serve_draw_min > self.serve_draw_max {
            return Err(ConfigError::EmptyRange("serve_draw"));
        }

        let (min_width, min_height) = self.min_court_size();
        if self.court_width < min_width || self.court_height < min_height {
            return Err(ConfigError::CourtTooSmall {
                width: self.court_width,
                height: self.court_height,
                paddle_height: self.paddle_height,
            });
        }

        Ok(())
    }

    /// Smallest court that fits both paddles, the ball and the menu
    pub fn min_court_size(&self) -> (f32, f32) {
        let width = (2.0 * (self.paddle_inset + self.paddle_width + self.ball_radius) + 1.0)
            .max(self.menu_item_width + 2.0 * self.margin);
        let height = (2.0 * self.margin + self.paddle_height + 1.0)
            .max(2.0 * (self.margin + self.ball_radius) + 1.0);
        (width, height)
    }

    /// Build a court from window dimensions, clamped to the minimum size
    pub fn court(&self, width: f32, height: f32) -> Court {
        let (min_width, min_height) = self.min_court_size();
        Court::new(width.max(min_width), height.max(min_height), self.margin)
    }

    pub fn ramp_interval(&self) -> Duration {
        Duration::from_millis(self.ramp_interval_ms)
    }

    pub fn bounce_tenths(&self) -> Range<i32> {
        self.bounce_tenths_min..self.bounce_tenths_max
    }

    pub fn serve_draw(&self) -> RangeInclusive<i32> {
        self.serve_draw_min..=self.serve_draw_max
    }

    pub fn initial_speeds(&self) -> Speeds {
        Speeds {
            ball: self.ball_speed,
            left_paddle: self.left_paddle_speed,
            right_paddle: self.right_paddle_speed,
        }
    }

    /// Right-paddle increment per ramp tick in the given mode
    pub fn right_paddle_ramp(&self, mode: Mode) -> f32 {
        match mode {
            Mode::SinglePlayer => self.right_paddle_speed_increment + self.ai_speed_bonus,
            _ => self.right_paddle_speed_increment,
        }
    }

    /// Paddle x position for a side on the given court
    pub fn paddle_x(&self, court: &Court, side: Side) -> f32 {
        match side {
            Side::Left => self.paddle_inset,
            Side::Right => court.width - self.paddle_inset - self.paddle_width,
        }
    }
}

#[cfg(feature = "serde")]
impl Config {
    /// Parse a (possibly partial) TOML document; missing keys keep defaults
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
