//! Core types for the Pong simulation: geometry, entities and game modes.

use std::ops::{Add, Mul};

/// Tick counter type
pub type Tick = u32;

/// Player/paddle side
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Index into `[left, right]` arrays
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Which page the game is showing
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Start menu
    #[default]
    Menu,
    /// Player vs computer
    SinglePlayer,
    /// Player vs player
    TwoPlayer,
    /// Instructions page
    Instructions,
}

impl Mode {
    /// Map a page index to a mode. Unknown indices land on the menu.
    pub fn from_index(index: u8) -> Mode {
        match index {
            1 => Mode::SinglePlayer,
            2 => Mode::TwoPlayer,
            3 => Mode::Instructions,
            _ => Mode::Menu,
        }
    }

    /// Page index of this mode
    pub fn index(self) -> u8 {
        match self {
            Mode::Menu => 0,
            Mode::SinglePlayer => 1,
            Mode::TwoPlayer => 2,
            Mode::Instructions => 3,
        }
    }

    /// Whether paddles and ball are simulated in this mode
    pub fn is_match(self) -> bool {
        matches!(self, Mode::SinglePlayer | Mode::TwoPlayer)
    }
}

/// 2D vector in court units (y grows downward)
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub fn zero() -> Self {
        Vec2 { x: 0.0, y: 0.0 }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle, origin at the top-left corner
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Vertical midpoint
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Strict containment: points on the edge are outside
    pub fn contains_strict(&self, point: Vec2) -> bool {
        point.x > self.left()
            && point.x < self.right()
            && point.y > self.top()
            && point.y < self.bottom()
    }
}

/// The bordered play area
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Court {
    pub width: f32,
    pub height: f32,
    /// Gap between the window edge and the border on every side
    pub margin: f32,
}

impl Court {
    pub fn new(width: f32, height: f32, margin: f32) -> Self {
        Court {
            width,
            height,
            margin,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn border_left(&self) -> f32 {
        self.margin
    }

    pub fn border_right(&self) -> f32 {
        self.width - self.margin
    }

    pub fn border_top(&self) -> f32 {
        self.margin
    }

    pub fn border_bottom(&self) -> f32 {
        self.height - self.margin
    }

    /// Border corners in drawing order: top-left, bottom-left, bottom-right, top-right
    pub fn border(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.border_left(), self.border_top()),
            Vec2::new(self.border_left(), self.border_bottom()),
            Vec2::new(self.border_right(), self.border_bottom()),
            Vec2::new(self.border_right(), self.border_top()),
        ]
    }
}

/// Paddle state
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Paddle {
    pub side: Side,
    pub rect: Rect,
}

impl Paddle {
    pub fn new(side: Side, rect: Rect) -> Self {
        Paddle { side, rect }
    }
}

/// Ball state
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ball {
    /// Centre position
    pub pos: Vec2,
    /// Direction, each component ±1 after a serve and rescaled by bounces
    pub dir: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, dir: Vec2, radius: f32) -> Self {
        Ball { pos, dir, radius }
    }
}

/// Current ball and paddle speeds (units per frame)
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Speeds {
    pub ball: f32,
    pub left_paddle: f32,
    pub right_paddle: f32,
}

/// Things that happened during a step, in order
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    ModeChanged {
        from: Mode,
        to: Mode,
    },
    /// Start/pause toggled
    ActiveChanged(bool),
    PointScored {
        scorer: Side,
        score: [u32; 2], // New score after this point
    },
    SpeedRamped(Speeds),
}

/// View data for rendering
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct View {
    pub tick: Tick,
    pub mode: Mode,
    pub active: bool,
    /// Ball is held for the post-point serve delay
    pub serving: bool,
    pub court: Court,
    pub border: [Vec2; 4],
    pub left_paddle: Rect,
    pub right_paddle: Rect,
    pub ball_pos: Vec2,
    pub ball_radius: f32,
    pub ball_dir: Vec2,
    pub speeds: Speeds,
    pub score: [u32; 2], // [left, right] scores
    /// Menu item under the pointer
    pub hovered: Option<usize>,
}
