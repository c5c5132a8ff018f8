//! Mapping between terminal cells and court units.

use pong_core::{Rect as CourtRect, Vec2};
use ratatui::layout::Rect;

/// Court units per terminal column
pub const UNITS_PER_COL: f32 = 10.0;
/// Court units per terminal row; cells are roughly twice as tall as wide
pub const UNITS_PER_ROW: f32 = 20.0;

/// The terminal area the court is drawn into
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Viewport {
    pub area: Rect,
}

impl Viewport {
    pub fn new(area: Rect) -> Self {
        Self { area }
    }

    /// Court size that exactly fills the area
    pub fn court_size(&self) -> (f32, f32) {
        (
            f32::from(self.area.width) * UNITS_PER_COL,
            f32::from(self.area.height) * UNITS_PER_ROW,
        )
    }

    /// Court position at the centre of a cell, if the cell is inside the area
    pub fn to_court(&self, column: u16, row: u16) -> Option<Vec2> {
        let area = self.area;
        if column < area.left() || column >= area.right() || row < area.top() || row >= area.bottom()
        {
            return None;
        }

        Some(Vec2::new(
            (f32::from(column - area.x) + 0.5) * UNITS_PER_COL,
            (f32::from(row - area.y) + 0.5) * UNITS_PER_ROW,
        ))
    }

    /// Terminal cells covered by a court rectangle, clipped to the area
    pub fn to_cells(&self, rect: &CourtRect) -> Rect {
        let left = (rect.left() / UNITS_PER_COL).round().max(0.0) as u16;
        let top = (rect.top() / UNITS_PER_ROW).round().max(0.0) as u16;
        let right = (rect.right() / UNITS_PER_COL).round().max(0.0) as u16;
        let bottom = (rect.bottom() / UNITS_PER_ROW).round().max(0.0) as u16;

        let cells = Rect {
            x: self.area.x.saturating_add(left),
            y: self.area.y.saturating_add(top),
            width: right.saturating_sub(left).max(1),
            height: bottom.saturating_sub(top).max(1),
        };
        cells.intersection(self.area)
    }
}
