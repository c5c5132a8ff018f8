//! Start menu items and pointer hit testing.

use crate::config::Config;
use crate::types::{Court, Mode, Rect, Vec2};

/// A selectable start-menu entry
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub target: Mode,
}

/// Start-menu entries, top to bottom
pub const MENU_ITEMS: [MenuItem; 3] = [
    MenuItem {
        label: "Player vs Computer",
        target: Mode::SinglePlayer,
    },
    MenuItem {
        label: "Player vs Player",
        target: Mode::TwoPlayer,
    },
    MenuItem {
        label: "Instructions",
        target: Mode::Instructions,
    },
];

/// Screen rectangle of the item at `index`, stacked below the court centre
pub fn item_rect(court: &Court, config: &Config, index: usize) -> Rect {
    let center = court.center();
    Rect::new(
        center.x - config.menu_item_width / 2.0,
        center.y + config.menu_item_height * index as f32,
        config.menu_item_width,
        config.menu_item_height,
    )
}

/// Index of the item strictly containing `pointer`
pub fn hit_test(court: &Court, config: &Config, pointer: Vec2) -> Option<usize> {
    (0..MENU_ITEMS.len()).find(|&i| item_rect(court, config, i).contains_strict(pointer))
}
