#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{NUDGE_STEP_PX, PAN_DRAG_FACTOR};
use crate::input::WheelDelta;

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise scale.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self { x: self.x * factor, y: self.y * factor }
    }
}

/// Arrow direction used by the position controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Global pan translation applied to every rendered card.
///
/// `offset_x` / `offset_y` are in CSS pixels. There is no zoom: a card at
/// world position `p` renders at `p + offset`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Viewport {
    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point { x: screen.x - self.offset_x, y: screen.y - self.offset_y }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point { x: world.x + self.offset_x, y: world.y + self.offset_y }
    }

    /// Shift the offset by a raw delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Apply pointer movement from a drag-pan gesture.
    pub fn pan_drag(&mut self, movement: Point) {
        let delta = movement.scaled(PAN_DRAG_FACTOR);
        self.pan_by(delta.x, delta.y);
    }

    /// Apply a wheel/trackpad scroll. With shift held the vertical wheel
    /// axis pans horizontally.
    pub fn scroll(&mut self, delta: WheelDelta, shift: bool) {
        if shift {
            self.offset_x -= delta.dy;
        } else {
            self.offset_x -= delta.dx;
            self.offset_y -= delta.dy;
        }
    }

    /// Move the offset one controller step.
    pub fn nudge(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.offset_y -= NUDGE_STEP_PX,
            Direction::Down => self.offset_y += NUDGE_STEP_PX,
            Direction::Left => self.offset_x -= NUDGE_STEP_PX,
            Direction::Right => self.offset_x += NUDGE_STEP_PX,
        }
    }

    /// The offset as a point, for CSS `translate(...)`.
    #[must_use]
    pub fn offset(&self) -> Point {
        Point { x: self.offset_x, y: self.offset_y }
    }
}
