//! Inline style strings for the world layer and cards.
//!
//! The world layer carries the viewport offset; each card is translated by
//! its own world position inside it, so a card lands on screen at
//! `position + offset`.

use canvas::camera::{Point, Viewport};

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

pub fn world_style(viewport: Viewport) -> String {
    format!("transform: translate({:.2}px, {:.2}px);", viewport.offset_x, viewport.offset_y)
}

pub fn card_style(position: Point, width: f64) -> String {
    format!(
        "transform: translate({:.2}px, {:.2}px); width: {:.2}px;",
        position.x, position.y, width
    )
}
