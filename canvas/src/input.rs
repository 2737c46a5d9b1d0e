//! Input model: modifier keys, mouse buttons, event targets, and the gesture state.
//!
//! This module defines the types consumed by the input engine. `Target` is the
//! innermost board element the host resolved a DOM event on; the engine
//! models bubbling from there outwards. `InputState` is the active gesture
//! being tracked between pointer-down and pointer-up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::CardId;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code. Unknown codes (back/forward) yield `None`.
    #[must_use]
    pub fn from_dom(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is_delete(&self) -> bool {
        self.0 == "Delete"
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// The board element an event landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Empty board surface.
    Board,
    /// The card frame (header strip, border, padding).
    Card(CardId),
    /// The markdown editor area inside a card.
    CardEditor(CardId),
    /// The thin strip on a card's right edge.
    ResizeHandle(CardId),
    /// The card's context menu.
    Menu(CardId),
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Card being dragged, if any.
    pub selected_id: Option<CardId>,
    /// Card whose width is being dragged, if any.
    pub resizing_id: Option<CardId>,
    /// Card whose context menu is open, if any.
    pub menu_card_id: Option<CardId>,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the board with the secondary button held.
    Panning,
    /// The user is moving a card across the board.
    DraggingCard {
        /// Id of the card being dragged.
        id: CardId,
    },
    /// The user is dragging a card's right edge.
    ResizingCard {
        /// Id of the card being resized.
        id: CardId,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
