//! Shared numeric constants for the canvas crate.

// ── Cards ───────────────────────────────────────────────────────

/// Width given to every newly created card, in CSS pixels.
pub const DEFAULT_CARD_WIDTH: f64 = 384.0;

/// Narrowest width a card can be resized down to.
pub const MIN_CARD_WIDTH: f64 = 50.0;

/// Horizontal gap between a card and the AI card spawned from it.
pub const AI_CARD_GAP_PX: f64 = 200.0;

/// Markdown placed in a card created by double-clicking the board.
pub const NEW_CARD_TEXT: &str = "# new card";

/// Suffix appended to a card's text when it is sent to the model.
pub const AI_PROMPT_SUFFIX: &str = ". response using markdown";

// ── Viewport ────────────────────────────────────────────────────

/// Fraction of pointer movement applied to the offset while drag-panning.
pub const PAN_DRAG_FACTOR: f64 = 0.5;

/// Offset step for a single press of the position controller arrows.
pub const NUDGE_STEP_PX: f64 = 5.0;
