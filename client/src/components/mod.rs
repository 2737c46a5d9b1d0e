//! UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the board from the `RwSignal<EngineCore>` context and
//! report user input back through `state::board::dispatch`.

pub mod card;
pub mod position_controller;
pub mod whiteboard;
