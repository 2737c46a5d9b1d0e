//! Whiteboard engine for the markdown card board.
//!
//! This crate is compiled to WebAssembly and runs in the browser, but nothing
//! outside [`persist::BrowserStorage`] touches the DOM. It owns the
//! interaction model of the board: translating raw input events into card
//! mutations, maintaining the viewport offset for panning, driving the AI card
//! lifecycle, and serializing the card list for local persistence. The host UI
//! layer is responsible only for wiring DOM events to the engine and rendering
//! the resulting state.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::EngineCore`] state machine |
//! | [`doc`] | Card types and the in-memory [`doc::CardStore`] |
//! | [`camera`] | Viewport offset and coordinate conversions |
//! | [`input`] | Input event types and the gesture state |
//! | [`persist`] | Local persistence blob encode/validate/load/save |
//! | [`consts`] | Shared numeric constants (card widths, pan factors, etc.) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod input;
pub mod persist;
