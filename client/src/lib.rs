//! # client
//!
//! Leptos + WASM frontend for the markdown card board.
//!
//! This crate renders the board held by a `canvas::engine::EngineCore`,
//! wires DOM events into it, streams AI card responses from the server's
//! `/api/chat` endpoint, and persists static cards to local storage.

pub mod app;
pub mod components;
pub mod net;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount [`app::App`] on `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("console logger unavailable: {e}").into());
    }
    leptos::mount::mount_to_body(app::App);
}
