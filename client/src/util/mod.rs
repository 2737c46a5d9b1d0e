//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules keep DOM event mapping, layout strings and markdown
//! rendering out of components so they can be tested natively.

pub mod board_input;
pub mod layout;
pub mod markdown;
