//! Client state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! The board engine is the single source of truth; these modules connect it
//! to Leptos context, local storage, and streamed AI responses.

pub mod ai;
pub mod board;
pub mod persistence;
