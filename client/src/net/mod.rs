//! Network modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! The board talks to the server only to stream AI card responses; cards
//! themselves stay in browser storage.

pub mod chat;
