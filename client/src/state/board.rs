//! Board state shared through Leptos context.
//!
//! DESIGN
//! ======
//! The whole board lives in one `RwSignal<EngineCore>` provided by `App`.
//! Components call [`dispatch`] with an engine operation; the returned
//! actions that need side effects (starting a model request) are handled
//! here, and everything else re-renders through the signal.

use canvas::engine::{Action, EngineCore};
use leptos::prelude::*;

/// Run one engine operation and act on the returned actions.
pub fn dispatch(engine: RwSignal<EngineCore>, op: impl FnOnce(&mut EngineCore) -> Vec<Action>) {
    let Some(actions) = engine.try_update(op) else {
        return;
    };
    for action in actions {
        if let Action::AiRequested { id, .. } = action {
            crate::net::chat::stream_ai_card(engine, id);
        }
    }
}
