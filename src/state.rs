//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! Cards live in the browser, so the server only holds the model client and
//! the per-request time limit.

use std::sync::Arc;
use std::time::Duration;

use crate::llm::LlmStream;

/// Clone is required by Axum; the client is shared behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Optional LLM client. `None` when AI cards are disabled.
    pub llm: Option<Arc<dyn LlmStream>>,
    pub chat_max_duration: Duration,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Option<Arc<dyn LlmStream>>, chat_max_duration: Duration) -> Self {
        Self { llm, chat_max_duration }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
