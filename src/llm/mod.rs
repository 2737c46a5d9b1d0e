//! LLM: streaming chat adapter behind `/api/chat`.
//!
//! DESIGN
//! ======
//! Configured from environment variables. The only provider today is Ollama's
//! OpenAI-compatible endpoint; `LLM_PROVIDER=none` turns AI cards off without
//! failing startup. Handlers depend on the [`LlmStream`] trait so tests can
//! substitute scripted streams.

pub mod config;
pub mod ollama;
pub mod types;

use std::sync::Arc;

use config::{LlmConfig, LlmProviderKind};
pub use types::{LlmError, LlmStream, StreamEvent, TextStream};

/// Build the streaming client from a parsed typed config.
///
/// Returns `Ok(None)` when the provider is disabled.
///
/// # Errors
///
/// Returns an error if the provider HTTP client fails to build.
pub fn from_config(config: &LlmConfig) -> Result<Option<Arc<dyn LlmStream>>, LlmError> {
    match config.provider {
        LlmProviderKind::Ollama => Ok(Some(Arc::new(ollama::OllamaClient::new(config)?))),
        LlmProviderKind::Disabled => Ok(None),
    }
}
