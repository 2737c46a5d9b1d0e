//! LLM types: provider-neutral stream events and errors.

use futures::stream::BoxStream;

use frames::{ChatMessage, FinishReason, Usage};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The HTTP request to the model server failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The model server returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// A streamed chunk could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The model server reported an error inside the stream.
    #[error("model error: {0}")]
    Upstream(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl LlmError {
    /// Stable machine-readable code for API error bodies.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::Upstream(_) => "E_UPSTREAM",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    /// Whether a caller could reasonably try the same request again.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// STREAM EVENTS
// =============================================================================

/// One event from a streamed chat completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Text to append to the response.
    Delta(String),
    /// Generation ended. Always the last event of a successful stream.
    Finished { finish_reason: FinishReason, usage: Usage },
}

/// Boxed stream of chat events. Ends after `Finished` or the first error.
pub type TextStream = BoxStream<'static, Result<StreamEvent, LlmError>>;

// =============================================================================
// LLM STREAM TRAIT
// =============================================================================

/// Provider-neutral async trait for streamed chat. Enables mocking in tests.
#[async_trait::async_trait]
pub trait LlmStream: Send + Sync {
    /// Start a streamed chat request.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request cannot be sent or the server
    /// rejects it before streaming begins. Failures after that point arrive
    /// as `Err` items on the returned stream.
    async fn stream_chat(&self, messages: &[ChatMessage]) -> Result<TextStream, LlmError>;

    /// Model name requests are sent to.
    fn model(&self) -> &str;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
