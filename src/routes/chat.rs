//! `/api/chat`: streams a model response as data-stream lines.
//!
//! DESIGN
//! ======
//! The request is validated and the upstream stream opened before any bytes
//! are sent, so those failures get a real HTTP status. Once the body starts,
//! failures can only be reported in-band: the stream ends with a `3:` error
//! part instead of the `e:`/`d:` finish pair.

use std::convert::Infallible;

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures::{Stream, StreamExt};
use tokio::time::Instant;

use frames::{ChatRequest, DATA_STREAM_HEADER, DATA_STREAM_VERSION, StreamPart, encode_part};

use crate::llm::{LlmError, StreamEvent, TextStream};
use crate::state::AppState;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("messages must not be empty")]
    EmptyMessages,
    #[error("AI is not configured on this server")]
    Disabled,
    #[error(transparent)]
    Upstream(#[from] LlmError),
}

impl ChatError {
    fn status(&self) -> StatusCode {
        match self {
            Self::EmptyMessages => StatusCode::BAD_REQUEST,
            Self::Disabled => StatusCode::SERVICE_UNAVAILABLE,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyMessages => "E_EMPTY_MESSAGES",
            Self::Disabled => "E_AI_DISABLED",
            Self::Upstream(e) => e.error_code(),
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.error_code(),
            "message": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}

// =============================================================================
// HANDLER
// =============================================================================

pub async fn chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Result<Response, ChatError> {
    if request.messages.is_empty() {
        return Err(ChatError::EmptyMessages);
    }
    let Some(llm) = state.llm.clone() else {
        return Err(ChatError::Disabled);
    };

    let deadline = Instant::now() + state.chat_max_duration;
    tracing::info!(model = llm.model(), messages = request.messages.len(), "chat stream requested");

    let events = match llm.stream_chat(&request.messages).await {
        Ok(events) => events,
        Err(e) => {
            tracing::warn!(error = %e, code = e.error_code(), retryable = e.retryable(), "chat stream failed to start");
            return Err(ChatError::Upstream(e));
        }
    };

    let headers = [
        ("content-type", "text/plain; charset=utf-8"),
        (DATA_STREAM_HEADER, DATA_STREAM_VERSION),
    ];
    Ok((headers, Body::from_stream(encode_events(events, deadline))).into_response())
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encode model events as data-stream lines, stopping at `deadline`.
///
/// Every stream ends with either the `e:`/`d:` finish pair or one `3:` part.
pub(crate) fn encode_events(events: TextStream, deadline: Instant) -> impl Stream<Item = Result<String, Infallible>> + Send {
    futures::stream::unfold(Some(events), move |events| async move {
        let mut events = events?;
        let (parts, more) = match tokio::time::timeout_at(deadline, events.next()).await {
            Ok(Some(Ok(StreamEvent::Delta(text)))) => (vec![StreamPart::Text(text)], true),
            Ok(Some(Ok(StreamEvent::Finished { finish_reason, usage }))) => {
                tracing::info!(?finish_reason, usage.prompt = usage.prompt_tokens, usage.completion = usage.completion_tokens, "chat stream finished");
                (
                    vec![
                        StreamPart::FinishStep { finish_reason, usage },
                        StreamPart::FinishMessage { finish_reason, usage },
                    ],
                    false,
                )
            }
            Ok(Some(Err(e))) => {
                tracing::warn!(error = %e, code = e.error_code(), "chat stream failed");
                (vec![StreamPart::Error(e.to_string())], false)
            }
            Ok(None) => (vec![StreamPart::Error("stream ended before completion".into())], false),
            Err(_) => {
                tracing::warn!("chat stream hit its time limit");
                (vec![StreamPart::Error("response took too long".into())], false)
            }
        };
        Some((Ok(render_parts(&parts)), more.then_some(events)))
    })
}

fn render_parts(parts: &[StreamPart]) -> String {
    let mut out = String::new();
    for part in parts {
        match encode_part(part) {
            Ok(line) => out.push_str(&line),
            Err(e) => tracing::error!(error = %e, "failed to encode stream part"),
        }
    }
    out
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
