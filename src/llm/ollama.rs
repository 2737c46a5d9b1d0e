//! Streaming client for Ollama's OpenAI-compatible chat completions endpoint.
//!
//! Posts `{base_url}/chat/completions` with `stream: true` and turns the
//! server-sent event body into [`StreamEvent`]s. Any server that speaks the
//! same dialect works, which is why the bearer token is optional.

use std::collections::VecDeque;
use std::fmt::Display;
use std::pin::Pin;
use std::time::Duration;

use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};

use frames::{ChatMessage, FinishReason, LineDecoder, Usage};

use super::config::LlmConfig;
use super::types::{LlmError, LlmStream, StreamEvent, TextStream};

pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl OllamaClient {
    /// Build a client from typed config.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait::async_trait]
impl LlmStream for OllamaClient {
    async fn stream_chat(&self, messages: &[ChatMessage]) -> Result<TextStream, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = CcStreamRequest {
            model: &self.model,
            messages,
            stream: true,
            stream_options: CcStreamOptions { include_usage: true },
        };

        let mut request = self.http.post(url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(text) => text,
                Err(e) => e.to_string(),
            };
            return Err(LlmError::ApiResponse { status: status.as_u16(), body });
        }

        Ok(sse_events(response.bytes_stream()))
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct CcStreamRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    stream_options: CcStreamOptions,
}

#[derive(Serialize)]
struct CcStreamOptions {
    include_usage: bool,
}

#[derive(Deserialize)]
struct CcChunk {
    #[serde(default)]
    choices: Vec<CcChoice>,
    #[serde(default)]
    usage: Option<CcUsage>,
    #[serde(default)]
    error: Option<CcError>,
}

#[derive(Deserialize)]
struct CcChoice {
    #[serde(default)]
    delta: CcDelta,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize, Default)]
struct CcDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct CcUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

#[derive(Deserialize)]
struct CcError {
    message: String,
}

// =============================================================================
// SSE PARSING
// =============================================================================

/// One decoded `data:` payload.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SsePayload {
    Done,
    Chunk {
        delta: Option<String>,
        finish_reason: Option<FinishReason>,
        usage: Option<Usage>,
    },
}

pub(crate) fn parse_data_payload(payload: &str) -> Result<SsePayload, LlmError> {
    if payload.trim() == "[DONE]" {
        return Ok(SsePayload::Done);
    }

    let chunk: CcChunk = serde_json::from_str(payload).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    if let Some(error) = chunk.error {
        return Err(LlmError::Upstream(error.message));
    }

    let first = chunk.choices.into_iter().next();
    let (delta, finish_reason) = match first {
        Some(choice) => (
            choice.delta.content.filter(|text| !text.is_empty()),
            choice.finish_reason.as_deref().map(map_finish_reason),
        ),
        None => (None, None),
    };
    let usage = chunk.usage.map(|u| Usage {
        prompt_tokens: u.prompt_tokens,
        completion_tokens: u.completion_tokens,
    });

    Ok(SsePayload::Chunk { delta, finish_reason, usage })
}

pub(crate) fn map_finish_reason(raw: &str) -> FinishReason {
    match raw {
        "stop" => FinishReason::Stop,
        "length" => FinishReason::Length,
        "content_filter" => FinishReason::ContentFilter,
        "tool_calls" | "function_call" => FinishReason::ToolCalls,
        _ => FinishReason::Other,
    }
}

struct SseState<S> {
    bytes: Pin<Box<S>>,
    decoder: LineDecoder,
    queued: VecDeque<Result<StreamEvent, LlmError>>,
    finish_reason: Option<FinishReason>,
    usage: Usage,
    done: bool,
}

impl<S> SseState<S> {
    fn handle_line(&mut self, line: &str) {
        if self.done {
            return;
        }
        // Comments, `event:` and `id:` lines carry nothing we use.
        let Some(payload) = line.strip_prefix("data:").map(str::trim_start) else {
            return;
        };
        match parse_data_payload(payload) {
            Ok(SsePayload::Done) => self.finish(),
            Ok(SsePayload::Chunk { delta, finish_reason, usage }) => {
                if let Some(text) = delta {
                    self.queued.push_back(Ok(StreamEvent::Delta(text)));
                }
                if finish_reason.is_some() {
                    self.finish_reason = finish_reason;
                }
                if let Some(usage) = usage {
                    self.usage = usage;
                }
            }
            Err(e) => self.fail(e),
        }
    }

    fn end_of_body(&mut self) {
        if let Some(line) = self.decoder.finish() {
            self.handle_line(&line);
        }
        if self.done {
            return;
        }
        if self.finish_reason.is_some() {
            self.finish();
        } else {
            self.fail(LlmError::Upstream("stream ended before completion".into()));
        }
    }

    fn finish(&mut self) {
        let finish_reason = self.finish_reason.unwrap_or(FinishReason::Stop);
        self.queued
            .push_back(Ok(StreamEvent::Finished { finish_reason, usage: self.usage }));
        self.done = true;
    }

    fn fail(&mut self, err: LlmError) {
        self.queued.push_back(Err(err));
        self.done = true;
    }
}

/// Turn a raw SSE byte stream into chat events.
///
/// The returned stream yields deltas in arrival order and ends with exactly
/// one `Finished` event or one error.
pub(crate) fn sse_events<S, B, E>(bytes: S) -> TextStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send,
    E: Display + Send,
{
    let state = SseState {
        bytes: Box::pin(bytes),
        decoder: LineDecoder::new(),
        queued: VecDeque::new(),
        finish_reason: None,
        usage: Usage::default(),
        done: false,
    };

    futures::stream::unfold(state, |mut st| async move {
        loop {
            if let Some(item) = st.queued.pop_front() {
                return Some((item, st));
            }
            if st.done {
                return None;
            }
            match st.bytes.next().await {
                Some(Ok(chunk)) => {
                    for line in st.decoder.push(chunk.as_ref()) {
                        st.handle_line(&line);
                    }
                }
                Some(Err(e)) => st.fail(LlmError::ApiRequest(e.to_string())),
                None => st.end_of_body(),
            }
        }
    })
    .boxed()
}

#[cfg(test)]
#[path = "ollama_test.rs"]
mod tests;
