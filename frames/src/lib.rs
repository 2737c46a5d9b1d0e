//! Shared chat request types and the streamed-text line codec.
//!
//! This crate owns the wire representation used by both the server and the
//! client for `/api/chat`. Responses are newline-delimited parts of the form
//! `<code>:<json>`, the data-stream framing understood by AI SDK clients, so
//! every part decodes independently of the chunk boundaries it arrived on.

use serde::{Deserialize, Serialize};

/// Response header announcing the data-stream framing.
pub const DATA_STREAM_HEADER: &str = "x-vercel-ai-data-stream";

/// Framing version carried in [`DATA_STREAM_HEADER`].
pub const DATA_STREAM_VERSION: &str = "v1";

/// Error returned by [`decode_line`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The line has no `<code>:` prefix.
    #[error("malformed stream line: {0:?}")]
    Malformed(String),
    /// The part code is not one this codec understands.
    #[error("unknown stream part code: {0:?}")]
    UnknownCode(String),
    /// The payload after the code is not the JSON the code requires.
    #[error("invalid stream part payload: {0}")]
    Payload(#[from] serde_json::Error),
}

// =============================================================================
// CHAT REQUEST
// =============================================================================

/// Author of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single message in a chat conversation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// Body of `POST /api/chat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

// =============================================================================
// STREAM PARTS
// =============================================================================

/// Why the model stopped generating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
    Error,
    Other,
    #[serde(other)]
    Unknown,
}

/// Token accounting reported with finish parts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinishPayload {
    finish_reason: FinishReason,
    usage: Usage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_continued: Option<bool>,
}

/// One line of a streamed chat response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamPart {
    /// `0:` a text delta to append to the response.
    Text(String),
    /// `3:` an error message; the stream ends after it.
    Error(String),
    /// `e:` end of one generation step.
    FinishStep { finish_reason: FinishReason, usage: Usage },
    /// `d:` end of the whole response.
    FinishMessage { finish_reason: FinishReason, usage: Usage },
}

impl StreamPart {
    fn code(&self) -> &'static str {
        match self {
            Self::Text(_) => "0",
            Self::Error(_) => "3",
            Self::FinishStep { .. } => "e",
            Self::FinishMessage { .. } => "d",
        }
    }

    /// Whether no further parts follow this one.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Error(_) | Self::FinishMessage { .. })
    }
}

/// Encode a part as a newline-terminated line.
///
/// # Errors
///
/// Returns [`CodecError::Payload`] if the payload cannot be serialized, which
/// does not happen for the string and struct payloads defined here.
pub fn encode_part(part: &StreamPart) -> Result<String, CodecError> {
    let payload = match part {
        StreamPart::Text(text) | StreamPart::Error(text) => serde_json::to_string(text)?,
        StreamPart::FinishStep { finish_reason, usage } => serde_json::to_string(&FinishPayload {
            finish_reason: *finish_reason,
            usage: *usage,
            is_continued: Some(false),
        })?,
        StreamPart::FinishMessage { finish_reason, usage } => serde_json::to_string(&FinishPayload {
            finish_reason: *finish_reason,
            usage: *usage,
            is_continued: None,
        })?,
    };
    Ok(format!("{}:{payload}\n", part.code()))
}

/// Decode a single line (with or without its trailing newline).
///
/// # Errors
///
/// Returns [`CodecError::Malformed`] when the `<code>:` prefix is missing,
/// [`CodecError::UnknownCode`] for codes this codec does not handle, and
/// [`CodecError::Payload`] when the JSON payload does not match the code.
pub fn decode_line(line: &str) -> Result<StreamPart, CodecError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some((code, payload)) = line.split_once(':') else {
        return Err(CodecError::Malformed(line.to_owned()));
    };
    match code {
        "0" => Ok(StreamPart::Text(serde_json::from_str(payload)?)),
        "3" => Ok(StreamPart::Error(serde_json::from_str(payload)?)),
        "e" => {
            let p: FinishPayload = serde_json::from_str(payload)?;
            Ok(StreamPart::FinishStep { finish_reason: p.finish_reason, usage: p.usage })
        }
        "d" => {
            let p: FinishPayload = serde_json::from_str(payload)?;
            Ok(StreamPart::FinishMessage { finish_reason: p.finish_reason, usage: p.usage })
        }
        other => Err(CodecError::UnknownCode(other.to_owned())),
    }
}

// =============================================================================
// LINE DECODER
// =============================================================================

/// Accumulates raw body chunks and yields complete lines.
///
/// Chunks may split a line, or a multi-byte UTF-8 sequence, anywhere; bytes
/// are held until the terminating `\n` arrives.
#[derive(Debug, Default)]
pub struct LineDecoder {
    buffer: Vec<u8>,
}

impl LineDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return every line it completed, without terminators.
    /// Blank lines are skipped.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);
        let mut lines = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&raw[..pos]);
            let line = line.trim_end_matches('\r');
            if !line.is_empty() {
                lines.push(line.to_owned());
            }
        }
        lines
    }

    /// Flush a final unterminated line, if any.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let raw = std::mem::take(&mut self.buffer);
        let line = String::from_utf8_lossy(&raw).trim_end_matches('\r').to_owned();
        (!line.is_empty()).then_some(line)
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
