//! Applying a streamed `/api/chat` response to an AI card.
//!
//! DESIGN
//! ======
//! The network task only moves bytes. Line splitting, decoding, and the
//! mapping from stream parts onto engine calls live here so the whole AI card
//! lifecycle can be exercised without a browser.

use canvas::engine::{Action, EngineCore};
use frames::{LineDecoder, StreamPart, decode_line};
use serde::Deserialize;

#[cfg(test)]
#[path = "ai_test.rs"]
mod ai_test;

/// Message shown on an AI card whose response stopped without finishing.
pub const INCOMPLETE_RESPONSE: &str = "response ended before completion";

/// Incremental reader for one AI card's response body.
#[derive(Debug)]
pub struct ResponseReader {
    id: String,
    decoder: LineDecoder,
    done: bool,
}

impl ResponseReader {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), decoder: LineDecoder::new(), done: false }
    }

    /// Whether a terminal part (finish or error) has been applied.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feed one body chunk. Parts after the terminal one are ignored.
    pub fn push(&mut self, engine: &mut EngineCore, chunk: &[u8]) -> Vec<Action> {
        let mut actions = Vec::new();
        for line in self.decoder.push(chunk) {
            actions.extend(self.apply_line(engine, &line));
        }
        actions
    }

    /// The body ended. Fails the card if no terminal part arrived.
    pub fn finish(&mut self, engine: &mut EngineCore) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(line) = self.decoder.finish() {
            actions.extend(self.apply_line(engine, &line));
        }
        if !self.done {
            self.done = true;
            actions.extend(engine.ai_failed(&self.id, INCOMPLETE_RESPONSE));
        }
        actions
    }

    /// The request failed before or while reading the body.
    pub fn fail(&mut self, engine: &mut EngineCore, message: &str) -> Vec<Action> {
        if self.done {
            return Vec::new();
        }
        self.done = true;
        engine.ai_failed(&self.id, message)
    }

    fn apply_line(&mut self, engine: &mut EngineCore, line: &str) -> Vec<Action> {
        if self.done {
            return Vec::new();
        }
        match decode_line(line) {
            Ok(part) => self.apply_part(engine, part),
            Err(e) => self.fail(engine, &format!("unreadable response: {e}")),
        }
    }

    fn apply_part(&mut self, engine: &mut EngineCore, part: StreamPart) -> Vec<Action> {
        self.done = part.is_terminal();
        match part {
            StreamPart::Text(delta) => engine.ai_delta(&self.id, &delta),
            StreamPart::FinishStep { .. } => Vec::new(),
            StreamPart::FinishMessage { .. } => engine.ai_finished(&self.id),
            StreamPart::Error(message) => engine.ai_failed(&self.id, &message),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Human-readable failure for a non-success `/api/chat` response.
pub fn http_error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => format!("request failed ({status}): {}", parsed.message),
        Err(_) => format!("request failed ({status})"),
    }
}
