//! Document model: cards, AI cards, and the in-memory store.
//!
//! This module defines the data that describes what is on the board: static
//! user-authored `Card`s and `AiCard` placeholders whose content is streamed
//! from the model. `CardStore` owns both lists and counts revisions of the
//! static list so the host knows when the persistence blob is stale.
//!
//! Data flows into this layer from local storage (JSON deserialization), from
//! the input engine (mutations), and from the chat stream (AI text deltas).
//! The renderer reads `cards()` then `ai_cards()` to determine draw order.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::consts::DEFAULT_CARD_WIDTH;

/// Unique identifier for a card. New ids are UUID v4 strings, but persisted
/// blobs may carry any string.
pub type CardId = String;

/// A user-authored markdown card, as stored in the persistence blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier for this card.
    pub id: CardId,
    /// Markdown source.
    pub text: String,
    /// Top-left corner in world coordinates.
    pub position: Point,
    /// Rendered width in CSS pixels.
    pub width: f64,
}

/// Progress of an AI card's model request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AiStatus {
    /// Created; the request has not produced any text yet.
    #[default]
    Pending,
    /// At least one text delta has arrived.
    Streaming,
    /// The request failed; the card stays on the board showing the message.
    Failed(String),
}

/// A placeholder card whose content is the model's streamed response.
#[derive(Debug, Clone, PartialEq)]
pub struct AiCard {
    pub id: CardId,
    /// Response text accumulated so far.
    pub text: String,
    pub position: Point,
    pub width: f64,
    /// Markdown of the card the request was spawned from.
    pub prompt: String,
    pub status: AiStatus,
}

/// In-memory store of static and AI cards.
#[derive(Debug, Clone, Default)]
pub struct CardStore {
    cards: Vec<Card>,
    ai_cards: Vec<AiCard>,
    revision: u64,
}

impl CardStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Static cards in insertion order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// AI cards in insertion order. Drawn above static cards.
    #[must_use]
    pub fn ai_cards(&self) -> &[AiCard] {
        &self.ai_cards
    }

    /// Counter bumped on every change to the static card list.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn ai_card(&self, id: &str) -> Option<&AiCard> {
        self.ai_cards.iter().find(|c| c.id == id)
    }

    /// Append a static card with the default width and return its id.
    pub fn add_card(&mut self, text: impl Into<String>, position: Point) -> CardId {
        let id = Uuid::new_v4().to_string();
        self.cards.push(Card { id: id.clone(), text: text.into(), position, width: DEFAULT_CARD_WIDTH });
        self.touch();
        id
    }

    /// Append an empty AI card awaiting a response to `prompt`.
    pub fn add_ai_card(&mut self, prompt: impl Into<String>, position: Point) -> CardId {
        let id = Uuid::new_v4().to_string();
        self.ai_cards.push(AiCard {
            id: id.clone(),
            text: String::new(),
            position,
            width: DEFAULT_CARD_WIDTH,
            prompt: prompt.into(),
            status: AiStatus::Pending,
        });
        id
    }

    /// Set a static card's width. AI cards are not resizable.
    pub fn resize_card(&mut self, id: &str, width: f64) -> bool {
        let Some(card) = self.card_mut(id) else {
            return false;
        };
        card.width = width;
        self.touch();
        true
    }

    pub fn remove_card(&mut self, id: &str) -> Option<Card> {
        let idx = self.cards.iter().position(|c| c.id == id)?;
        let card = self.cards.remove(idx);
        self.touch();
        Some(card)
    }

    pub fn remove_ai_card(&mut self, id: &str) -> Option<AiCard> {
        let idx = self.ai_cards.iter().position(|c| c.id == id)?;
        Some(self.ai_cards.remove(idx))
    }

    /// Shift a static card's position by `offset`.
    pub fn update_position(&mut self, id: &str, offset: Point) -> bool {
        let Some(card) = self.card_mut(id) else {
            return false;
        };
        card.position.x += offset.x;
        card.position.y += offset.y;
        self.touch();
        true
    }

    /// Shift an AI card's position by `offset`.
    pub fn update_ai_card_position(&mut self, id: &str, offset: Point) -> bool {
        let Some(card) = self.ai_card_mut(id) else {
            return false;
        };
        card.position.x += offset.x;
        card.position.y += offset.y;
        true
    }

    /// Replace a static card's markdown.
    pub fn update_text(&mut self, id: &str, text: impl Into<String>) -> bool {
        let Some(card) = self.card_mut(id) else {
            return false;
        };
        card.text = text.into();
        self.touch();
        true
    }

    /// Append a streamed text delta to an AI card.
    pub fn append_ai_text(&mut self, id: &str, delta: &str) -> bool {
        let Some(card) = self.ai_card_mut(id) else {
            return false;
        };
        card.text.push_str(delta);
        if card.status == AiStatus::Pending {
            card.status = AiStatus::Streaming;
        }
        true
    }

    /// Convert a finished AI card into a static card holding `content`.
    ///
    /// The new card takes the AI card's current position and width; the AI
    /// placeholder is discarded. Returns the id of the new static card.
    pub fn resolve_ai_card(&mut self, id: &str, content: &str) -> Option<CardId> {
        let ai = self.remove_ai_card(id)?;
        let new_id = self.add_card(content.trim(), ai.position);
        if let Some(card) = self.card_mut(&new_id) {
            card.width = ai.width;
        }
        Some(new_id)
    }

    /// Mark an AI card as failed with a human-readable message.
    pub fn fail_ai_card(&mut self, id: &str, message: impl Into<String>) -> bool {
        let Some(card) = self.ai_card_mut(id) else {
            return false;
        };
        card.status = AiStatus::Failed(message.into());
        true
    }

    /// Replace all static cards, e.g. from a validated persistence blob.
    pub fn replace_cards(&mut self, cards: Vec<Card>) {
        self.cards = cards;
        self.touch();
    }

    /// Total number of cards on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len() + self.ai_cards.len()
    }

    /// Returns `true` if the board holds no cards at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty() && self.ai_cards.is_empty()
    }

    fn card_mut(&mut self, id: &str) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    fn ai_card_mut(&mut self, id: &str) -> Option<&mut AiCard> {
        self.ai_cards.iter_mut().find(|c| c.id == id)
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
