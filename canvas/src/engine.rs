use std::collections::HashSet;

use frames::{ChatMessage, ChatRequest};

use crate::camera::{Direction, Point, Viewport};
use crate::consts::{AI_CARD_GAP_PX, AI_PROMPT_SUFFIX, MIN_CARD_WIDTH, NEW_CARD_TEXT};
use crate::doc::{Card, CardId, CardStore};
use crate::input::{Button, InputState, Key, Modifiers, Target, UiState, WheelDelta};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    CardCreated(CardId),
    CardUpdated(CardId),
    CardDeleted(CardId),
    /// A new AI card needs its model request started.
    AiRequested { id: CardId, prompt: String },
    ViewportChanged,
    MenuChanged,
    RenderNeeded,
}

/// Core engine state: everything the board does between DOM events.
///
/// Holds no browser handles so it can be driven directly from tests.
#[derive(Debug, Clone)]
pub struct EngineCore {
    pub store: CardStore,
    pub viewport: Viewport,
    pub ui: UiState,
    pub input: InputState,
    /// Multiplier for card-drag movement (`innerWidth / outerWidth`), which
    /// tracks browser zoom.
    pub movement_scale: f64,
    ai_requested: HashSet<CardId>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            store: CardStore::new(),
            viewport: Viewport::default(),
            ui: UiState::default(),
            input: InputState::default(),
            movement_scale: 1.0,
            ai_requested: HashSet::new(),
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Replace the static cards, e.g. from the persistence blob.
    pub fn load_cards(&mut self, cards: Vec<Card>) {
        self.store.replace_cards(cards);
    }

    /// Update the drag movement scale from the window's inner/outer widths.
    pub fn set_window_widths(&mut self, inner_width: f64, outer_width: f64) {
        self.movement_scale = if outer_width > 0.0 && inner_width > 0.0 {
            inner_width / outer_width
        } else {
            1.0
        };
    }

    /// Commit markdown from the card editor.
    pub fn set_text(&mut self, id: &str, text: String) -> Vec<Action> {
        if self.store.update_text(id, text) {
            vec![Action::CardUpdated(id.to_owned())]
        } else {
            Vec::new()
        }
    }

    // --- Pointer input ---

    /// Handle a mouse-down on `target`, replaying DOM bubbling from the card
    /// parts out to the board.
    pub fn on_pointer_down(&mut self, target: &Target, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        if !matches!(target, Target::Menu(_)) && self.ui.menu_card_id.take().is_some() {
            actions.push(Action::MenuChanged);
        }

        match target {
            Target::Menu(_) => {}
            Target::ResizeHandle(id) => {
                if button == Button::Primary {
                    self.ui.resizing_id = Some(id.clone());
                    self.input = InputState::ResizingCard { id: id.clone() };
                }
            }
            Target::Card(id) => match button {
                Button::Primary => {
                    self.ui.selected_id = Some(id.clone());
                    self.input = InputState::DraggingCard { id: id.clone() };
                }
                Button::Middle => {}
                Button::Secondary => self.board_pointer_down(button),
            },
            Target::CardEditor(_) => {
                if button == Button::Secondary {
                    self.board_pointer_down(button);
                } else {
                    self.ui.selected_id = None;
                }
            }
            Target::Board => self.board_pointer_down(button),
        }

        actions.push(Action::RenderNeeded);
        actions
    }

    fn board_pointer_down(&mut self, button: Button) {
        self.ui.selected_id = None;
        self.ui.resizing_id = None;
        self.input = if button == Button::Secondary { InputState::Panning } else { InputState::Idle };
    }

    /// Handle pointer movement. `movement` is the raw `movementX/Y` delta in
    /// CSS pixels since the previous event.
    pub fn on_pointer_move(&mut self, movement: Point, _modifiers: Modifiers) -> Vec<Action> {
        match self.input.clone() {
            InputState::Idle => Vec::new(),
            InputState::DraggingCard { id } => {
                let delta = movement.scaled(self.movement_scale);
                let moved_static = self.store.update_position(&id, delta);
                let moved_ai = self.store.update_ai_card_position(&id, delta);
                if moved_static || moved_ai {
                    vec![Action::CardUpdated(id), Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
            InputState::ResizingCard { id } => {
                let Some(width) = self.store.card(&id).map(|c| c.width) else {
                    return Vec::new();
                };
                let new_width = (width + movement.x).max(MIN_CARD_WIDTH);
                if (new_width - width).abs() < f64::EPSILON {
                    return Vec::new();
                }
                self.store.resize_card(&id, new_width);
                vec![Action::CardUpdated(id), Action::RenderNeeded]
            }
            InputState::Panning => {
                self.viewport.pan_drag(movement);
                vec![Action::ViewportChanged, Action::RenderNeeded]
            }
        }
    }

    /// Handle mouse-up anywhere: every gesture ends.
    pub fn on_pointer_up(&mut self, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let was_idle = self.input.is_idle();
        self.input = InputState::Idle;
        self.ui.selected_id = None;
        self.ui.resizing_id = None;
        if was_idle { Vec::new() } else { vec![Action::RenderNeeded] }
    }

    /// Handle a wheel/trackpad scroll over the board.
    pub fn on_wheel(&mut self, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.viewport.scroll(delta, modifiers.shift);
        vec![Action::ViewportChanged, Action::RenderNeeded]
    }

    /// Handle a double-click. Only the empty board reacts, creating a card
    /// under the pointer.
    pub fn on_double_click(&mut self, target: &Target, screen_pt: Point) -> Vec<Action> {
        if *target != Target::Board {
            return Vec::new();
        }
        let world = self.viewport.screen_to_world(screen_pt);
        let id = self.store.add_card(NEW_CARD_TEXT, world);
        vec![Action::CardCreated(id), Action::RenderNeeded]
    }

    /// Handle a context-menu request. Card frames open their menu; the
    /// editor keeps the browser menu suppressed without opening ours.
    pub fn on_context_menu(&mut self, target: &Target) -> Vec<Action> {
        match target {
            Target::Card(id) | Target::ResizeHandle(id) => {
                self.ui.menu_card_id = Some(id.clone());
                vec![Action::MenuChanged, Action::RenderNeeded]
            }
            Target::Board | Target::CardEditor(_) | Target::Menu(_) => Vec::new(),
        }
    }

    // --- Keyboard ---

    /// Handle a key-down on `target`. `Delete` on a focused card frame
    /// removes it; inside the editor the key edits text instead.
    pub fn on_key_down(&mut self, target: &Target, key: &Key) -> Vec<Action> {
        match target {
            Target::Card(id) if key.is_delete() => self.delete_card(id),
            _ => Vec::new(),
        }
    }

    // --- Menu / controller ---

    /// Spawn an AI card to the right of card `id`, prompted with its text.
    pub fn ask_ai(&mut self, id: &str) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.ui.menu_card_id.take().is_some() {
            actions.push(Action::MenuChanged);
        }
        let Some(card) = self.store.card(id) else {
            return actions;
        };
        let prompt = card.text.clone();
        let position = Point::new(card.position.x + card.width + AI_CARD_GAP_PX, card.position.y);
        let ai_id = self.store.add_ai_card(prompt.clone(), position);
        actions.push(Action::AiRequested { id: ai_id, prompt });
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Remove the card (static or AI) with this id.
    pub fn delete_card(&mut self, id: &str) -> Vec<Action> {
        let removed_static = self.store.remove_card(id).is_some();
        let removed_ai = self.store.remove_ai_card(id).is_some();
        self.ai_requested.remove(id);
        for slot in [&mut self.ui.selected_id, &mut self.ui.resizing_id, &mut self.ui.menu_card_id] {
            if slot.as_deref() == Some(id) {
                *slot = None;
            }
        }
        let gesture_on_card = matches!(
            &self.input,
            InputState::DraggingCard { id: active } | InputState::ResizingCard { id: active } if active == id
        );
        if gesture_on_card {
            self.input = InputState::Idle;
        }
        if removed_static || removed_ai {
            vec![Action::CardDeleted(id.to_owned()), Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// Move the viewport one position-controller step.
    pub fn nudge(&mut self, direction: Direction) -> Vec<Action> {
        self.viewport.nudge(direction);
        vec![Action::ViewportChanged, Action::RenderNeeded]
    }

    // --- AI lifecycle ---

    /// Build the chat request for AI card `id`.
    ///
    /// Returns `None` if the card does not exist or its request was already
    /// started; each AI card asks the model exactly once.
    pub fn begin_ai_request(&mut self, id: &str) -> Option<ChatRequest> {
        let card = self.store.ai_card(id)?;
        if self.ai_requested.contains(id) {
            return None;
        }
        let content = format!("{}{AI_PROMPT_SUFFIX}", card.prompt);
        self.ai_requested.insert(id.to_owned());
        Some(ChatRequest { messages: vec![ChatMessage::user(content)] })
    }

    /// Append a streamed text delta to AI card `id`.
    pub fn ai_delta(&mut self, id: &str, delta: &str) -> Vec<Action> {
        if self.store.append_ai_text(id, delta) {
            vec![Action::CardUpdated(id.to_owned()), Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// The response finished: replace AI card `id` with a static card holding
    /// the full response. A card deleted mid-stream stays deleted.
    pub fn ai_finished(&mut self, id: &str) -> Vec<Action> {
        self.ai_requested.remove(id);
        let Some(content) = self.store.ai_card(id).map(|c| c.text.clone()) else {
            return Vec::new();
        };
        let Some(new_id) = self.store.resolve_ai_card(id, &content) else {
            return Vec::new();
        };
        if self.ui.selected_id.as_deref() == Some(id) {
            self.ui.selected_id = Some(new_id.clone());
            self.input = InputState::DraggingCard { id: new_id.clone() };
        }
        vec![Action::CardDeleted(id.to_owned()), Action::CardCreated(new_id), Action::RenderNeeded]
    }

    /// The request failed: keep the AI card on the board showing `message`.
    pub fn ai_failed(&mut self, id: &str, message: &str) -> Vec<Action> {
        if self.store.fail_ai_card(id, message) {
            vec![Action::CardUpdated(id.to_owned()), Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Queries ---

    /// The card currently being dragged, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.ui.selected_id.as_deref()
    }

    /// The current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Whether AI card `id` has an outstanding model request.
    #[must_use]
    pub fn ai_request_started(&self, id: &str) -> bool {
        self.ai_requested.contains(id)
    }
}
