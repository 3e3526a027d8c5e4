//! Chat session runtime
//!
//! Owns the [`ChatState`], folds events through the pure transition, and
//! performs the relay calls the transition asks for.

use super::traits::RelayClient;
use crate::api::ChatRequest;
use crate::state_machine::{transition, ChatState, Effect, Event, TransitionError, TurnId};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Drives one conversation against any relay implementation
pub struct ChatRuntime<R>
where
    R: RelayClient + 'static,
{
    state: ChatState,
    relay: Arc<R>,
    /// Completions from spawned relay calls come back through here
    event_tx: mpsc::Sender<Event>,
    event_rx: mpsc::Receiver<Event>,
}

impl<R> ChatRuntime<R>
where
    R: RelayClient + 'static,
{
    pub fn new(relay: R) -> Self {
        let (event_tx, event_rx) = mpsc::channel(32);
        Self {
            state: ChatState::new(Utc::now()),
            relay: Arc::new(relay),
            event_tx,
            event_rx,
        }
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    /// Apply one event. Relay requests are started here; presentation
    /// effects are handed back to the caller.
    ///
    /// Rejected events (blank input, reply already pending, stale reply) are
    /// logged and otherwise ignored.
    pub fn dispatch(&mut self, event: Event) -> Vec<Effect> {
        let description = describe(&event);
        match transition(&self.state, event) {
            Ok(result) => {
                self.state = result.new_state;
                let mut presentation = Vec::new();
                for effect in result.effects {
                    match effect {
                        Effect::RequestReply { turn_id, request } => {
                            self.request_reply(turn_id, request);
                        }
                        other => presentation.push(other),
                    }
                }
                presentation
            }
            Err(TransitionError::UnknownTurn(turn_id)) => {
                tracing::debug!(%turn_id, "Dropping reply for a turn removed by reset");
                Vec::new()
            }
            Err(e) => {
                tracing::debug!(event = description, reason = %e, "Ignoring event");
                Vec::new()
            }
        }
    }

    pub fn submit(&mut self, text: impl Into<String>) -> Vec<Effect> {
        self.dispatch(Event::Submit {
            text: text.into(),
            at: Utc::now(),
        })
    }

    /// Submit whatever is in the input buffer
    pub fn submit_input(&mut self) -> Vec<Effect> {
        let text = self.state.input().to_string();
        self.submit(text)
    }

    pub fn reset(&mut self) -> Vec<Effect> {
        self.dispatch(Event::Reset { at: Utc::now() })
    }

    pub fn set_input(&mut self, text: impl Into<String>) -> Vec<Effect> {
        self.dispatch(Event::InputChanged { text: text.into() })
    }

    pub fn pick_suggestion(&mut self, index: usize) -> Vec<Effect> {
        self.dispatch(Event::SuggestionPicked { index })
    }

    /// Wait for the next relay completion
    pub async fn next_completion(&mut self) -> Option<Event> {
        self.event_rx.recv().await
    }

    /// Wait for one completion and apply it
    pub async fn apply_next_completion(&mut self) -> Vec<Effect> {
        match self.next_completion().await {
            Some(event) => self.dispatch(event),
            None => Vec::new(),
        }
    }

    fn request_reply(&self, turn_id: TurnId, request: ChatRequest) {
        let relay = Arc::clone(&self.relay);
        let event_tx = self.event_tx.clone();

        tracing::info!(
            %turn_id,
            history_len = request.conversation_history.len(),
            "Requesting reply from relay"
        );

        tokio::spawn(async move {
            let event = match relay.send(&request).await {
                Ok(data) => {
                    tracing::info!(%turn_id, model = %data.model, "Relay replied");
                    Event::ReplyReceived {
                        turn_id,
                        content: data.response,
                        at: Utc::now(),
                    }
                }
                Err(e) => {
                    tracing::warn!(%turn_id, error = %e, "Relay request failed");
                    Event::ReplyFailed {
                        turn_id,
                        reason: e.to_string(),
                        at: Utc::now(),
                    }
                }
            };

            // The runtime owns the receiver; a send error means it was dropped
            if event_tx.send(event).await.is_err() {
                tracing::debug!("Chat runtime gone before relay completed");
            }
        });
    }
}

fn describe(event: &Event) -> &'static str {
    match event {
        Event::InputChanged { .. } => "input_changed",
        Event::SuggestionPicked { .. } => "suggestion_picked",
        Event::Submit { .. } => "submit",
        Event::Reset { .. } => "reset",
        Event::ReplyReceived { .. } => "reply_received",
        Event::ReplyFailed { .. } => "reply_failed",
    }
}
