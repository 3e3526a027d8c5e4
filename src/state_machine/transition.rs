//! Pure state transition function

use super::state::{ChatState, TurnId, ERROR_REPLY, SUGGESTIONS};
use super::{Effect, Event};
use crate::api::{ChatRequest, ChatRole};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ChatState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ChatState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Events the state refuses; the caller keeps the previous state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Nothing to send")]
    EmptyInput,
    #[error("A reply is already pending")]
    ReplyPending,
    #[error("Turn {0} is no longer in the conversation")]
    UnknownTurn(TurnId),
    #[error("Turn {0} was already resolved")]
    TurnNotPending(TurnId),
    #[error("No suggestion at index {0}")]
    UnknownSuggestion(usize),
}

/// Pure transition function
///
/// Given the same state and event it always yields the same result; all I/O
/// is described by the returned effects.
pub fn transition(state: &ChatState, event: Event) -> Result<TransitionResult, TransitionError> {
    match event {
        Event::InputChanged { text } => {
            let mut next = state.clone();
            next.set_input(text);
            Ok(TransitionResult::new(next))
        }

        Event::SuggestionPicked { index } => {
            let suggestion = SUGGESTIONS
                .get(index)
                .ok_or(TransitionError::UnknownSuggestion(index))?;
            let mut next = state.clone();
            next.set_input((*suggestion).to_string());
            Ok(TransitionResult::new(next))
        }

        // Idle + Submit -> Pending
        Event::Submit { text, at } => {
            if text.trim().is_empty() {
                return Err(TransitionError::EmptyInput);
            }
            if state.is_pending() {
                return Err(TransitionError::ReplyPending);
            }

            // History is the transcript before this exchange
            let request = ChatRequest::new(text.clone(), state.history());

            let mut next = state.clone();
            next.push_turn(ChatRole::User, text, at, false);
            let turn_id = next.push_turn(ChatRole::Assistant, String::new(), at, true);
            next.set_input(String::new());

            Ok(TransitionResult::new(next)
                .with_effect(Effect::ScrollToNewest)
                .with_effect(Effect::request_reply(turn_id, request)))
        }

        // Pending + ReplyReceived -> Idle
        Event::ReplyReceived {
            turn_id,
            content,
            at,
        } => resolve(state, &turn_id, content, at),

        // Pending + ReplyFailed -> Idle, with the fixed apology
        Event::ReplyFailed { turn_id, at, .. } => {
            resolve(state, &turn_id, ERROR_REPLY.to_string(), at)
        }

        // Any + Reset -> Idle with greeting; in-flight replies become stale
        Event::Reset { at } => {
            let before = state.turns().len();
            let mut next = state.clone();
            next.reset_to_greeting(at);
            let result = TransitionResult::new(next);
            if before == 1 {
                Ok(result)
            } else {
                Ok(result.with_effect(Effect::ScrollToNewest))
            }
        }
    }
}

fn resolve(
    state: &ChatState,
    turn_id: &TurnId,
    content: String,
    at: chrono::DateTime<chrono::Utc>,
) -> Result<TransitionResult, TransitionError> {
    let mut next = state.clone();
    let turn = next
        .turn_mut(turn_id)
        .ok_or_else(|| TransitionError::UnknownTurn(turn_id.clone()))?;
    if !turn.pending {
        return Err(TransitionError::TurnNotPending(turn_id.clone()));
    }

    turn.content = content;
    turn.pending = false;
    turn.created_at = at;

    Ok(TransitionResult::new(next))
}
