//! Conversation state types

use crate::api::{ChatRole, HistoryEntry};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Canned assistant greeting shown at start-up and after a reset
pub const GREETING: &str = "Hello! I'm WorkSpaceAI, your AI-powered unified work assistant designed to improve productivity by summarizing emails, documents, and pull requests, and by answering work-related questions. I act as a professional, intelligent, and concise assistant. How can I help you today?";

/// Content written into the pending turn when the relay call fails
pub const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Conversation starters offered to the user
pub const SUGGESTIONS: [&str; 6] = [
    "Summarize this email for me",
    "Analyze this document and extract key points",
    "Help me draft a professional response",
    "Create a summary of this pull request",
    "Give me productivity tips for today",
    "Help me prepare for a meeting",
];

/// Opaque, session-unique turn identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TurnId(String);

impl TurnId {
    fn from_seq(seq: u64) -> Self {
        Self(format!("turn-{seq}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub id: TurnId,
    pub role: ChatRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub pending: bool,
}

/// Exchange phase derived from the turn sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// No reply outstanding; `submit` is accepted
    Idle,
    /// One assistant placeholder is waiting for the relay
    Pending { turn_id: TurnId },
}

/// Client-side conversation state
///
/// Only [`super::transition`] produces new states, which keeps the
/// at-most-one-pending invariant in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatState {
    turns: Vec<Turn>,
    input: String,
    /// Never rewound, so ids from before a reset cannot be handed out again
    next_seq: u64,
}

impl ChatState {
    /// Fresh conversation holding only the greeting
    pub fn new(at: DateTime<Utc>) -> Self {
        let mut state = Self {
            turns: Vec::new(),
            input: String::new(),
            next_seq: 1,
        };
        state.reset_to_greeting(at);
        state
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Text currently being composed
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn phase(&self) -> Phase {
        match self.pending_turn() {
            Some(turn) => Phase::Pending {
                turn_id: turn.id.clone(),
            },
            None => Phase::Idle,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending_turn().is_some()
    }

    pub fn pending_turn(&self) -> Option<&Turn> {
        self.turns.iter().find(|t| t.pending)
    }

    pub fn turn(&self, id: &TurnId) -> Option<&Turn> {
        self.turns.iter().find(|t| &t.id == id)
    }

    /// Transcript sent as `conversationHistory`; pending placeholders are
    /// never part of it
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.turns
            .iter()
            .filter(|t| !t.pending)
            .map(|t| HistoryEntry::new(t.role, t.content.clone()))
            .collect()
    }

    // Mutators below are only reachable from the transition function.

    pub(super) fn set_input(&mut self, text: String) {
        self.input = text;
    }

    pub(super) fn push_turn(
        &mut self,
        role: ChatRole,
        content: String,
        at: DateTime<Utc>,
        pending: bool,
    ) -> TurnId {
        let id = TurnId::from_seq(self.next_seq);
        self.next_seq += 1;
        self.turns.push(Turn {
            id: id.clone(),
            role,
            content,
            created_at: at,
            pending,
        });
        id
    }

    pub(super) fn turn_mut(&mut self, id: &TurnId) -> Option<&mut Turn> {
        self.turns.iter_mut().find(|t| &t.id == id)
    }

    pub(super) fn reset_to_greeting(&mut self, at: DateTime<Utc>) {
        self.turns.clear();
        self.push_turn(ChatRole::Assistant, GREETING.to_string(), at, false);
    }
}
