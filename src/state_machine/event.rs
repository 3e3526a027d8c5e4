//! Events that can occur in a conversation

use super::state::TurnId;
use chrono::{DateTime, Utc};

/// Events that trigger state transitions
///
/// Timestamps travel with the event so the transition stays pure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // User events
    InputChanged {
        text: String,
    },
    SuggestionPicked {
        index: usize,
    },
    Submit {
        text: String,
        at: DateTime<Utc>,
    },
    Reset {
        at: DateTime<Utc>,
    },

    // Relay completions, keyed by the placeholder they resolve
    ReplyReceived {
        turn_id: TurnId,
        content: String,
        at: DateTime<Utc>,
    },
    ReplyFailed {
        turn_id: TurnId,
        reason: String,
        at: DateTime<Utc>,
    },
}
