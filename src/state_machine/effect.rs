//! Effects produced by state transitions

use super::state::TurnId;
use crate::api::ChatRequest;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Call the relay; the outcome comes back as a reply event for `turn_id`
    RequestReply {
        turn_id: TurnId,
        request: ChatRequest,
    },

    /// The turn count changed; bring the newest turn into view
    ScrollToNewest,
}

impl Effect {
    pub fn request_reply(turn_id: TurnId, request: ChatRequest) -> Self {
        Effect::RequestReply { turn_id, request }
    }
}
