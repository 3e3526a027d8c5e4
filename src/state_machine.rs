//! Client-side conversation state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions:
//! every user action and every relay completion is an [`Event`] folded into
//! [`ChatState`] by [`transition`], which returns the [`Effect`]s to run.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{ChatState, Phase, Turn, TurnId, ERROR_REPLY, GREETING, SUGGESTIONS};
pub use transition::{transition, TransitionError, TransitionResult};
