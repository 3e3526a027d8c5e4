//! WorkSpaceAI chat: an HTTP relay in front of an OpenAI-compatible
//! completion service, and a terminal client that talks to it.

pub mod api;
pub mod llm;
pub mod prompt;
pub mod runtime;
pub mod state_machine;
pub mod tui;
