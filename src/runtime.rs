//! Client-side runtime for a chat session
//!
//! Connects the pure state machine to a relay: user actions become events,
//! relay calls run on spawned tasks, and their outcomes come back as events
//! keyed by the placeholder turn they resolve.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::ChatRuntime;
pub use traits::*;
