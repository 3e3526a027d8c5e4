//! HTTP relay between chat clients and the completion provider

mod handlers;
mod types;

pub use handlers::create_router;
pub use types::*;

use crate::llm::{LlmService, SamplingSettings};
use std::sync::Arc;

/// Application state shared across handlers; read-only after start-up
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn LlmService>,
    pub sampling: SamplingSettings,
}

impl AppState {
    pub fn new(llm: Arc<dyn LlmService>, sampling: SamplingSettings) -> Self {
        Self { llm, sampling }
    }
}
