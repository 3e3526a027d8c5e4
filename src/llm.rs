//! Completion provider abstraction
//!
//! The relay talks to the provider only through [`LlmService`], so tests can
//! swap in a stub without touching the process environment.

mod config;
mod error;
mod openai;
#[cfg(test)]
pub mod testing;
mod types;

pub use config::LlmConfig;
pub(crate) use config::parse_or;
pub use error::{LlmError, LlmErrorKind};
pub use openai::OpenAIService;
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for completion providers
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Make a single, non-streaming completion request
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Get the configured model ID
    fn model_id(&self) -> &str;

    /// Whether credentials are present; requests fail at call time otherwise
    fn is_configured(&self) -> bool {
        true
    }
}

/// Logging wrapper for LLM services
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    model = %response.model,
                    duration_ms = %duration.as_millis(),
                    messages = request.messages.len(),
                    prompt_tokens = ?response.usage.get("prompt_tokens"),
                    completion_tokens = ?response.usage.get("completion_tokens"),
                    "Completion request finished"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = ?e.kind,
                    "Completion request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn is_configured(&self) -> bool {
        self.inner.is_configured()
    }
}
