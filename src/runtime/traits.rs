//! Trait abstractions for runtime I/O
//!
//! The session driver only sees [`RelayClient`], so tests run it against a
//! mock instead of a live relay.

use crate::api::{ChatData, ChatEnvelope, ChatRequest, HealthResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Failure to obtain a reply from the relay
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Relay unreachable: {0}")]
    Transport(String),
    #[error("Relay returned HTTP {status}: {message}")]
    Rejected {
        status: u16,
        message: String,
        detail: Option<String>,
    },
    #[error("Unreadable relay response (HTTP {status}): {reason}")]
    Decode { status: u16, reason: String },
}

/// Client for the relay's chat endpoint
#[async_trait]
pub trait RelayClient: Send + Sync {
    /// Send one chat request and wait for the reply
    async fn send(&self, request: &ChatRequest) -> Result<ChatData, RelayError>;
}

#[async_trait]
impl<T: RelayClient + ?Sized> RelayClient for Arc<T> {
    async fn send(&self, request: &ChatRequest) -> Result<ChatData, RelayError> {
        (**self).send(request).await
    }
}

// ============================================================================
// Production Adapter
// ============================================================================

/// Relay client speaking JSON over HTTP
pub struct HttpRelayClient {
    client: Client,
    endpoint: String,
    health_endpoint: String,
}

impl HttpRelayClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RelayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RelayError::Transport(format!("Failed to create HTTP client: {e}")))?;

        let base = base_url.trim_end_matches('/');
        Ok(Self {
            client,
            endpoint: format!("{base}/api/chat"),
            health_endpoint: format!("{base}/health"),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Probe the relay's liveness route
    pub async fn health(&self, timeout: Duration) -> Result<HealthResponse, RelayError> {
        let response = self
            .client
            .get(&self.health_endpoint)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            return Err(RelayError::Rejected {
                status,
                message: "Health check failed".to_string(),
                detail: None,
            });
        }

        response.json().await.map_err(|e| RelayError::Decode {
            status,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatData, RelayError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::Transport(format!("Failed to read response: {e}")))?;

        // Failure envelopes come with 4xx/5xx statuses, so parse regardless
        let envelope: ChatEnvelope = serde_json::from_str(&body).map_err(|e| RelayError::Decode {
            status,
            reason: e.to_string(),
        })?;

        envelope.into_result().map_err(|failure| RelayError::Rejected {
            status,
            message: failure.message,
            detail: failure.error,
        })
    }
}
