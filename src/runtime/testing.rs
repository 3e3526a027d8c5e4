//! Mock implementations for testing
//!
//! These mocks let the runtime be exercised without a live relay.

use super::traits::{RelayClient, RelayError};
use crate::api::{ChatData, ChatRequest};
use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

// ============================================================================
// Mock Relay Client
// ============================================================================

/// Mock relay that returns queued replies
pub struct MockRelayClient {
    replies: Mutex<VecDeque<Result<ChatData, RelayError>>>,
    /// Record of all requests made
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl MockRelayClient {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply with the given text
    pub fn queue_reply(&self, response: &str) {
        self.replies.lock().unwrap().push_back(Ok(ChatData {
            response: response.to_string(),
            model: "mock-model".to_string(),
            usage: json!({ "total_tokens": 1 }),
        }));
    }

    /// Queue a failure
    pub fn queue_error(&self, error: RelayError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn next_reply(&self) -> Result<ChatData, RelayError> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RelayError::Transport("No mock reply queued".to_string())))
    }
}

impl Default for MockRelayClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RelayClient for MockRelayClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatData, RelayError> {
        self.requests.lock().unwrap().push(request.clone());
        self.next_reply()
    }
}

// ============================================================================
// Delayed Mock Relay Client (for in-flight testing)
// ============================================================================

/// Mock relay that holds each reply for a fixed delay
pub struct DelayedMockRelayClient {
    inner: MockRelayClient,
    delay: Duration,
    /// Notified when a request starts (for test synchronization)
    pub request_started: Arc<Notify>,
}

impl DelayedMockRelayClient {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MockRelayClient::new(),
            delay,
            request_started: Arc::new(Notify::new()),
        }
    }

    pub fn queue_reply(&self, response: &str) {
        self.inner.queue_reply(response);
    }

    pub fn call_count(&self) -> usize {
        self.inner.call_count()
    }
}

#[async_trait]
impl RelayClient for DelayedMockRelayClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatData, RelayError> {
        self.inner.requests.lock().unwrap().push(request.clone());
        // notify_one keeps a permit if the test is not waiting yet
        self.request_started.notify_one();
        tokio::time::sleep(self.delay).await;
        self.inner.next_reply()
    }
}
